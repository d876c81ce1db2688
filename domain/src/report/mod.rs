//! Report domain.
//!
//! - [`entities::Report`]: scores, risk and highlights returned by finalize
//! - [`risk::RiskBand`]: Normal / Caution / High bucket of the risk level

pub mod entities;
pub mod risk;

/// Footnote printed under every report
pub const REPORT_FOOTNOTE: &str =
    "본 결과는 상담 전 참고용 사전 점검 자료이며, 의학적 진단이나 치료를 대체하지 않습니다.";
