//! Progress notification port
//!
//! Defines the interface for reporting in-flight requests of the
//! screening flow (typing indicator, loading overlay).

/// The request classes of the screening flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    CreateSession,
    SendTurn,
    Finalize,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::CreateSession => "create_session",
            RequestKind::SendTurn => "send_turn",
            RequestKind::Finalize => "finalize",
        }
    }

    /// Text shown while the request is pending
    pub fn pending_label(&self) -> &'static str {
        match self {
            RequestKind::CreateSession => "세션 생성 중...",
            RequestKind::SendTurn => "라포가 답변을 작성하고 있어요...",
            RequestKind::Finalize => "분석 중...",
        }
    }

    /// Notice shown to the user when the request fails
    pub fn failure_notice(&self) -> &'static str {
        match self {
            RequestKind::CreateSession => "세션 생성 실패",
            RequestKind::SendTurn => "메시지 전송 오류",
            RequestKind::Finalize => "리포트 생성 오류",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback for request progress during the screening flow
///
/// Implementations live in the presentation layer.
pub trait FlowProgress: Send + Sync {
    /// Called right before a request is sent
    fn on_request_start(&self, kind: RequestKind);

    /// Called once the request resolved, successfully or not
    fn on_request_end(&self, kind: RequestKind, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl FlowProgress for NoProgress {
    fn on_request_start(&self, _kind: RequestKind) {}
    fn on_request_end(&self, _kind: RequestKind, _success: bool) {}
}
