//! Console output formatter

use crate::output::formatter::OutputFormatter;
use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};
use rapport_application::LoginOutcome;
use rapport_domain::{
    BOT_GREETING, CRISIS_NOTICE, Choice, ConsentInput, Counselor, Inquiry, Message, Metric,
    Progress, REPORT_FOOTNOTE, Report, RiskBand, UserProfile, truncate,
};

/// Byte limit for the focus line in the counselor list
const FOCUS_PREVIEW_LEN: usize = 120;

/// Cells in a score bar
const BAR_WIDTH: usize = 20;

/// Public directory of regional mental health centers
pub const HELP_DIRECTORY_URL: &str = "https://www.data.go.kr/data/3049990/fileData.do";

/// Formats results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    // ==================== Screening ====================

    /// One transcript turn
    pub fn message(message: &Message) -> String {
        if message.is_user() {
            format!("{} {}", "나 ›".green().bold(), message.text)
        } else {
            format!("{} {}", "라포 ›".cyan().bold(), message.text)
        }
    }

    pub fn greeting() -> String {
        Self::message(&Message::bot(BOT_GREETING))
    }

    /// `진행 상황 [####------] 3/10 질문`
    pub fn progress(progress: &Progress) -> String {
        let filled = (progress.percentage() / 10.0).round() as usize;
        format!(
            "{} [{}{}] {} 질문",
            "진행 상황".dimmed(),
            "#".repeat(filled).green(),
            "-".repeat(10 - filled.min(10)),
            progress.counter_label()
        )
    }

    pub fn consent_intro() -> String {
        let mut output = String::new();
        output.push_str(&Self::header("사전 점검 동의"));
        output.push('\n');
        output.push_str("라포는 상담 전 사전 점검을 위한 텍스트 대화 도구입니다.\n");
        output.push_str("대화 원문은 세션 종료 시 삭제되며, 본 리포트는 진단·치료가 아닙니다.\n");
        output
    }

    pub fn consent_summary(consent: &ConsentInput) -> String {
        let value = |v: Option<&str>| v.unwrap_or("-").to_string();
        format!(
            "{} {} / {} / {} / {}",
            "선택한 정보:".dimmed(),
            value(consent.gender.map(|g| g.label())),
            value(consent.age_group.map(|a| a.label())),
            value(consent.occupation.map(|o| o.label())),
            value(consent.region()),
        )
    }

    pub fn chat_footer() -> String {
        format!(
            "{}\n{}",
            "모든 대화는 익명으로 처리되며, 세션 종료 시 안전하게 삭제됩니다.".dimmed(),
            CRISIS_NOTICE.dimmed()
        )
    }

    // ==================== Report ====================

    pub fn report(report: &Report) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("사전 점검 결과"));
        output.push('\n');

        if let Some(summary) = report.conversation_summary() {
            output.push_str(&Self::section_header("대화 요약"));
            output.push_str(summary);
            output.push('\n');
        }

        output.push('\n');
        for metric in Metric::ALL {
            output.push_str(&Self::score_line(metric, report.summary.scores.get(metric)));
            output.push('\n');
        }

        let band = report.risk_band();
        if let Some(headline) = band.headline() {
            let banner = format!("{} {}", headline, report.safety_notice);
            output.push_str(&format!(
                "\n{}\n{}\n",
                "⚠️ 주의사항".bold(),
                Self::paint_risk(band, banner.trim_end())
            ));
        }

        if !report.highlights().is_empty() {
            output.push_str(&Self::section_header("대화 하이라이트"));
            for highlight in report.highlights() {
                output.push_str(&format!("  • {}\n", highlight));
            }
        }

        if !report.top_issues().is_empty() {
            output.push_str(&Self::section_header("핵심 이슈"));
            output.push_str(&report.top_issues().join(", "));
            output.push('\n');
        }

        output.push_str(&format!("\n{}\n", REPORT_FOOTNOTE.dimmed()));
        if !report.details.disclaimer.trim().is_empty() {
            output.push_str(&format!("{}\n", report.details.disclaimer.dimmed()));
        }

        output.push_str(&Self::section_header("연결 가능한 도움"));
        output.push_str("거주 지역의 정신건강복지센터/상담기관 정보를 제공할 예정입니다.\n");
        output.push_str(&format!("  기관 검색(공공데이터): {}\n", HELP_DIRECTORY_URL));

        output
    }

    /// `우울 지수      72 / 100  ██████████████░░░░░░`
    pub fn score_line(metric: Metric, value: f64) -> String {
        let clamped = value.clamp(0.0, 100.0);
        let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
        let bar = match metric {
            Metric::Depression => bar.blue(),
            Metric::Anxiety => bar.yellow(),
            Metric::Stress => bar.magenta(),
        };
        format!("{:<8} {:>5} / 100  {}", metric.label(), value, bar)
    }

    fn paint_risk(band: RiskBand, text: &str) -> ColoredString {
        match band {
            RiskBand::High => text.red().bold(),
            RiskBand::Caution => text.yellow(),
            RiskBand::Normal => text.normal(),
        }
    }

    // ==================== Counselors ====================

    pub fn counselor_list(counselors: &[&Counselor]) -> String {
        if counselors.is_empty() {
            return format!("{}\n", "조건에 맞는 상담사가 없습니다.".dimmed());
        }

        let mut output = String::new();
        for counselor in counselors {
            output.push_str(&format!(
                "{} {} {}\n",
                counselor.name.bold(),
                counselor.title,
                format!("({})", counselor.id).dimmed()
            ));
            output.push_str(&format!(
                "  경력 {}년 · {} · {}\n",
                counselor.years,
                Self::rating(counselor),
                counselor.response_time
            ));
            output.push_str(&format!("  {}\n", counselor.expertise.join(" · ").cyan()));
            output.push_str(&format!(
                "  {}\n",
                truncate(&counselor.focus, FOCUS_PREVIEW_LEN).dimmed()
            ));
            if let Some(badge) = &counselor.badge {
                output.push_str(&format!("  [{}]\n", badge.green()));
            }
        }
        output
    }

    pub fn counselor(counselor: &Counselor) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&counselor.name));
        output.push('\n');
        output.push_str(&format!("{}\n", counselor.title.bold()));
        output.push_str(&format!("{}\n\n", counselor.bio));

        let rows = [
            ("전문 분야", counselor.expertise.join(", ")),
            ("주요 주제", counselor.focus.clone()),
            ("경력", format!("{}년", counselor.years)),
            ("위치", counselor.location.clone()),
            ("상담 방식", counselor.formats.join(", ")),
            ("언어", counselor.languages.join(", ")),
            ("응답 시간", counselor.response_time.clone()),
            ("평점", Self::rating(counselor)),
        ];
        for (label, value) in rows {
            output.push_str(&format!("{:<10} {}\n", label.cyan(), value));
        }

        for (title, items) in [
            ("경력 사항", &counselor.career),
            ("학력", &counselor.education),
            ("자격", &counselor.certifications),
        ] {
            if !items.is_empty() {
                output.push_str(&Self::section_header(title));
                for item in items {
                    output.push_str(&format!("  • {}\n", item));
                }
            }
        }

        if !counselor.testimonials.is_empty() {
            output.push_str(&Self::section_header("후기"));
            for t in &counselor.testimonials {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    "★".repeat(usize::from(t.rating.min(5))).yellow(),
                    t.name,
                    t.comment
                ));
            }
        }

        output
    }

    pub fn inquiry(counselor: &Counselor, inquiry: &Inquiry) -> String {
        format!(
            "{}\n{} {}\n{} {}\n{}\n",
            format!("{}님께 문의를 보냈어요.", counselor.name).green().bold(),
            "관심 분야:".dimmed(),
            inquiry.topic,
            "응답 예정:".dimmed(),
            counselor.response_time,
            "문의 내용은 비공개로 상담사에게만 전달되며, 확인 후 응답을 보내드립니다.".dimmed()
        )
    }

    fn rating(counselor: &Counselor) -> String {
        match counselor.average_rating() {
            Some(avg) => format!("★ {:.1} ({})", avg, counselor.testimonials.len()),
            None => "후기 없음".to_string(),
        }
    }

    // ==================== Profile ====================

    pub fn profile(profile: &UserProfile) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("내 정보"));
        output.push('\n');

        let optional = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        let on_off = |on: bool| if on { "켜짐" } else { "꺼짐" };

        let rows = [
            ("이름", profile.name.clone()),
            ("이메일", profile.email.clone()),
            ("연락처", optional(&profile.phone)),
            ("목표", optional(&profile.goal)),
            ("메모", optional(&profile.memo)),
            ("최근 로그인", Self::last_login(profile.last_login)),
            ("선호 연락", profile.preferred_contact.label().to_string()),
            (
                "비밀번호",
                if profile.password.is_some() { "저장됨" } else { "없음" }.to_string(),
            ),
        ];
        for (label, value) in rows {
            output.push_str(&format!("{:<10} {}\n", label.cyan(), value));
        }

        let n = &profile.notifications;
        output.push_str(&Self::section_header("알림"));
        output.push_str(&format!("  세션 요약      {}\n", on_off(n.session_summary)));
        output.push_str(&format!("  주간 팁        {}\n", on_off(n.weekly_tips)));
        output.push_str(&format!("  긴급 알림      {}\n", on_off(n.emergency_alerts)));

        output
    }

    pub fn login(profile: &UserProfile, outcome: LoginOutcome) -> String {
        let message = match outcome {
            LoginOutcome::Matched => outcome.message().green(),
            LoginOutcome::Created => outcome.message().yellow(),
        };
        format!("{}\n{} {}\n", message, "계정:".dimmed(), profile.email)
    }

    fn last_login(at: Option<DateTime<Utc>>) -> String {
        at.map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "기록 없음".to_string())
    }

    // ==================== Helpers ====================

    fn header(title: &str) -> String {
        let line = "=".repeat(48);
        format!("{}\n{}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", title.cyan().bold())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> String {
        Self::report(report)
    }

    fn format_counselor_list(&self, counselors: &[&Counselor]) -> String {
        Self::counselor_list(counselors)
    }

    fn format_counselor(&self, counselor: &Counselor) -> String {
        Self::counselor(counselor)
    }

    fn format_inquiry(&self, counselor: &Counselor, inquiry: &Inquiry) -> String {
        Self::inquiry(counselor, inquiry)
    }

    fn format_profile(&self, profile: &UserProfile) -> String {
        Self::profile(profile)
    }

    fn format_login(&self, profile: &UserProfile, outcome: LoginOutcome) -> String {
        Self::login(profile, outcome)
    }
}
