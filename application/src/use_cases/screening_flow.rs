//! Screening flow use case
//!
//! Owns the wizard state (consent → chat → report) and the transition rules
//! between the three screens.
//!
//! Every network-backed operation is split in two synchronous halves around
//! the gateway call:
//!
//! - `begin_*` checks the guards, applies the optimistic update, raises the
//!   in-flight flag and hands out a pending ticket
//! - `complete_*` applies the gateway result and always lowers the flag
//!
//! The async methods ([`ScreeningFlow::start_session`],
//! [`ScreeningFlow::send_message`], [`ScreeningFlow::finalize`]) compose the
//! two halves with the gateway call. Event-loop drivers can call the halves
//! directly and keep handling input while a request is pending.

use crate::ports::progress::{FlowProgress, NoProgress, RequestKind};
use crate::ports::screening_gateway::{GatewayError, ScreeningGateway};
use rapport_domain::{
    ConsentField, ConsentInput, DomainError, Message, Progress, Report, Screen, Session, SessionId,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Why an operation was refused before any state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// A required consent field is unset
    IncompleteConsent(ConsentField),
    /// Consent was already given for the current session
    AlreadyConsented,
    /// Consent fields cannot change once a session exists
    ConsentLocked,
    /// A create/finalize request is in flight
    Loading,
    /// A bot reply is pending
    BotTyping,
    /// The message is empty or whitespace only
    EmptyMessage,
    /// No session has been created yet
    NoSession,
    /// The session was already finalized
    ReportReady,
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::IncompleteConsent(field) => write!(f, "{} is required", field),
            BlockReason::AlreadyConsented => write!(f, "session already started"),
            BlockReason::ConsentLocked => write!(f, "consent is locked"),
            BlockReason::Loading => write!(f, "a request is in progress"),
            BlockReason::BotTyping => write!(f, "waiting for the bot reply"),
            BlockReason::EmptyMessage => write!(f, "message is empty"),
            BlockReason::NoSession => write!(f, "no active session"),
            BlockReason::ReportReady => write!(f, "report already generated"),
        }
    }
}

impl From<DomainError> for BlockReason {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::MissingConsentField(field) => BlockReason::IncompleteConsent(field),
            DomainError::InvalidChoice { field, .. } => BlockReason::IncompleteConsent(field),
            DomainError::ConsentLocked => BlockReason::ConsentLocked,
            DomainError::EmptyMessage => BlockReason::EmptyMessage,
        }
    }
}

/// Errors that can occur during the screening flow
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The action was refused locally; nothing changed and no request was sent
    #[error("Action blocked: {0}")]
    Blocked(BlockReason),

    /// The request failed; the in-flight flag has been released
    #[error("{kind} failed: {source}")]
    Gateway {
        kind: RequestKind,
        #[source]
        source: GatewayError,
    },

    /// The result belongs to a session that was reset while it was pending
    #[error("Result arrived after the flow was reset")]
    Stale,
}

impl FlowError {
    pub fn is_blocked(&self) -> bool {
        matches!(self, FlowError::Blocked(_))
    }

    /// Single user-visible notice for a failed request
    pub fn user_notice(&self) -> Option<&'static str> {
        match self {
            FlowError::Gateway { kind, .. } => Some(kind.failure_notice()),
            _ => None,
        }
    }
}

/// Snapshot of the wizard state
///
/// Only [`ScreeningFlow`] mutates it; everyone else reads it through
/// [`ScreeningFlow::state`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowState {
    pub consented: bool,
    pub session: Option<Session>,
    pub consent: ConsentInput,
    pub messages: Vec<Message>,
    pub message_count: usize,
    pub bot_typing: bool,
    pub is_loading: bool,
    pub report: Option<Report>,
}

impl FlowState {
    pub fn screen(&self) -> Screen {
        Screen::of(self.consented, self.report.is_some())
    }

    pub fn progress(&self) -> Progress {
        Progress::from_count(self.message_count)
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.as_ref().map(Session::id)
    }

    /// Whether the "agree and start" action is enabled
    pub fn can_start(&self) -> bool {
        !self.consented && !self.is_loading && self.consent.is_complete()
    }

    /// Whether a message may be sent (ignoring its text)
    pub fn can_send(&self) -> bool {
        self.session.is_some() && !self.bot_typing && !self.is_loading && self.report.is_none()
    }

    /// Whether the "done" action is enabled
    pub fn can_finalize(&self) -> bool {
        self.can_send()
    }
}

/// Ticket for a pending create-session request
#[derive(Debug)]
#[must_use = "a pending request must be completed to release the loading flag"]
pub struct PendingStart {
    epoch: u64,
    consent: ConsentInput,
}

impl PendingStart {
    pub fn consent(&self) -> &ConsentInput {
        &self.consent
    }
}

/// Ticket for a pending chat turn
#[derive(Debug)]
#[must_use = "a pending request must be completed to release the typing flag"]
pub struct PendingTurn {
    epoch: u64,
    session_id: SessionId,
    text: String,
}

impl PendingTurn {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Ticket for a pending finalize request
#[derive(Debug)]
#[must_use = "a pending request must be completed to release the loading flag"]
pub struct PendingFinalize {
    epoch: u64,
    session_id: SessionId,
}

impl PendingFinalize {
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

/// Controller for one screening wizard
pub struct ScreeningFlow<G: ScreeningGateway + 'static> {
    gateway: Arc<G>,
    progress: Arc<dyn FlowProgress>,
    state: FlowState,
    /// Bumped on every reset; tickets from an older epoch are stale
    epoch: u64,
}

impl<G: ScreeningGateway + 'static> ScreeningFlow<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            progress: Arc::new(NoProgress),
            state: FlowState::default(),
            epoch: 0,
        }
    }

    /// Set the progress notifier used around gateway calls
    pub fn with_progress(mut self, progress: Arc<dyn FlowProgress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen()
    }

    pub fn progress(&self) -> Progress {
        self.state.progress()
    }

    /// Edit the consent draft while on the consent screen
    pub fn update_consent(
        &mut self,
        edit: impl FnOnce(&mut ConsentInput),
    ) -> Result<(), FlowError> {
        if self.state.consented {
            return Err(FlowError::Blocked(DomainError::ConsentLocked.into()));
        }
        if self.state.is_loading {
            return Err(FlowError::Blocked(BlockReason::Loading));
        }
        edit(&mut self.state.consent);
        Ok(())
    }

    // ==================== Start session ====================

    pub fn begin_start(&mut self, consent: ConsentInput) -> Result<PendingStart, FlowError> {
        if self.state.consented {
            return Err(FlowError::Blocked(BlockReason::AlreadyConsented));
        }
        if self.state.is_loading {
            return Err(FlowError::Blocked(BlockReason::Loading));
        }
        consent
            .validate()
            .map_err(|e| FlowError::Blocked(e.into()))?;

        self.state.consent = consent.clone();
        self.state.is_loading = true;
        debug!("Creating screening session");

        Ok(PendingStart {
            epoch: self.epoch,
            consent,
        })
    }

    pub fn complete_start(
        &mut self,
        pending: PendingStart,
        result: Result<SessionId, GatewayError>,
    ) -> Result<(), FlowError> {
        self.check_epoch(pending.epoch)?;
        self.state.is_loading = false;

        match result {
            Ok(session_id) => {
                let session = Session::new(session_id);
                info!(
                    "Screening session {} started at {}",
                    session.id(),
                    session.created_at().to_rfc3339()
                );
                self.state.session = Some(session);
                self.state.consented = true;
                self.state.messages.clear();
                self.state.report = None;
                Ok(())
            }
            Err(source) => {
                warn!("Session creation failed: {}", source);
                Err(FlowError::Gateway {
                    kind: RequestKind::CreateSession,
                    source,
                })
            }
        }
    }

    /// Create a session from the consent fields (Consent → Chat on success)
    pub async fn start_session(&mut self, consent: ConsentInput) -> Result<(), FlowError> {
        let pending = self.begin_start(consent)?;
        self.progress.on_request_start(RequestKind::CreateSession);
        let result = self.gateway.create_session(pending.consent()).await;
        self.progress.on_request_end(RequestKind::CreateSession, result.is_ok());
        self.complete_start(pending, result)
    }

    // ==================== Chat turn ====================

    pub fn begin_send(&mut self, text: &str) -> Result<PendingTurn, FlowError> {
        Message::validate_text(text)
            .map_err(|e| FlowError::Blocked(e.into()))?;
        let Some(session_id) = self.state.session_id().cloned() else {
            return Err(FlowError::Blocked(BlockReason::NoSession));
        };
        if self.state.bot_typing {
            return Err(FlowError::Blocked(BlockReason::BotTyping));
        }
        if self.state.is_loading {
            return Err(FlowError::Blocked(BlockReason::Loading));
        }
        if self.state.report.is_some() {
            return Err(FlowError::Blocked(BlockReason::ReportReady));
        }

        // Shown before the reply arrives and never retracted
        self.state.messages.push(Message::user(text));
        self.state.message_count += 1;
        self.state.bot_typing = true;
        debug!(
            "Sending turn {} ({})",
            self.state.message_count,
            self.state.progress().counter_label()
        );
        trace!("User text: {}", text);

        Ok(PendingTurn {
            epoch: self.epoch,
            session_id,
            text: text.to_string(),
        })
    }

    pub fn complete_send(
        &mut self,
        pending: PendingTurn,
        result: Result<String, GatewayError>,
    ) -> Result<(), FlowError> {
        self.check_epoch(pending.epoch)?;
        self.state.bot_typing = false;

        match result {
            Ok(reply) => {
                trace!("Bot reply: {}", reply);
                self.state.messages.push(Message::bot(reply));
                Ok(())
            }
            Err(source) => {
                warn!("Chat turn failed: {}", source);
                Err(FlowError::Gateway {
                    kind: RequestKind::SendTurn,
                    source,
                })
            }
        }
    }

    /// Send one user message and append the bot's reply
    pub async fn send_message(&mut self, text: &str) -> Result<(), FlowError> {
        let pending = self.begin_send(text)?;
        self.progress.on_request_start(RequestKind::SendTurn);
        let result = self
            .gateway
            .send_turn(pending.session_id(), pending.text())
            .await;
        self.progress.on_request_end(RequestKind::SendTurn, result.is_ok());
        self.complete_send(pending, result)
    }

    // ==================== Finalize ====================

    pub fn begin_finalize(&mut self) -> Result<PendingFinalize, FlowError> {
        let Some(session_id) = self.state.session_id().cloned() else {
            return Err(FlowError::Blocked(BlockReason::NoSession));
        };
        if self.state.is_loading {
            return Err(FlowError::Blocked(BlockReason::Loading));
        }
        if self.state.bot_typing {
            return Err(FlowError::Blocked(BlockReason::BotTyping));
        }
        if self.state.report.is_some() {
            return Err(FlowError::Blocked(BlockReason::ReportReady));
        }

        self.state.is_loading = true;
        debug!("Finalizing session {}", session_id);

        Ok(PendingFinalize {
            epoch: self.epoch,
            session_id,
        })
    }

    pub fn complete_finalize(
        &mut self,
        pending: PendingFinalize,
        result: Result<Report, GatewayError>,
    ) -> Result<(), FlowError> {
        self.check_epoch(pending.epoch)?;
        self.state.is_loading = false;

        match result {
            Ok(report) => {
                info!(
                    "Report received for session {} (risk band {:?})",
                    pending.session_id,
                    report.risk_band()
                );
                self.state.report = Some(report);
                Ok(())
            }
            Err(source) => {
                warn!("Finalize failed: {}", source);
                Err(FlowError::Gateway {
                    kind: RequestKind::Finalize,
                    source,
                })
            }
        }
    }

    /// Request the report (Chat → Report on success)
    pub async fn finalize(&mut self) -> Result<(), FlowError> {
        let pending = self.begin_finalize()?;
        self.progress.on_request_start(RequestKind::Finalize);
        let result = self.gateway.finalize(pending.session_id()).await;
        self.progress.on_request_end(RequestKind::Finalize, result.is_ok());
        self.complete_finalize(pending, result)
    }

    // ==================== Reset ====================

    /// Forget everything session-scoped and return to the consent screen
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = FlowState::default();
        info!("Screening flow reset");
    }

    fn check_epoch(&self, epoch: u64) -> Result<(), FlowError> {
        if epoch == self.epoch {
            Ok(())
        } else {
            debug!("Discarding result from epoch {} (now {})", epoch, self.epoch);
            Err(FlowError::Stale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rapport_domain::{
        AgeGroup, Gender, Occupation, ReportDetails, ReportSummary, Risk, Role, Scores,
    };
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    #[derive(Default)]
    struct MockGateway {
        sessions: Mutex<VecDeque<Result<SessionId, GatewayError>>>,
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        reports: Mutex<VecDeque<Result<Report, GatewayError>>>,
        create_calls: AtomicUsize,
        turn_calls: AtomicUsize,
        finalize_calls: AtomicUsize,
    }

    impl MockGateway {
        fn with_session(self, result: Result<SessionId, GatewayError>) -> Self {
            self.sessions.lock().unwrap().push_back(result);
            self
        }

        fn with_reply(self, result: Result<String, GatewayError>) -> Self {
            self.replies.lock().unwrap().push_back(result);
            self
        }

        fn with_report(self, result: Result<Report, GatewayError>) -> Self {
            self.reports.lock().unwrap().push_back(result);
            self
        }
    }

    fn exhausted() -> GatewayError {
        GatewayError::Network("no more canned responses".to_string())
    }

    #[async_trait]
    impl ScreeningGateway for MockGateway {
        async fn create_session(&self, _consent: &ConsentInput) -> Result<SessionId, GatewayError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.sessions
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(exhausted()))
        }

        async fn send_turn(
            &self,
            _session_id: &SessionId,
            _text: &str,
        ) -> Result<String, GatewayError> {
            self.turn_calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(exhausted()))
        }

        async fn finalize(&self, _session_id: &SessionId) -> Result<Report, GatewayError> {
            self.finalize_calls.fetch_add(1, Ordering::SeqCst);
            self.reports
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(exhausted()))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(RequestKind, Option<bool>)>>,
    }

    impl FlowProgress for RecordingProgress {
        fn on_request_start(&self, kind: RequestKind) {
            self.events.lock().unwrap().push((kind, None));
        }

        fn on_request_end(&self, kind: RequestKind, success: bool) {
            self.events.lock().unwrap().push((kind, Some(success)));
        }
    }

    fn consent() -> ConsentInput {
        ConsentInput::new(Gender::Female, AgeGroup::Twenties, Occupation::Student)
    }

    fn sample_report(risk: f64) -> Report {
        Report {
            summary: ReportSummary {
                conversation_summary: None,
                top_issues: Some(vec!["수면".to_string()]),
                scores: Scores {
                    depression: 72.0,
                    anxiety: 65.0,
                    stress: 58.0,
                },
                risk: Risk { level: risk },
            },
            details: ReportDetails {
                highlights: None,
                disclaimer: "참고용".to_string(),
            },
            safety_notice: "도움이 필요하시면 1393에 연락하세요.".to_string(),
        }
    }

    async fn chatting(gateway: MockGateway) -> (ScreeningFlow<MockGateway>, Arc<MockGateway>) {
        let gateway = Arc::new(gateway.with_session(Ok("abc123".into())));
        let mut flow = ScreeningFlow::new(Arc::clone(&gateway));
        flow.start_session(consent()).await.unwrap();
        (flow, gateway)
    }

    fn assert_initial(state: &FlowState) {
        assert!(!state.consented);
        assert!(state.session.is_none());
        assert!(state.messages.is_empty());
        assert_eq!(state.message_count, 0);
        assert_eq!(state.progress().percentage(), 0.0);
        assert!(state.report.is_none());
        assert!(!state.bot_typing);
        assert!(!state.is_loading);
        assert_eq!(state.consent, ConsentInput::default());
        assert_eq!(state.screen(), Screen::Consent);
    }

    // ==================== Start session ====================

    #[tokio::test]
    async fn test_incomplete_consent_never_reaches_gateway() {
        let gateway = Arc::new(MockGateway::default().with_session(Ok("abc123".into())));
        let mut flow = ScreeningFlow::new(Arc::clone(&gateway));

        for field in [
            ConsentField::Gender,
            ConsentField::AgeGroup,
            ConsentField::Occupation,
        ] {
            let mut input = consent();
            match field {
                ConsentField::Gender => input.gender = None,
                ConsentField::AgeGroup => input.age_group = None,
                ConsentField::Occupation => input.occupation = None,
                ConsentField::Region => unreachable!(),
            }
            let err = flow.start_session(input).await.unwrap_err();
            assert_eq!(err, FlowError::Blocked(BlockReason::IncompleteConsent(field)));
        }

        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
        assert_initial(flow.state());
    }

    #[tokio::test]
    async fn test_successful_start_enters_chat() {
        let (flow, gateway) = chatting(MockGateway::default()).await;
        let state = flow.state();

        assert_eq!(flow.screen(), Screen::Chat);
        assert!(state.consented);
        assert!(state.report.is_none());
        assert!(state.messages.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.session_id().unwrap().as_str(), "abc123");
        assert_eq!(state.consent, consent());
        assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_start_stays_on_consent() {
        let gateway = Arc::new(
            MockGateway::default()
                .with_session(Err(GatewayError::server(400, "Consent required."))),
        );
        let mut flow = ScreeningFlow::new(gateway);

        let err = flow.start_session(consent()).await.unwrap_err();
        assert_eq!(err.user_notice(), Some("세션 생성 실패"));
        assert!(!flow.state().consented);
        assert!(!flow.state().is_loading);
        assert_eq!(flow.screen(), Screen::Consent);
    }

    #[test]
    fn test_second_start_blocked_while_loading() {
        let mut flow = ScreeningFlow::new(Arc::new(MockGateway::default()));

        let pending = flow.begin_start(consent()).unwrap();
        assert!(flow.state().is_loading);
        assert!(!flow.state().can_start());
        assert_eq!(
            flow.begin_start(consent()).unwrap_err(),
            FlowError::Blocked(BlockReason::Loading)
        );

        flow.complete_start(pending, Err(GatewayError::Network("refused".into())))
            .unwrap_err();
        assert!(!flow.state().is_loading);
        assert!(flow.state().can_start());
    }

    #[tokio::test]
    async fn test_consent_locked_after_start() {
        let (mut flow, _) = chatting(MockGateway::default()).await;
        let err = flow
            .update_consent(|c| c.region = "부산".to_string())
            .unwrap_err();
        assert_eq!(err, FlowError::Blocked(BlockReason::ConsentLocked));
        assert!(err.is_blocked());
        assert!(!FlowError::Stale.is_blocked());
        assert_eq!(
            flow.start_session(consent()).await.unwrap_err(),
            FlowError::Blocked(BlockReason::AlreadyConsented)
        );
    }

    #[test]
    fn test_update_consent_on_consent_screen() {
        let mut flow = ScreeningFlow::new(Arc::new(MockGateway::default()));
        flow.update_consent(|c| c.gender = Some(Gender::Male)).unwrap();
        flow.update_consent(|c| c.age_group = Some(AgeGroup::Thirties))
            .unwrap();
        assert!(!flow.state().can_start());
        flow.update_consent(|c| c.occupation = Some(Occupation::OfficeWorker))
            .unwrap();
        assert!(flow.state().can_start());
    }

    // ==================== Chat turns ====================

    #[tokio::test]
    async fn test_turns_append_in_order_and_advance_progress() {
        let mut gateway = MockGateway::default();
        for i in 0..12 {
            gateway = gateway.with_reply(Ok(format!("reply {i}")));
        }
        let (mut flow, _) = chatting(gateway).await;

        for n in 1..=12usize {
            flow.send_message(&format!("message {}", n - 1)).await.unwrap();
            assert_eq!(flow.state().message_count, n);
            assert_eq!(
                flow.progress().percentage(),
                (n.min(10) as f64) * 10.0
            );
        }

        let messages = &flow.state().messages;
        assert_eq!(messages.len(), 24);
        for (i, pair) in messages.chunks(2).enumerate() {
            assert_eq!(pair[0], Message::user(format!("message {i}")));
            assert_eq!(pair[1], Message::bot(format!("reply {i}")));
        }
    }

    #[tokio::test]
    async fn test_blank_message_is_noop() {
        let (mut flow, gateway) = chatting(MockGateway::default()).await;
        let before = flow.state().clone();

        for text in ["", "   ", "\n\t"] {
            assert_eq!(
                flow.send_message(text).await.unwrap_err(),
                FlowError::Blocked(BlockReason::EmptyMessage)
            );
        }
        assert_eq!(flow.state(), &before);
        assert_eq!(gateway.turn_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_without_session_is_noop() {
        let gateway = Arc::new(MockGateway::default());
        let mut flow = ScreeningFlow::new(Arc::clone(&gateway));

        assert_eq!(
            flow.send_message("hello").await.unwrap_err(),
            FlowError::Blocked(BlockReason::NoSession)
        );
        assert_initial(flow.state());
        assert_eq!(gateway.turn_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_send_blocked_while_bot_typing() {
        let (mut flow, _) = chatting(MockGateway::default()).await;

        let pending = flow.begin_send("첫 번째").unwrap();
        assert!(flow.state().bot_typing);
        let snapshot = flow.state().clone();

        assert_eq!(
            flow.begin_send("두 번째").unwrap_err(),
            FlowError::Blocked(BlockReason::BotTyping)
        );
        assert_eq!(
            flow.begin_finalize().unwrap_err(),
            FlowError::Blocked(BlockReason::BotTyping)
        );
        assert_eq!(flow.state(), &snapshot);

        flow.complete_send(pending, Ok("네".to_string())).unwrap();
        assert!(!flow.state().bot_typing);
        assert_eq!(flow.state().messages.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_user_message() {
        let gateway = MockGateway::default()
            .with_reply(Err(GatewayError::Network("connection reset".into())));
        let (mut flow, _) = chatting(gateway).await;

        let err = flow.send_message("힘들어요").await.unwrap_err();
        assert_eq!(err.user_notice(), Some("메시지 전송 오류"));

        let state = flow.state();
        assert_eq!(state.messages, vec![Message::user("힘들어요")]);
        assert_eq!(state.message_count, 1);
        assert!(!state.bot_typing);
        assert_eq!(flow.screen(), Screen::Chat);
    }

    #[tokio::test]
    async fn test_user_text_is_kept_verbatim() {
        let gateway = MockGateway::default().with_reply(Ok("네".to_string()));
        let (mut flow, _) = chatting(gateway).await;

        flow.send_message("  잠을 못 자요  ").await.unwrap();
        assert_eq!(flow.state().messages[0].text, "  잠을 못 자요  ");
        assert_eq!(flow.state().messages[0].role, Role::User);
    }

    // ==================== Finalize ====================

    #[tokio::test]
    async fn test_finalize_enters_report() {
        let gateway = MockGateway::default().with_report(Ok(sample_report(75.0)));
        let (mut flow, gateway) = chatting(gateway).await;

        flow.finalize().await.unwrap();
        assert_eq!(flow.screen(), Screen::Report);
        assert!(!flow.state().is_loading);
        assert!(flow.state().report.as_ref().unwrap().needs_warning());

        assert_eq!(
            flow.finalize().await.unwrap_err(),
            FlowError::Blocked(BlockReason::ReportReady)
        );
        assert_eq!(
            flow.send_message("more").await.unwrap_err(),
            FlowError::Blocked(BlockReason::ReportReady)
        );
        assert_eq!(gateway.finalize_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_finalize_stays_on_chat() {
        let gateway = MockGateway::default()
            .with_report(Err(GatewayError::Decode("missing field `report`".into())));
        let (mut flow, _) = chatting(gateway).await;

        let err = flow.finalize().await.unwrap_err();
        assert_eq!(err.user_notice(), Some("리포트 생성 오류"));
        assert_eq!(flow.screen(), Screen::Chat);
        assert!(flow.state().report.is_none());
        assert!(!flow.state().is_loading);
        assert!(flow.state().can_finalize());
    }

    #[tokio::test]
    async fn test_finalize_without_session_is_blocked() {
        let mut flow = ScreeningFlow::new(Arc::new(MockGateway::default()));
        assert_eq!(
            flow.finalize().await.unwrap_err(),
            FlowError::Blocked(BlockReason::NoSession)
        );
    }

    // ==================== Reset ====================

    #[tokio::test]
    async fn test_reset_from_every_screen() {
        let mut flow = ScreeningFlow::new(Arc::new(MockGateway::default()));
        flow.update_consent(|c| c.gender = Some(Gender::Other)).unwrap();
        flow.reset();
        assert_initial(flow.state());

        let gateway = MockGateway::default()
            .with_reply(Ok("네".to_string()))
            .with_report(Ok(sample_report(10.0)));
        let (mut flow, _) = chatting(gateway).await;
        flow.send_message("hi").await.unwrap();
        flow.reset();
        assert_initial(flow.state());

        let gateway = MockGateway::default().with_report(Ok(sample_report(10.0)));
        let (mut flow, _) = chatting(gateway).await;
        flow.finalize().await.unwrap();
        assert_eq!(flow.screen(), Screen::Report);
        flow.reset();
        assert_initial(flow.state());
    }

    #[tokio::test]
    async fn test_reset_while_pending_discards_result() {
        let (mut flow, _) = chatting(MockGateway::default()).await;

        let pending = flow.begin_send("hello").unwrap();
        flow.reset();
        assert_initial(flow.state());

        let err = flow
            .complete_send(pending, Ok("late reply".to_string()))
            .unwrap_err();
        assert_eq!(err, FlowError::Stale);
        assert_initial(flow.state());

        let mut flow = ScreeningFlow::new(Arc::new(MockGateway::default()));
        let pending = flow.begin_start(consent()).unwrap();
        flow.reset();
        assert_eq!(
            flow.complete_start(pending, Ok("abc123".into())).unwrap_err(),
            FlowError::Stale
        );
        assert_initial(flow.state());
    }

    #[tokio::test]
    async fn test_pending_finalize_blocks_turns_and_goes_stale_on_reset() {
        let (mut flow, gateway) = chatting(MockGateway::default()).await;

        let pending = flow.begin_finalize().unwrap();
        assert!(flow.state().is_loading);
        assert!(!flow.state().can_send());
        let snapshot = flow.state().clone();

        assert_eq!(
            flow.begin_send("아직 할 말이 있어요").unwrap_err(),
            FlowError::Blocked(BlockReason::Loading)
        );
        assert_eq!(
            flow.begin_finalize().unwrap_err(),
            FlowError::Blocked(BlockReason::Loading)
        );
        assert_eq!(flow.state(), &snapshot);

        flow.reset();
        assert_initial(flow.state());
        assert_eq!(
            flow.complete_finalize(pending, Ok(sample_report(75.0))).unwrap_err(),
            FlowError::Stale
        );
        assert_initial(flow.state());
        assert!(flow.state().report.is_none());
        assert_eq!(gateway.finalize_calls.load(Ordering::SeqCst), 0);
    }

    // ==================== Progress notifier ====================

    #[tokio::test]
    async fn test_progress_brackets_each_request() {
        let recorder = Arc::new(RecordingProgress::default());
        let gateway = Arc::new(
            MockGateway::default()
                .with_session(Ok("abc123".into()))
                .with_reply(Err(GatewayError::Network("down".into()))),
        );
        let mut flow = ScreeningFlow::new(gateway).with_progress(recorder.clone());

        flow.start_session(consent()).await.unwrap();
        flow.send_message("hi").await.unwrap_err();
        flow.send_message("").await.unwrap_err();

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                (RequestKind::CreateSession, None),
                (RequestKind::CreateSession, Some(true)),
                (RequestKind::SendTurn, None),
                (RequestKind::SendTurn, Some(false)),
            ]
        );
    }

    // ==================== Worked example ====================

    #[tokio::test]
    async fn test_full_screening_walkthrough() {
        let gateway = Arc::new(
            MockGateway::default()
                .with_session(Ok("abc123".into()))
                .with_reply(Ok("어떤 점이 힘드셨나요?".to_string()))
                .with_report(Ok(sample_report(75.0))),
        );
        let mut flow = ScreeningFlow::new(gateway);
        assert_eq!(flow.screen(), Screen::Consent);

        flow.start_session(consent().with_region("")).await.unwrap();
        assert_eq!(flow.screen(), Screen::Chat);

        let pending = flow.begin_send("힘들어요").unwrap();
        assert_eq!(flow.state().messages, vec![Message::user("힘들어요")]);
        assert_eq!(flow.state().message_count, 1);
        assert_eq!(flow.progress().percentage(), 10.0);
        flow.complete_send(pending, Ok("어떤 점이 힘드셨나요?".to_string()))
            .unwrap();
        assert_eq!(
            flow.state().messages,
            vec![
                Message::user("힘들어요"),
                Message::bot("어떤 점이 힘드셨나요?")
            ]
        );

        flow.finalize().await.unwrap();
        let report = flow.state().report.as_ref().unwrap();
        assert_eq!(report.summary.scores.depression, 72.0);
        assert_eq!(report.summary.scores.anxiety, 65.0);
        assert_eq!(report.summary.scores.stress, 58.0);
        assert_eq!(report.summary.risk.level, 75.0);
        assert!(report.needs_warning());
        assert_eq!(flow.screen(), Screen::Report);
    }
}
