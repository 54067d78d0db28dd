use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::message::Message;
use super::outcome::{Exchange, IgnoreReason, SubmitOutcome};
use crate::backend::{ChatBackend, FailureKind};

/// Greeting seeded into every new transcript.
pub const DEFAULT_GREETING: &str = "Hello! Ask me anything about your data.";

const EVENT_CAPACITY: usize = 64;

/// Change notifications emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The pending input buffer was replaced or cleared.
    InputChanged,
    /// A message was appended to the transcript.
    MessageAppended(Message),
    /// The busy flag flipped.
    BusyChanged(bool),
}

/// Point-in-time copy of everything a view needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub transcript: Vec<Message>,
    pub pending_input: String,
    pub busy: bool,
}

struct SessionState {
    transcript: Vec<Message>,
    pending_input: String,
    busy: bool,
    last_exchange: Option<Exchange>,
}

struct Inner {
    state: Mutex<SessionState>,
    backend: Arc<dyn ChatBackend>,
    events: broadcast::Sender<SessionEvent>,
}

/// Owns one chat session and runs its request/response cycles.
///
/// Cloning yields another handle to the same session. At most one request is
/// in flight per session: `submit` is a no-op while a previous cycle is still
/// awaiting its reply.
#[derive(Clone)]
pub struct ChatController {
    inner: Arc<Inner>,
}

impl ChatController {
    /// Creates a session seeded with [`DEFAULT_GREETING`].
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self::with_greeting(backend, DEFAULT_GREETING)
    }

    /// Creates a session seeded with a custom greeting.
    ///
    /// A blank greeting falls back to [`DEFAULT_GREETING`].
    pub fn with_greeting(backend: Arc<dyn ChatBackend>, greeting: impl Into<String>) -> Self {
        let mut greeting = greeting.into();
        if greeting.trim().is_empty() {
            greeting = DEFAULT_GREETING.to_string();
        }

        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let state = SessionState {
            transcript: vec![Message::assistant(greeting)],
            pending_input: String::new(),
            busy: false,
            last_exchange: None,
        };

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                backend,
                events,
            }),
        }
    }

    /// Subscribe to state change events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.inner.state.lock().transcript.clone()
    }

    pub fn pending_input(&self) -> String {
        self.inner.state.lock().pending_input.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.state.lock().busy
    }

    /// Outcome of the most recently completed exchange.
    pub fn last_exchange(&self) -> Option<Exchange> {
        self.inner.state.lock().last_exchange.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.inner.state.lock();
        SessionSnapshot {
            transcript: state.transcript.clone(),
            pending_input: state.pending_input.clone(),
            busy: state.busy,
        }
    }

    /// Replaces the pending input buffer. Allowed while busy.
    pub fn update_input(&self, text: impl Into<String>) {
        self.inner.state.lock().pending_input = text.into();
        self.emit(SessionEvent::InputChanged);
    }

    /// Sends the pending input as one chat turn.
    ///
    /// Never fails: transport and backend errors end up in the transcript as
    /// a fixed apology, and the returned outcome says which kind it was.
    pub async fn submit(&self) -> SubmitOutcome {
        let text = match self.begin_exchange() {
            Ok(text) => text,
            Err(reason) => {
                debug!(?reason, "submit ignored");
                return SubmitOutcome::Ignored(reason);
            }
        };

        let guard = ExchangeGuard {
            controller: self,
            finished: false,
        };

        let exchange = match self.inner.backend.send_message(&text).await {
            Ok(reply) => reply.into_text().map_or_else(
                || {
                    warn!("chat reply carried no response text");
                    Exchange::Failed(FailureKind::MissingPayload)
                },
                Exchange::Replied,
            ),
            Err(err) => {
                warn!(error = %err, kind = %err.kind(), "chat request failed");
                Exchange::Failed(err.kind())
            }
        };

        guard.finish(&exchange);
        SubmitOutcome::Completed(exchange)
    }

    /// Appends the user message and marks the session busy in one step.
    fn begin_exchange(&self) -> Result<String, IgnoreReason> {
        let message = {
            let mut state = self.inner.state.lock();
            if state.busy {
                return Err(IgnoreReason::Busy);
            }

            let text = state.pending_input.trim().to_string();
            if text.is_empty() {
                return Err(IgnoreReason::EmptyInput);
            }

            let message = Message::user(text);
            state.transcript.push(message.clone());
            state.pending_input.clear();
            state.busy = true;
            message
        };

        let text = message.text().to_string();
        self.emit(SessionEvent::MessageAppended(message));
        self.emit(SessionEvent::InputChanged);
        self.emit(SessionEvent::BusyChanged(true));
        Ok(text)
    }

    /// Appends the assistant message and clears the busy flag.
    fn finish_exchange(&self, exchange: Exchange) {
        let message = Message::assistant(exchange.reply_text());
        {
            let mut state = self.inner.state.lock();
            state.transcript.push(message.clone());
            state.last_exchange = Some(exchange);
            state.busy = false;
        }

        self.emit(SessionEvent::MessageAppended(message));
        self.emit(SessionEvent::BusyChanged(false));
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.inner.events.send(event);
    }
}

/// Closes an in-flight exchange even if the `submit` future is dropped.
struct ExchangeGuard<'a> {
    controller: &'a ChatController,
    finished: bool,
}

impl ExchangeGuard<'_> {
    fn finish(mut self, exchange: &Exchange) {
        self.finished = true;
        self.controller.finish_exchange(exchange.clone());
    }
}

impl Drop for ExchangeGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("chat request dropped before it resolved");
            self.controller
                .finish_exchange(Exchange::Failed(FailureKind::Cancelled));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, ChatReply, Result as BackendResult};
    use crate::session::{ERROR_TEXT, MISSING_RESPONSE_TEXT};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Backend that replays canned results and records what it was sent.
    struct ScriptedBackend {
        replies: Mutex<VecDeque<BackendResult<ChatReply>>>,
        requests: Mutex<Vec<String>>,
        gate: Option<Arc<Notify>>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<BackendResult<ChatReply>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
                gate: None,
            }
        }

        fn gated(replies: Vec<BackendResult<ChatReply>>, gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::new(replies)
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn send_message(&self, message: &str) -> BackendResult<ChatReply> {
            self.requests.lock().push(message.to_string());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            let next = self.replies.lock().pop_front();
            next.unwrap_or_else(|| Ok(ChatReply::default()))
        }
    }

    fn controller_with(
        replies: Vec<BackendResult<ChatReply>>,
    ) -> (ChatController, Arc<ScriptedBackend>) {
        let backend = Arc::new(ScriptedBackend::new(replies));
        (ChatController::new(backend.clone()), backend)
    }

    async fn wait_until_busy(controller: &ChatController) {
        while !controller.is_busy() {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_initial_state_has_greeting_only() {
        let (controller, _) = controller_with(vec![]);
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.transcript, vec![Message::assistant(DEFAULT_GREETING)]);
        assert!(snapshot.pending_input.is_empty());
        assert!(!snapshot.busy);
        assert!(controller.last_exchange().is_none());
    }

    #[test]
    fn test_custom_greeting_and_blank_fallback() {
        let backend = Arc::new(ScriptedBackend::new(vec![]));
        let controller = ChatController::with_greeting(backend.clone(), "Welcome!");
        assert_eq!(controller.transcript(), vec![Message::assistant("Welcome!")]);

        let controller = ChatController::with_greeting(backend, "   ");
        assert_eq!(
            controller.transcript(),
            vec![Message::assistant(DEFAULT_GREETING)]
        );
    }

    #[test]
    fn test_update_input_only_touches_pending_input() {
        let (controller, _) = controller_with(vec![]);

        controller.update_input("H");
        controller.update_input("He");
        controller.update_input("Hello");

        assert_eq!(controller.pending_input(), "Hello");
        assert_eq!(controller.transcript().len(), 1);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_round_trip_success() {
        let (controller, backend) = controller_with(vec![Ok(ChatReply::new("Hi there"))]);

        controller.update_input("Hello");
        let outcome = controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed(Exchange::Replied("Hi there".into()))
        );
        assert_eq!(
            controller.transcript(),
            vec![
                Message::assistant(DEFAULT_GREETING),
                Message::user("Hello"),
                Message::assistant("Hi there"),
            ]
        );
        assert_eq!(controller.pending_input(), "");
        assert!(!controller.is_busy());
        assert_eq!(backend.requests(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let (controller, backend) = controller_with(vec![Ok(ChatReply::new("ok"))]);

        controller.update_input("  how many rows?\n");
        controller.submit().await;

        assert_eq!(controller.transcript()[1], Message::user("how many rows?"));
        assert_eq!(backend.requests(), vec!["how many rows?".to_string()]);
    }

    #[tokio::test]
    async fn test_server_error_appends_fixed_apology() {
        let (controller, _) = controller_with(vec![Err(BackendError::Status {
            status: 500,
            body: "Traceback: secret internals".into(),
        })]);

        controller.update_input("Hello");
        let outcome = controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed(Exchange::Failed(FailureKind::Status(500)))
        );
        let transcript = controller.transcript();
        assert_eq!(transcript[1], Message::user("Hello"));
        assert_eq!(transcript[2], Message::assistant(ERROR_TEXT));
        assert!(!transcript[2].text().contains("Traceback"));
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_missing_payload_uses_fallback_text() {
        let (controller, _) = controller_with(vec![Ok(ChatReply::default())]);

        controller.update_input("Hello");
        controller.submit().await;

        assert_eq!(
            controller.transcript().last(),
            Some(&Message::assistant(MISSING_RESPONSE_TEXT))
        );
        assert_eq!(
            controller.last_exchange(),
            Some(Exchange::Failed(FailureKind::MissingPayload))
        );
    }

    #[tokio::test]
    async fn test_empty_and_whitespace_input_is_ignored() {
        let (controller, backend) = controller_with(vec![]);

        assert_eq!(
            controller.submit().await,
            SubmitOutcome::Ignored(IgnoreReason::EmptyInput)
        );

        controller.update_input(" \t\n ");
        assert_eq!(
            controller.submit().await,
            SubmitOutcome::Ignored(IgnoreReason::EmptyInput)
        );

        assert_eq!(controller.transcript().len(), 1);
        assert_eq!(controller.pending_input(), " \t\n ");
        assert!(!controller.is_busy());
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transcript_grows_by_two_per_accepted_submit() {
        let (controller, _) = controller_with(vec![
            Ok(ChatReply::new("one")),
            Err(BackendError::Timeout),
            Ok(ChatReply::default()),
        ]);

        for (round, question) in ["a", "b", "c"].into_iter().enumerate() {
            controller.update_input(question);
            controller.submit().await;
            assert_eq!(controller.transcript().len(), 1 + 2 * (round + 1));
            assert!(!controller.is_busy());
        }

        let senders: Vec<bool> = controller
            .transcript()
            .iter()
            .map(Message::is_user)
            .collect();
        assert_eq!(senders, vec![false, true, false, true, false, true, false]);
    }

    #[tokio::test]
    async fn test_submit_while_busy_is_single_flight() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(ScriptedBackend::gated(
            vec![Ok(ChatReply::new("first answer"))],
            gate.clone(),
        ));
        let controller = ChatController::new(backend.clone());

        controller.update_input("first");
        let in_flight = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.submit().await })
        };
        wait_until_busy(&controller).await;

        assert_eq!(controller.transcript().len(), 2);

        controller.update_input("second");
        assert_eq!(
            controller.submit().await,
            SubmitOutcome::Ignored(IgnoreReason::Busy)
        );
        assert_eq!(controller.transcript().len(), 2);
        assert_eq!(controller.pending_input(), "second");
        assert_eq!(backend.requests(), vec!["first".to_string()]);

        gate.notify_one();
        let outcome = in_flight.await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Completed(Exchange::Replied("first answer".into()))
        );
        assert_eq!(controller.transcript().len(), 3);
        assert!(!controller.is_busy());
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_submit_still_closes_the_exchange() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(ScriptedBackend::gated(vec![], gate));
        let controller = ChatController::new(backend);

        controller.update_input("Hello");
        let result = tokio::time::timeout(Duration::from_millis(20), controller.submit()).await;
        assert!(result.is_err());

        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2], Message::assistant(ERROR_TEXT));
        assert!(!controller.is_busy());
        assert_eq!(
            controller.last_exchange(),
            Some(Exchange::Failed(FailureKind::Cancelled))
        );
    }

    #[tokio::test]
    async fn test_events_follow_the_cycle() {
        let (controller, _) = controller_with(vec![Ok(ChatReply::new("Hi there"))]);
        let mut events = controller.subscribe();

        controller.update_input("Hello");
        controller.submit().await;

        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            received.push(event);
        }

        assert_eq!(
            received,
            vec![
                SessionEvent::InputChanged,
                SessionEvent::MessageAppended(Message::user("Hello")),
                SessionEvent::InputChanged,
                SessionEvent::BusyChanged(true),
                SessionEvent::MessageAppended(Message::assistant("Hi there")),
                SessionEvent::BusyChanged(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_ignored_submit_emits_nothing() {
        let (controller, _) = controller_with(vec![]);
        let mut events = controller.subscribe();

        controller.submit().await;

        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_session_usable_after_failure() {
        let (controller, _) = controller_with(vec![
            Err(BackendError::InvalidEndpoint("bad".into())),
            Ok(ChatReply::new("recovered")),
        ]);

        controller.update_input("first");
        controller.submit().await;
        controller.update_input("second");
        let outcome = controller.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Completed(Exchange::Replied("recovered".into()))
        );
        assert_eq!(controller.transcript().len(), 5);
    }
}
