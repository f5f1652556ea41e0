//! Lifecycle of a single exchange: guard, optimistic append, request,
//! patch or fallback, and release of the pending flag.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::core::chat_client::{ChatError, ChatTransport};
use crate::core::constants::{FALLBACK_MESSAGE, SUGGESTED_QUESTIONS};
use crate::core::conversation::ConversationStore;
use crate::core::message::Exchange;

/// All state a renderer needs, owned by one controller.
#[derive(Debug, Default)]
pub struct ChatSession {
    pub conversation: ConversationStore,
    pub pending: bool,
    pub draft: String,
}

/// Read-only copy of the session handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub exchanges: Vec<Exchange>,
    pub pending: bool,
    pub draft: String,
}

impl ChatSnapshot {
    /// Whether a submit right now would start an exchange.
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The text is empty or whitespace-only.
    Blank,
    /// Another exchange is still waiting for its reply.
    Busy,
}

#[derive(Debug)]
pub enum SendOutcome {
    /// The server's reply was stored.
    Answered,
    /// The request failed and the fallback message was stored.
    Fallback(ChatError),
    /// Nothing happened.
    Rejected(RejectReason),
}

/// Drives exchanges against a [`ChatTransport`].
///
/// Cloning is cheap; clones share one session.
#[derive(Clone)]
pub struct ExchangeController {
    session: Arc<Mutex<ChatSession>>,
    transport: Arc<dyn ChatTransport>,
    request_timeout: Duration,
}

impl ExchangeController {
    pub fn new(transport: Arc<dyn ChatTransport>, request_timeout: Duration) -> Self {
        Self {
            session: Arc::new(Mutex::new(ChatSession::default())),
            transport,
            request_timeout,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Run one full exchange for `raw_text`.
    ///
    /// Blank text or an outstanding exchange makes this a no-op.
    pub async fn send(&self, raw_text: &str) -> SendOutcome {
        match self.begin(raw_text) {
            Ok(in_flight) => in_flight.settle().await,
            Err(reason) => SendOutcome::Rejected(reason),
        }
    }

    /// Start an exchange synchronously and hand back the request half.
    ///
    /// On success the pending flag is set, the draft is cleared and the
    /// user's line is already in the conversation.
    pub fn begin(&self, raw_text: &str) -> Result<InFlight, RejectReason> {
        let mut session = lock_session(&self.session);

        let text = raw_text.trim();
        if text.is_empty() {
            return Err(RejectReason::Blank);
        }
        if session.pending {
            debug!("send ignored while a reply is pending");
            return Err(RejectReason::Busy);
        }

        session.pending = true;
        session.draft.clear();
        let index = session.conversation.append(text);
        info!(?index, chars = text.chars().count(), "exchange started");

        Ok(InFlight {
            text: text.to_string(),
            guard: SettleGuard {
                session: Arc::clone(&self.session),
                settled: false,
            },
            transport: Arc::clone(&self.transport),
            request_timeout: self.request_timeout,
        })
    }

    /// Submit the current draft.
    pub async fn on_submit(&self) -> SendOutcome {
        let draft = lock_session(&self.session).draft.clone();
        self.send(&draft).await
    }

    /// Synchronous half of [`Self::on_submit`] for callers that spawn the request.
    pub fn begin_submit(&self) -> Result<InFlight, RejectReason> {
        let draft = lock_session(&self.session).draft.clone();
        self.begin(&draft)
    }

    /// Replace the draft. Ignored while a reply is pending.
    pub fn on_draft_change(&self, text: impl Into<String>) -> bool {
        self.edit_draft(|draft| *draft = text.into())
    }

    /// Edit the draft in place. Ignored while a reply is pending.
    pub fn edit_draft<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut String),
    {
        let mut session = lock_session(&self.session);
        if session.pending {
            return false;
        }
        edit(&mut session.draft);
        true
    }

    pub fn on_clear_draft(&self) {
        lock_session(&self.session).draft.clear();
    }

    /// Copy one of the welcome-screen suggestions into the draft.
    pub fn apply_suggestion(&self, index: usize) -> bool {
        match SUGGESTED_QUESTIONS.get(index) {
            Some(question) => self.on_draft_change(*question),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        lock_session(&self.session).pending
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        let session = lock_session(&self.session);
        ChatSnapshot {
            exchanges: session.conversation.snapshot(),
            pending: session.pending,
            draft: session.draft.clone(),
        }
    }

    /// Change notifications for the conversation (and the pending flag,
    /// which only changes together with it).
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        lock_session(&self.session).conversation.subscribe()
    }

    /// Run `f` against the live session.
    pub fn read<R>(&self, f: impl FnOnce(&ChatSession) -> R) -> R {
        f(&lock_session(&self.session))
    }
}

/// The network half of an exchange started by [`ExchangeController::begin`].
///
/// Dropping it unsettled stores the fallback reply and clears the pending flag.
pub struct InFlight {
    text: String,
    guard: SettleGuard,
    transport: Arc<dyn ChatTransport>,
    request_timeout: Duration,
}

impl InFlight {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub async fn settle(self) -> SendOutcome {
        let InFlight {
            text,
            guard,
            transport,
            request_timeout,
        } = self;

        let result =
            match tokio::time::timeout(request_timeout, transport.send_message(&text)).await {
                Ok(Ok(body)) if body.is_empty() => Err(ChatError::EmptyReply),
                Ok(result) => result,
                Err(_) => Err(ChatError::Timeout(request_timeout)),
            };

        guard.settle(result)
    }
}

struct SettleGuard {
    session: Arc<Mutex<ChatSession>>,
    settled: bool,
}

impl SettleGuard {
    fn settle(mut self, result: Result<String, ChatError>) -> SendOutcome {
        self.settled = true;
        let mut session = lock_session(&self.session);

        let outcome = match result {
            Ok(reply) => {
                patch_reply(&mut session, &reply);
                info!(bytes = reply.len(), "exchange answered");
                SendOutcome::Answered
            }
            Err(err) => {
                warn!(error = %err, transient = err.is_transient(), "exchange failed");
                patch_reply(&mut session, FALLBACK_MESSAGE);
                SendOutcome::Fallback(err)
            }
        };

        session.pending = false;
        outcome
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(error = %ChatError::Aborted, "exchange abandoned");
        let mut session = lock_session(&self.session);
        patch_reply(&mut session, FALLBACK_MESSAGE);
        session.pending = false;
    }
}

fn patch_reply(session: &mut ChatSession, reply: &str) {
    if let Err(err) = session.conversation.patch_last(reply) {
        // Only reachable if something bypassed the pending gate.
        warn!(error = %err, "reply could not be attached to the conversation");
    }
}

fn lock_session(session: &Mutex<ChatSession>) -> MutexGuard<'_, ChatSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{GatedTransport, HangingTransport, ScriptedTransport};

    fn controller_with(transport: impl ChatTransport + 'static) -> ExchangeController {
        ExchangeController::new(Arc::new(transport), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn successful_send_stores_reply_verbatim() {
        let controller = controller_with(ScriptedTransport::replies(["Hi there!"]));

        let outcome = controller.send("Hello").await;

        assert!(matches!(outcome, SendOutcome::Answered));
        let snapshot = controller.snapshot();
        assert_eq!(
            snapshot.exchanges,
            vec![Exchange::answered("Hello", "Hi there!")]
        );
        assert!(!snapshot.pending);
    }

    #[tokio::test]
    async fn failed_send_stores_fallback_message() {
        let controller = controller_with(ScriptedTransport::failures(1));

        let outcome = controller.send("Hello").await;

        assert!(matches!(outcome, SendOutcome::Fallback(_)));
        let snapshot = controller.snapshot();
        assert_eq!(
            snapshot.exchanges,
            vec![Exchange::answered(
                "Hello",
                "Sorry, I'm having trouble connecting. Please try again."
            )]
        );
        assert!(!snapshot.pending);
    }

    #[tokio::test]
    async fn blank_input_is_a_no_op() {
        let transport = ScriptedTransport::replies(["unused"]);
        let calls = transport.calls();
        let controller = controller_with(transport);
        controller.on_draft_change("keep me");

        for blank in ["", "   ", "\n\t "] {
            let outcome = controller.send(blank).await;
            assert!(matches!(outcome, SendOutcome::Rejected(RejectReason::Blank)));
        }

        let snapshot = controller.snapshot();
        assert!(snapshot.exchanges.is_empty());
        assert!(!snapshot.pending);
        assert_eq!(snapshot.draft, "keep me");
        assert!(calls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn stored_and_transmitted_text_is_trimmed() {
        let transport = ScriptedTransport::replies(["ok"]);
        let calls = transport.calls();
        let controller = controller_with(transport);

        controller.send("  What is MQTT?\nAnd CoAP?  ").await;

        assert_eq!(
            controller.snapshot().exchanges[0].user(),
            "What is MQTT?\nAnd CoAP?"
        );
        assert_eq!(*calls.lock().await, vec!["What is MQTT?\nAnd CoAP?".to_string()]);
    }

    #[tokio::test]
    async fn each_send_appends_exactly_one_exchange() {
        let controller = controller_with(ScriptedTransport::replies(["one", "two", "three"]));

        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            controller.send(text).await;
            let snapshot = controller.snapshot();
            assert_eq!(snapshot.exchanges.len(), i + 1);
            assert_eq!(snapshot.exchanges[i].user(), *text);
            assert!(!snapshot.exchanges[i].is_pending());
        }
    }

    #[tokio::test]
    async fn second_send_while_pending_is_dropped() {
        let (transport, release) = GatedTransport::new();
        let controller = controller_with(transport);
        let mut rx = controller.subscribe();

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send("A").await })
        };
        rx.changed().await.expect("append published");

        let mid_flight = controller.snapshot();
        assert!(mid_flight.pending);
        assert_eq!(mid_flight.exchanges.len(), 1);
        assert!(mid_flight.exchanges[0].is_pending());

        let second = controller.send("B").await;
        assert!(matches!(second, SendOutcome::Rejected(RejectReason::Busy)));
        let after_reject = controller.snapshot();
        assert_eq!(after_reject.exchanges.len(), 1);
        assert!(after_reject.pending);

        release.send(Ok("reply to A".into())).expect("gate open");
        let outcome = first.await.expect("task joins");
        assert!(matches!(outcome, SendOutcome::Answered));

        let settled = controller.snapshot();
        assert_eq!(settled.exchanges, vec![Exchange::answered("A", "reply to A")]);
        assert!(!settled.pending);
    }

    #[tokio::test]
    async fn begin_clears_draft_and_appends_before_the_request() {
        let (transport, release) = GatedTransport::new();
        let controller = controller_with(transport);
        controller.on_draft_change("Explain Zigbee");

        let in_flight = controller.begin_submit().expect("starts");
        assert_eq!(in_flight.text(), "Explain Zigbee");

        let snapshot = controller.snapshot();
        assert!(snapshot.pending);
        assert_eq!(snapshot.draft, "");
        assert_eq!(snapshot.exchanges.len(), 1);
        assert_eq!(snapshot.exchanges[0].user(), "Explain Zigbee");

        assert!(!controller.on_draft_change("typing while pending"));
        assert_eq!(controller.snapshot().draft, "");

        release.send(Ok("mesh networking".into())).expect("gate open");
        in_flight.settle().await;
        assert!(controller.on_draft_change("next"));
    }

    #[tokio::test]
    async fn never_more_than_one_pending_exchange() {
        let controller = controller_with(ScriptedTransport::replies(["1", "2"]));
        let mut rx = controller.subscribe();
        let observer = {
            let controller = controller.clone();
            tokio::spawn(async move {
                let mut max_pending = 0;
                while rx.changed().await.is_ok() {
                    let pending = controller.read(|s| s.conversation.pending_count());
                    max_pending = max_pending.max(pending);
                    if controller.read(|s| s.conversation.len() == 2 && !s.pending) {
                        break;
                    }
                }
                max_pending
            })
        };

        controller.send("first").await;
        controller.send("second").await;

        let max_pending = observer.await.expect("observer joins");
        assert!(max_pending <= 1);
        assert_eq!(controller.read(|s| s.conversation.pending_count()), 0);
    }

    #[tokio::test]
    async fn hung_request_times_out_into_fallback() {
        let controller =
            ExchangeController::new(Arc::new(HangingTransport), Duration::from_millis(50));

        let outcome = controller.send("anyone there?").await;

        match outcome {
            SendOutcome::Fallback(ChatError::Timeout(after)) => {
                assert_eq!(after, Duration::from_millis(50));
            }
            other => panic!("expected timeout fallback, got {other:?}"),
        }
        let snapshot = controller.snapshot();
        assert!(!snapshot.pending);
        assert_eq!(snapshot.exchanges[0].bot(), FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn empty_success_body_counts_as_failure() {
        let controller = controller_with(ScriptedTransport::replies([""]));

        let outcome = controller.send("Hello").await;

        assert!(matches!(outcome, SendOutcome::Fallback(ChatError::EmptyReply)));
        assert_eq!(controller.snapshot().exchanges[0].bot(), FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn dropping_in_flight_exchange_still_settles() {
        let (transport, _release) = GatedTransport::new();
        let controller = controller_with(transport);

        let in_flight = controller.begin("Hello").expect("starts");
        drop(in_flight);

        let snapshot = controller.snapshot();
        assert!(!snapshot.pending);
        assert_eq!(snapshot.exchanges[0].bot(), FALLBACK_MESSAGE);

        let mut rx = controller.subscribe();
        let task = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.send("again").await })
        };
        rx.changed().await.expect("append published");
        task.abort();
        let _ = task.await;

        let snapshot = controller.snapshot();
        assert!(!snapshot.pending);
        assert_eq!(snapshot.exchanges.len(), 2);
        assert_eq!(snapshot.exchanges[1].bot(), FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn suggestions_fill_the_draft() {
        let controller = controller_with(ScriptedTransport::replies(["ok"]));

        assert!(controller.apply_suggestion(1));
        assert_eq!(controller.snapshot().draft, SUGGESTED_QUESTIONS[1]);
        assert!(!controller.apply_suggestion(SUGGESTED_QUESTIONS.len()));

        controller.on_clear_draft();
        assert!(!controller.snapshot().can_submit());
    }

    #[tokio::test]
    async fn on_submit_sends_the_draft() {
        let controller = controller_with(ScriptedTransport::replies(["Use WPA3."]));
        controller.on_draft_change("How do I secure my router?");

        let outcome = controller.on_submit().await;

        assert!(matches!(outcome, SendOutcome::Answered));
        let snapshot = controller.snapshot();
        assert_eq!(
            snapshot.exchanges,
            vec![Exchange::answered("How do I secure my router?", "Use WPA3.")]
        );
        assert_eq!(snapshot.draft, "");
    }
}
