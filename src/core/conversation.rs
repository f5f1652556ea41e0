//! Append-only transcript of exchanges with change notification.

use std::fmt;

use tokio::sync::watch;

use crate::core::message::Exchange;

/// Why [`ConversationStore::patch_last`] refused to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchError {
    /// There is no exchange to patch.
    Empty,
    /// The most recent exchange already carries a reply.
    AlreadyAnswered,
    /// Replies must be non-empty; an empty reply means "pending".
    EmptyReply,
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::Empty => write!(f, "no exchange to patch"),
            PatchError::AlreadyAnswered => write!(f, "last exchange is already answered"),
            PatchError::EmptyReply => write!(f, "reply text is empty"),
        }
    }
}

impl std::error::Error for PatchError {}

/// Ordered sequence of exchanges; insertion order is display order.
///
/// Every successful mutation bumps a revision counter published on a
/// [`watch`] channel so renderers can redraw without polling.
pub struct ConversationStore {
    exchanges: Vec<Exchange>,
    revision: watch::Sender<u64>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            exchanges: Vec::new(),
            revision,
        }
    }

    /// Push a new pending exchange for `user_text` and return its index.
    ///
    /// The text is trimmed before storage. Blank input is refused.
    pub fn append(&mut self, user_text: &str) -> Option<usize> {
        let trimmed = user_text.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.exchanges.push(Exchange::pending(trimmed));
        self.publish();
        Some(self.exchanges.len() - 1)
    }

    /// Set the reply on the most recent exchange.
    pub fn patch_last(&mut self, bot_text: &str) -> Result<(), PatchError> {
        if bot_text.is_empty() {
            return Err(PatchError::EmptyReply);
        }
        let last = self.exchanges.last_mut().ok_or(PatchError::Empty)?;
        if !last.answer(bot_text) {
            return Err(PatchError::AlreadyAnswered);
        }
        self.publish();
        Ok(())
    }

    pub fn list(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn snapshot(&self) -> Vec<Exchange> {
        self.exchanges.clone()
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn last(&self) -> Option<&Exchange> {
        self.exchanges.last()
    }

    pub fn pending_count(&self) -> usize {
        self.exchanges.iter().filter(|e| e.is_pending()).count()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receive the revision number after each mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn publish(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

impl fmt::Debug for ConversationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationStore")
            .field("exchanges", &self.exchanges)
            .field("revision", &self.revision())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_trims_and_returns_position() {
        let mut store = ConversationStore::new();
        assert_eq!(store.append("  first  "), Some(0));
        assert_eq!(store.append("second\nline"), Some(1));

        assert_eq!(store.list()[0].user(), "first");
        assert_eq!(store.list()[1].user(), "second\nline");
        assert!(store.list().iter().all(Exchange::is_pending));
    }

    #[test]
    fn append_refuses_blank_text() {
        let mut store = ConversationStore::new();
        assert_eq!(store.append(""), None);
        assert_eq!(store.append(" \t\n "), None);
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn patch_last_fills_reply_once() {
        let mut store = ConversationStore::new();
        store.append("Hello");

        store.patch_last("Hi there!").expect("first patch succeeds");
        assert_eq!(store.last().map(Exchange::bot), Some("Hi there!"));

        assert_eq!(store.patch_last("again"), Err(PatchError::AlreadyAnswered));
        assert_eq!(store.last().map(Exchange::bot), Some("Hi there!"));
    }

    #[test]
    fn patch_last_rejects_empty_store_and_empty_reply() {
        let mut store = ConversationStore::new();
        assert_eq!(store.patch_last("orphan"), Err(PatchError::Empty));

        store.append("Hello");
        assert_eq!(store.patch_last(""), Err(PatchError::EmptyReply));
        assert_eq!(store.pending_count(), 1);
    }

    #[test]
    fn reply_whitespace_is_kept_verbatim() {
        let mut store = ConversationStore::new();
        store.append("list");
        store.patch_last("  one\n  two\n").expect("patch");
        assert_eq!(store.list()[0].bot(), "  one\n  two\n");
    }

    #[test]
    fn subscribers_see_each_mutation() {
        let mut store = ConversationStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().expect("sender alive"));

        store.append("Hello");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), 1);

        store.patch_last("Hi").expect("patch");
        assert_eq!(*rx.borrow_and_update(), 2);

        // Rejected writes are silent.
        let _ = store.patch_last("ignored");
        store.append("   ");
        assert!(!rx.has_changed().expect("sender alive"));
    }
}
