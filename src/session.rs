//! Per-user confirmation state.
//!
//! Each authorized user holds at most one [`PendingBatch`]: the questions
//! extracted from their last upload, waiting for a yes/no decision. The
//! store owns that state exclusively; handlers go through the explicit
//! insert/take/clear operations and never keep a batch of their own. Nothing
//! is persisted: a restart forgets any pending confirmation.

use dashmap::DashMap;
use teloxide::types::UserId;

use crate::mcq::Question;

/// Extracted-but-unconfirmed questions from one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBatch {
    /// Questions in document order.
    pub questions: Vec<Question>,
    /// Filename of the upload, echoed back in the dialog.
    pub source_name: String,
}

/// What a free-text reply means given the user's current state.
#[derive(Debug)]
pub enum ConfirmAction {
    /// "yes" with a stored batch: drain it through the publisher.
    Publish(PendingBatch),
    /// "yes" with nothing stored.
    NothingPending,
    /// "no": the batch, if any, has been discarded.
    Discard,
    /// Anything else: ask for a valid yes/no again, batch untouched.
    Reprompt,
}

/// Maps user identity to their pending batch.
#[derive(Debug, Default)]
pub struct SessionStore {
    pending: DashMap<UserId, PendingBatch>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a freshly extracted batch, entering AwaitingConfirmation.
    pub fn insert(&self, user: UserId, batch: PendingBatch) {
        self.pending.insert(user, batch);
    }

    /// Removes and returns the user's batch, returning them to Idle.
    pub fn take(&self, user: UserId) -> Option<PendingBatch> {
        self.pending.remove(&user).map(|(_, batch)| batch)
    }

    /// Drops the user's batch, if any.
    pub fn clear(&self, user: UserId) {
        self.pending.remove(&user);
    }

    /// True while the user has an upload awaiting confirmation.
    pub fn has_pending(&self, user: UserId) -> bool {
        self.pending.contains_key(&user)
    }

    /// Number of questions awaiting confirmation for the user.
    pub fn pending_count(&self, user: UserId) -> Option<usize> {
        self.pending.get(&user).map(|batch| batch.questions.len())
    }

    /// Resolves a free-text reply against the user's state. "yes"/"no" are
    /// matched case-insensitively; "yes" consumes the batch, "no" drops it,
    /// everything else leaves it in place.
    pub fn resolve_reply(&self, user: UserId, text: &str) -> ConfirmAction {
        match text.trim().to_lowercase().as_str() {
            "yes" => match self.take(user) {
                Some(batch) => ConfirmAction::Publish(batch),
                None => ConfirmAction::NothingPending,
            },
            "no" => {
                self.clear(user);
                ConfirmAction::Discard
            }
            _ => ConfirmAction::Reprompt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const USER: UserId = UserId(42);

    fn batch(n: usize) -> PendingBatch {
        PendingBatch {
            questions: (0..n)
                .map(|i| Question {
                    text: format!("Question {i}?"),
                    options: vec!["a".to_string(), "b".to_string()],
                    image_url: None,
                })
                .collect(),
            source_name: "quiz.html".to_string(),
        }
    }

    #[test]
    fn test_insert_take_lifecycle() {
        let store = SessionStore::new();
        assert!(!store.has_pending(USER));

        store.insert(USER, batch(2));
        assert!(store.has_pending(USER));
        assert_eq!(store.pending_count(USER), Some(2));

        let taken = store.take(USER).unwrap();
        assert_eq!(taken.questions.len(), 2);
        assert!(!store.has_pending(USER));
        assert!(store.take(USER).is_none());
    }

    #[test]
    fn test_yes_consumes_the_batch() {
        let store = SessionStore::new();
        store.insert(USER, batch(3));

        match store.resolve_reply(USER, "Yes") {
            ConfirmAction::Publish(b) => assert_eq!(b.questions.len(), 3),
            other => panic!("expected Publish, got {other:?}"),
        }
        assert!(!store.has_pending(USER));
    }

    #[test]
    fn test_yes_without_batch_reports_nothing_pending() {
        let store = SessionStore::new();
        assert!(matches!(
            store.resolve_reply(USER, "yes"),
            ConfirmAction::NothingPending
        ));
    }

    #[test]
    fn test_no_discards_the_batch() {
        let store = SessionStore::new();
        store.insert(USER, batch(2));

        assert!(matches!(store.resolve_reply(USER, "No"), ConfirmAction::Discard));
        assert!(!store.has_pending(USER));
    }

    #[test]
    fn test_other_text_leaves_batch_untouched() {
        let store = SessionStore::new();
        store.insert(USER, batch(2));

        assert!(matches!(store.resolve_reply(USER, "maybe"), ConfirmAction::Reprompt));
        assert_eq!(store.pending_count(USER), Some(2));

        // "maybe" followed by "No" must still discard cleanly.
        assert!(matches!(store.resolve_reply(USER, "No"), ConfirmAction::Discard));
        assert!(!store.has_pending(USER));
    }

    #[test]
    fn test_replies_are_trimmed_and_case_insensitive() {
        let store = SessionStore::new();
        store.insert(USER, batch(1));
        assert!(matches!(
            store.resolve_reply(USER, "  YES \n"),
            ConfirmAction::Publish(_)
        ));
    }

    #[test]
    fn test_users_are_isolated() {
        let store = SessionStore::new();
        let other = UserId(7);
        store.insert(USER, batch(1));

        assert!(!store.has_pending(other));
        assert!(matches!(
            store.resolve_reply(other, "yes"),
            ConfirmAction::NothingPending
        ));
        assert!(store.has_pending(USER));
    }
}
