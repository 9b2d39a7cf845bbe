//! Deferred one-shot tasks.
//!
//! A deferred task is a command scheduled to run once the frame clock
//! ([`Time`](crate::Time)) passes its due instant. Each task carries a
//! [`TaskHandle`] wrapping a `CancellationToken`; cancelling the handle before
//! the due instant drops the task without running it.
//!
//! ```ignore
//! let handle = updater.defer::<ClearErrorCommand>(Duration::seconds(3));
//! // A newer error replaces the old one: the old expiry must not fire.
//! handle.cancel();
//! ```

use std::any::TypeId;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

/// Identifies a deferred task: the command type plus a generation counter.
///
/// Generations increase with every `Updater::defer` call, so two tasks for
/// the same command never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    /// The command type this task dispatches.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Cancellation handle for a deferred task.
///
/// Clones share the same token: cancelling any clone cancels the task.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

#[derive(Debug)]
pub(crate) struct Deferred {
    pub(crate) due: DateTime<Utc>,
    pub(crate) handle: TaskHandle,
}

impl Deferred {
    pub(crate) fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.due <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn task_id_equality() {
        let type_id = TypeId::of::<String>();

        let id1 = TaskId::new(type_id, 1);
        let id2 = TaskId::new(type_id, 1);
        let id3 = TaskId::new(type_id, 2);
        let id4 = TaskId::new(TypeId::of::<i32>(), 1);

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_ne!(id1, id4);
    }

    #[test]
    fn task_handle_clone_shares_token() {
        let handle1 = TaskHandle::new(
            TaskId::new(TypeId::of::<String>(), 1),
            CancellationToken::new(),
        );
        let handle2 = handle1.clone();

        assert!(!handle2.is_cancelled());
        handle1.cancel();

        assert!(handle1.is_cancelled());
        assert!(handle2.is_cancelled());
    }

    #[test]
    fn deferred_is_due_at_and_after_deadline() {
        let now = Utc::now();
        let task = Deferred {
            due: now,
            handle: TaskHandle::new(
                TaskId::new(TypeId::of::<String>(), 1),
                CancellationToken::new(),
            ),
        };

        assert!(!task.is_due(now - Duration::milliseconds(1)));
        assert!(task.is_due(now));
        assert!(task.is_due(now + Duration::seconds(1)));
    }
}
