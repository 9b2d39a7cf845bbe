use std::any::{Any, TypeId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Duration;
use flume::Sender;
use log::warn;
use tokio_util::sync::CancellationToken;

use crate::{Command, TaskHandle, TaskId};

/// Type-erased access used by [`StateCtx`](crate::StateCtx) storage.
///
/// Implemented for every `'static` type, so `impl State for Foo {}` is all a
/// state needs. Call these on `dyn State` / `dyn Compute`, never on the `Box`
/// holding them: the box is `'static` too and would answer for itself.
pub trait AnyState: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replaces `self` with `new_self` when the boxed value has the same type.
    ///
    /// Returns `false` and leaves `self` untouched on a type mismatch.
    fn assign_box(&mut self, new_self: Box<dyn Any>) -> bool;
}

impl<T: Any> AnyState for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any>) -> bool {
        match new_self.downcast::<T>() {
            Ok(value) => {
                *self = *value;
                true
            }
            Err(_) => false,
        }
    }
}

pub trait State: AnyState {}

pub(crate) fn downcast_ref<T: 'static>(state: &dyn State) -> Option<&T> {
    state.as_any().downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: 'static>(state: &mut dyn State) -> Option<&mut T> {
    state.as_any_mut().downcast_mut::<T>()
}

pub(crate) enum Update {
    Assign {
        id: TypeId,
        value: Box<dyn Any>,
    },
    Defer {
        delay: Duration,
        handle: TaskHandle,
    },
}

/// Queues changes for the next [`StateCtx::sync_computes`](crate::StateCtx::sync_computes).
///
/// Commands and computes never hold the context itself; they push whole
/// replacement values (or deferred commands) through an `Updater`.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
    generation: Arc<AtomicU64>,
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .finish()
    }
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self {
            send,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Replace the registered state or compute of type `T` on the next sync.
    pub fn set<T: AnyState>(&self, value: T) {
        let update = Update::Assign {
            id: TypeId::of::<T>(),
            value: Box::new(value),
        };
        if self.send.send(update).is_err() {
            warn!(
                "Updater: context dropped, discarding value for {}",
                std::any::type_name::<T>()
            );
        }
    }

    /// Schedule command `C` to run once `delay` has elapsed on the frame clock.
    ///
    /// The returned handle cancels the run; a cancelled task is dropped
    /// without dispatching.
    pub fn defer<C: Command>(&self, delay: Duration) -> TaskHandle {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let handle = TaskHandle::new(
            TaskId::new(TypeId::of::<C>(), generation),
            CancellationToken::new(),
        );
        let update = Update::Defer {
            delay,
            handle: handle.clone(),
        };
        if self.send.send(update).is_err() {
            warn!(
                "Updater: context dropped, {} will never run",
                std::any::type_name::<C>()
            );
            handle.cancel();
        }
        handle
    }
}
