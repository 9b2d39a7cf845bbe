//! State runtime for the Warden admin console.
//!
//! - [`State`]: plain values registered once in [`StateCtx`]
//! - [`Compute`]: derived values, re-run when a dependency state changes
//! - [`Command`]: manual-only actions, run via [`StateCtx::dispatch`]
//! - [`Updater`]: queued replacements and deferred, cancellable commands

mod basic_state;
mod command;
mod compute;
mod ctx;
mod dep;
mod error;
mod state;
mod state_sync_status;
mod task;

pub use basic_state::Time;
pub use command::Command;
pub use compute::{Compute, ComputeDeps};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use state::{AnyState, State, Updater};
pub use state_sync_status::StateSyncStatus;
pub use task::{TaskHandle, TaskId};

#[cfg(test)]
mod state_ctx_tests {
    use std::any::TypeId;

    use chrono::{Duration, Utc};

    use super::*;

    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    struct Counter {
        value: i32,
    }

    impl State for Counter {}

    #[derive(Debug, Default)]
    struct Doubled {
        value: i32,
    }

    impl Compute for Doubled {
        fn deps(&self) -> ComputeDeps {
            vec![TypeId::of::<Counter>()]
        }

        fn compute(&self, deps: &Dep<'_>, updater: Updater) {
            let counter = deps.state::<Counter>();
            updater.set(Self {
                value: counter.value * 2,
            });
        }
    }

    struct Increment;

    impl Command for Increment {
        fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
            deps.state_mut::<Counter>().value += 1;
        }
    }

    struct IncrementLater;

    impl Command for IncrementLater {
        fn run(&self, _deps: &mut Dep<'_>, updater: Updater) {
            updater.defer::<Increment>(Duration::seconds(3));
        }
    }

    fn setup_ctx() -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Time::new(Utc::now()));
        ctx.add_state(Counter::default());
        ctx.record_compute(Doubled::default());
        ctx.record_command(Increment);
        ctx.record_command(IncrementLater);
        ctx
    }

    fn advance(ctx: &mut StateCtx, by: Duration) {
        ctx.update::<Time>(|time| *time.as_mut() += by);
    }

    #[test]
    fn dispatch_mutates_state() {
        let mut ctx = setup_ctx();

        ctx.dispatch::<Increment>();
        ctx.dispatch::<Increment>();

        assert_eq!(ctx.state::<Counter>().value, 2);
    }

    #[test]
    fn compute_follows_dependency() {
        let mut ctx = setup_ctx();

        ctx.tick();
        assert_eq!(ctx.cached::<Doubled>().value, 0);
        assert_eq!(ctx.compute_status::<Doubled>(), Some(StateSyncStatus::Clean));

        ctx.dispatch::<Increment>();
        ctx.tick();
        assert_eq!(ctx.cached::<Doubled>().value, 2);
    }

    #[test]
    fn updater_set_replaces_state_on_sync() {
        let mut ctx = setup_ctx();

        ctx.updater().set(Counter { value: 7 });
        assert_eq!(ctx.state::<Counter>().value, 0);

        ctx.sync_computes();
        assert_eq!(ctx.state::<Counter>().value, 7);
    }

    #[test]
    fn deferred_command_fires_after_delay() {
        let mut ctx = setup_ctx();

        ctx.dispatch::<IncrementLater>();
        ctx.tick();
        assert_eq!(ctx.pending_tasks(), 1);
        assert_eq!(ctx.state::<Counter>().value, 0);

        advance(&mut ctx, Duration::seconds(2));
        ctx.tick();
        assert_eq!(ctx.state::<Counter>().value, 0);

        advance(&mut ctx, Duration::seconds(1));
        ctx.tick();
        assert_eq!(ctx.state::<Counter>().value, 1);
        assert_eq!(ctx.pending_tasks(), 0);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut ctx = setup_ctx();

        let handle = ctx.updater().defer::<Increment>(Duration::seconds(1));
        ctx.sync_computes();
        handle.cancel();

        advance(&mut ctx, Duration::seconds(5));
        ctx.run_due();

        assert_eq!(ctx.state::<Counter>().value, 0);
        assert_eq!(ctx.pending_tasks(), 0);
    }

    #[test]
    fn missing_state_is_an_error() {
        let ctx = StateCtx::new();
        let err = ctx.try_state::<Counter>().unwrap_err();
        assert!(
            err.to_string().contains("State not found"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_command_is_an_error() {
        let mut ctx = StateCtx::new();
        assert!(ctx.try_dispatch(TypeId::of::<Increment>()).is_err());
    }

    #[test]
    fn defer_generations_are_unique() {
        let ctx = setup_ctx();
        let updater = ctx.updater();

        let first = updater.defer::<Increment>(Duration::seconds(1));
        let second = updater.defer::<Increment>(Duration::seconds(1));

        assert_eq!(first.id().type_id(), second.id().type_id());
        assert_ne!(first.id(), second.id());
    }
}
