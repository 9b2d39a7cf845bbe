use std::any::Any;

use crate::{Dep, Updater};

/// Manual-only action, run through [`StateCtx::dispatch`](crate::StateCtx::dispatch).
///
/// Commands read their input from states and may mutate states directly via
/// [`Dep::state_mut`]. Anything that must happen later goes through
/// [`Updater::defer`].
pub trait Command: Any {
    fn run(&self, deps: &mut Dep<'_>, updater: Updater);
}
