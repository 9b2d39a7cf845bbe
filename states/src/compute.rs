use std::any::TypeId;

use crate::{AnyState, Dep, Updater};

/// State type ids a compute reads. A change to any of them re-runs it.
pub type ComputeDeps = Vec<TypeId>;

/// Derived value cached in [`StateCtx`](crate::StateCtx).
///
/// `compute` reads its dependencies and publishes the new value through
/// [`Updater::set`]; it lands on the next `sync_computes`.
pub trait Compute: AnyState {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: &Dep<'_>, updater: Updater);
}
