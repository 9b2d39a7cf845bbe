use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::Error;
use crate::state::{downcast_mut, downcast_ref};
use crate::State;

pub(crate) type StateMap = BTreeMap<TypeId, Box<dyn State>>;

/// Borrowed view over the registered states handed to computes and commands.
///
/// Every `state_mut` call marks the state dirty so dependent computes re-run.
pub struct Dep<'a> {
    states: &'a mut StateMap,
    touched: &'a mut BTreeSet<TypeId>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(states: &'a mut StateMap, touched: &'a mut BTreeSet<TypeId>) -> Self {
        Self { states, touched }
    }

    pub(crate) fn is_touched(&self, id: &TypeId) -> bool {
        self.touched.contains(id)
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| downcast_ref::<T>(&**state))
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` is not registered.
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    /// Panics if `T` is not registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.touched.insert(id);
        self.states
            .get_mut(&id)
            .and_then(|state| downcast_mut::<T>(&mut **state))
            .unwrap_or_else(|| panic!("{}", Error::state_not_found(id, type_name::<T>())))
    }
}
