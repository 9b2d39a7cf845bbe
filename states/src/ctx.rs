use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use flume::Receiver;
use log::{debug, error, warn};

use crate::dep::StateMap;
use crate::error::Error;
use crate::state::{Update, downcast_mut, downcast_ref};
use crate::task::Deferred;
use crate::{Command, Compute, Dep, State, StateSyncStatus, Time, Updater};

struct ComputeEntry {
    compute: Box<dyn Compute>,
    status: StateSyncStatus,
}

/// Owns every registered state, compute and command of the app.
///
/// Frame loop:
/// 1. refresh [`Time`], then [`run_due`](Self::run_due) for expired deferred tasks
/// 2. [`sync_computes`](Self::sync_computes) to apply queued updates
/// 3. render, reading via [`state`](Self::state) / [`cached`](Self::cached),
///    writing via [`dispatch`](Self::dispatch)
/// 4. [`run_computed`](Self::run_computed) to refresh dirty computes
pub struct StateCtx {
    states: StateMap,
    computes: BTreeMap<TypeId, ComputeEntry>,
    commands: BTreeMap<TypeId, Box<dyn Command>>,

    // states changed since the last `run_computed`
    dirty: BTreeSet<TypeId>,
    deferred: Vec<Deferred>,

    updater: Updater,
    recv: Receiver<Update>,
}

impl std::fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.computes.len())
            .field("commands", &self.commands.len())
            .field("dirty", &self.dirty.len())
            .field("deferred", &self.deferred)
            .finish()
    }
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();

        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            commands: BTreeMap::new(),
            dirty: BTreeSet::new(),
            deferred: Vec::new(),
            updater: Updater::new(send),
            recv,
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states.insert(id, Box::new(state));
        self.dirty.insert(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        self.computes.insert(
            TypeId::of::<T>(),
            ComputeEntry {
                compute: Box::new(compute),
                status: StateSyncStatus::BeforeInit,
            },
        );
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Box::new(command));
    }

    pub fn updater(&self) -> Updater {
        self.updater.clone()
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

    /// Mutable access; marks `T` dirty.
    ///
    /// # Panics
    /// Panics if `T` is not registered.
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.dirty.insert(id);
        self.states
            .get_mut(&id)
            .and_then(|state| downcast_mut::<T>(&mut **state))
            .unwrap_or_else(|| panic!("{}", Error::state_not_found(id, type_name::<T>())))
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn try_cached<T: Compute>(&self) -> Result<&T, Error> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|entry| (*entry.compute).as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::compute_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    /// # Panics
    /// Panics if `T` is not recorded.
    pub fn cached<T: Compute>(&self) -> &T {
        self.try_cached::<T>().unwrap_or_else(|err| panic!("{err}"))
    }

    pub fn compute_status<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.computes
            .get(&TypeId::of::<T>())
            .map(|entry| entry.status)
    }

    /// # Panics
    /// Panics if `C` is not recorded.
    pub fn dispatch<C: Command>(&mut self) {
        self.try_dispatch(TypeId::of::<C>())
            .unwrap_or_else(|err| panic!("{err} ({})", type_name::<C>()));
    }

    pub fn try_dispatch(&mut self, id: TypeId) -> Result<(), Error> {
        let command = self
            .commands
            .get(&id)
            .ok_or_else(|| Error::command_not_found(id, "dispatch"))?;
        let mut dep = Dep::new(&mut self.states, &mut self.dirty);
        command.run(&mut dep, self.updater.clone());
        Ok(())
    }

    /// The frame clock, or the wall clock when no [`Time`] is registered.
    pub fn now(&self) -> DateTime<Utc> {
        self.try_state::<Time>()
            .map(|time| *time.as_ref())
            .unwrap_or_else(|_| Utc::now())
    }

    /// Apply every update queued through [`Updater`] since the last sync.
    pub fn sync_computes(&mut self) {
        let now = self.now();
        for update in self.recv.try_iter() {
            match update {
                Update::Assign { id, value } => {
                    if let Some(entry) = self.computes.get_mut(&id) {
                        if (*entry.compute).assign_box(value) {
                            entry.status = StateSyncStatus::Clean;
                        } else {
                            error!("sync_computes: type mismatch for compute {id:?}");
                        }
                    } else if let Some(state) = self.states.get_mut(&id) {
                        if (**state).assign_box(value) {
                            self.dirty.insert(id);
                        } else {
                            error!("sync_computes: type mismatch for state {id:?}");
                        }
                    } else {
                        warn!("sync_computes: dropping update for unregistered {id:?}");
                    }
                }
                Update::Defer { delay, handle } => {
                    debug!(
                        "scheduled task {:?} in {}ms",
                        handle.id(),
                        delay.num_milliseconds()
                    );
                    self.deferred.push(Deferred {
                        due: now + delay,
                        handle,
                    });
                }
            }
        }
    }

    /// Re-run computes that were never run or whose dependencies changed.
    pub fn run_computed(&mut self) {
        let dep = Dep::new(&mut self.states, &mut self.dirty);
        let mut ran = Vec::new();
        for (id, entry) in &mut self.computes {
            let should_run = match entry.status {
                StateSyncStatus::BeforeInit => true,
                StateSyncStatus::Pending | StateSyncStatus::Clean => entry
                    .compute
                    .deps()
                    .iter()
                    .any(|dep_id| dep.is_touched(dep_id)),
            };
            if should_run {
                entry.compute.compute(&dep, self.updater.clone());
                entry.status = StateSyncStatus::Pending;
                ran.push(*id);
            }
        }
        drop(dep);
        if !ran.is_empty() {
            debug!("run_computed: {} compute(s) refreshed", ran.len());
        }
        self.dirty.clear();
    }

    /// Dispatch every deferred task whose due instant has passed.
    ///
    /// Cancelled tasks are discarded without running.
    pub fn run_due(&mut self) {
        let now = self.now();
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|task| task.is_due(now) || task.handle.is_cancelled());
        self.deferred = pending;

        for task in due {
            if task.handle.is_cancelled() {
                debug!("run_due: skipping cancelled task {:?}", task.handle.id());
                continue;
            }
            debug!("run_due: firing task {:?}", task.handle.id());
            if let Err(err) = self.try_dispatch(task.handle.id().type_id()) {
                error!("run_due: {err}");
            }
        }
    }

    /// Number of deferred tasks still waiting (cancelled ones included until
    /// the next `run_due`).
    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    /// `run_due`, `sync_computes`, `run_computed`, `sync_computes`: one full
    /// frame without rendering.
    pub fn tick(&mut self) {
        self.run_due();
        self.sync_computes();
        self.run_computed();
        self.sync_computes();
    }
}
