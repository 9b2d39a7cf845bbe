use std::any::TypeId;
use std::cmp::Ordering;

use warden_states::{Compute, ComputeDeps, Dep, Updater};

use crate::config::AdminConfig;
use crate::database::DatabaseStore;
use crate::model::{Role, User, UserId};
use crate::sort::{Comparator, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortKey {
    Username,
    Role,
}

impl UserSortKey {
    fn compare(self, comparator: Comparator, a: &User, b: &User) -> Ordering {
        match self {
            Self::Username => comparator.compare(&a.username, &b.username),
            Self::Role => comparator.compare(a.role.as_str(), b.role.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub blocked: bool,
    /// Admin rows get no block toggle.
    pub can_block: bool,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            blocked: user.blocked,
            can_block: !user.is_admin(),
        }
    }
}

/// Table rows of the user list in display order.
#[derive(Debug, Clone, Default)]
pub struct UserRowsCompute {
    pub rows: Vec<UserRow>,
}

impl Compute for UserRowsCompute {
    fn deps(&self) -> ComputeDeps {
        vec![
            TypeId::of::<DatabaseStore>(),
            TypeId::of::<SortState<UserSortKey>>(),
            TypeId::of::<AdminConfig>(),
        ]
    }

    fn compute(&self, deps: &Dep<'_>, updater: Updater) {
        let database = deps.state::<DatabaseStore>().get();
        let sort = deps.state::<SortState<UserSortKey>>();
        let comparator = deps.state::<AdminConfig>().comparator;

        let mut users: Vec<&User> = database.users.iter().collect();
        if let Some(column) = sort.column {
            users.sort_by(|a, b| sort.direction.apply(column.compare(comparator, a, b)));
        }

        updater.set(Self {
            rows: users.into_iter().map(UserRow::from).collect(),
        });
    }
}
