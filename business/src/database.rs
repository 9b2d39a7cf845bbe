//! The domain aggregate and its store.
//!
//! `Database` is treated as an immutable snapshot: every write builds a new
//! value through [`Database::apply`] and installs it with
//! [`DatabaseStore::replace`] or [`DatabaseStore::apply`]. Readers holding an
//! `Arc<Database>` never observe a half-applied change.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::error;
use serde::{Deserialize, Serialize};
use warden_states::State;

use crate::model::{Log, User, UserId};
use crate::{Error, Result};

pub const DEFAULT_MIN_PASSWORD_LENGTH: u32 = 8;

const DEMO_SEED: &str = include_str!("../assets/seed.json");

fn default_min_password_length() -> u32 {
    DEFAULT_MIN_PASSWORD_LENGTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Insertion order, not sorted.
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub logs: Vec<Log>,
    #[serde(rename = "MIN_PASSWORD_LENGTH", default = "default_min_password_length")]
    pub min_password_length: u32,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            logs: Vec::new(),
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

/// One change to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetBlocked { id: UserId, blocked: bool },
    CreateUser { id: UserId, username: String },
    SetMinPasswordLength(u32),
}

impl Database {
    /// Parse a JSON seed and check the username/id uniqueness invariants.
    pub fn from_json(json: &str) -> Result<Self> {
        let database: Self = serde_json::from_str(json)?;
        database.validate()?;
        Ok(database)
    }

    /// The bundled demo aggregate.
    pub fn demo() -> Self {
        Self::from_json(DEMO_SEED).unwrap_or_else(|err| {
            error!("bundled seed is invalid, starting empty: {err}");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        let mut usernames = BTreeSet::new();
        let mut ids = BTreeSet::new();
        for user in &self.users {
            if !usernames.insert(user.username.as_str()) {
                return Err(Error::InvalidSeed(format!(
                    "duplicate username \"{}\"",
                    user.username
                )));
            }
            if !ids.insert(&user.id) {
                return Err(Error::InvalidSeed(format!("duplicate user id \"{}\"", user.id)));
            }
        }
        Ok(())
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    pub fn has_username(&self, username: &str) -> bool {
        self.users.iter().any(|user| user.username == username)
    }

    /// A random id that no current user holds.
    pub fn fresh_user_id(&self) -> UserId {
        loop {
            let id = UserId::generate();
            if self.user(&id).is_none() {
                return id;
            }
        }
    }

    /// Build the aggregate that results from `mutation`; `self` is untouched.
    pub fn apply(&self, mutation: &Mutation) -> Result<Self> {
        match mutation {
            Mutation::SetBlocked { id, blocked } => Ok(self.with_user_blocked(id, *blocked)),
            Mutation::CreateUser { id, username } => self.with_user_created(id.clone(), username),
            Mutation::SetMinPasswordLength(length) => Ok(Self {
                min_password_length: *length,
                ..self.clone()
            }),
        }
    }

    /// Unknown ids leave the aggregate equal to `self`.
    pub fn with_user_blocked(&self, id: &UserId, blocked: bool) -> Self {
        let users = self
            .users
            .iter()
            .map(|user| {
                if &user.id == id {
                    User {
                        blocked,
                        ..user.clone()
                    }
                } else {
                    user.clone()
                }
            })
            .collect();

        Self {
            users,
            ..self.clone()
        }
    }

    pub fn with_user_created(&self, id: UserId, username: &str) -> Result<Self> {
        if username.trim().is_empty() {
            return Err(Error::EmptyUsername);
        }
        if self.has_username(username) {
            return Err(Error::DuplicateUsername(username.to_owned()));
        }

        let mut next = self.clone();
        next.users.push(User::new(id, username));
        Ok(next)
    }
}

/// Holder of the current aggregate.
///
/// `get` hands out the current snapshot; `replace` swaps in a whole new one.
/// `version` increases on every replacement so a writer can detect that the
/// snapshot it started from is stale.
#[derive(Debug, Clone, Default)]
pub struct DatabaseStore {
    current: Arc<Database>,
    version: u64,
}

impl State for DatabaseStore {}

impl DatabaseStore {
    pub fn new(seed: Database) -> Self {
        Self {
            current: Arc::new(seed),
            version: 0,
        }
    }

    pub fn get(&self) -> Arc<Database> {
        Arc::clone(&self.current)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn replace(&mut self, next: Database) {
        self.current = Arc::new(next);
        self.version += 1;
    }

    /// Apply `mutation` to the current snapshot if nobody replaced it since
    /// `expected_version` was read.
    pub fn apply(&mut self, expected_version: u64, mutation: &Mutation) -> Result<Arc<Database>> {
        if expected_version != self.version {
            return Err(Error::VersionConflict {
                expected: expected_version,
                actual: self.version,
            });
        }
        let next = self.current.apply(mutation)?;
        self.replace(next);
        Ok(self.get())
    }
}
