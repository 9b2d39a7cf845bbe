//! Session check against the locally stored user id.
//!
//! The host keeps the signed-in id under [`SESSION_KEY`] in its key/value
//! storage. A session is valid when a user with that id exists; with
//! [`AuthPolicy::require_unblocked`] the user must also not be blocked.

use std::any::TypeId;
use std::collections::BTreeMap;

use log::info;
use warden_states::{Command, Compute, ComputeDeps, Dep, State, Updater};

use crate::config::AdminConfig;
use crate::database::DatabaseStore;
use crate::model::{User, UserId};

pub const SESSION_KEY: &str = "user_id";

/// Host-provided persistent key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
}

/// Writable host storage.
pub trait KeyValueStoreMut: KeyValueStore {
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }
}

impl KeyValueStoreMut for MemoryStore {
    fn set(&mut self, key: &str, value: String) {
        self.inner.insert(key.to_owned(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthPolicy {
    /// Reject sessions of blocked accounts. Off by default: historically any
    /// existing id authenticates.
    pub require_unblocked: bool,
}

/// The user the stored session id refers to, if it passes `policy`.
pub fn session_user<'a>(
    storage: &impl KeyValueStore,
    users: &'a [User],
    policy: AuthPolicy,
) -> Option<&'a User> {
    let id = storage.get(SESSION_KEY)?;
    users
        .iter()
        .find(|user| user.id.as_str() == id)
        .filter(|user| !(policy.require_unblocked && user.blocked))
}

pub fn is_authenticated(storage: &impl KeyValueStore, users: &[User], policy: AuthPolicy) -> bool {
    session_user(storage, users, policy).is_some()
}

/// In-app mirror of the host's session entry.
///
/// Loaded from the host storage at start-up and written back on save.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user_id: Option<String>,
}

impl State for SessionState {}

impl KeyValueStore for SessionState {
    fn get(&self, key: &str) -> Option<String> {
        if key == SESSION_KEY {
            self.user_id.clone()
        } else {
            None
        }
    }
}

impl KeyValueStoreMut for SessionState {
    fn set(&mut self, key: &str, value: String) {
        if key == SESSION_KEY {
            self.user_id = if value.is_empty() { None } else { Some(value) };
        }
    }
}

impl SessionState {
    pub fn load(storage: &impl KeyValueStore) -> Self {
        Self {
            user_id: storage.get(SESSION_KEY).filter(|id| !id.is_empty()),
        }
    }

    pub fn save(&self, storage: &mut impl KeyValueStoreMut) {
        storage.set(SESSION_KEY, self.user_id.clone().unwrap_or_default());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    /// Nothing stored.
    #[default]
    Anonymous,
    Authenticated { user_id: UserId, username: String },
    /// An id is stored but does not pass the check.
    Rejected { user_id: String },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Authenticated { username, .. } => Some(username),
            Self::Anonymous | Self::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionCompute {
    pub session: Session,
}

impl Compute for SessionCompute {
    fn deps(&self) -> ComputeDeps {
        vec![
            TypeId::of::<DatabaseStore>(),
            TypeId::of::<SessionState>(),
            TypeId::of::<AdminConfig>(),
        ]
    }

    fn compute(&self, deps: &Dep<'_>, updater: Updater) {
        let storage = deps.state::<SessionState>();
        let database = deps.state::<DatabaseStore>().get();
        let policy = deps.state::<AdminConfig>().auth_policy;

        let session = match (
            &storage.user_id,
            session_user(storage, &database.users, policy),
        ) {
            (None, _) => Session::Anonymous,
            (Some(_), Some(user)) => Session::Authenticated {
                user_id: user.id.clone(),
                username: user.username.clone(),
            },
            (Some(user_id), None) => Session::Rejected {
                user_id: user_id.clone(),
            },
        };

        if session != self.session {
            updater.set(Self { session });
        }
    }
}

/// Input for [`SignInCommand`].
#[derive(Debug, Clone, Default)]
pub struct SignInInput {
    pub user_id: String,
}

impl State for SignInInput {}

/// Store the id typed into the sign-in gate as the session id.
#[derive(Debug, Default)]
pub struct SignInCommand;

impl Command for SignInCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        let user_id = deps.state::<SignInInput>().user_id.trim().to_owned();
        if user_id.is_empty() {
            info!("SignInCommand: no user id entered, skipping");
            return;
        }

        info!("SignInCommand: signing in as '{user_id}'");
        deps.state_mut::<SessionState>().set(SESSION_KEY, user_id);
        deps.state_mut::<SignInInput>().user_id.clear();
    }
}

#[derive(Debug, Default)]
pub struct SignOutCommand;

impl Command for SignOutCommand {
    fn run(&self, deps: &mut Dep<'_>, _updater: Updater) {
        info!("SignOutCommand: clearing session");
        deps.state_mut::<SessionState>().user_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use warden_states::StateCtx;

    fn users() -> Vec<User> {
        let alice = User::new(UserId::new("1"), "alice");
        let mut bob = User::new(UserId::new("2"), "bob");
        bob.blocked = true;
        vec![alice, bob]
    }

    fn storage_with(id: &str) -> MemoryStore {
        let mut storage = MemoryStore::default();
        storage.set(SESSION_KEY, id.to_owned());
        storage
    }

    #[test]
    fn test_missing_id_is_not_authenticated() {
        let storage = MemoryStore::default();
        assert!(!is_authenticated(&storage, &users(), AuthPolicy::default()));
    }

    #[test]
    fn test_unknown_id_is_not_authenticated() {
        let storage = storage_with("42");
        assert!(!is_authenticated(&storage, &users(), AuthPolicy::default()));
    }

    #[test]
    fn test_known_id_is_authenticated() {
        let storage = storage_with("1");
        assert!(is_authenticated(&storage, &users(), AuthPolicy::default()));
    }

    #[test]
    fn test_blocked_user_depends_on_policy() {
        let storage = storage_with("2");
        let lenient = AuthPolicy {
            require_unblocked: false,
        };
        let strict = AuthPolicy {
            require_unblocked: true,
        };

        assert!(is_authenticated(&storage, &users(), lenient));
        assert!(!is_authenticated(&storage, &users(), strict));
    }

    #[test]
    fn test_session_state_round_trips_through_storage() {
        let mut host = storage_with("1");
        let session = SessionState::load(&host);
        assert_eq!(session.user_id.as_deref(), Some("1"));

        SessionState::default().save(&mut host);
        assert_eq!(host.get(SESSION_KEY).as_deref(), Some(""));
        assert_eq!(SessionState::load(&host).user_id, None);
    }

    fn setup_ctx(policy: AuthPolicy) -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(DatabaseStore::new(Database {
            users: users(),
            ..Database::default()
        }));
        ctx.add_state(AdminConfig {
            auth_policy: policy,
            ..AdminConfig::default()
        });
        ctx.add_state(SessionState::default());
        ctx.add_state(SignInInput::default());
        ctx.record_compute(SessionCompute::default());
        ctx.record_command(SignInCommand);
        ctx.record_command(SignOutCommand);
        ctx
    }

    fn sign_in(ctx: &mut StateCtx, id: &str) {
        ctx.update::<SignInInput>(|input| input.user_id = id.to_owned());
        ctx.dispatch::<SignInCommand>();
        ctx.tick();
    }

    #[test]
    fn test_session_compute_tracks_sign_in_and_out() {
        let mut ctx = setup_ctx(AuthPolicy::default());
        ctx.tick();
        assert_eq!(ctx.cached::<SessionCompute>().session, Session::Anonymous);

        sign_in(&mut ctx, " 1 ");
        assert_eq!(
            ctx.cached::<SessionCompute>().session,
            Session::Authenticated {
                user_id: UserId::new("1"),
                username: "alice".to_owned(),
            }
        );
        assert!(ctx.state::<SignInInput>().user_id.is_empty());

        ctx.dispatch::<SignOutCommand>();
        ctx.tick();
        assert_eq!(ctx.cached::<SessionCompute>().session, Session::Anonymous);
    }

    #[test]
    fn test_session_compute_rejects_blocked_under_strict_policy() {
        let mut ctx = setup_ctx(AuthPolicy {
            require_unblocked: true,
        });

        sign_in(&mut ctx, "2");

        assert_eq!(
            ctx.cached::<SessionCompute>().session,
            Session::Rejected {
                user_id: "2".to_owned()
            }
        );
    }

    #[test]
    fn test_blank_sign_in_is_ignored() {
        let mut ctx = setup_ctx(AuthPolicy::default());

        sign_in(&mut ctx, "   ");

        assert!(ctx.state::<SessionState>().user_id.is_none());
    }
}
