//! Domain layer of the Warden admin console.
//!
//! Everything the UI reads or writes lives here as states, computes and
//! commands registered on a [`StateCtx`]. The UI stays dumb: it renders
//! cached computes, writes inputs into states and dispatches commands.

mod config;
mod database;
mod date;
mod error;
mod model;
mod route;
mod session;
mod sort;

pub mod logs;
pub mod users;

pub use config::{AdminConfig, DEFAULT_HIDE_ERROR_DELAY_MS, DEFAULT_NOTIFICATION_DELAY_MS};
pub use database::{DEFAULT_MIN_PASSWORD_LENGTH, Database, DatabaseStore, Mutation};
pub use date::{DATE_FORMAT, format_timestamp};
pub use error::{Error, Result};
pub use model::{Log, LogAction, LogId, Role, User, UserId};
pub use route::Route;
pub use session::{
    AuthPolicy, KeyValueStore, KeyValueStoreMut, MemoryStore, SESSION_KEY, Session,
    SessionCompute, SessionState, SignInCommand, SignInInput, SignOutCommand, is_authenticated,
    session_user,
};
pub use sort::{Comparator, SortDirection, SortState};

use log::info;
use warden_states::{StateCtx, Time};

/// Register every state, compute and command of the console on `ctx`.
pub fn install(ctx: &mut StateCtx, seed: Database, config: AdminConfig, session: SessionState) {
    info!(
        "installing console: {} users, {} logs",
        seed.users.len(),
        seed.logs.len()
    );

    ctx.add_state(Time::now());
    ctx.add_state(DatabaseStore::new(seed));
    ctx.add_state(config);
    ctx.add_state(Route::default());
    ctx.add_state(session);
    ctx.add_state(SignInInput::default());
    ctx.add_state(users::UserListState::default());
    ctx.add_state(SortState::<users::UserSortKey>::default());
    ctx.add_state(SortState::<logs::LogSortKey>::default());

    ctx.record_compute(SessionCompute::default());
    ctx.record_compute(users::UserRowsCompute::default());
    ctx.record_compute(logs::LogRowsCompute::default());

    ctx.record_command(SignInCommand);
    ctx.record_command(SignOutCommand);
    ctx.record_command(users::OpenCreateUserModalCommand);
    ctx.record_command(users::CloseCreateUserModalCommand);
    ctx.record_command(users::CreateUserCommand);
    ctx.record_command(users::ClearCreateUserErrorCommand);
    ctx.record_command(users::DismissNotificationCommand);
    ctx.record_command(users::SetUserBlockedCommand);
    ctx.record_command(users::SaveMinPasswordLengthCommand);
}
