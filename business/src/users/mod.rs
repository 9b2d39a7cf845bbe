//! User list: view state, commands and derived rows.

mod commands;
mod list_users_compute;
mod state;

pub use commands::{
    ClearCreateUserErrorCommand, CloseCreateUserModalCommand, CreateUserCommand,
    DismissNotificationCommand, OpenCreateUserModalCommand, SaveMinPasswordLengthCommand,
    SetUserBlockedCommand, USER_CREATED,
};
pub use list_users_compute::{UserRow, UserRowsCompute, UserSortKey};
pub use state::{Transient, UserListState};
