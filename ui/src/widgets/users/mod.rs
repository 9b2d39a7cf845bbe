//! User list panel: toolbar, password policy, table and create modal.

mod modal;
mod panel;
mod password_policy;
mod table;

pub use panel::users_panel;
