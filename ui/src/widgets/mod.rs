mod logs;
mod notification;
mod sign_in;
mod sort_header;
mod users;

pub use logs::logs_panel;
pub use notification::notification;
pub use sign_in::sign_in_gate;
pub use sort_header::sort_header;
pub use users::users_panel;
