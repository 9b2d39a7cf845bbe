//! Audit log list: message formatting and derived rows.

mod format;
mod log_rows_compute;

pub use format::format_message;
pub use log_rows_compute::{LogMessage, LogRow, LogRowsCompute, LogSortKey};
