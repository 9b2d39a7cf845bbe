use std::any::TypeId;
use std::cmp::Ordering;
use std::fmt;

use log::warn;
use ustr::Ustr;
use warden_states::{Compute, ComputeDeps, Dep, Updater};

use super::format_message;
use crate::Error;
use crate::config::AdminConfig;
use crate::database::DatabaseStore;
use crate::model::{Log, LogId};
use crate::sort::{Comparator, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSortKey {
    /// Orders by the recorded user's name, whatever the "who" column shows.
    Who,
    Action,
    Timestamp,
}

impl LogSortKey {
    fn compare(self, comparator: Comparator, a: &Log, b: &Log) -> Ordering {
        match self {
            Self::Who => comparator.compare(&a.user.username, &b.user.username),
            Self::Action => comparator.compare(&a.action, &b.action),
            Self::Timestamp => a.timestamp.cmp(&b.timestamp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogMessage {
    Text(String),
    /// The tag matched no known action.
    Unknown(Ustr),
}

impl LogMessage {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<&Log> for LogMessage {
    fn from(log: &Log) -> Self {
        match format_message(log) {
            Ok(text) => Self::Text(text),
            Err(Error::UnknownAction(_)) => Self::Unknown(log.action),
            Err(err) => Self::Text(err.to_string()),
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Unknown(tag) => write!(f, "unknown action \"{tag}\""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub id: LogId,
    pub who: String,
    pub action: Ustr,
    pub message: LogMessage,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl From<&Log> for LogRow {
    fn from(log: &Log) -> Self {
        Self {
            id: log.id.clone(),
            who: log.who().to_owned(),
            action: log.action,
            message: LogMessage::from(log),
            timestamp: log.timestamp,
        }
    }
}

/// Rows of the log table, formatted and sorted.
#[derive(Debug, Clone, Default)]
pub struct LogRowsCompute {
    pub rows: Vec<LogRow>,
}

impl Compute for LogRowsCompute {
    fn deps(&self) -> ComputeDeps {
        vec![
            TypeId::of::<DatabaseStore>(),
            TypeId::of::<SortState<LogSortKey>>(),
            TypeId::of::<AdminConfig>(),
        ]
    }

    fn compute(&self, deps: &Dep<'_>, updater: Updater) {
        let database = deps.state::<DatabaseStore>().get();
        let sort = deps.state::<SortState<LogSortKey>>();
        let comparator = deps.state::<AdminConfig>().comparator;

        let mut logs: Vec<&Log> = database.logs.iter().collect();
        if let Some(column) = sort.column {
            logs.sort_by(|a, b| sort.direction.apply(column.compare(comparator, a, b)));
        }

        let rows: Vec<LogRow> = logs.into_iter().map(LogRow::from).collect();
        let unknown = rows.iter().filter(|row| row.message.is_unknown()).count();
        if unknown > 0 {
            warn!("LogRowsCompute: {unknown} entries with unknown actions");
        }
        updater.set(Self { rows });
    }
}
