//! Column sorting shared by the user and log tables.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use warden_states::State;

/// How text columns are ordered.
///
/// `LengthOrder` compares UTF-16 code unit counts only, which is how the
/// tables have always sorted; `Lexicographic` is the plain string order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    #[default]
    LengthOrder,
    Lexicographic,
}

impl Comparator {
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::LengthOrder => a.encode_utf16().count().cmp(&b.encode_utf16().count()),
            Self::Lexicographic => a.cmp(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sort selection of one table, keyed by that table's column enum.
///
/// `column: None` keeps insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub column: Option<K>,
    pub direction: SortDirection,
}

impl<K> Default for SortState<K> {
    fn default() -> Self {
        Self {
            column: None,
            direction: SortDirection::Ascending,
        }
    }
}

impl<K: 'static> State for SortState<K> {}

impl<K: Copy + PartialEq> SortState<K> {
    /// Header click: a new column sorts ascending, the same column flips.
    pub fn toggle(&mut self, column: K) {
        if self.column == Some(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Arrow shown next to a header label.
    pub fn indicator(&self, column: K) -> &'static str {
        match (self.column == Some(column), self.direction) {
            (false, _) => "",
            (true, SortDirection::Ascending) => " ⏶",
            (true, SortDirection::Descending) => " ⏷",
        }
    }
}
