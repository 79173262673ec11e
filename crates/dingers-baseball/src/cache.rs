// Caller-owned memo of player tables, keyed by the exact queried date range.

use std::collections::HashMap;

use chrono::NaiveDate;
use dingers_core::period::DateRange;

use crate::table::PlayerTable;

/// A player table together with how complete its underlying data was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedTable {
    pub table: PlayerTable,
    /// At least one box score was read for the range.
    pub has_games: bool,
    /// Dates that could not be read when the table was collected.
    pub skipped_dates: Vec<NaiveDate>,
}

/// Entries live until the owner invalidates them; nothing expires on its own.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: HashMap<DateRange, CachedTable>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, range: &DateRange) -> Option<&CachedTable> {
        self.entries.get(range)
    }

    pub fn insert(&mut self, range: DateRange, entry: CachedTable) {
        self.entries.insert(range, entry);
    }

    /// Drop one range. Returns whether it was cached.
    pub fn invalidate(&mut self, range: &DateRange) -> bool {
        self.entries.remove(range).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
