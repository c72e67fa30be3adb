//! Entry store - ordered, append-only record of parsed entries
//!
//! Entries are addressed by [`EntryId`]. The id of the entry at position `i`
//! is always `first_id + i`, so lookups are O(1) and ids stay stable while
//! old entries are evicted from the front.

use std::collections::VecDeque;

use logdog_core::{parse_line, EntryId, LogEntry};

/// Default retention bound
pub const DEFAULT_MAX_ENTRIES: usize = 50_000;

/// Eviction trims down to this share of the bound, so it runs rarely
const EVICT_TO_PERCENT: usize = 90;

#[derive(Debug)]
pub struct EntryStore {
    entries: VecDeque<LogEntry>,
    /// Id of `entries[0]`
    first_id: EntryId,
    /// Retention bound; 0 keeps everything
    max_entries: usize,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl EntryStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            first_id: EntryId::default(),
            max_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id of the oldest retained entry
    pub fn first_id(&self) -> EntryId {
        self.first_id
    }

    /// Id the next appended entry will get
    pub fn end_id(&self) -> EntryId {
        EntryId(self.first_id.0 + self.entries.len() as u64)
    }

    pub fn get(&self, id: EntryId) -> Option<&LogEntry> {
        let index = id.0.checked_sub(self.first_id.0)?;
        self.entries.get(usize::try_from(index).ok()?)
    }

    /// Append one entry, evicting old ones if over the bound
    pub fn push(&mut self, entry: LogEntry) -> EntryId {
        let id = self.end_id();
        self.entries.push_back(entry);
        self.enforce_retention();
        id
    }

    /// Parse and append raw lines in order. Returns the number evicted.
    pub fn append_lines<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.first_id;
        self.entries
            .extend(lines.into_iter().map(|line| parse_line(line.as_ref())));
        self.enforce_retention();
        (self.first_id.0 - before.0) as usize
    }

    /// Drop every entry. Ids are never reused.
    pub fn clear(&mut self) {
        self.first_id = self.end_id();
        self.entries.clear();
    }

    /// All entries in order
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &LogEntry)> + '_ {
        self.iter_from(self.first_id)
    }

    /// Entries with id `>= from`, in order
    pub fn iter_from(&self, from: EntryId) -> impl Iterator<Item = (EntryId, &LogEntry)> + '_ {
        let skip = from.0.saturating_sub(self.first_id.0) as usize;
        let first = self.first_id.0;
        self.entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(move |(i, entry)| (EntryId(first + i as u64), entry))
    }

    fn enforce_retention(&mut self) {
        if self.max_entries == 0 || self.entries.len() <= self.max_entries {
            return;
        }
        let keep = (self.max_entries * EVICT_TO_PERCENT / 100).max(1);
        let evict = self.entries.len() - keep;
        self.entries.drain(..evict);
        self.first_id = EntryId(self.first_id.0 + evict as u64);
        tracing::debug!("Evicted {} entries, {} retained", evict, self.entries.len());
    }
}
