//! Incremental render cache
//!
//! Turns the filtered entry sequence into [`RenderLine`]s and keeps an
//! entry -> line-range index. Pure appends are formatted incrementally;
//! anything that changes layout forces a full rebuild.

use std::collections::HashMap;
use std::ops::Range;

use logdog_core::{continues, is_continuation, EntryId, LogEntry, Severity};

use crate::filter::ViewFilter;
use crate::format::{format_entry, DisplayOptions, EntryLayout, RenderLine};
use crate::selection::SelectionState;
use crate::store::EntryStore;

/// Everything a render pass reads
pub struct RenderInput<'a> {
    pub store: &'a EntryStore,
    pub view: &'a ViewFilter,
    pub options: &'a DisplayOptions,
    /// Width of the log area in columns
    pub width: usize,
    pub selection: &'a SelectionState,
}

impl RenderInput<'_> {
    /// Effective wrap width; 0 when wrapping is off
    pub fn wrap_width(&self) -> usize {
        if self.options.wrap_lines {
            self.width
        } else {
            0
        }
    }
}

/// Options whose change invalidates every formatted line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    min_severity: Severity,
    filter_revision: u64,
    wrap_width: usize,
    show_timestamp: bool,
    tag_width: usize,
}

impl LayoutKey {
    fn of(input: &RenderInput<'_>) -> Self {
        Self {
            min_severity: input.view.min_severity(),
            filter_revision: input.view.revision(),
            wrap_width: input.wrap_width(),
            show_timestamp: input.options.show_timestamp,
            tag_width: input.options.tag_width,
        }
    }
}

/// What an update pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderUpdate {
    Unchanged,
    /// New entries were formatted onto the end
    Appended { lines: usize },
    Rebuilt,
    /// Only line backgrounds changed
    Restyled,
}

/// Pass counters, reported in debug logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RenderStats {
    pub(crate) rebuilds: u64,
    pub(crate) appends: u64,
    pub(crate) restyles: u64,
}

#[derive(Debug, Default)]
pub struct RenderCache {
    lines: Vec<RenderLine>,
    ranges: HashMap<EntryId, Range<usize>>,
    /// Visible entries in render order
    order: Vec<EntryId>,
    /// Store id up to which entries have been considered
    watermark: EntryId,
    /// Store first id at the last pass
    base: EntryId,
    layout: Option<LayoutKey>,
    selection_revision: u64,
    stats: RenderStats,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[RenderLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Visible entries in the order they were rendered
    #[cfg(test)]
    pub(crate) fn visible(&self) -> &[EntryId] {
        &self.order
    }

    pub fn range_of(&self, id: EntryId) -> Option<Range<usize>> {
        self.ranges.get(&id).cloned()
    }

    pub fn entry_at_line(&self, line: usize) -> Option<EntryId> {
        self.lines.get(line).map(|l| l.entry_id)
    }

    #[cfg(test)]
    pub(crate) fn watermark(&self) -> EntryId {
        self.watermark
    }

    #[cfg(test)]
    pub(crate) fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Force the next update to rebuild
    #[cfg(test)]
    pub(crate) fn invalidate(&mut self) {
        self.layout = None;
    }

    /// Bring the cache up to date with the store, filter and selection
    pub fn update(&mut self, input: &RenderInput<'_>) -> RenderUpdate {
        let layout = LayoutKey::of(input);
        let stale = self.layout != Some(layout)
            || self.base != input.store.first_id()
            || self.watermark > input.store.end_id();

        if stale {
            self.rebuild(input, layout);
            return RenderUpdate::Rebuilt;
        }

        let update = if self.watermark < input.store.end_id() {
            match self.append(input) {
                Some(lines) => RenderUpdate::Appended { lines },
                None => {
                    self.rebuild(input, layout);
                    return RenderUpdate::Rebuilt;
                }
            }
        } else {
            RenderUpdate::Unchanged
        };

        if self.selection_revision != input.selection.revision() {
            self.restyle(input.selection);
            if update == RenderUpdate::Unchanged {
                return RenderUpdate::Restyled;
            }
        }
        update
    }

    fn rebuild(&mut self, input: &RenderInput<'_>, layout: LayoutKey) {
        self.lines.clear();
        self.ranges.clear();
        self.order.clear();

        let visible: Vec<(EntryId, &LogEntry)> = input
            .store
            .iter()
            .filter(|(_, entry)| input.view.is_visible(entry))
            .collect();

        let wrap_width = layout.wrap_width;
        for (i, (id, entry)) in visible.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| visible[p].1);
            let next = visible.get(i + 1).map(|(_, e)| *e);
            let entry_layout = EntryLayout {
                show_tag: prev.map_or(true, |p| p.tag != entry.tag),
                continuation: is_continuation(prev, entry, next),
            };
            self.push_entry(*id, entry, entry_layout, input, wrap_width);
        }

        self.watermark = input.store.end_id();
        self.base = input.store.first_id();
        self.layout = Some(layout);
        self.selection_revision = input.selection.revision();
        self.stats.rebuilds += 1;
        tracing::debug!(
            "Render cache rebuilt: {} entries, {} lines (passes: {} rebuilds, {} appends, {} restyles)",
            self.order.len(),
            self.lines.len(),
            self.stats.rebuilds,
            self.stats.appends,
            self.stats.restyles
        );
    }

    /// Format entries past the watermark. Returns `None` when the first new
    /// visible entry continues the last rendered one, which needs a rebuild.
    fn append(&mut self, input: &RenderInput<'_>) -> Option<usize> {
        let fresh: Vec<(EntryId, &LogEntry)> = input
            .store
            .iter_from(self.watermark)
            .filter(|(_, entry)| input.view.is_visible(entry))
            .collect();

        let last = self.order.last().and_then(|id| input.store.get(*id));
        if let (Some(last), Some((_, first))) = (last, fresh.first()) {
            if continues(last, first) {
                return None;
            }
        }

        let before = self.lines.len();
        let wrap_width = input.wrap_width();
        for (i, (id, entry)) in fresh.iter().enumerate() {
            let prev = match i.checked_sub(1) {
                Some(p) => Some(fresh[p].1),
                None => last,
            };
            let next = fresh.get(i + 1).map(|(_, e)| *e);
            let entry_layout = EntryLayout {
                show_tag: prev.map_or(true, |p| p.tag != entry.tag),
                continuation: is_continuation(prev, entry, next),
            };
            self.push_entry(*id, entry, entry_layout, input, wrap_width);
        }

        self.watermark = input.store.end_id();
        self.stats.appends += 1;
        Some(self.lines.len() - before)
    }

    fn push_entry(
        &mut self,
        id: EntryId,
        entry: &LogEntry,
        layout: EntryLayout,
        input: &RenderInput<'_>,
        wrap_width: usize,
    ) {
        let background = input.selection.background_of(id);
        let start = self.lines.len();
        self.lines.extend(
            format_entry(id, entry, layout, input.options, wrap_width)
                .into_iter()
                .map(|mut line| {
                    line.background = background;
                    line
                }),
        );
        self.ranges.insert(id, start..self.lines.len());
        self.order.push(id);
    }

    fn restyle(&mut self, selection: &SelectionState) {
        for line in &mut self.lines {
            line.background = selection.background_of(line.entry_id);
        }
        self.selection_revision = selection.revision();
        self.stats.restyles += 1;
    }
}
