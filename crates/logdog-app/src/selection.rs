//! Highlight and range-selection over the visible ordering
//!
//! Every operation takes the current visible ordering as a slice of ids and
//! locates positions with a linear scan. Call frequency is bounded by user
//! input, so no position index is kept.

use std::collections::HashSet;

use logdog_core::EntryId;

use crate::format::LineBackground;

/// Direction of a one-step navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    anchor: Option<EntryId>,
    selected: HashSet<EntryId>,
    highlighted: Option<EntryId>,
    selection_mode: bool,
    /// Bumped on every visual change
    revision: u64,
}

fn position(visible: &[EntryId], id: EntryId) -> Option<usize> {
    visible.iter().position(|v| *v == id)
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<EntryId> {
        self.anchor
    }

    pub fn highlighted(&self) -> Option<EntryId> {
        self.highlighted
    }

    pub fn is_selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn is_selected(&self, id: EntryId) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Background class for the rows of an entry
    pub fn background_of(&self, id: EntryId) -> LineBackground {
        if self.selected.contains(&id) {
            LineBackground::Selected
        } else if self.highlighted == Some(id) {
            LineBackground::Highlighted
        } else {
            LineBackground::None
        }
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Set the highlight directly, e.g. from a click
    pub fn set_highlight(&mut self, id: Option<EntryId>) {
        if self.highlighted != id {
            self.highlighted = id;
            self.touch();
        }
    }

    /// Move the highlight one visible entry.
    ///
    /// With no highlight (or one that is filtered out) it lands on the
    /// first entry going down and the last going up. Returns the new
    /// highlight when it changed.
    pub fn move_highlight(&mut self, step: Step, visible: &[EntryId]) -> Option<EntryId> {
        if visible.is_empty() {
            return None;
        }

        let current = self.highlighted.and_then(|id| position(visible, id));
        let target = match (current, step) {
            (None, Step::Down) => 0,
            (None, Step::Up) => visible.len() - 1,
            (Some(i), Step::Down) if i + 1 < visible.len() => i + 1,
            (Some(i), Step::Up) if i > 0 => i - 1,
            (Some(_), _) => return None,
        };

        let id = visible[target];
        self.set_highlight(Some(id));
        Some(id)
    }

    /// Start a range selection at the highlight, or at the last visible
    /// entry when nothing is highlighted. Returns the anchor.
    pub fn enter_selection_mode(&mut self, visible: &[EntryId]) -> Option<EntryId> {
        if self.selection_mode {
            return None;
        }
        self.selection_mode = true;

        let anchor = match self.highlighted {
            Some(id) => Some(id),
            None => visible.last().copied(),
        };
        if let Some(id) = anchor {
            self.selected.clear();
            self.selected.insert(id);
            self.anchor = Some(id);
            self.highlighted = Some(id);
        }
        self.touch();
        anchor
    }

    /// Grow or shrink the selection by one visible entry.
    ///
    /// When the selection lies on the opposite side of the anchor it
    /// shrinks from that end first, so it never spans both sides. Returns
    /// the entry that was added, if any.
    pub fn extend_selection(&mut self, step: Step, visible: &[EntryId]) -> Option<EntryId> {
        let anchor = self.anchor?;
        let anchor_idx = position(visible, anchor)?;

        let mut top = None;
        let mut bottom = None;
        for (i, id) in visible.iter().enumerate() {
            if self.selected.contains(id) {
                top.get_or_insert(i);
                bottom = Some(i);
            }
        }
        let (top, bottom) = (top?, bottom?);

        let added = match step {
            Step::Down if top < anchor_idx => {
                self.selected.remove(&visible[top]);
                None
            }
            Step::Down if bottom + 1 < visible.len() => {
                self.selected.insert(visible[bottom + 1]);
                Some(visible[bottom + 1])
            }
            Step::Up if bottom > anchor_idx => {
                self.selected.remove(&visible[bottom]);
                None
            }
            Step::Up if top > 0 => {
                self.selected.insert(visible[top - 1]);
                Some(visible[top - 1])
            }
            _ => return None,
        };
        self.touch();
        added
    }

    /// Replace the selection with the closed range between the anchor and
    /// `target` in visible order.
    pub fn extend_selection_to(&mut self, target: EntryId, visible: &[EntryId]) {
        let Some(anchor) = self.anchor else {
            return;
        };
        let (Some(a), Some(t)) = (position(visible, anchor), position(visible, target)) else {
            return;
        };

        let (start, end) = if a <= t { (a, t) } else { (t, a) };
        self.selected = visible[start..=end].iter().copied().collect();
        self.touch();
    }

    /// Drop the selection and anchor. The highlight stays.
    pub fn clear_selection(&mut self) {
        if self.anchor.is_some() || !self.selected.is_empty() {
            self.selected.clear();
            self.anchor = None;
            self.touch();
        }
    }

    /// Leave selection mode after acting on it. The highlight stays.
    pub fn finish_selection(&mut self) {
        self.selection_mode = false;
        self.clear_selection();
        self.touch();
    }

    /// Leave selection mode and drop both selection and highlight
    pub fn exit_selection_mode(&mut self) {
        self.selection_mode = false;
        self.selected.clear();
        self.anchor = None;
        self.highlighted = None;
        self.touch();
    }

    /// Selected ids in visible order.
    ///
    /// Falls back to the highlight when nothing is selected.
    pub fn selected_in_order(&self, visible: &[EntryId]) -> Vec<EntryId> {
        if self.selected.is_empty() {
            return self
                .highlighted
                .filter(|id| visible.contains(id))
                .into_iter()
                .collect();
        }
        visible
            .iter()
            .copied()
            .filter(|id| self.selected.contains(id))
            .collect()
    }
}
