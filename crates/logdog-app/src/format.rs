//! Entry formatting into styled, column-aligned rows
//!
//! Rows are made of abstract [`Span`]s; mapping a [`SpanKind`] to concrete
//! colors is left to the terminal layer.

use logdog_core::{EntryId, LogEntry, Severity};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the `MM-DD HH:MM:SS.mmm` column
pub const TIMESTAMP_WIDTH: usize = 18;

/// Default width of the right-aligned tag column
pub const DEFAULT_TAG_WIDTH: usize = 30;

/// Width of the ` X ` severity cell
pub const SEVERITY_CELL_WIDTH: usize = 3;

/// Number of colors tags are spread over
pub const TAG_PALETTE_SIZE: usize = 10;

const SEPARATOR: &str = " ";
const TAB_STOP: &str = "    ";

/// Stable palette slot for a tag
pub fn tag_color_index(tag: &str) -> usize {
    let hash = tag
        .bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(u32::from(byte)));
    (hash % TAG_PALETTE_SIZE as u32) as usize
}

/// User-facing display toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    pub show_timestamp: bool,
    /// Severity cell drawn as a colored badge
    pub severity_background: bool,
    /// Message text colored by severity
    pub colored_messages: bool,
    /// Wrap messages to the view width
    pub wrap_lines: bool,
    pub tag_width: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_timestamp: true,
            severity_background: true,
            colored_messages: false,
            wrap_lines: true,
            tag_width: DEFAULT_TAG_WIDTH,
        }
    }
}

impl DisplayOptions {
    /// Width of everything left of the message column
    pub fn prefix_width(&self) -> usize {
        let timestamp = if self.show_timestamp {
            TIMESTAMP_WIDTH + SEPARATOR.len()
        } else {
            0
        };
        timestamp + self.tag_width + SEPARATOR.len() + SEVERITY_CELL_WIDTH + SEPARATOR.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Timestamp,
    Tag { color: usize },
    Severity(Severity),
    Message(Severity),
    /// Separators and blanked columns
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn blank(width: usize) -> Self {
        Self::new(SpanKind::Blank, " ".repeat(width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBackground {
    #[default]
    None,
    Highlighted,
    Selected,
}

/// One visual row of the log view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    pub entry_id: EntryId,
    pub spans: Vec<Span>,
    pub background: LineBackground,
}

impl RenderLine {
    /// Unstyled text of the row
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Per-entry layout decisions made by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLayout {
    /// Tag differs from the previous visible entry
    pub show_tag: bool,
    pub continuation: bool,
}

/// Format an entry into one or more rows.
///
/// `wrap_width` is the full row width; 0 disables wrapping. Wrapped rows
/// get a blank prefix so text stays under the message column.
pub fn format_entry(
    id: EntryId,
    entry: &LogEntry,
    layout: EntryLayout,
    options: &DisplayOptions,
    wrap_width: usize,
) -> Vec<RenderLine> {
    let message = entry.message.replace('\t', TAB_STOP);
    let rows = if wrap_width == 0 {
        vec![message]
    } else {
        let width = wrap_width.saturating_sub(options.prefix_width()).max(1);
        wrap_text(&message, width)
    };

    rows.into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut spans = if i == 0 {
                prefix_spans(entry, layout, options)
            } else {
                vec![Span::blank(options.prefix_width())]
            };
            spans.push(Span::new(SpanKind::Message(entry.severity), text));
            RenderLine {
                entry_id: id,
                spans,
                background: LineBackground::None,
            }
        })
        .collect()
}

fn prefix_spans(entry: &LogEntry, layout: EntryLayout, options: &DisplayOptions) -> Vec<Span> {
    let mut spans = Vec::with_capacity(7);

    if options.show_timestamp {
        if layout.continuation {
            spans.push(Span::blank(TIMESTAMP_WIDTH));
        } else {
            spans.push(Span::new(
                SpanKind::Timestamp,
                pad_right(&truncate_to_width(&entry.timestamp, TIMESTAMP_WIDTH), TIMESTAMP_WIDTH),
            ));
        }
        spans.push(Span::blank(SEPARATOR.len()));
    }

    if layout.show_tag && !layout.continuation {
        spans.push(Span::new(
            SpanKind::Tag {
                color: tag_color_index(&entry.tag),
            },
            pad_left(&truncate_to_width(&entry.tag, options.tag_width), options.tag_width),
        ));
    } else {
        spans.push(Span::blank(options.tag_width));
    }
    spans.push(Span::blank(SEPARATOR.len()));

    if layout.continuation {
        spans.push(Span::blank(SEVERITY_CELL_WIDTH));
    } else {
        spans.push(Span::new(
            SpanKind::Severity(entry.severity),
            format!(" {} ", entry.severity.letter()),
        ));
    }
    spans.push(Span::blank(SEPARATOR.len()));

    spans
}

/// Longest prefix of `text` that fits in `width` columns
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    text.chars()
        .take_while(|c| {
            used += c.width().unwrap_or(0);
            used <= width
        })
        .collect()
}

fn pad_left(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(pad), text)
}

fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(pad))
}

/// Hard-wrap `text` into rows of at most `width` display columns.
///
/// Always returns at least one row. A character wider than `width` gets a
/// row of its own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    rows.push(current);
    rows
}
