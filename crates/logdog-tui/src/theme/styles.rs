//! Semantic style builders.

use logdog_app::format::{tag_color_index, LineBackground};
use logdog_core::{Severity, StreamStatus};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

// --- Log styles ---
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Verbose => palette::LOG_VERBOSE,
        Severity::Debug => palette::LOG_DEBUG,
        Severity::Info => palette::LOG_INFO,
        Severity::Warn => palette::LOG_WARN,
        Severity::Error => palette::LOG_ERROR,
        Severity::Fatal => palette::LOG_FATAL,
        Severity::Unknown => palette::LOG_UNKNOWN,
    }
}

/// Severity cell: colored block when `background`, colored letter otherwise
pub fn severity_cell(severity: Severity, background: bool) -> Style {
    let color = severity_color(severity);
    if background {
        Style::default()
            .fg(palette::TEXT_ON_BADGE)
            .bg(color)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Message text, tinted by severity when `colored`
pub fn message(severity: Severity, colored: bool) -> Style {
    if colored {
        Style::default().fg(severity_color(severity))
    } else {
        text_primary()
    }
}

pub fn tag(color_index: usize) -> Style {
    Style::default().fg(palette::TAG_COLORS[color_index % palette::TAG_COLORS.len()])
}

pub fn timestamp() -> Style {
    Style::default().fg(palette::TIMESTAMP)
}

/// Row background for highlight and selection. Patched over span styles.
pub fn line_background(background: LineBackground) -> Style {
    match background {
        LineBackground::None => Style::default(),
        LineBackground::Highlighted => Style::default().bg(palette::HIGHLIGHT_BG),
        LineBackground::Selected => Style::default().bg(palette::SELECTED_BG),
    }
}

// --- Header styles ---
pub fn filter_badge(text: &str) -> Style {
    let index = tag_color_index(text) % palette::FILTER_BADGE_COLORS.len();
    Style::default()
        .fg(palette::TEXT_ON_BADGE)
        .bg(palette::FILTER_BADGE_COLORS[index])
}

pub fn stream_status(status: &StreamStatus) -> Style {
    match status {
        StreamStatus::Running => status_green(),
        StreamStatus::Stopped | StreamStatus::Reconnecting => {
            Style::default().fg(palette::STATUS_ORANGE)
        }
        StreamStatus::Error(_) => status_red(),
    }
}

// --- Container styles ---

/// Rounded modal block
pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(accent_bold())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette::BORDER_ACTIVE))
        .style(Style::default().bg(palette::POPUP_BG))
}
