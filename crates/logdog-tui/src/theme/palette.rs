//! Color palette. Values are 256-color indices tuned for dark terminals.

use logdog_app::format::TAG_PALETTE_SIZE;
use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Reset;
pub const POPUP_BG: Color = Color::Indexed(235);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = ACCENT;

// --- Accent ---
pub const ACCENT: Color = Color::Indexed(110);

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::Indexed(255);
pub const TEXT_MUTED: Color = Color::Indexed(241);
pub const TEXT_ON_BADGE: Color = Color::Black;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Indexed(114);
pub const STATUS_ORANGE: Color = Color::Indexed(215);
pub const STATUS_RED: Color = Color::Indexed(210);

// --- Log severity colors ---
pub const LOG_VERBOSE: Color = Color::Indexed(247);
pub const LOG_DEBUG: Color = Color::Indexed(109);
pub const LOG_INFO: Color = Color::Indexed(114);
pub const LOG_WARN: Color = Color::Indexed(178);
pub const LOG_ERROR: Color = Color::Indexed(210);
pub const LOG_FATAL: Color = Color::Indexed(211);
pub const LOG_UNKNOWN: Color = Color::Indexed(255);

// --- Line backgrounds ---
pub const SELECTED_BG: Color = Color::Indexed(240);
pub const HIGHLIGHT_BG: Color = Color::Indexed(237);

// --- Timestamp column ---
pub const TIMESTAMP: Color = Color::Indexed(243);

/// Pastel tag colors, indexed by `tag_color_index`
pub const TAG_COLORS: [Color; TAG_PALETTE_SIZE] = [
    Color::Indexed(123),
    Color::Indexed(183),
    Color::Indexed(222),
    Color::Indexed(151),
    Color::Indexed(189),
    Color::Indexed(122),
    Color::Indexed(182),
    Color::Indexed(217),
    Color::Indexed(152),
    Color::Indexed(190),
];

/// Muted badge colors for the filters shown in the header
pub const FILTER_BADGE_COLORS: [Color; TAG_PALETTE_SIZE] = [
    Color::Indexed(102),
    Color::Indexed(139),
    Color::Indexed(174),
    Color::Indexed(108),
    Color::Indexed(145),
    Color::Indexed(109),
    Color::Indexed(139),
    Color::Indexed(144),
    Color::Indexed(108),
    Color::Indexed(146),
];
