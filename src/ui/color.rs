//! Color and emoji helpers for terminal output

use crate::core::types::LinkStatus;

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const BRIGHT_RED: &'static str = "\x1b[91m";
    pub const BRIGHT_GREEN: &'static str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &'static str = "\x1b[93m";
    pub const BRIGHT_MAGENTA: &'static str = "\x1b[95m";
}

/// Apply color to text if the terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    if cfg!(test) || !std::io::stdout().is_terminal() {
        return false;
    }

    match env::var("TERM") {
        Ok(term) => !(term == "dumb" || term.is_empty()),
        Err(_) => false,
    }
}

/// Color used for a link status
pub fn status_color(status: LinkStatus) -> &'static str {
    match status {
        LinkStatus::Alive => Colors::BRIGHT_GREEN,
        LinkStatus::Dead => Colors::BRIGHT_RED,
        LinkStatus::Invalid => Colors::BRIGHT_MAGENTA,
        LinkStatus::Error => Colors::BRIGHT_YELLOW,
    }
}

/// Marker printed in front of a result line
pub fn status_marker(status: LinkStatus) -> &'static str {
    match status {
        LinkStatus::Alive => "✓",
        LinkStatus::Dead => "✗",
        LinkStatus::Invalid => "⊘",
        LinkStatus::Error => "⚠",
    }
}
