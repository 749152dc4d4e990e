use std::{
    io::{self, IsTerminal, Write},
    time::Duration,
};

use chrono::NaiveDateTime;
use indicatif::{ProgressBar, ProgressStyle};

/// Escape sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Clears the terminal. Does nothing when stdout is not a terminal.
pub fn clear_screen() {
    let mut stdout = io::stdout();
    if stdout.is_terminal() {
        let _ = write!(stdout, "{}", CLEAR_SCREEN);
        let _ = stdout.flush();
    }
}

/// Spinner shown while a blocking request is in flight.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    match value {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

pub fn format_optional_id(id: Option<u64>) -> String {
    id.map(|id| format!("#{}", id))
        .unwrap_or_else(|| "-".to_string())
}

/// Shortens `text` to at most `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut short: String = text.chars().take(max - 1).collect();
    short.push('…');
    short
}

/// Parses a ticket reference typed as `#42` or `42`.
pub fn parse_ticket_reference(input: &str) -> Option<u64> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    digits.parse::<u64>().ok()
}
