//! Console output for the vote client: tagged status lines, `key: value` pairs and the palette
//! shared by every renderer.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

#[derive(Clone, Copy, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Level {
    Info,
    #[strum(serialize = "OK")]
    Success,
    #[strum(serialize = "WARN")]
    Warning,
    Error,
}

impl Level {
    fn tag_color(self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Accent,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }

    /// Problems go to stderr so piping `tally` output stays clean.
    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

fn log(level: Level, label: impl Display, msg: impl Display) {
    let line = format!(
        "[{}] {} {}",
        level.to_string().color(level.tag_color()),
        label.to_string().color(LogColor::Label),
        msg.to_string().color(LogColor::Muted)
    );
    if level.to_stderr() {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

pub fn log_info(label: impl Display, msg: impl Display) {
    log(Level::Info, label, msg)
}

pub fn log_success(label: impl Display, msg: impl Display) {
    log(Level::Success, label, msg)
}

pub fn log_warning(label: impl Display, msg: impl Display) {
    log(Level::Warning, label, msg)
}

pub fn log_error(label: impl Display, msg: impl Display) {
    log(Level::Error, label, msg)
}

/// Separates one rendering of the vote view from the next.
pub fn log_divider() {
    println!("{}", "─".repeat(60).color(LogColor::Muted));
}

/// The client's palette. Each vote side has its own color so tallies and history read at a glance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogColor {
    Accent,
    Label,
    Info,
    Warning,
    Error,
    Crunchy,
    Smooth,
    Muted,
}

impl From<LogColor> for Color {
    fn from(value: LogColor) -> Color {
        let (r, g, b) = match value {
            LogColor::Accent => (255, 215, 87),
            LogColor::Label => (40, 100, 153),
            LogColor::Info => (0, 95, 255),
            LogColor::Warning => (180, 105, 0),
            LogColor::Error => (255, 0, 45),
            // Toasted crust.
            LogColor::Crunchy => (196, 120, 40),
            LogColor::Smooth => (230, 180, 110),
            LogColor::Muted => (95, 95, 95),
        };
        Color::TrueColor { r, g, b }
    }
}

/// Prints a colored `key: value` line. The color defaults to [`LogColor::Label`].
#[macro_export]
macro_rules! print_kv {
    ($key:expr, $value:expr $(,)?) => {
        $crate::print_kv!($key, $value, $crate::LogColor::Label)
    };
    ($key:expr, $value:expr, $color:expr $(,)?) => {{
        use $crate::colored::Colorize;
        println!("{}: {}", ($key).to_string().color($color), $value);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_tags() {
        assert_eq!(Level::Info.to_string(), "INFO");
        assert_eq!(Level::Success.to_string(), "OK");
        assert_eq!(Level::Warning.to_string(), "WARN");
        assert_eq!(Level::Error.to_string(), "ERROR");
    }

    #[test]
    fn only_problems_go_to_stderr() {
        assert!(!Level::Info.to_stderr());
        assert!(!Level::Success.to_stderr());
        assert!(Level::Warning.to_stderr());
        assert!(Level::Error.to_stderr());
    }

    #[test]
    fn sides_have_distinct_colors() {
        assert_ne!(Color::from(LogColor::Crunchy), Color::from(LogColor::Smooth));
    }
}
