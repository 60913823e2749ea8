//! Terminal helpers: colored prefixes honoring `NO_COLOR`.

use owo_colors::OwoColorize;
use std::ffi::OsStr;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn is_terminal(&self) -> bool {
        match self {
            Stream::Stdout => std::io::stdout().is_terminal(),
            Stream::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Color only terminals, and only when `NO_COLOR` is unset or empty.
fn color_allowed(no_color: Option<&OsStr>, terminal: bool) -> bool {
    terminal && no_color.map_or(true, |v| v.is_empty())
}

pub fn colors_enabled(stream: Stream) -> bool {
    color_allowed(
        std::env::var_os("NO_COLOR").as_deref(),
        stream.is_terminal(),
    )
}

/// Prefix for fatal CLI diagnostics.
pub fn error_prefix() -> String {
    if colors_enabled(Stream::Stderr) {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled(Stream::Stderr) {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Per-file status tags shown as `[OK]`, `[WARN]`, `[ERROR]`.
pub enum Tag {
    Ok,
    Warn,
    Error,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Ok => "[OK]",
            Tag::Warn => "[WARN]",
            Tag::Error => "[ERROR]",
        }
    }

    pub fn paint(&self, color: bool) -> String {
        if !color {
            return self.as_str().to_string();
        }
        match self {
            Tag::Ok => self.as_str().green().bold().to_string(),
            Tag::Warn => self.as_str().yellow().bold().to_string(),
            Tag::Error => self.as_str().red().bold().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tags() {
        assert_eq!(Tag::Ok.paint(false), "[OK]");
        assert_eq!(Tag::Warn.paint(false), "[WARN]");
        assert_eq!(Tag::Error.paint(false), "[ERROR]");
        assert!(Tag::Error.paint(true).contains("[ERROR]"));
    }

    #[test]
    fn test_no_color_needs_a_value_and_a_terminal() {
        assert!(color_allowed(None, true));
        assert!(color_allowed(Some(OsStr::new("")), true));
        assert!(!color_allowed(Some(OsStr::new("1")), true));
        assert!(!color_allowed(None, false));
    }
}
