use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::{ColoredString, Colorize};

/// How the shell prints. Script mode turns both flags toward plain ASCII.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    pub color_enabled: bool,
    pub plain_mode: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
            plain_mode: false,
        }
    }
}

static COLOR: AtomicBool = AtomicBool::new(true);
static PLAIN: AtomicBool = AtomicBool::new(false);

pub fn set_preferences(prefs: OutputPreferences) {
    COLOR.store(prefs.color_enabled, Ordering::Relaxed);
    PLAIN.store(prefs.plain_mode, Ordering::Relaxed);
    colored::control::set_override(prefs.color_enabled);
}

pub fn current_preferences() -> OutputPreferences {
    OutputPreferences {
        color_enabled: COLOR.load(Ordering::Relaxed),
        plain_mode: PLAIN.load(Ordering::Relaxed),
    }
}

/// Status of a one-line message; scripts grep for the label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Hint,
}

impl Tone {
    fn prefix(self) -> &'static str {
        match self {
            Tone::Info => "INFO: [i]",
            Tone::Success => "SUCCESS: [✓]",
            Tone::Warning => "WARNING: [!]",
            Tone::Error => "ERROR: [x]",
            Tone::Hint => "HINT:",
        }
    }

    fn paint(self, text: String) -> ColoredString {
        match self {
            Tone::Info => text.normal(),
            Tone::Success => text.bright_green(),
            Tone::Warning => text.bright_yellow(),
            Tone::Error => text.bright_red(),
            Tone::Hint => text.dimmed(),
        }
    }
}

pub fn labelled(tone: Tone, message: impl fmt::Display) -> String {
    tone.paint(format!("{} {message}", tone.prefix())).to_string()
}

pub fn heading(title: impl fmt::Display) -> String {
    format!("=== {} ===", title.to_string().trim()).bold().to_string()
}

pub fn info(message: impl fmt::Display) {
    println!("{}", labelled(Tone::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", labelled(Tone::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", labelled(Tone::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    println!("{}", labelled(Tone::Error, message));
}

pub fn hint(message: impl fmt::Display) {
    println!("{}", labelled(Tone::Hint, message));
}

/// Blank line, then the heading.
pub fn section(title: impl fmt::Display) {
    println!("\n{}", heading(title));
}

/// Pre-rendered text such as listings and report previews.
pub fn plain(text: impl fmt::Display) {
    println!("{text}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_output_keeps_stable_labels() {
        set_preferences(OutputPreferences {
            color_enabled: false,
            plain_mode: true,
        });
        assert_eq!(labelled(Tone::Success, "Saved"), "SUCCESS: [✓] Saved");
        assert_eq!(labelled(Tone::Error, "Nope"), "ERROR: [x] Nope");
        assert_eq!(labelled(Tone::Hint, "Try help"), "HINT: Try help");
        assert_eq!(heading(" Accounts "), "=== Accounts ===");
        assert!(current_preferences().plain_mode);
    }
}
