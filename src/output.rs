//! Terminal output for the objgroup CLI.
//!
//! Cargo-style status lines with a right-aligned coloured verb. Everything
//! goes to stderr so stdout stays free for `inspect --json`.

use std::io::{self, IsTerminal, Write};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Status,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn colour(self) -> &'static str {
        match self {
            Tone::Status => GREEN,
            Tone::Info => CYAN,
            Tone::Warning => YELLOW,
            Tone::Error => RED,
        }
    }

    /// Warnings and errors are printed even when quiet.
    fn always_shown(self) -> bool {
        matches!(self, Tone::Warning | Tone::Error)
    }
}

/// Status printer for pipeline progress.
///
/// Colour is enabled when stderr is a terminal. A quiet printer only
/// reports warnings and errors.
#[derive(Debug, Clone)]
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// A printer that drops status and info lines.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    /// Green verb, e.g. "     Loading trees/oak".
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(Tone::Status, verb, message);
    }

    /// Alias of [`Printer::status`] for the final line of a command.
    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(Tone::Status, verb, message);
    }

    /// Cyan verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(Tone::Info, verb, message);
    }

    /// Yellow verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(Tone::Warning, verb, message);
    }

    /// Red verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(Tone::Error, verb, message);
    }

    /// Report a write progress fraction as a percentage.
    pub fn progress(&self, fraction: f64) {
        self.print_line(Tone::Info, "Progress", &percent(fraction));
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// Paths and other highlighted values.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, tone: Tone, verb: &str, message: &str) {
        if self.quiet && !tone.always_shown() {
            return;
        }

        let mut stderr = io::stderr().lock();
        if self.color {
            let colour = tone.colour();
            let _ = writeln!(stderr, "{BOLD}{colour}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "group", "groups")` → "1 group".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Format a progress fraction as a whole percentage, rounded down.
pub fn percent(fraction: f64) -> String {
    format!("{:.0}%", (fraction.clamp(0.0, 1.0) * 100.0).floor())
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(0, "group", "groups"), "0 groups");
        assert_eq!(plural(1, "group", "groups"), "1 group");
        assert_eq!(plural(12, "schematic", "schematics"), "12 schematics");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0), "0%");
        assert_eq!(percent(2.0 / 3.0), "66%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(1.5), "100%");
    }

    #[test]
    fn test_paint_without_colour() {
        let printer = Printer {
            color: false,
            quiet: false,
        };
        assert_eq!(printer.bold("rocks"), "rocks");
        assert_eq!(printer.dim("rocks"), "rocks");
    }

    #[test]
    fn test_paint_with_colour() {
        let printer = Printer {
            color: true,
            quiet: true,
        };
        assert_eq!(printer.cyan("out"), "\x1b[36mout\x1b[0m");
    }

    #[test]
    fn test_quiet_keeps_warnings() {
        assert!(Tone::Warning.always_shown());
        assert!(Tone::Error.always_shown());
        assert!(!Tone::Status.always_shown());
    }

    #[test]
    fn test_display_path_absolute() {
        let p = std::path::Path::new("/nonexistent/path/to/objects.bundle");
        assert_eq!(display_path(p), "/nonexistent/path/to/objects.bundle");
    }
}
