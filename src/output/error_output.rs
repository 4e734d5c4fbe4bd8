//! Colored error and warning blocks on stderr.
//!
//! Format: `✖ Type: message` / `  × detail` / `  help: suggestion`

use std::io::{IsTerminal, Write};

use crate::error::HydroError;

use super::{ColorMode, ansi};

pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        let use_colors = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => Self::stderr_supports_color(),
        };
        Self { use_colors }
    }

    /// Auto-detects color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    fn stderr_supports_color() -> bool {
        // Presence of NO_COLOR (any value) disables color, see https://no-color.org
        if std::env::var("NO_COLOR").is_ok() {
            return false;
        }
        std::io::stderr().is_terminal()
    }

    pub fn print_error(&self, error: &HydroError) {
        let mut stderr = std::io::stderr().lock();
        self.write_error(&mut stderr, error);
    }

    pub fn print_warning(&self, message: &str, suggestion: Option<&str>) {
        let mut stderr = std::io::stderr().lock();
        self.write_warning(&mut stderr, message, suggestion);
    }

    pub fn write_error<W: Write>(&self, w: &mut W, error: &HydroError) {
        self.write_block(
            w,
            "✖",
            ansi::RED,
            error.error_type(),
            &error.message(),
            error.detail().as_deref(),
            error.suggestion(),
        );
    }

    pub fn write_warning<W: Write>(&self, w: &mut W, message: &str, suggestion: Option<&str>) {
        self.write_block(w, "⚠", ansi::YELLOW, "Warning", message, None, suggestion);
    }

    #[allow(clippy::too_many_arguments)]
    fn write_block<W: Write>(
        &self,
        w: &mut W,
        icon: &str,
        color: &str,
        heading: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        // stderr may already be gone; there is nowhere left to report that.
        if self.use_colors {
            let _ = writeln!(
                w,
                "{}{color}{icon} {heading}:{} {message}",
                ansi::BOLD,
                ansi::RESET
            );
        } else {
            let _ = writeln!(w, "{icon} {heading}: {message}");
        }

        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

/// Prints an error block using the given color mode.
pub fn print_error(error: &HydroError, mode: ColorMode) {
    ErrorOutput::new(mode).print_error(error);
}

/// Prints a warning block using the given color mode.
pub fn print_warning(message: &str, suggestion: Option<&str>, mode: ColorMode) {
    ErrorOutput::new(mode).print_warning(message, suggestion);
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
