//! Diagnostic output.
//!
//! Everything goes to stderr so stdout only ever carries the resolved version.

use console::style;

/// Print a verbose diagnostic line.
pub fn display_note(message: &str) {
    eprintln!(
        "{} {}",
        style("→").for_stderr().yellow(),
        style(message).for_stderr().dim()
    );
}

/// Print a warning with a yellow marker.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").for_stderr().yellow(), message);
}

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").for_stderr().red(), message);
}
