//! Human-facing status lines, all written to stderr.

use console::style;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_keeps_message() {
        let line = console::strip_ansi_codes(&format_error("unexpected argument '--bogus'"))
            .into_owned();
        assert_eq!(line, "ERROR: unexpected argument '--bogus'");
    }

    #[test]
    fn test_format_success_keeps_message() {
        let line = console::strip_ansi_codes(&format_success("Reported version 1.10")).into_owned();
        assert_eq!(line, "✓ Reported version 1.10");
    }
}
