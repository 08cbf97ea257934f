//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Every command prints through these helpers so errors, confirmations and
//! section headers share one look.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, green for success, yellow for warnings
//! - **Standardized spacing**: Newline before and after all command outputs

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Non-fatal problem the user should know about.
pub fn print_warning(message: &str) {
    println!("\n{} {}", "!".yellow(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// One aligned `label  value` line, used by `cache stats` and `config`.
pub fn print_key_value(label: &str, value: &str) {
    println!("  {:<22} {}", label.bright_black(), value.white());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_does_not_panic() {
        print_error("All proxies failed");
    }

    #[test]
    fn test_print_success_does_not_panic() {
        print_success("Copied!");
    }

    #[test]
    fn test_print_warning_does_not_panic() {
        print_warning("Clipboard unavailable");
    }

    #[test]
    fn test_print_info_does_not_panic() {
        print_info("No scripts found.");
    }

    #[test]
    fn test_print_section_header_does_not_panic() {
        print_section_header("Cache");
    }

    #[test]
    fn test_print_key_value_does_not_panic() {
        print_key_value("Cached responses", "3");
    }
}
