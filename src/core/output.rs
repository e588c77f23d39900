//! Unified output formatting utilities for consistent CLI presentation.
//!
//! This module provides standardized formatting functions for all repo-render
//! output, ensuring consistent colors, spacing, and message structure across
//! commands.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, blue for section headers,
//!   bright_black for muted detail
//! - **Standardized spacing**: Newline before and after command outputs
//! - **Human-readable sizes**: Binary-prefixed byte formatting

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
    println!("\n{}:\n", header.blue());
}

/// Prints one file-section header: the path emphasized, the size muted
pub fn print_file_header(path: &str, size_text: &str) {
    println!("{} {}", path.white().bold(), format!("({size_text})").bright_black());
}

/// Human-readable byte count with binary prefixes and one decimal place.
///
/// Trailing `.0` is dropped, so 2048 renders as `2 KiB` and 1536 as `1.5 KiB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = (63 - bytes.leading_zeros() as u64) / 10;
    let exponent = (exponent as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let rounded = (value * 10.0).round() / 10.0;
    if (rounded - rounded.trunc()).abs() < f64::EPSILON {
        format!("{} {}", rounded.trunc() as u64, UNITS[exponent])
    } else {
        format!("{rounded:.1} {}", UNITS[exponent])
    }
}
