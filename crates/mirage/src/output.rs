//! Terminal output utilities

use console::style;
use mirage_core::Severity;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Print an indented bullet
pub fn bullet(msg: &str) {
    println!("    - {}", msg);
}

/// Severity colored for tables and summaries
pub fn severity(severity: Severity) -> String {
    let label = severity.to_string();
    match severity {
        Severity::High => style(label).red().bold().to_string(),
        Severity::Medium => style(label).yellow().to_string(),
        Severity::Low => style(label).dim().to_string(),
    }
}

/// Print pretty JSON to stdout
pub fn json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
