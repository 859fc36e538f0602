//! Terminal output utilities

use console::style;
use expertmgr_core::types::HealthStatus;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
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

/// Health label coloured by severity
pub fn health(status: HealthStatus) -> String {
    let label = style(status.label());
    match status {
        HealthStatus::None => label.dim(),
        HealthStatus::Okay => label.green(),
        HealthStatus::InvalidPath => label.yellow(),
        HealthStatus::Duplicate => label.red().bold(),
    }
    .to_string()
}
