//! Status lines printed to the terminal.
//!
//! Diagnostics go through `tracing`; these helpers only report the outcome
//! of a command to the user.

use owo_colors::OwoColorize;

pub struct Output;

impl Output {
    /// Example: `✓ Updated branch master on repository foo`
    pub fn success(msg: impl AsRef<str>) {
        println!("{} {}", "✓".green().bold(), msg.as_ref());
    }

    /// Example: `  • requirements/prod.txt`
    pub fn list_item(msg: impl AsRef<str>) {
        println!("  {} {}", "•".cyan(), msg.as_ref());
    }
}
