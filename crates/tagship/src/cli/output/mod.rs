//! Output formatting utilities

use console::{style, Style};

use tagship_core::ReleaseResult;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for version numbers
pub fn version_style() -> Style {
    Style::new().green().bold()
}

/// Style for tags
pub fn tag_style() -> Style {
    Style::new().yellow()
}

/// Print the closing summary of a release
pub fn release_summary(result: &ReleaseResult) {
    println!();
    let version = version_style().apply_to(&result.new_version);
    if result.dry_run {
        success(&format!(
            "Fake release complete. {} {} would be released.",
            result.project, version
        ));
    } else {
        success(&format!("Released {} {}", result.project, version));
    }

    println!(
        "{}",
        key_value("Previous version", &result.previous_version)
    );
    println!(
        "{}",
        key_value("Tag", &tag_style().apply_to(&result.tag).to_string())
    );
    if let Some(stable) = &result.stable_tag {
        println!(
            "{}",
            key_value("Stable tag", &tag_style().apply_to(stable).to_string())
        );
    }
    println!(
        "{}",
        key_value("Published", if result.published { "yes" } else { "no" })
    );
}
