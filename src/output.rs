//! Console reporting.
//!
//! All user-facing output goes through [`Reporter`]: styled one-line
//! messages, per-category count lines and the placement progress bar. The
//! sorting core never prints; it returns reports that the CLI feeds here.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Styled console output for the sorting run.
pub struct Reporter;

impl Reporter {
    /// Informational line, cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Success line, green check.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Warning line, yellow marker. Used for recoverable per-file failures.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Error line to stderr, red cross.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// One count line per category, e.g. `-> documents: 3 files`.
    pub fn category_count(name: &str, count: usize) {
        println!(
            "{} {}: {} {}",
            "->".bold(),
            name.bold(),
            count,
            plural(count)
        );
    }

    /// Progress bar advanced once per placed file.
    pub fn progress_bar(total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.green/white}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("=>-"),
        );
        bar
    }
}

/// "file" or "files", matching the count.
pub fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(0), "files");
        assert_eq!(plural(1), "file");
        assert_eq!(plural(2), "files");
    }
}
