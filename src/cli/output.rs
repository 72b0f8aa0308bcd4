//! Terminal output for the run summary.
//!
//! Diagnostic detail goes through the `log` crate; this type prints the
//! always-visible run summary lines.

/// Plain terminal output manager.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n=== {} ===", title);
        }
    }

    /// Print an informational line.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Print a success line.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print a warning line.
    pub fn warn(&self, message: &str) {
        if !self.quiet {
            println!("! {}", message);
        }
    }

    /// Print an error line to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print an indented detail line.
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}
