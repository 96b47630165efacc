//! User-friendly diagnostic messages.
//!
//! Every load failure is reported with the offending file and, where one
//! exists, the command or manifest edit that fixes it.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::{LazyLock, Mutex};

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when composer has not installed the vendor tree yet.
    pub const COMPOSER_INSTALL: &str = "Install composer packages using `composer install`";

    /// Suggestion when a frontend directory has no manifest.
    pub const FRONTEND_MANIFEST: &str =
        "Add a `jalno.json` file to the frontend directory or fix the `frontend` entry of the package manifest";

    /// Suggestion when two packages resolve to the same name.
    pub const DUPLICATE_PACKAGE: &str =
        "Remove one of the packages or rename it in its composer.json";

    /// Suggestion when a registry is used after a failed load.
    pub const RELOAD_REGISTRY: &str = "Fix the reported manifest and run the command again";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

/// Log a warning once per distinct `key` for the lifetime of the process.
///
/// Returns `true` if the warning was emitted by this call.
pub fn warn_once(key: impl Into<String>, message: impl fmt::Display) -> bool {
    let first = match WARNED.lock() {
        Ok(mut seen) => seen.insert(key.into()),
        // A poisoned set only loses deduplication, the warning still goes out.
        Err(_) => true,
    };

    if first {
        tracing::warn!("{}", message);
    }
    first
}
