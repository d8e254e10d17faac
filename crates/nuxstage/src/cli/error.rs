//! Helpful error types for CLI commands
//!
//! Every error includes what went wrong, context about the situation, and
//! suggestions for how to fix it.

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Path does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Path not found: {}", path.display()))
            .with_suggestion(format!(
                "TRY: Check that the path exists: ls -la {}",
                path.display()
            ))
            .with_suggestion("TRY: Check for typos in the path")
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(context) = &self.context {
            write!(f, "\n  {}", context)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context_and_suggestions() {
        let err = HelpfulError::new("Something broke")
            .with_context("While staging")
            .with_suggestion("TRY: turning it off and on again");
        let text = err.to_string();
        assert!(text.contains("Something broke"));
        assert!(text.contains("While staging"));
        assert!(text.contains("TRY: turning it off and on again"));
    }

    #[test]
    fn test_path_not_found_names_the_path() {
        let err = HelpfulError::path_not_found(Path::new("/missing/services.json"));
        assert!(err.to_string().contains("/missing/services.json"));
    }
}
