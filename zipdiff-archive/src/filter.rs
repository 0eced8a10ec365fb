//! Entry name filtering.

use regex::Regex;
use zipdiff_core::{Result, ZipDiffError};

/// Inclusion filter on raw entry names.
///
/// The pattern must match the whole name, not just a substring: `.*\.class`
/// keeps `a/B.class` but not `a/B.class.bak`.
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    regex: Regex,
}

impl NameFilter {
    /// Compile a filter. An invalid pattern is a configuration error.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| ZipDiffError::configuration(format!("invalid filter pattern: {e}")))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as given by the user.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether `name` should be kept.
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match() {
        let filter = NameFilter::new(r".*\.class").unwrap();
        assert!(filter.matches("a/B.class"));
        assert!(!filter.matches("a/B.class.bak"));
        assert!(!filter.matches("META-INF/MANIFEST.MF"));
        assert_eq!(filter.pattern(), r".*\.class");
    }

    #[test]
    fn test_alternation_is_grouped() {
        let filter = NameFilter::new("a|b").unwrap();
        assert!(filter.matches("a"));
        assert!(filter.matches("b"));
        assert!(!filter.matches("ab"));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = NameFilter::new("(unclosed").unwrap_err();
        assert!(err.is_configuration());
    }
}
