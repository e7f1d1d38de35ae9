//! Retailer boilerplate removal from page titles.

use glowbox_core::{ConfigError, ScrapeRules};
use regex::Regex;

/// Strips known retailer title decorations — trailing store suffixes like
/// `" | Sephora"` and leading prefixes like `"Amazon.com : "` — from raw
/// titles. Patterns are anchored, so interior text is never removed.
#[derive(Debug)]
pub struct NameSanitizer {
    patterns: Vec<Regex>,
}

impl NameSanitizer {
    /// Compile the decoration patterns from a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if a configured pattern is not
    /// valid regex syntax.
    pub fn new(rules: &ScrapeRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .title_decorations
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    ConfigError::Validation(format!("title decoration '{p}' is not valid regex: {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Remove decorations and trim. The removal pass runs twice so a title
    /// carrying both a prefix and a suffix (`"Amazon.com : Lip Oil :
    /// Beauty"`) comes out clean; a second sanitize of an already-clean
    /// name is a no-op.
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> String {
        let mut name = raw.trim().to_string();
        for _ in 0..2 {
            for pattern in &self.patterns {
                name = pattern.replace(&name, "").into_owned();
            }
            name = name.trim().to_string();
        }
        name
    }
}
