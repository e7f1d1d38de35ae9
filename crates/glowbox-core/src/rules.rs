//! Extraction rule tables: domain-to-store mapping, title decorations,
//! and blocked title phrases.
//!
//! The tables are data, not code — they live in `config/scrape_rules.yaml`
//! so new retailers and anti-bot phrases can be added without touching the
//! scraper. A compiled-in copy backs [`ScrapeRules::builtin`] for callers
//! that have no filesystem access (tests, embedded use).

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::taxonomy::Store;
use crate::ConfigError;

/// The YAML file embedded as the built-in default rule set.
const BUILTIN_RULES: &str = include_str!("../../../config/scrape_rules.yaml");

/// Maps one store to the registrable domains it serves pages from.
/// Subdomains resolve to the same store at detection time.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRule {
    pub store: Store,
    pub domains: Vec<String>,
}

/// The full rule set consumed by the scraper.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeRules {
    /// Ordered domain-to-store mapping; first match wins.
    pub stores: Vec<StoreRule>,
    /// Ordered anchored regex fragments stripped from page titles.
    pub title_decorations: Vec<String>,
    /// Anti-bot / error-page phrases that disqualify a title as a product
    /// name. Store names are treated as blocked implicitly.
    pub blocked_titles: Vec<String>,
}

impl ScrapeRules {
    /// Load and validate a rule set from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

        let rules: ScrapeRules = serde_yaml::from_str(&content)?;
        validate_rules(&rules)?;
        Ok(rules)
    }

    /// The compiled-in default rule set.
    #[must_use]
    pub fn builtin() -> Self {
        let rules: ScrapeRules =
            serde_yaml::from_str(BUILTIN_RULES).expect("embedded scrape_rules.yaml parses");
        validate_rules(&rules).expect("embedded scrape_rules.yaml is valid");
        rules
    }

    /// All phrases a title may not equal or start with: the configured
    /// blocked phrases plus every known store name, lowercased.
    #[must_use]
    pub fn blocked_tokens(&self) -> Vec<String> {
        self.blocked_titles
            .iter()
            .map(|p| p.to_lowercase())
            .chain(
                Store::ALL
                    .into_iter()
                    .filter(|s| *s != Store::Other)
                    .map(|s| s.label().to_lowercase()),
            )
            .collect()
    }
}

fn validate_rules(rules: &ScrapeRules) -> Result<(), ConfigError> {
    let mut seen_domains = HashSet::new();

    for rule in &rules.stores {
        if rule.domains.is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has no domains",
                rule.store
            )));
        }
        for domain in &rule.domains {
            if domain.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "store '{}' has an empty domain",
                    rule.store
                )));
            }
            if !seen_domains.insert(domain.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate domain: '{domain}'"
                )));
            }
        }
    }

    for pattern in &rules.title_decorations {
        // Anchoring is what guarantees the sanitizer never removes interior
        // text; regex syntax itself is checked when the sanitizer compiles.
        let body = pattern.strip_prefix("(?i)").unwrap_or(pattern);
        if !body.starts_with('^') && !body.ends_with('$') {
            return Err(ConfigError::Validation(format!(
                "title decoration '{pattern}' is not anchored with ^ or $"
            )));
        }
    }

    for phrase in &rules.blocked_titles {
        if phrase.trim().is_empty() {
            return Err(ConfigError::Validation(
                "blocked title phrase must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_rules_parse_and_validate() {
        let rules = ScrapeRules::builtin();
        assert!(!rules.stores.is_empty());
        assert!(!rules.title_decorations.is_empty());
        assert!(!rules.blocked_titles.is_empty());
    }

    #[test]
    fn builtin_rules_cover_every_store_except_other() {
        let rules = ScrapeRules::builtin();
        for store in Store::ALL.into_iter().filter(|s| *s != Store::Other) {
            assert!(
                rules.stores.iter().any(|r| r.store == store),
                "no domain rule for {store}"
            );
        }
    }

    #[test]
    fn blocked_tokens_include_store_names_and_phrases() {
        let rules = ScrapeRules::builtin();
        let tokens = rules.blocked_tokens();
        assert!(tokens.contains(&"sephora".to_string()));
        assert!(tokens.contains(&"robot check".to_string()));
        assert!(!tokens.contains(&"other".to_string()));
    }

    #[test]
    fn validate_rejects_empty_domain_list() {
        let rules = ScrapeRules {
            stores: vec![StoreRule {
                store: Store::Sephora,
                domains: vec![],
            }],
            title_decorations: vec![],
            blocked_titles: vec![],
        };
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("no domains"));
    }

    #[test]
    fn validate_rejects_duplicate_domains() {
        let rules = ScrapeRules {
            stores: vec![
                StoreRule {
                    store: Store::Sephora,
                    domains: vec!["sephora.com".to_string()],
                },
                StoreRule {
                    store: Store::Ulta,
                    domains: vec!["Sephora.com".to_string()],
                },
            ],
            title_decorations: vec![],
            blocked_titles: vec![],
        };
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("duplicate domain"));
    }

    #[test]
    fn validate_rejects_unanchored_decoration() {
        let rules = ScrapeRules {
            stores: vec![],
            title_decorations: vec!["(?i)Sephora".to_string()],
            blocked_titles: vec![],
        };
        let err = validate_rules(&rules).unwrap_err();
        assert!(err.to_string().contains("not anchored"));
    }

    #[test]
    fn load_rules_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("scrape_rules.yaml");
        assert!(
            path.exists(),
            "scrape_rules.yaml missing at {path:?} — required for this test"
        );
        let result = ScrapeRules::load(&path);
        assert!(result.is_ok(), "failed to load scrape_rules.yaml: {result:?}");
    }
}
