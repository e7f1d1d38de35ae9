//! Garbage-title detection.
//!
//! Anti-bot interstitials and error pages ("Robot Check", "Just a
//! moment...", bare store names) leak into titles and OpenGraph tags; the
//! phrase list lives in the rule file so new interstitial wording can be
//! added without code changes. Known false-negative risk: wording we have
//! not seen yet.

use glowbox_core::{ScrapeRules, Store};

/// Whether a sanitized `<title>` value is unusable as a product name:
/// two characters or shorter, or case-insensitively equal to / starting
/// with a blocked token (store names included).
pub(crate) fn is_rejected_title(rules: &ScrapeRules, name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    if lower.chars().count() <= 2 {
        return true;
    }
    rules
        .blocked_tokens()
        .iter()
        .any(|token| lower == *token || lower.starts_with(token.as_str()))
}

/// Whether an extracted field value is garbage rather than content: it
/// case-insensitively equals the detected store's name or a blocked
/// phrase. Used by fusion to discard a primary value in favor of the
/// refined one.
pub(crate) fn is_garbage_value(rules: &ScrapeRules, store: Store, value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == store.label().to_lowercase()
        || rules.blocked_tokens().iter().any(|token| lower == *token)
}

/// Whether a refined value is too weak to displace a present primary
/// value: two characters or shorter, or itself a blocked phrase.
pub(crate) fn is_trivial_value(rules: &ScrapeRules, value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower.chars().count() <= 2 || rules.blocked_tokens().iter().any(|token| lower == *token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ScrapeRules {
        ScrapeRules::builtin()
    }

    #[test]
    fn rejects_anti_bot_titles() {
        assert!(is_rejected_title(&rules(), "Robot Check"));
        assert!(is_rejected_title(&rules(), "Just a moment..."));
        assert!(is_rejected_title(&rules(), "404 Not Found"));
        assert!(is_rejected_title(&rules(), "Access Denied"));
    }

    #[test]
    fn rejects_bare_store_names() {
        assert!(is_rejected_title(&rules(), "Sephora"));
        assert!(is_rejected_title(&rules(), "ULTA"));
    }

    #[test]
    fn rejects_very_short_titles() {
        assert!(is_rejected_title(&rules(), "ab"));
        assert!(is_rejected_title(&rules(), " x "));
    }

    #[test]
    fn accepts_real_product_titles() {
        assert!(!is_rejected_title(&rules(), "Luminous Silk Foundation"));
        // Only a leading store name disqualifies; one in the middle is fine.
        assert!(!is_rejected_title(&rules(), "Mini Sephora Favorites Set"));
    }

    #[test]
    fn garbage_matches_store_name_and_phrases() {
        assert!(is_garbage_value(&rules(), Store::Sephora, "sephora"));
        assert!(is_garbage_value(&rules(), Store::Other, "robot check"));
        assert!(!is_garbage_value(&rules(), Store::Sephora, "Luminous Silk Foundation"));
    }

    #[test]
    fn trivial_values_are_short_or_blocked() {
        assert!(is_trivial_value(&rules(), "ab"));
        assert!(is_trivial_value(&rules(), "Just a moment"));
        assert!(!is_trivial_value(&rules(), "NARS"));
    }
}
