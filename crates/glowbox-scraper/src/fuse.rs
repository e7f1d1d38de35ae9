//! Merging the structured-data result with the refiner's candidate.
//!
//! The precedence is asymmetric on purpose, reflecting which source is
//! more reliable per field type:
//! - `name`/`brand`: the model sees through boilerplate and anti-bot
//!   garbage, so a non-trivial refined value wins over the primary.
//! - `price`: structured data quotes the storefront number exactly; the
//!   refined value only fills a gap.
//! - `category`: the model reads full page context and wins whenever its
//!   answer validates against the taxonomy.

use glowbox_core::{ScrapeRules, ScrapedProduct, Store};

use crate::blocklist::{is_garbage_value, is_trivial_value};
use crate::llm::LlmExtraction;

/// Fuse the primary (structured-data/meta) result with the refiner's
/// candidate, if any.
pub(crate) fn fuse(
    primary: ScrapedProduct,
    refined: Option<LlmExtraction>,
    rules: &ScrapeRules,
) -> ScrapedProduct {
    let Some(refined) = refined else {
        return primary;
    };

    let store = primary.store;
    let name = fuse_text(primary.name, refined.name, store, rules);
    let brand = fuse_text(primary.brand, refined.brand, store, rules);
    // Primary price is authoritative when present.
    let price = primary.price.or(refined.price);
    // Refined category is authoritative when it validated.
    let category = refined.category.or(primary.category);

    ScrapedProduct {
        name,
        brand,
        price,
        image_url: primary.image_url,
        store,
        category,
    }
}

/// Symmetric rule for `name` and `brand`.
fn fuse_text(
    primary: Option<String>,
    refined: Option<String>,
    store: Store,
    rules: &ScrapeRules,
) -> Option<String> {
    match (primary, refined) {
        (None, refined) => refined,
        (primary, None) => primary,
        (Some(primary), Some(refined)) => {
            if is_garbage_value(rules, store, &primary) {
                return Some(refined);
            }
            if !is_trivial_value(rules, &refined) {
                return Some(refined);
            }
            Some(primary)
        }
    }
}

#[cfg(test)]
mod tests {
    use glowbox_core::Category;

    use super::*;

    fn rules() -> ScrapeRules {
        ScrapeRules::builtin()
    }

    fn refined(
        name: Option<&str>,
        brand: Option<&str>,
        price: Option<&str>,
        category: Option<Category>,
    ) -> LlmExtraction {
        LlmExtraction {
            name: name.map(ToOwned::to_owned),
            brand: brand.map(ToOwned::to_owned),
            price: price.map(ToOwned::to_owned),
            category,
        }
    }

    fn primary(store: Store) -> ScrapedProduct {
        ScrapedProduct {
            name: Some("Luminous Silk Foundation".to_string()),
            brand: Some("Giorgio Armani".to_string()),
            price: Some("29.99".to_string()),
            image_url: Some("https://img.example.com/a.jpg".to_string()),
            store,
            category: Some(Category::Foundation),
        }
    }

    #[test]
    fn no_refined_candidate_returns_primary_unchanged() {
        let result = fuse(primary(Store::Sephora), None, &rules());
        assert_eq!(result, primary(Store::Sephora));
    }

    #[test]
    fn primary_price_wins_when_both_present() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(None, None, Some("31.00"), None)),
            &rules(),
        );
        assert_eq!(result.price.as_deref(), Some("29.99"));
    }

    #[test]
    fn refined_price_fills_a_null() {
        let mut product = primary(Store::Sephora);
        product.price = None;
        let result = fuse(
            product,
            Some(refined(None, None, Some("31.00"), None)),
            &rules(),
        );
        assert_eq!(result.price.as_deref(), Some("31.00"));
    }

    #[test]
    fn store_name_as_primary_name_is_rejected() {
        let mut product = primary(Store::Sephora);
        product.name = Some("Sephora".to_string());
        let result = fuse(
            product,
            Some(refined(Some("Luminous Silk Foundation"), None, None, None)),
            &rules(),
        );
        assert_eq!(result.name.as_deref(), Some("Luminous Silk Foundation"));
    }

    #[test]
    fn anti_bot_phrase_as_primary_brand_is_rejected() {
        let mut product = primary(Store::Other);
        product.brand = Some("Just a moment".to_string());
        let result = fuse(
            product,
            Some(refined(None, Some("Tarte"), None, None)),
            &rules(),
        );
        assert_eq!(result.brand.as_deref(), Some("Tarte"));
    }

    #[test]
    fn non_trivial_refined_name_is_preferred() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(
                Some("Luminous Silk Perfect Glow Foundation"),
                None,
                None,
                None,
            )),
            &rules(),
        );
        assert_eq!(
            result.name.as_deref(),
            Some("Luminous Silk Perfect Glow Foundation")
        );
    }

    #[test]
    fn trivial_refined_name_falls_back_to_primary() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(Some("ab"), None, None, None)),
            &rules(),
        );
        assert_eq!(result.name.as_deref(), Some("Luminous Silk Foundation"));
    }

    #[test]
    fn blocked_refined_name_falls_back_to_primary() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(Some("Robot Check"), None, None, None)),
            &rules(),
        );
        assert_eq!(result.name.as_deref(), Some("Luminous Silk Foundation"));
    }

    #[test]
    fn refined_name_fills_a_null() {
        let mut product = primary(Store::Sephora);
        product.name = None;
        let result = fuse(
            product,
            Some(refined(Some("Cloud Paint"), None, None, None)),
            &rules(),
        );
        assert_eq!(result.name.as_deref(), Some("Cloud Paint"));
    }

    #[test]
    fn valid_refined_category_overrides_keyword_category() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(None, None, None, Some(Category::Skincare))),
            &rules(),
        );
        assert_eq!(result.category, Some(Category::Skincare));
    }

    #[test]
    fn missing_refined_category_keeps_primary() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(None, None, None, None)),
            &rules(),
        );
        assert_eq!(result.category, Some(Category::Foundation));
    }

    #[test]
    fn image_is_never_touched_by_fusion() {
        let result = fuse(
            primary(Store::Sephora),
            Some(refined(Some("X Y Z"), None, None, None)),
            &rules(),
        );
        assert_eq!(
            result.image_url.as_deref(),
            Some("https://img.example.com/a.jpg")
        );
    }
}
