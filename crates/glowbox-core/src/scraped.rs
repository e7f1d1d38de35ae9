//! Output contract of the product metadata extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{Category, Store};

/// Structured metadata extracted from one product page.
///
/// Every field except `store` is best-effort: extraction failures degrade
/// individual fields to `None` rather than failing the scrape. Non-null
/// values are always traceable to page markup, a meta tag, or a
/// language-model inference over the fetched text — never fabricated.
///
/// Field invariants:
/// - `price` is a plain decimal numeral string (digits and at most one
///   `.`), with currency symbols stripped.
/// - `name` has retailer title boilerplate removed and is non-empty after
///   trimming.
/// - `store` is [`Store::Other`] for unrecognized hosts.
///
/// The admin layer decides which fields to persist; nothing in this crate
/// stores a `ScrapedProduct`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub store: Store,
    pub category: Option<Category>,
}

impl ScrapedProduct {
    /// An empty result for the given store — the starting point of every
    /// orchestration call.
    #[must_use]
    pub fn empty(store: Store) -> Self {
        Self {
            name: None,
            brand: None,
            price: None,
            image_url: None,
            store,
            category: None,
        }
    }
}
