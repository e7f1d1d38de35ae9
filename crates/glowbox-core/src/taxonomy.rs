//! Fixed category and store taxonomies.
//!
//! Both enums are closed: the scraper never emits a category outside
//! [`Category::ALL`], and every hostname resolves to a [`Store`] with
//! [`Store::Other`] as the sentinel for unrecognized retailers.

use serde::{Deserialize, Serialize};

/// Product category taxonomy for the catalog.
///
/// Serialized with the display labels the admin UI expects (e.g.
/// `"Lip Gloss"`, `"Setting Spray"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Primer,
    Foundation,
    Concealer,
    Powder,
    Blush,
    Bronzer,
    Highlighter,
    Eyeshadow,
    Eyeliner,
    Mascara,
    Brows,
    Lipstick,
    #[serde(rename = "Lip Gloss")]
    LipGloss,
    #[serde(rename = "Lip Liner")]
    LipLiner,
    #[serde(rename = "Setting Spray")]
    SettingSpray,
    Moisturizer,
    Sunscreen,
    Skincare,
    Tools,
    Fragrance,
}

impl Category {
    /// Every category, in taxonomy order.
    pub const ALL: [Category; 20] = [
        Category::Primer,
        Category::Foundation,
        Category::Concealer,
        Category::Powder,
        Category::Blush,
        Category::Bronzer,
        Category::Highlighter,
        Category::Eyeshadow,
        Category::Eyeliner,
        Category::Mascara,
        Category::Brows,
        Category::Lipstick,
        Category::LipGloss,
        Category::LipLiner,
        Category::SettingSpray,
        Category::Moisturizer,
        Category::Sunscreen,
        Category::Skincare,
        Category::Tools,
        Category::Fragrance,
    ];

    /// Display label as stored and shown in the catalog.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Primer => "Primer",
            Category::Foundation => "Foundation",
            Category::Concealer => "Concealer",
            Category::Powder => "Powder",
            Category::Blush => "Blush",
            Category::Bronzer => "Bronzer",
            Category::Highlighter => "Highlighter",
            Category::Eyeshadow => "Eyeshadow",
            Category::Eyeliner => "Eyeliner",
            Category::Mascara => "Mascara",
            Category::Brows => "Brows",
            Category::Lipstick => "Lipstick",
            Category::LipGloss => "Lip Gloss",
            Category::LipLiner => "Lip Liner",
            Category::SettingSpray => "Setting Spray",
            Category::Moisturizer => "Moisturizer",
            Category::Sunscreen => "Sunscreen",
            Category::Skincare => "Skincare",
            Category::Tools => "Tools",
            Category::Fragrance => "Fragrance",
        }
    }

    /// Parse an exact taxonomy label. Anything else — including close
    /// variants like `"lip gloss"` — is rejected, so detector output that
    /// drifts from the taxonomy degrades to `None` instead of leaking
    /// arbitrary strings into the catalog.
    #[must_use]
    pub fn parse_exact(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Recognized retailers. Hostnames that match no configured domain map to
/// [`Store::Other`], never to an arbitrary string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Store {
    Sephora,
    Ulta,
    Amazon,
    Target,
    Walmart,
    #[serde(rename = "CVS")]
    Cvs,
    Glossier,
    Other,
}

impl Store {
    /// Every store, in taxonomy order. `Other` is last.
    pub const ALL: [Store; 8] = [
        Store::Sephora,
        Store::Ulta,
        Store::Amazon,
        Store::Target,
        Store::Walmart,
        Store::Cvs,
        Store::Glossier,
        Store::Other,
    ];

    /// Display label as stored and shown in the catalog.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Store::Sephora => "Sephora",
            Store::Ulta => "Ulta",
            Store::Amazon => "Amazon",
            Store::Target => "Target",
            Store::Walmart => "Walmart",
            Store::Cvs => "CVS",
            Store::Glossier => "Glossier",
            Store::Other => "Other",
        }
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::Other
    }
}
