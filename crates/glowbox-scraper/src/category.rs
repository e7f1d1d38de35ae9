//! Keyword-based category classification.

use glowbox_core::Category;

/// Ordered keyword table. Entry order is the tie-break on ambiguous text:
/// "Setting Spray" sits above "Skincare" so a setting-spray title that
/// also mentions a serum classifies as Setting Spray, and "Powder" catches
/// "setting powder" before anything else sees it. Reorder with care.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Primer, &["primer"]),
    (Category::Foundation, &["foundation"]),
    (Category::Concealer, &["concealer"]),
    (Category::Powder, &["powder", "setting powder", "pressed powder"]),
    (Category::Blush, &["blush"]),
    (Category::Bronzer, &["bronzer"]),
    (Category::Highlighter, &["highlighter", "highlight"]),
    (Category::Eyeshadow, &["eyeshadow", "eye shadow", "palette"]),
    (Category::Eyeliner, &["eyeliner", "eye liner", "kohl"]),
    (Category::Mascara, &["mascara"]),
    (Category::Brows, &["brow", "eyebrow"]),
    (Category::Lipstick, &["lipstick", "lip color", "lip colour"]),
    (Category::LipGloss, &["lip gloss", "gloss"]),
    (Category::LipLiner, &["lip liner", "lipliner"]),
    (Category::SettingSpray, &["setting spray", "fixing spray"]),
    (
        Category::Moisturizer,
        &["moisturizer", "moisturiser", "cream", "lotion"],
    ),
    (Category::Sunscreen, &["sunscreen", "spf", "sun protection"]),
    (
        Category::Skincare,
        &["serum", "cleanser", "toner", "exfoliant", "skincare", "skin care"],
    ),
    (Category::Tools, &["brush", "sponge", "tool", "applicator"]),
    (
        Category::Fragrance,
        &["perfume", "fragrance", "eau de", "cologne"],
    ),
];

/// Classify free text into the fixed category taxonomy.
///
/// Case-insensitive substring match; the first table entry with any
/// matching keyword wins; no match yields `None`.
#[must_use]
pub fn classify(text: &str) -> Option<Category> {
    let lower = text.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return Some(*category);
        }
    }
    None
}
