//! Internal candidate type and shared field filters.

/// One extractor's opinion of the five product fields. Candidates exist
/// only within a single orchestration call and are discarded after fusion.
///
/// `category` is carried as the raw page string here; it is validated
/// against the taxonomy by the orchestrator, never passed through.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct Candidate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

/// Normalize a raw price string: strip everything but digits and dots,
/// then require the remainder to parse as a number. `"$29.99 USD"` becomes
/// `"29.99"`; anything that does not survive the filter is rejected.
pub(crate) fn normalize_price(raw: &str) -> Option<String> {
    let filtered: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if filtered.is_empty() || filtered.parse::<f64>().is_err() {
        return None;
    }
    Some(filtered)
}
