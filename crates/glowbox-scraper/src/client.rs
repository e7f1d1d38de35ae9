//! Scrape orchestration: URL validation, the bounded page fetch, and the
//! extractor cascade.

use std::time::Duration;

use glowbox_core::{AppConfig, Category, ScrapeRules, ScrapedProduct, Store};

use crate::blocklist::is_rejected_title;
use crate::category::classify;
use crate::error::ScrapeError;
use crate::fuse::fuse;
use crate::llm::LlmClient;
use crate::meta::{page_title, MetaTags};
use crate::sanitize::NameSanitizer;
use crate::store::detect_store;
use crate::structured::{extract_structured, resolve_url};
use crate::text::normalize_html;
use crate::types::normalize_price;

/// The product metadata extraction pipeline.
///
/// Holds the HTTP client, the compiled rule tables, and the optional
/// completion-API client. No per-call state: one instance can serve many
/// concurrent scrapes without coordination.
pub struct ProductScraper {
    client: reqwest::Client,
    rules: ScrapeRules,
    sanitizer: NameSanitizer,
    llm: LlmClient,
    max_text_chars: usize,
}

impl ProductScraper {
    /// Build a scraper from configuration and a rule set.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Rules`] if a title decoration pattern fails
    /// to compile, or [`ScrapeError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(config: &AppConfig, rules: ScrapeRules) -> Result<Self, ScrapeError> {
        let sanitizer = NameSanitizer::new(&rules)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        let llm = LlmClient::new(client.clone(), config);

        Ok(Self {
            client,
            rules,
            sanitizer,
            llm,
            max_text_chars: config.max_text_chars,
        })
    }

    /// Scrape one product page.
    ///
    /// The store is derived from the hostname before the fetch, so even a
    /// page that yields nothing else still reports where it came from.
    /// Once the page body is in hand the call cannot fail: every
    /// downstream extractor degrades its fields to `None` instead.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::InvalidUrl`] — not a well-formed absolute http(s)
    ///   URL; raised before any network activity.
    /// - [`ScrapeError::UpstreamStatus`] — the fetch returned non-2xx.
    /// - [`ScrapeError::UpstreamTimeout`] — the fetch timed out or the
    ///   network faulted.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedProduct, ScrapeError> {
        let parsed = Self::validate_url(url)?;
        let origin = parsed.origin().ascii_serialization();
        let store = detect_store(&self.rules, parsed.host_str().unwrap_or_default());
        tracing::debug!(%store, url, "scraping product page");

        let response = self
            .client
            .get(parsed)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(fetch_failure)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UpstreamStatus {
                status: status.as_u16(),
            });
        }
        let html = response.text().await.map_err(fetch_failure)?;

        let product = self.extract_from_markup(&html, &origin, store);

        let refined = if self.llm.is_configured() {
            let text = normalize_html(&html, self.max_text_chars);
            self.llm.extract(&text, store, url).await
        } else {
            None
        };

        Ok(fuse(product, refined, &self.rules))
    }

    /// The markup-only half of the pipeline: structured data first, meta
    /// tags filling gaps in fixed order, the `<title>` element as a
    /// guarded last resort for the name, then category derivation.
    fn extract_from_markup(&self, html: &str, origin: &str, store: Store) -> ScrapedProduct {
        let candidate = extract_structured(html, origin);
        let tags = MetaTags::parse(html);

        let mut name = candidate
            .name
            .as_deref()
            .map(|n| self.sanitizer.sanitize(n))
            .filter(|n| !n.is_empty());
        if name.is_none() {
            name = tags
                .get("og:title")
                .map(|t| self.sanitizer.sanitize(t))
                .filter(|n| !n.is_empty());
        }

        let mut image_url = candidate.image_url.clone();
        if image_url.is_none() {
            image_url = tags.get("og:image").map(|u| resolve_url(u, origin));
        }

        let mut brand = candidate.brand.clone();
        if brand.is_none() {
            brand = tags
                .first_of(&["product:brand", "og:brand"])
                .map(ToOwned::to_owned);
        }

        let mut price = candidate.price.clone();
        if price.is_none() {
            price = tags
                .first_of(&["product:price:amount", "og:price:amount"])
                .and_then(normalize_price);
        }

        if name.is_none() {
            if let Some(title) = page_title(html) {
                let sanitized = self.sanitizer.sanitize(&title);
                if !sanitized.is_empty() && !is_rejected_title(&self.rules, &sanitized) {
                    name = Some(sanitized);
                }
            }
        }

        // A structured-data category that already matches the taxonomy is
        // taken as-is; otherwise name + raw category feed the keyword
        // classifier.
        let category = match candidate.category.as_deref().and_then(Category::parse_exact) {
            Some(category) => Some(category),
            None => {
                let text = [name.as_deref(), candidate.category.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                classify(&text)
            }
        };

        ScrapedProduct {
            name,
            brand,
            price,
            image_url,
            store,
            category,
        }
    }

    fn validate_url(raw: &str) -> Result<reqwest::Url, ScrapeError> {
        let url = reqwest::Url::parse(raw.trim()).map_err(|_| ScrapeError::InvalidUrl {
            url: raw.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ScrapeError::InvalidUrl {
                url: raw.to_string(),
            });
        }
        Ok(url)
    }
}

/// Classify a transport-level fetch failure. Timeouts and network faults
/// collapse into the same caller-facing variant; the distinction only
/// matters in logs.
fn fetch_failure(err: reqwest::Error) -> ScrapeError {
    tracing::debug!(error = %err, timeout = err.is_timeout(), "page fetch failed");
    ScrapeError::UpstreamTimeout
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
