use thiserror::Error;

/// Message shown when the page fetch exceeded its time budget or the
/// network faulted.
const TIMEOUT_MESSAGE: &str =
    "The site took too long to respond. Try again or enter details manually.";

/// Generic fallback when an error's own text is unsafe to show a caller.
const GENERIC_MESSAGE: &str = "Could not extract product details. Enter details manually.";

/// Longest error text passed through to callers verbatim.
const MAX_CALLER_MESSAGE_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The input was not a well-formed absolute http(s) URL. Raised before
    /// any network activity.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The page fetch returned a non-2xx status.
    #[error("The site returned status {status}. Try entering details manually.")]
    UpstreamStatus { status: u16 },

    /// The page fetch exceeded its time budget or the network faulted.
    #[error("the page fetch timed out or the network faulted")]
    UpstreamTimeout,

    /// HTTP client construction failed (invalid TLS config and the like).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured scrape rules are unusable (e.g. a title decoration
    /// pattern fails to compile).
    #[error("invalid scrape rules: {0}")]
    Rules(#[from] glowbox_core::ConfigError),
}

impl ScrapeError {
    /// Caller-safe rendering for the admin-facing surface.
    ///
    /// Timeout-flavored failures get a specific "took too long" message;
    /// anything whose own text is over 200 characters is replaced with a
    /// generic one so internals never leak into the UI.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        let lower = message.to_lowercase();
        if matches!(self, ScrapeError::UpstreamTimeout)
            || lower.contains("timeout")
            || lower.contains("abort")
        {
            return TIMEOUT_MESSAGE.to_string();
        }
        if message.len() > MAX_CALLER_MESSAGE_LEN {
            return GENERIC_MESSAGE.to_string();
        }
        message
    }
}
