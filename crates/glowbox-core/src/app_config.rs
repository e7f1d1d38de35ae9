use std::path::PathBuf;

/// Default user agent for page fetches. Retail sites serve stripped or
/// blocked pages to obvious bot agents, so this mirrors a current desktop
/// browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Hard bound on the page fetch, in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Hard bound on the completion-API call, in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 8;

/// Character budget for normalized page text sent to the completion API.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 4000;

#[derive(Clone)]
pub struct AppConfig {
    /// Completion-API credential. Absence disables the refiner entirely.
    pub llm_api_key: Option<String>,
    /// Full completions endpoint URL.
    pub llm_api_url: String,
    /// Model identifier sent with each completion request.
    pub llm_model: String,
    pub fetch_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub max_text_chars: usize,
    pub user_agent: String,
    /// Optional override of the built-in scrape rules file.
    pub rules_path: Option<PathBuf>,
    pub log_level: String,
}

impl AppConfig {
    /// Whether a completion-API credential is configured. Gates the
    /// language-model refiner pass.
    #[must_use]
    pub fn is_llm_configured(&self) -> bool {
        self.llm_api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_url: crate::config::DEFAULT_LLM_API_URL.to_string(),
            llm_model: crate::config::DEFAULT_LLM_MODEL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            llm_timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            rules_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "llm_api_key",
                &self.llm_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("llm_api_url", &self.llm_api_url)
            .field("llm_model", &self.llm_model)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("max_text_chars", &self.max_text_chars)
            .field("user_agent", &self.user_agent)
            .field("rules_path", &self.rules_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}
