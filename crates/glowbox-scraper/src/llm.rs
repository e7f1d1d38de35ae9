//! Language-model refinement pass over normalized page text.
//!
//! A secondary extractor that competes with the structured-data pass.
//! Every failure mode here — missing credential, timeout, non-2xx,
//! malformed response — degrades to `None` with a warning; the refiner
//! can never fail a scrape.

use std::time::Duration;

use glowbox_core::{AppConfig, Category, Store};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::normalize_price;

/// Page text shorter than this is typical of anti-bot interstitials; the
/// URL is prepended since product slugs often embed the name.
const SHORT_TEXT_CHARS: usize = 100;

/// Prompts shorter than this carry nothing worth a model call.
const MIN_PROMPT_CHARS: usize = 10;

/// Output-size cap: four short fields need nowhere near this.
const MAX_COMPLETION_TOKENS: u32 = 200;

const TEMPERATURE: f32 = 0.1;

/// The refiner's candidate set. Unlike the primary [`crate::types::Candidate`],
/// the category arrives pre-validated against the taxonomy.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LlmExtraction {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<String>,
    pub category: Option<Category>,
}

/// Client for the external chat-completions API.
pub(crate) struct LlmClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat<'a>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl LlmClient {
    pub(crate) fn new(client: reqwest::Client, config: &AppConfig) -> Self {
        Self {
            client,
            api_key: config.llm_api_key.clone(),
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    pub(crate) fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Extract product fields from normalized page text.
    ///
    /// Returns `None` when no credential is configured, the text is
    /// effectively empty, or the API call fails in any way.
    pub(crate) async fn extract(
        &self,
        page_text: &str,
        store: Store,
        url: &str,
    ) -> Option<LlmExtraction> {
        let api_key = self.api_key.as_deref()?;

        let prompt_text = if page_text.chars().count() < SHORT_TEXT_CHARS {
            format!("URL: {url}\n\n{page_text}")
        } else {
            page_text.to_string()
        };
        if prompt_text.trim().chars().count() < MIN_PROMPT_CHARS {
            return None;
        }

        let system_prompt = build_system_prompt(store, url);

        // Wall-clock bound on the whole exchange; expiry drops (and so
        // cancels) the in-flight request.
        match tokio::time::timeout(
            self.timeout,
            self.request_extraction(api_key, &system_prompt, &prompt_text, url),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(url, timeout_secs = self.timeout.as_secs(), "completion request timed out");
                None
            }
        }
    }

    async fn request_extraction(
        &self,
        api_key: &str,
        system_prompt: &str,
        prompt_text: &str,
        url: &str,
    ) -> Option<LlmExtraction> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt_text,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_COMPLETION_TOKENS,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = match self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url, error = %err, "completion request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "completion API returned error status");
            return None;
        }

        let body: ChatResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(url, error = %err, "completion response body unreadable");
                return None;
            }
        };

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        if content.is_empty() {
            tracing::warn!(url, "completion response had no content");
            return None;
        }

        let Ok(parsed) = serde_json::from_str::<Value>(&content) else {
            tracing::warn!(url, "completion content is not valid JSON");
            return None;
        };

        Some(validate_extraction(&parsed))
    }
}

/// Validate the model's JSON field-by-field. A field that fails its check
/// is forced null rather than passed through; nothing the model says is
/// trusted verbatim.
fn validate_extraction(parsed: &Value) -> LlmExtraction {
    let text_field = |key: &str| -> Option<String> {
        parsed
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
    };

    let price = parsed.get("price").and_then(|value| match value {
        Value::String(s) => normalize_price(s),
        Value::Number(n) => normalize_price(&n.to_string()),
        _ => None,
    });

    let category = parsed
        .get("category")
        .and_then(Value::as_str)
        .and_then(Category::parse_exact);

    LlmExtraction {
        name: text_field("name"),
        brand: text_field("brand"),
        price,
        category,
    }
}

fn build_system_prompt(store: Store, url: &str) -> String {
    let categories = Category::ALL
        .map(Category::label)
        .join(", ");
    format!(
        "You are a beauty product data extractor. You will receive text scraped from a product page on {store} ({url}).\n\
         \n\
         Extract the following fields from the text. ONLY extract what is clearly stated — do NOT invent or guess data.\n\
         \n\
         RULES:\n\
         1. \"name\": The product's actual name (NOT the store name, NOT a generic page title). Include the full product name as a customer would recognize it.\n\
         2. \"brand\": The company/brand that makes the product (e.g., \"Maybelline\", \"Giorgio Armani\", \"NARS\").\n\
         3. \"price\": The current/sale price in USD as a plain number string without $ sign (e.g., \"29.99\"). If multiple prices, use the current/lowest price.\n\
         4. \"category\": Categorize into EXACTLY ONE of: {categories}\n\
         5. Set any field to null if you cannot determine it from the text.\n\
         \n\
         Respond with ONLY a JSON object:\n\
         {{\"name\": \"...\", \"brand\": \"...\", \"price\": \"...\", \"category\": \"...\"}}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_accepts_clean_fields() {
        let parsed = json!({
            "name": "Luminous Silk Foundation",
            "brand": "Giorgio Armani",
            "price": "72.00",
            "category": "Foundation"
        });
        let extraction = validate_extraction(&parsed);
        assert_eq!(extraction.name.as_deref(), Some("Luminous Silk Foundation"));
        assert_eq!(extraction.brand.as_deref(), Some("Giorgio Armani"));
        assert_eq!(extraction.price.as_deref(), Some("72.00"));
        assert_eq!(extraction.category, Some(Category::Foundation));
    }

    #[test]
    fn validate_forces_blank_strings_null() {
        let parsed = json!({"name": "  ", "brand": "", "price": null, "category": null});
        let extraction = validate_extraction(&parsed);
        assert_eq!(extraction.name, None);
        assert_eq!(extraction.brand, None);
    }

    #[test]
    fn validate_strips_price_decorations() {
        let parsed = json!({"price": "$29.99 USD"});
        assert_eq!(
            validate_extraction(&parsed).price.as_deref(),
            Some("29.99")
        );
    }

    #[test]
    fn validate_accepts_numeric_price() {
        let parsed = json!({"price": 31.5});
        assert_eq!(validate_extraction(&parsed).price.as_deref(), Some("31.5"));
    }

    #[test]
    fn validate_rejects_non_numeric_price() {
        let parsed = json!({"price": "ask in store"});
        assert_eq!(validate_extraction(&parsed).price, None);
    }

    #[test]
    fn validate_rejects_off_taxonomy_category() {
        let parsed = json!({"category": "Nail Polish"});
        assert_eq!(validate_extraction(&parsed).category, None);
        let parsed = json!({"category": "lip gloss"});
        assert_eq!(validate_extraction(&parsed).category, None);
    }

    #[test]
    fn validate_accepts_exact_taxonomy_category() {
        let parsed = json!({"category": "Lip Gloss"});
        assert_eq!(
            validate_extraction(&parsed).category,
            Some(Category::LipGloss)
        );
    }

    #[test]
    fn system_prompt_names_store_url_and_taxonomy() {
        let prompt = build_system_prompt(Store::Sephora, "https://www.sephora.com/p/x");
        assert!(prompt.contains("Sephora"));
        assert!(prompt.contains("https://www.sephora.com/p/x"));
        assert!(prompt.contains("Setting Spray"));
        assert!(prompt.contains("do NOT invent"));
    }
}
