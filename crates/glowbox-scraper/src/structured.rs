//! JSON-LD structured product data extraction.
//!
//! Retail product pages embed schema.org data in
//! `<script type="application/ld+json">` blocks, in three observed
//! placements: the product object at the top level, inside the `@graph`
//! array of a wrapper object, or as an item of a top-level array.
//! Malformed blocks are common (template engines truncate them, comments
//! sneak in) and are skipped silently; scanning continues with the next
//! block.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::types::{normalize_price, Candidate};

/// Shape of a schema.org Product node, limited to the fields the catalog
/// consumes. Unknown fields are ignored; a field whose shape defies even
/// the unions below degrades to `None` on its own instead of rejecting
/// the whole block.
#[derive(Debug, Deserialize)]
pub(crate) struct JsonLdProduct {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    brand: Option<BrandField>,
    #[serde(default, deserialize_with = "lenient")]
    offers: Option<OffersField>,
    #[serde(default, deserialize_with = "lenient")]
    image: Option<ImageField>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<String>,
}

/// Deserialize a field to `None` instead of an error when its shape is
/// unexpected.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `brand` arrives as a plain string or a `Brand` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BrandField {
    Name(String),
    Object { name: Option<String> },
}

/// `offers` arrives as one offer object or an array of them; the first
/// array element is the storefront-default offer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OffersField {
    One(Offer),
    Many(Vec<Offer>),
}

#[derive(Debug, Deserialize)]
struct Offer {
    price: Option<PriceField>,
    #[serde(rename = "lowPrice")]
    low_price: Option<PriceField>,
}

/// Prices arrive as JSON numbers or decimal strings depending on the
/// retailer's template.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    fn normalized(&self) -> Option<String> {
        match self {
            PriceField::Number(n) => normalize_price(&n.to_string()),
            PriceField::Text(s) => normalize_price(s),
        }
    }
}

/// Every image shape observed in the wild, as an explicit union: a bare
/// URL string, an array of strings or objects, or a single `ImageObject`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageField {
    Url(String),
    Many(Vec<ImageEntry>),
    Object(ImageObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageEntry {
    Url(String),
    Object(ImageObject),
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: Option<String>,
    #[serde(rename = "contentUrl")]
    content_url: Option<String>,
}

impl ImageObject {
    fn any_url(&self) -> Option<String> {
        self.url.clone().or_else(|| self.content_url.clone())
    }
}

impl ImageField {
    fn first_url(&self) -> Option<String> {
        match self {
            ImageField::Url(s) => Some(s.clone()),
            ImageField::Many(entries) => entries.first().and_then(|entry| match entry {
                ImageEntry::Url(s) => Some(s.clone()),
                ImageEntry::Object(o) => o.any_url(),
            }),
            ImageField::Object(o) => o.any_url(),
        }
    }
}

/// Extract the primary candidate from the first product-type JSON-LD
/// block in the document. Fields the block does not carry stay `None`;
/// the name is returned raw (the orchestrator sanitizes it).
pub(crate) fn extract_structured(html: &str, origin: &str) -> Candidate {
    let Some(product) = find_product_block(html) else {
        return Candidate::default();
    };

    let brand = product.brand.and_then(|b| match b {
        BrandField::Name(name) => Some(name),
        BrandField::Object { name } => name,
    });

    let price = product.offers.as_ref().and_then(|offers| {
        let offer = match offers {
            OffersField::One(offer) => Some(offer),
            OffersField::Many(list) => list.first(),
        }?;
        offer
            .price
            .as_ref()
            .or(offer.low_price.as_ref())
            .and_then(PriceField::normalized)
    });

    let image_url = product
        .image
        .as_ref()
        .and_then(ImageField::first_url)
        .map(|url| resolve_url(&url, origin));

    Candidate {
        name: product.name,
        brand,
        price,
        image_url,
        category: product.category,
    }
}

fn find_product_block(html: &str) -> Option<JsonLdProduct> {
    let script_re = Regex::new(
        r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#,
    )
    .expect("valid json-ld script regex");

    for cap in script_re.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        if raw.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            continue;
        };
        if let Some(product) = product_from_value(&value) {
            return Some(product);
        }
    }
    None
}

/// Locate a Product node in priority order: the value itself, then the
/// `@graph` array, then a top-level array.
fn product_from_value(value: &Value) -> Option<JsonLdProduct> {
    if is_product_node(value) {
        return parse_product(value);
    }

    if let Some(graph) = value.get("@graph").and_then(Value::as_array) {
        if let Some(node) = graph.iter().find(|n| is_product_node(n)) {
            return parse_product(node);
        }
    }

    if let Some(items) = value.as_array() {
        if let Some(node) = items.iter().find(|n| is_product_node(n)) {
            return parse_product(node);
        }
    }

    None
}

/// `@type` is a string or an array of strings.
fn is_product_node(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(s)) => s == "Product",
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t == "Product"),
        _ => false,
    }
}

fn parse_product(value: &Value) -> Option<JsonLdProduct> {
    serde_json::from_value(value.clone()).ok()
}

/// Make a possibly-relative image URL absolute against the page origin:
/// protocol-relative `//cdn...` gets `https:`, root-relative `/img...`
/// gets the origin; anything else passes through.
pub(crate) fn resolve_url(url: &str, origin: &str) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else if url.starts_with('/') {
        format!("{origin}{url}")
    } else {
        url.to_string()
    }
}

#[cfg(test)]
#[path = "structured_test.rs"]
mod tests;
