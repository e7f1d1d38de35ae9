//! OpenGraph / product meta-tag and `<title>` extraction.

use std::collections::HashMap;

use regex::Regex;

use crate::text::decode_entities;

/// The document's meta tags, keyed by `property` (or `name` when no
/// `property` is present). First occurrence wins, matching how browsers
/// and link unfurlers read OpenGraph data.
#[derive(Debug)]
pub(crate) struct MetaTags {
    tags: HashMap<String, String>,
}

impl MetaTags {
    pub(crate) fn parse(html: &str) -> Self {
        let tag_re = Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta tag regex");
        let key_re = Regex::new(r#"(?is)\b(?:property|name)\s*=\s*["']([^"']+)["']"#)
            .expect("valid meta key regex");
        let content_re = Regex::new(r#"(?is)\bcontent\s*=\s*["']([^"']*)["']"#)
            .expect("valid meta content regex");

        let mut tags = HashMap::new();
        for tag in tag_re.find_iter(html) {
            let tag = tag.as_str();
            let Some(key) = key_re.captures(tag).and_then(|c| c.get(1)) else {
                continue;
            };
            let Some(content) = content_re.captures(tag).and_then(|c| c.get(1)) else {
                continue;
            };
            let content = decode_entities(content.as_str()).trim().to_string();
            if content.is_empty() {
                continue;
            }
            tags.entry(key.as_str().to_lowercase()).or_insert(content);
        }
        Self { tags }
    }

    /// Content of the first meta tag with the given property/name.
    pub(crate) fn get(&self, property: &str) -> Option<&str> {
        self.tags.get(&property.to_lowercase()).map(String::as_str)
    }

    /// Content of the first property in `properties` that is present.
    pub(crate) fn first_of(&self, properties: &[&str]) -> Option<&str> {
        properties.iter().find_map(|p| self.get(p))
    }
}

/// Text of the document's `<title>` element, entity-decoded and trimmed.
pub(crate) fn page_title(html: &str) -> Option<String> {
    let title_re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex");
    let raw = title_re.captures(html)?.get(1)?.as_str();
    let title = decode_entities(raw).trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}
