//! Product metadata extraction pipeline.
//!
//! Given a product page URL from a retail site, fetches the page and
//! heuristically derives structured fields (name, brand, price, image,
//! category, store) using a layered strategy: embedded JSON-LD structured
//! data first, OpenGraph/product meta-tag conventions next, free-text
//! heuristics last, optionally refined by a language-model pass over the
//! cleaned page text. Extraction is best-effort — once the page has been
//! fetched, individual field failures degrade to `None` rather than
//! failing the call.

pub mod category;
pub mod client;
pub mod error;
pub mod sanitize;
pub mod store;
pub mod text;

mod blocklist;
mod fuse;
mod llm;
mod meta;
mod structured;
mod types;

pub use client::ProductScraper;
pub use error::ScrapeError;
