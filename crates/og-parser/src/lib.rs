//! og-parser — Open Graph and Twitter Card metadata resolution with ordered fallbacks.

pub mod document;
pub mod engine;
pub mod predicates;
pub mod resolver;
pub mod types;

pub use document::{DocumentAccessor, ElementHandle, HtmlDocument};
pub use engine::{parse_html, prune_empty, MetadataEngine};
pub use predicates::{extension_of, is_image_extension, is_present, is_valid_absolute_url};
pub use resolver::{FallbackChain, Source, FALLBACK_CHAINS};
pub use types::*;
