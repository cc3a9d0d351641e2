//! Fallback chains, one ordered list of sources per field.
//!
//! The chains are plain data in [`FALLBACK_CHAINS`]; [`resolve_chain`] walks
//! a chain and stops at the first source that yields anything.

use crate::document::DocumentAccessor;
use crate::predicates::{extension_of, is_image_extension, is_present, is_valid_absolute_url};
use crate::types::{FieldName, OgResult};

/// A place a field value can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// An attribute of the first matching element.
    Attribute {
        selector: &'static str,
        attr: &'static str,
    },
    /// Trimmed text content of the first matching element.
    Text { selector: &'static str },
    /// A fixed value that needs no document lookup.
    Literal(&'static str),
    /// The given attribute of every matching element that is an absolute
    /// URL pointing at an image file.
    ImageScan {
        selector: &'static str,
        attr: &'static str,
    },
}

impl Source {
    /// Values this source yields, in document order. Empty strings are
    /// never returned.
    pub fn lookup<D>(&self, doc: &D) -> OgResult<Vec<String>>
    where
        D: DocumentAccessor + ?Sized,
    {
        let found = match *self {
            Source::Attribute { selector, attr } => doc.attribute(selector, attr)?,
            Source::Text { selector } => doc.text(selector)?,
            Source::Literal(value) => Some(value.to_string()),
            Source::ImageScan { selector, attr } => {
                return Ok(doc
                    .all(selector)?
                    .iter()
                    .filter_map(|el| el.attr(attr))
                    .filter(|src| is_image_url(src))
                    .map(str::to_string)
                    .collect());
            }
        };

        Ok(found
            .filter(|v| is_present(Some(v.as_str())))
            .into_iter()
            .collect())
    }
}

fn is_image_url(src: &str) -> bool {
    is_valid_absolute_url(src) && is_image_extension(extension_of(src))
}

/// The ordered sources tried for one field once its canonical tag is missing.
#[derive(Debug, Clone, Copy)]
pub struct FallbackChain {
    pub field: FieldName,
    pub sources: &'static [Source],
}

/// Fallback chains, in the order the engine evaluates them.
///
/// Fields without an entry are resolved from their canonical tag only.
pub const FALLBACK_CHAINS: &[FallbackChain] = &[
    FallbackChain {
        field: FieldName::Title,
        sources: &[
            Source::Text { selector: "title" },
            Source::Attribute {
                selector: r#"meta[name="title"]"#,
                attr: "content",
            },
        ],
    },
    FallbackChain {
        field: FieldName::Description,
        sources: &[
            Source::Attribute {
                selector: r#"meta[name="description"]"#,
                attr: "content",
            },
            Source::Attribute {
                selector: r#"meta[name="Description"]"#,
                attr: "content",
            },
            Source::Attribute {
                selector: r#"meta[itemprop="description"]"#,
                attr: "content",
            },
            Source::Text {
                selector: "#description",
            },
        ],
    },
    FallbackChain {
        field: FieldName::Url,
        sources: &[
            Source::Attribute {
                selector: r#"link[rel="canonical"]"#,
                attr: "href",
            },
            Source::Attribute {
                selector: r#"link[rel="alternate"][hreflang="x-default"]"#,
                attr: "href",
            },
        ],
    },
    FallbackChain {
        field: FieldName::Image,
        sources: &[Source::ImageScan {
            selector: "img",
            attr: "src",
        }],
    },
    FallbackChain {
        field: FieldName::Locale,
        sources: &[
            Source::Attribute {
                selector: "html",
                attr: "lang",
            },
            Source::Attribute {
                selector: r#"meta[itemprop="inLanguage"]"#,
                attr: "content",
            },
        ],
    },
    FallbackChain {
        field: FieldName::Type,
        sources: &[Source::Literal("website")],
    },
];

/// Chain registered for `field`, if any.
pub fn chain_for(field: FieldName) -> Option<&'static FallbackChain> {
    FALLBACK_CHAINS.iter().find(|c| c.field == field)
}

/// Walk `chain` against `doc`, returning the values of the first source
/// that yields any, together with that source's position in the chain.
pub fn resolve_chain<D>(chain: &FallbackChain, doc: &D) -> OgResult<Option<(usize, Vec<String>)>>
where
    D: DocumentAccessor + ?Sized,
{
    for (position, source) in chain.sources.iter().enumerate() {
        let values = source.lookup(doc)?;
        if !values.is_empty() {
            return Ok(Some((position, values)));
        }
    }
    Ok(None)
}
