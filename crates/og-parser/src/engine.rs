//! Metadata resolution: canonical pass, fallback pass, pruning.

use crate::document::{DocumentAccessor, HtmlDocument};
use crate::predicates::is_present;
use crate::resolver::{resolve_chain, FALLBACK_CHAINS};
use crate::types::{AttemptedFields, FieldName, MetadataResult, OgResult};

/// Resolves the fixed field set against a document.
///
/// The engine is stateless; one instance can serve any number of documents,
/// concurrently or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataEngine;

impl MetadataEngine {
    pub fn new() -> Self {
        Self
    }

    /// Resolve every field against `doc`.
    ///
    /// Missing values are a normal outcome. Only accessor failures are
    /// returned as errors, and they abort resolution.
    pub fn resolve<D>(&self, doc: &D) -> OgResult<(MetadataResult, AttemptedFields)>
    where
        D: DocumentAccessor + ?Sized,
    {
        let mut result = canonical_pass(doc)?;
        fallback_pass(doc, &mut result)?;
        Ok((prune_empty(result), AttemptedFields::all()))
    }
}

/// Read each field's explicitly declared tag, storing values as found.
fn canonical_pass<D>(doc: &D) -> OgResult<MetadataResult>
where
    D: DocumentAccessor + ?Sized,
{
    let mut result = MetadataResult::new();

    for field in FieldName::ALL {
        let value = doc.attribute(&field.canonical_selector(), "content")?;
        if field == FieldName::Image {
            // Seeded as a list of zero or one URL.
            if let Some(url) = value.filter(|v| is_present(Some(v.as_str()))) {
                result.push_image(url);
            }
        } else {
            result.set(field, value);
        }
    }

    Ok(result)
}

/// Fill each unresolved field from its fallback chain.
fn fallback_pass<D>(doc: &D, result: &mut MetadataResult) -> OgResult<()>
where
    D: DocumentAccessor + ?Sized,
{
    for chain in FALLBACK_CHAINS {
        let field = chain.field;
        if result.is_resolved(field) {
            tracing::debug!(%field, "resolved from canonical tag");
            continue;
        }

        match resolve_chain(chain, doc)? {
            Some((position, values)) => {
                tracing::debug!(
                    %field,
                    source = position,
                    count = values.len(),
                    "resolved from fallback"
                );
                if field == FieldName::Image {
                    for url in values {
                        result.push_image(url);
                    }
                } else {
                    result.set(field, values.into_iter().next());
                }
            }
            None => tracing::debug!(%field, "no value found"),
        }
    }

    Ok(())
}

/// Drop string fields that hold an empty value.
pub fn prune_empty(mut result: MetadataResult) -> MetadataResult {
    for field in FieldName::ALL {
        if field != FieldName::Image && !is_present(result.get(field)) {
            result.set(field, None);
        }
    }
    result
}

/// Parse `html` and resolve its metadata in one step.
pub fn parse_html(html: &str) -> OgResult<(MetadataResult, AttemptedFields)> {
    let doc = HtmlDocument::parse(html);
    MetadataEngine::new().resolve(&doc)
}
