//! Core data types for resolved page metadata.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A semantic metadata field. Declaration order is the resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Title,
    Url,
    Type,
    Image,
    Description,
    Locale,
    SiteName,
    ImageSecureUrl,
    TwitterCard,
    TwitterSite,
    TwitterCreator,
}

/// Which tag family a field is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagFamily {
    OpenGraph,
    Twitter,
}

impl FieldName {
    /// Number of fields in the fixed set.
    pub const COUNT: usize = 11;

    /// The fixed field list: six canonical OG fields, two optional OG
    /// fields, then the Twitter fields.
    pub const ALL: [FieldName; FieldName::COUNT] = [
        FieldName::Title,
        FieldName::Url,
        FieldName::Type,
        FieldName::Image,
        FieldName::Description,
        FieldName::Locale,
        FieldName::SiteName,
        FieldName::ImageSecureUrl,
        FieldName::TwitterCard,
        FieldName::TwitterSite,
        FieldName::TwitterCreator,
    ];

    /// Short name without the family prefix, e.g. `title` or `card`.
    pub fn name(self) -> &'static str {
        match self {
            FieldName::Title => "title",
            FieldName::Url => "url",
            FieldName::Type => "type",
            FieldName::Image => "image",
            FieldName::Description => "description",
            FieldName::Locale => "locale",
            FieldName::SiteName => "site_name",
            FieldName::ImageSecureUrl => "image:secure_url",
            FieldName::TwitterCard => "card",
            FieldName::TwitterSite => "site",
            FieldName::TwitterCreator => "creator",
        }
    }

    /// Wire tag, e.g. `og:title` or `twitter:card`.
    pub fn tag(self) -> &'static str {
        match self {
            FieldName::Title => "og:title",
            FieldName::Url => "og:url",
            FieldName::Type => "og:type",
            FieldName::Image => "og:image",
            FieldName::Description => "og:description",
            FieldName::Locale => "og:locale",
            FieldName::SiteName => "og:site_name",
            FieldName::ImageSecureUrl => "og:image:secure_url",
            FieldName::TwitterCard => "twitter:card",
            FieldName::TwitterSite => "twitter:site",
            FieldName::TwitterCreator => "twitter:creator",
        }
    }

    pub fn family(self) -> TagFamily {
        match self {
            FieldName::TwitterCard | FieldName::TwitterSite | FieldName::TwitterCreator => {
                TagFamily::Twitter
            }
            _ => TagFamily::OpenGraph,
        }
    }

    /// Selector for the tag that declares this field explicitly.
    ///
    /// Open Graph tags are keyed by `property`, Twitter tags by `name`.
    pub fn canonical_selector(self) -> String {
        match self.family() {
            TagFamily::OpenGraph => format!(r#"meta[property="{}"]"#, self.tag()),
            TagFamily::Twitter => format!(r#"meta[name="{}"]"#, self.tag()),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for FieldName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

/// Resolved metadata for one document.
///
/// Every field except [`FieldName::Image`] holds an optional string. The
/// image field is always a list, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataResult {
    values: [Option<String>; FieldName::COUNT],
    images: Vec<String>,
}

impl MetadataResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a string field. Always `None` for the image field; use
    /// [`MetadataResult::images`] instead.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    /// Store a string field. Writes to the image field are ignored.
    pub fn set(&mut self, field: FieldName, value: Option<String>) {
        if field == FieldName::Image {
            return;
        }
        self.values[field.index()] = value;
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn push_image(&mut self, url: String) {
        self.images.push(url);
    }

    /// Whether the field holds a usable value: a non-empty string, or a
    /// non-empty image list.
    pub fn is_resolved(&self, field: FieldName) -> bool {
        match field {
            FieldName::Image => !self.images.is_empty(),
            _ => crate::predicates::is_present(self.get(field)),
        }
    }

    /// Fields that hold a usable value, in declaration order.
    pub fn resolved_fields(&self) -> Vec<FieldName> {
        FieldName::ALL
            .into_iter()
            .filter(|f| self.is_resolved(*f))
            .collect()
    }
}

impl Serialize for MetadataResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for field in FieldName::ALL {
            if field == FieldName::Image {
                map.serialize_entry(field.tag(), &self.images)?;
            } else if let Some(value) = self.get(field) {
                map.serialize_entry(field.tag(), value)?;
            }
        }
        map.end()
    }
}

/// The fields the engine tried to resolve, regardless of outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptedFields(Vec<FieldName>);

impl AttemptedFields {
    /// The full fixed field list.
    pub fn all() -> Self {
        Self(FieldName::ALL.to_vec())
    }

    pub fn fields(&self) -> &[FieldName] {
        &self.0
    }

}

impl Serialize for AttemptedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for field in &self.0 {
            seq.serialize_element(field)?;
        }
        seq.end()
    }
}

/// Errors raised by a document accessor. Missing values are not errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OgError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Document accessor error: {0}")]
    Accessor(String),
}

/// Convenience result type.
pub type OgResult<T> = Result<T, OgError>;
