//! Read-only query access to a parsed HTML document.
//!
//! The engine depends only on [`DocumentAccessor`]. [`HtmlDocument`] backs it
//! with the `scraper` crate's CSS selector engine.

use scraper::{Html, Selector};

use crate::predicates::is_present;
use crate::types::{OgError, OgResult};

/// Attributes of one matched element, captured in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementHandle {
    attributes: Vec<(String, String)>,
}

impl ElementHandle {
    pub fn new(attributes: Vec<(String, String)>) -> Self {
        Self { attributes }
    }

    /// Value of the named attribute, if the element carries it.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Narrow query capability over a parsed document.
pub trait DocumentAccessor {
    /// Value of `attr` on the first element matching `selector`.
    fn attribute(&self, selector: &str, attr: &str) -> OgResult<Option<String>>;

    /// Text content of the first element matching `selector`.
    fn text(&self, selector: &str) -> OgResult<Option<String>>;

    /// Every element matching `selector`, in document order.
    fn all(&self, selector: &str) -> OgResult<Vec<ElementHandle>>;

    /// True iff [`DocumentAccessor::attribute`] yields a non-empty string.
    fn present(&self, selector: &str, attr: &str) -> OgResult<bool> {
        Ok(is_present(self.attribute(selector, attr)?.as_deref()))
    }
}

/// A parsed HTML document.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full HTML document. Parsing is error-tolerant and never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    fn selector(selector: &str) -> OgResult<Selector> {
        Selector::parse(selector).map_err(|e| OgError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })
    }
}

impl DocumentAccessor for HtmlDocument {
    fn attribute(&self, selector: &str, attr: &str) -> OgResult<Option<String>> {
        let sel = Self::selector(selector)?;
        Ok(self
            .html
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr(attr))
            .map(str::to_string))
    }

    fn text(&self, selector: &str) -> OgResult<Option<String>> {
        let sel = Self::selector(selector)?;
        Ok(self
            .html
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string()))
    }

    fn all(&self, selector: &str) -> OgResult<Vec<ElementHandle>> {
        let sel = Self::selector(selector)?;
        Ok(self
            .html
            .select(&sel)
            .map(|el| {
                ElementHandle::new(
                    el.value()
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <title>
    Example Page
  </title>
  <meta property="og:title" content="OG Title">
  <meta property="og:title" content="Second OG Title">
  <meta name="description" content="">
</head>
<body>
  <img src="http://a.co/one.png" alt="one">
  <img alt="no source">
  <img src="http://a.co/two.jpg">
</body>
</html>"#;

    #[test]
    fn test_attribute_first_match() {
        let doc = HtmlDocument::parse(PAGE);
        let value = doc
            .attribute(r#"meta[property="og:title"]"#, "content")
            .unwrap();
        assert_eq!(value.as_deref(), Some("OG Title"));
    }

    #[test]
    fn test_attribute_missing() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(
            doc.attribute(r#"meta[property="og:url"]"#, "content").unwrap(),
            None
        );
        assert_eq!(doc.attribute("html", "data-missing").unwrap(), None);
        assert_eq!(doc.attribute("html", "lang").unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_text_is_trimmed() {
        let doc = HtmlDocument::parse(PAGE);
        assert_eq!(doc.text("title").unwrap().as_deref(), Some("Example Page"));
        assert_eq!(doc.text("#nothing").unwrap(), None);
    }

    #[test]
    fn test_present_treats_empty_as_absent() {
        let doc = HtmlDocument::parse(PAGE);
        assert!(!doc.present(r#"meta[name="description"]"#, "content").unwrap());
        assert!(doc.present(r#"meta[property="og:title"]"#, "content").unwrap());
        assert!(!doc.present(r#"meta[name="keywords"]"#, "content").unwrap());
    }

    #[test]
    fn test_all_in_document_order() {
        let doc = HtmlDocument::parse(PAGE);
        let images = doc.all("img").unwrap();
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].attr("src"), Some("http://a.co/one.png"));
        assert_eq!(images[0].attr("alt"), Some("one"));
        assert_eq!(images[1].attr("src"), None);
        assert_eq!(images[2].attr("src"), Some("http://a.co/two.jpg"));
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let doc = HtmlDocument::parse(PAGE);
        let err = doc.attribute("meta[", "content").unwrap_err();
        assert!(matches!(err, OgError::InvalidSelector { .. }));
        assert!(doc.all("!!").is_err());
    }
}
