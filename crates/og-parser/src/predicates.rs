//! Pure predicates used while filtering candidate values.

use url::{Host, Url};

/// File extensions accepted as images by the `<img>` scan.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "apng", "bmp", "gif", "ico", "cur", "jpg", "jpeg", "jfif", "pjpeg", "pjp", "png", "svg",
    "tif", "tiff", "webp",
];

/// A value is present when it exists and is not the empty string.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Check if a file extension names a supported image type.
///
/// The comparison ignores ASCII case, so `JPG` and `Png` are accepted.
pub fn is_image_extension(ext: &str) -> bool {
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Extension of the resource a URL points at.
///
/// Everything from the first `?` or `#` is removed first, so both the query
/// string and the fragment are ignored (`pic.gif#frame` is `gif`). The text
/// after the final `.` of what remains is returned, unchanged in case.
/// Returns an empty string when there is no dot.
pub fn extension_of(url: &str) -> &str {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let path = &url[..end];
    match path.rfind('.') {
        Some(dot) => &path[dot + 1..],
        None => "",
    }
}

/// Check if a string is a syntactically valid absolute `http`/`https` URL
/// whose host is either an IP literal or a domain with a top-level domain.
///
/// The scheme must be followed by exactly `//` as written; `Url::parse`
/// would otherwise repair `http:a.co` or `https:/a.co` into a valid URL.
pub fn is_valid_absolute_url(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.chars().any(char::is_whitespace) {
        return false;
    }

    if !has_authority_prefix(candidate) {
        return false;
    }

    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => is_valid_domain(domain),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// `http://` or `https://` (any case) directly followed by the host.
fn has_authority_prefix(candidate: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        let Some(head) = candidate.get(..prefix.len()) else {
            return false;
        };
        let host_start = candidate[prefix.len()..].chars().next();
        head.eq_ignore_ascii_case(prefix) && !matches!(host_start, Some('/' | '\\'))
    })
}

fn is_valid_domain(domain: &str) -> bool {
    if domain.ends_with('.') || domain.contains('_') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    // Punycode TLDs (xn--...) are allowed alongside plain alphabetic ones.
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}
