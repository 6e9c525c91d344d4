//! Font face naming for fonts referenced by adventure props.

use adventure_graph::StyleProps;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A font asset resolved to an `@font-face` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFace {
    /// Slug-cased family derived from the file name.
    pub family: String,
    pub url: String,
    /// CSS `format()` hint inferred from the extension.
    pub format: Option<&'static str>,
}

impl FontFace {
    /// Derive a font face from an asset URL.
    ///
    /// Returns `None` when the URL has no usable file name.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let basename = path.rsplit('/').next().filter(|s| !s.is_empty())?;

        let (stem, extension) = match basename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (basename, None),
        };

        let family = slug_case(stem);
        if family.is_empty() {
            return None;
        }

        Some(Self {
            family,
            url: url.to_string(),
            format: extension.and_then(format_for_extension),
        })
    }

    /// Render the `@font-face` rule.
    pub fn to_css(&self) -> String {
        match self.format {
            Some(format) => format!(
                "@font-face {{ font-family: \"{}\"; src: url(\"{}\") format(\"{}\"); }}",
                self.family, self.url, format
            ),
            None => format!(
                "@font-face {{ font-family: \"{}\"; src: url(\"{}\"); }}",
                self.family, self.url
            ),
        }
    }
}

/// CSS format hint for a font file extension.
pub fn format_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "woff2" => Some("woff2"),
        "woff" => Some("woff"),
        "ttf" => Some("truetype"),
        "otf" => Some("opentype"),
        "eot" => Some("embedded-opentype"),
        "svg" => Some("svg"),
        _ => None,
    }
}

/// Lowercase, replace runs of non-alphanumerics with `-`, trim dashes.
pub fn slug_case(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Font faces referenced by `font_url` and `font_urls`, in that order.
pub fn fonts_from_props(props: &StyleProps) -> Vec<FontFace> {
    let mut urls: Vec<&str> = Vec::new();
    if let Some(url) = props.get_str("font_url") {
        urls.push(url);
    }
    if let Some(Value::Array(list)) = props.get("font_urls") {
        urls.extend(list.iter().filter_map(Value::as_str));
    }

    let mut faces: Vec<FontFace> = Vec::new();
    for face in urls.into_iter().filter_map(FontFace::from_url) {
        if !faces.iter().any(|f| f.url == face.url) {
            faces.push(face);
        }
    }
    faces
}
