//! Reading feature records out of a spec document.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::spec_xml::escape::unescape_xml;
use crate::spec_xml::extract::{extract_elements, extract_section};
use crate::spec_xml::feature::{feature_key, ImplementedFeature};
use crate::spec_xml::IMPLEMENTED_FEATURES_TAG;

static FEATURE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<feature>(.*?)</feature>").unwrap());
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<name>(.*?)</name>").unwrap());
static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<description>(.*?)</description>").unwrap());

fn first_capture<'a>(re: &Regex, text: &'a str) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse one `<feature>` block body. Blocks without a usable name yield `None`.
fn parse_feature_block(block: &str) -> Option<ImplementedFeature> {
    let name = first_capture(&NAME, block)
        .map(|raw| unescape_xml(raw.trim()))
        .filter(|name| !name.is_empty());
    let Some(name) = name else {
        tracing::debug!("Skipping <feature> block without a name");
        return None;
    };

    let description = first_capture(&DESCRIPTION, block)
        .map(|raw| unescape_xml(raw.trim()))
        .unwrap_or_default();

    let file_locations = extract_section(block, "file_locations")
        .map(|section| extract_elements(section, "location"))
        .filter(|locations| !locations.is_empty());

    Some(ImplementedFeature {
        name,
        description,
        file_locations,
    })
}

/// All features in the `<implemented_features>` section, in document order.
/// A missing section yields an empty list.
pub fn extract_implemented_features(document: &str) -> Vec<ImplementedFeature> {
    let Some(section) = extract_section(document, IMPLEMENTED_FEATURES_TAG) else {
        return Vec::new();
    };

    FEATURE_BLOCK
        .captures_iter(section)
        .filter_map(|caps| caps.get(1))
        .filter_map(|block| parse_feature_block(block.as_str()))
        .collect()
}

/// Names of all implemented features, in document order.
pub fn extract_implemented_feature_names(document: &str) -> Vec<String> {
    extract_implemented_features(document)
        .into_iter()
        .map(|f| f.name)
        .collect()
}

/// Whether a feature with this name (case-insensitive) exists.
pub fn has_implemented_feature(document: &str, name: &str) -> bool {
    let key = feature_key(name);
    extract_implemented_features(document)
        .iter()
        .any(|f| feature_key(&f.name) == key)
}
