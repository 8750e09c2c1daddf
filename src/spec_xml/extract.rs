//! Section and leaf element extraction.

use regex::Regex;

use crate::spec_xml::escape::unescape_xml;

/// Build a pattern matching `<tag>...</tag>` with the inner text captured.
/// `None` only if the regex engine rejects it (e.g. size limits).
fn tag_pattern(tag: &str, flags: &str) -> Option<Regex> {
    let tag = regex::escape(tag);
    let prefix = if flags.is_empty() {
        String::new()
    } else {
        format!("(?{flags})")
    };
    let pattern = format!("{prefix}<{tag}>(.*?)</{tag}>");
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::debug!("Failed to compile pattern for <{}>: {}", tag, e);
            None
        }
    }
}

/// Inner text of the first `<tag>...</tag>` section.
///
/// Tag matching is case-insensitive and the content may span lines. Only the
/// first occurrence is considered; the text is returned as-is.
pub fn extract_section<'a>(document: &'a str, tag: &str) -> Option<&'a str> {
    tag_pattern(tag, "is")?
        .captures(document)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Trimmed, unescaped inner text of every single-line `<tag>...</tag>` element,
/// in document order. The tag is matched case-sensitively.
pub fn extract_elements(document: &str, tag: &str) -> Vec<String> {
    let Some(re) = tag_pattern(tag, "") else {
        return Vec::new();
    };

    re.captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape_xml(m.as_str().trim()))
        .collect()
}
