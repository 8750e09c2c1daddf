//! XML entity escaping for the five reserved characters.

/// Escape `& < > " '` as XML entities. `None` becomes the empty string.
///
/// The ampersand is replaced first so the entities produced by the later
/// substitutions are not escaped a second time.
pub fn escape_xml(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Reverse [`escape_xml`].
///
/// `&amp;` is restored last: `&amp;lt;` must become `&lt;`, not `<`.
pub fn unescape_xml(text: &str) -> String {
    text.replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_each_character() {
        assert_eq!(escape_xml(Some("&")), "&amp;");
        assert_eq!(escape_xml(Some("<")), "&lt;");
        assert_eq!(escape_xml(Some(">")), "&gt;");
        assert_eq!(escape_xml(Some("\"")), "&quot;");
        assert_eq!(escape_xml(Some("'")), "&apos;");
        assert_eq!(escape_xml(Some("plain text")), "plain text");
    }

    #[test]
    fn test_escape_none_is_empty() {
        assert_eq!(escape_xml(None), "");
        assert_eq!(escape_xml(Some("")), "");
    }

    #[test]
    fn test_no_double_escaping() {
        assert_eq!(escape_xml(Some("a < b & c")), "a &lt; b &amp; c");
        assert_eq!(escape_xml(Some("&lt;")), "&amp;lt;");
    }

    #[test]
    fn test_unescape_ampersand_last() {
        assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
        assert_eq!(unescape_xml("A &amp; B"), "A & B");
        assert_eq!(unescape_xml("&lt;div class=&quot;x&quot;&gt;"), "<div class=\"x\">");
    }

    #[test]
    fn test_round_trip_reserved_characters() {
        let samples = [
            "&", "<>", "\"'", "&&<<>>", "'&\"<>'", "&amp;", "&lt;&gt;", "<&apos;>", "",
        ];
        for sample in samples {
            assert_eq!(unescape_xml(&escape_xml(Some(sample))), sample, "sample: {sample}");
        }
    }
}
