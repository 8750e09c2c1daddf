//! Rendering feature records back into spec XML.

use crate::spec_xml::escape::escape_xml;
use crate::spec_xml::feature::ImplementedFeature;

/// Render one feature.
///
/// `indent` is one indentation unit. The feature tag is placed two units
/// deep (inside `<implemented_features>`, inside the document root), its
/// children three units and `<location>` entries four units.
pub fn feature_to_xml(feature: &ImplementedFeature, indent: &str) -> String {
    let i1 = indent.repeat(2);
    let i2 = indent.repeat(3);
    let i3 = indent.repeat(4);

    let mut lines = vec![
        format!("{i1}<feature>"),
        format!("{i2}<name>{}</name>", escape_xml(Some(feature.name.as_str()))),
        format!(
            "{i2}<description>{}</description>",
            escape_xml(Some(feature.description.as_str()))
        ),
    ];

    let locations = feature.locations();
    if !locations.is_empty() {
        lines.push(format!("{i2}<file_locations>"));
        for loc in locations {
            if loc.contains('\n') {
                tracing::warn!(
                    "File location of '{}' spans lines and will not be read back: {:?}",
                    feature.name,
                    loc
                );
            }
            lines.push(format!(
                "{i3}<location>{}</location>",
                escape_xml(Some(loc.as_str()))
            ));
        }
        lines.push(format!("{i2}</file_locations>"));
    }

    lines.push(format!("{i1}</feature>"));
    lines.join("\n")
}

/// Render a list of features, newline separated, in order.
pub fn features_to_xml(features: &[ImplementedFeature], indent: &str) -> String {
    features
        .iter()
        .map(|f| feature_to_xml(f, indent))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_without_locations() {
        let xml = feature_to_xml(&ImplementedFeature::new("Login", "Email/password auth"), "  ");
        assert_eq!(
            xml,
            "    <feature>\n      <name>Login</name>\n      <description>Email/password auth</description>\n    </feature>"
        );
        assert!(!xml.contains("file_locations"));
    }

    #[test]
    fn test_feature_with_locations_escaped() {
        let feature = ImplementedFeature::new("Q&A", "Ask \"questions\"")
            .with_file_locations(["src/q&a.rs", "src/<gen>.rs"]);
        let xml = feature_to_xml(&feature, "  ");

        let expected = [
            "    <feature>",
            "      <name>Q&amp;A</name>",
            "      <description>Ask &quot;questions&quot;</description>",
            "      <file_locations>",
            "        <location>src/q&amp;a.rs</location>",
            "        <location>src/&lt;gen&gt;.rs</location>",
            "      </file_locations>",
            "    </feature>",
        ]
        .join("\n");
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_multiline_location_is_not_read_back() {
        use crate::spec_xml::parse::extract_implemented_features;

        let feature = ImplementedFeature::new("Split", "")
            .with_file_locations(["src/one.rs", "src/two\nlines.rs"]);
        let doc = format!(
            "<implemented_features>\n{}\n  </implemented_features>",
            feature_to_xml(&feature, "  ")
        );

        let parsed = extract_implemented_features(&doc);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].locations(), ["src/one.rs".to_string()]);
    }

    #[test]
    fn test_custom_indent_unit() {
        let xml = feature_to_xml(&ImplementedFeature::new("A", ""), "\t");
        assert!(xml.starts_with("\t\t<feature>\n\t\t\t<name>A</name>"));
    }

    #[test]
    fn test_features_joined_in_order() {
        let features = vec![ImplementedFeature::new("A", ""), ImplementedFeature::new("B", "")];
        let xml = features_to_xml(&features, "  ");

        let a = xml.find("<name>A</name>").unwrap();
        let b = xml.find("<name>B</name>").unwrap();
        assert!(a < b);
        assert!(xml.contains("</feature>\n    <feature>"));
        assert_eq!(features_to_xml(&[], "  "), "");
    }
}
