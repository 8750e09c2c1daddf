//! App spec XML editing.
//!
//! The app spec (`.automaker/app_spec.txt`) is a small XML-like document with
//! a `<project_specification>` root. This module reads and rewrites its
//! `<implemented_features>` section using pattern matching over text, not a
//! full XML parser: it assumes flat, well-formed, non-nested sections.
//!
//! Everything here is a pure function from a document string to a value or
//! a new document string. Absence is never an error: missing sections parse
//! as empty and mutations that cannot apply return the input unchanged.
//! Callers own persistence and must serialize their own read-modify-write
//! cycles.

pub mod editor;
pub mod escape;
pub mod extract;
pub mod feature;
pub mod parse;
pub mod render;

pub use editor::{SectionPlacement, SpecXmlEditor, DEFAULT_INDENT};
pub use escape::{escape_xml, unescape_xml};
pub use extract::{extract_elements, extract_section};
pub use feature::{
    feature_key, from_spec_output_features, to_spec_output_features, FeatureUpdate,
    ImplementedFeature, SpecOutputFeature,
};
pub use parse::{
    extract_implemented_feature_names, extract_implemented_features, has_implemented_feature,
};
pub use render::{feature_to_xml, features_to_xml};

/// Tag of the section holding implemented features.
pub const IMPLEMENTED_FEATURES_TAG: &str = "implemented_features";

/// Rewrite the implemented features section using the default editor.
pub fn update_implemented_features_section(
    document: &str,
    features: &[ImplementedFeature],
) -> String {
    SpecXmlEditor::new().update_features_section(document, features)
}

/// Append a feature using the default editor.
pub fn add_implemented_feature(document: &str, feature: &ImplementedFeature) -> String {
    SpecXmlEditor::new().add_feature(document, feature)
}

/// Remove a feature by name using the default editor.
pub fn remove_implemented_feature(document: &str, name: &str) -> String {
    SpecXmlEditor::new().remove_feature(document, name)
}

/// Update a feature by name using the default editor.
pub fn update_implemented_feature(document: &str, name: &str, update: &FeatureUpdate) -> String {
    SpecXmlEditor::new().update_feature(document, name, update)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r#"<project_specification>
  <project_name>Todo</project_name>
  <core_capabilities>
    <capability>Lists</capability>
  </core_capabilities>
  <development_guidelines>Keep it small</development_guidelines>
</project_specification>
"#;

    #[test]
    fn test_full_lifecycle() {
        let doc = add_implemented_feature(
            SPEC,
            &ImplementedFeature::new("Login", "Email/password auth")
                .with_file_locations(["src/auth/login.rs"]),
        );
        let doc = add_implemented_feature(&doc, &ImplementedFeature::new("Search", "Find todos"));

        // Inserted after core capabilities, before the guidelines.
        let section = doc.find("<implemented_features>").unwrap();
        assert!(doc.find("</core_capabilities>").unwrap() < section);
        assert!(section < doc.find("<development_guidelines>").unwrap());

        let doc = update_implemented_feature(
            &doc,
            "search",
            &FeatureUpdate {
                description: Some("Find & filter todos".to_string()),
                ..Default::default()
            },
        );
        assert!(doc.contains("<description>Find &amp; filter todos</description>"));

        let doc = remove_implemented_feature(&doc, "LOGIN");
        assert_eq!(extract_implemented_feature_names(&doc), vec!["Search"]);
        assert!(!has_implemented_feature(&doc, "Login"));

        // Untouched content survives every rewrite.
        assert!(doc.contains("<project_name>Todo</project_name>"));
        assert!(doc.contains("<development_guidelines>Keep it small</development_guidelines>"));
        assert_eq!(doc.matches("<implemented_features>").count(), 1);
    }

    #[test]
    fn test_escaped_name_is_unescaped() {
        let doc = "<implemented_features><feature><name>A &amp; B</name></feature></implemented_features>";
        assert_eq!(extract_implemented_feature_names(doc), vec!["A & B"]);
    }

    #[test]
    fn test_spec_output_features_round_trip_through_document() {
        let output = vec![SpecOutputFeature {
            name: "Sync".to_string(),
            description: "Offline sync".to_string(),
            file_locations: Some(vec!["src/sync.rs".to_string()]),
        }];

        let doc = update_implemented_features_section(SPEC, &from_spec_output_features(&output));
        let parsed = extract_implemented_features(&doc);
        assert_eq!(to_spec_output_features(&parsed), output);
    }
}
