//! Section replacement and feature CRUD over a whole document.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::spec_xml::feature::{feature_key, FeatureUpdate, ImplementedFeature};
use crate::spec_xml::parse::extract_implemented_features;
use crate::spec_xml::render::{feature_to_xml, features_to_xml};

static FEATURES_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<implemented_features>.*?</implemented_features>").unwrap()
});

const CORE_CAPABILITIES_CLOSE: &str = "</core_capabilities>";
const PROJECT_SPECIFICATION_CLOSE: &str = "</project_specification>";

/// Default indentation unit of generated XML.
pub const DEFAULT_INDENT: &str = "  ";

/// Where a rewritten features section ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionPlacement {
    /// An existing section was replaced.
    Replaced,
    /// Inserted after `</core_capabilities>`.
    AfterCoreCapabilities,
    /// Inserted before `</project_specification>`.
    BeforeProjectEnd,
    /// No insertion point; the document is unchanged.
    NotPlaced,
}

/// Stateless editor for the implemented features section of an app spec.
///
/// Every operation takes the whole document and returns a new one. Nothing
/// ever fails: a missing section or insertion point leaves the document
/// unchanged.
#[derive(Debug, Clone)]
pub struct SpecXmlEditor {
    indent: String,
}

impl Default for SpecXmlEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecXmlEditor {
    /// Editor using two-space indentation.
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// Editor using a custom indentation unit.
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn feature_to_xml(&self, feature: &ImplementedFeature) -> String {
        feature_to_xml(feature, &self.indent)
    }

    pub fn features_to_xml(&self, features: &[ImplementedFeature]) -> String {
        features_to_xml(features, &self.indent)
    }

    /// Render the complete `<implemented_features>` block.
    fn features_section(&self, features: &[ImplementedFeature]) -> String {
        format!(
            "<implemented_features>\n{}\n{}</implemented_features>",
            self.features_to_xml(features),
            self.indent
        )
    }

    /// Rewrite the features section, reporting where it was placed.
    ///
    /// Placement rules, first match wins:
    /// 1. replace the first existing `<implemented_features>` section;
    /// 2. insert after the first `</core_capabilities>`;
    /// 3. insert before the first `</project_specification>`;
    /// 4. leave the document unchanged.
    pub fn place_features_section(
        &self,
        document: &str,
        features: &[ImplementedFeature],
    ) -> (String, SectionPlacement) {
        let section = self.features_section(features);

        if FEATURES_SECTION.is_match(document) {
            let updated = FEATURES_SECTION.replacen(document, 1, NoExpand(&section));
            return (updated.into_owned(), SectionPlacement::Replaced);
        }

        if document.contains(CORE_CAPABILITIES_CLOSE) {
            let replacement = format!("{CORE_CAPABILITIES_CLOSE}\n\n{}{section}", self.indent);
            let updated = document.replacen(CORE_CAPABILITIES_CLOSE, &replacement, 1);
            return (updated, SectionPlacement::AfterCoreCapabilities);
        }

        if document.contains(PROJECT_SPECIFICATION_CLOSE) {
            let replacement = format!("{}{section}\n{PROJECT_SPECIFICATION_CLOSE}", self.indent);
            let updated = document.replacen(PROJECT_SPECIFICATION_CLOSE, &replacement, 1);
            return (updated, SectionPlacement::BeforeProjectEnd);
        }

        tracing::warn!(
            "No insertion point for <implemented_features> found; spec left unchanged"
        );
        (document.to_string(), SectionPlacement::NotPlaced)
    }

    /// Rewrite the features section with `features`.
    pub fn update_features_section(&self, document: &str, features: &[ImplementedFeature]) -> String {
        self.place_features_section(document, features).0
    }

    /// Append a feature. Unchanged if the name is blank or already present.
    pub fn add_feature(&self, document: &str, feature: &ImplementedFeature) -> String {
        if feature.name.trim().is_empty() {
            tracing::warn!("Refusing to add a feature with an empty name");
            return document.to_string();
        }

        let mut features = extract_implemented_features(document);
        if features.iter().any(|f| f.matches_name(&feature.name)) {
            tracing::warn!("Feature '{}' already exists", feature.name);
            return document.to_string();
        }

        features.push(feature.clone());
        self.update_features_section(document, &features)
    }

    /// Remove every feature matching `name`. Unchanged if none matches.
    pub fn remove_feature(&self, document: &str, name: &str) -> String {
        let features = extract_implemented_features(document);
        let key = feature_key(name);

        let remaining: Vec<ImplementedFeature> = features
            .iter()
            .filter(|f| feature_key(&f.name) != key)
            .cloned()
            .collect();

        if remaining.len() == features.len() {
            tracing::debug!("Feature '{}' not found, nothing to remove", name);
            return document.to_string();
        }

        self.update_features_section(document, &remaining)
    }

    /// Merge `update` onto the feature matching `name`.
    ///
    /// Unchanged if no feature matches, or if the update renames the feature
    /// to a name held by a different feature.
    pub fn update_feature(&self, document: &str, name: &str, update: &FeatureUpdate) -> String {
        let features = extract_implemented_features(document);
        let key = feature_key(name);

        if !features.iter().any(|f| feature_key(&f.name) == key) {
            tracing::debug!("Feature '{}' not found, nothing to update", name);
            return document.to_string();
        }

        if let Some(ref new_name) = update.name {
            let new_key = feature_key(new_name);
            if new_name.trim().is_empty() {
                tracing::warn!("Refusing to rename '{}' to an empty name", name);
                return document.to_string();
            }
            if new_key != key && features.iter().any(|f| feature_key(&f.name) == new_key) {
                tracing::warn!("Cannot rename '{}' to '{}': name already in use", name, new_name);
                return document.to_string();
            }
        }

        let updated: Vec<ImplementedFeature> = features
            .iter()
            .map(|f| {
                if feature_key(&f.name) == key {
                    update.apply_to(f)
                } else {
                    f.clone()
                }
            })
            .collect();

        self.update_features_section(document, &updated)
    }
}
