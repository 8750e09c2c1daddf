//! Feature records and their mapping to the spec output contract.

use serde::{Deserialize, Serialize};

/// One `<feature>` entry of the `<implemented_features>` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementedFeature {
    /// Identifier, compared case-insensitively.
    pub name: String,
    pub description: String,
    /// Source locations; `None` when there are none.
    ///
    /// Each entry must fit on one line. `<location>` elements are read back
    /// line by line, so an entry containing a line break is lost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_locations: Option<Vec<String>>,
}

impl ImplementedFeature {
    /// Create a feature without file locations.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            file_locations: None,
        }
    }

    /// Attach file locations. An empty list clears them.
    pub fn with_file_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locations: Vec<String> = locations.into_iter().map(Into::into).collect();
        self.file_locations = (!locations.is_empty()).then_some(locations);
        self
    }

    /// Whether this feature's name matches `name` case-insensitively.
    pub fn matches_name(&self, name: &str) -> bool {
        feature_key(&self.name) == feature_key(name)
    }

    /// Non-empty file locations, if any.
    pub fn locations(&self) -> &[String] {
        self.file_locations.as_deref().unwrap_or(&[])
    }
}

/// Partial update applied by `update_implemented_feature`.
/// Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_locations: Option<Vec<String>>,
}

impl FeatureUpdate {
    /// Merge the supplied fields onto `feature`.
    pub fn apply_to(&self, feature: &ImplementedFeature) -> ImplementedFeature {
        let file_locations = match self.file_locations {
            Some(ref locations) if locations.is_empty() => None,
            Some(ref locations) => Some(locations.clone()),
            None => feature.file_locations.clone(),
        };

        ImplementedFeature {
            name: self.name.clone().unwrap_or_else(|| feature.name.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| feature.description.clone()),
            file_locations,
        }
    }

    /// True when the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.file_locations.is_none()
    }
}

/// Feature shape used by the structured spec generation output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecOutputFeature {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_locations: Option<Vec<String>>,
}

/// Normalized identity key for feature names.
///
/// Uses Unicode lowercasing, which does not depend on the process locale.
pub fn feature_key(name: &str) -> String {
    name.to_lowercase()
}

fn non_empty(locations: &Option<Vec<String>>) -> Option<Vec<String>> {
    locations.as_ref().filter(|l| !l.is_empty()).cloned()
}

/// Convert parsed features into the spec output representation.
pub fn to_spec_output_features(features: &[ImplementedFeature]) -> Vec<SpecOutputFeature> {
    features
        .iter()
        .map(|f| SpecOutputFeature {
            name: f.name.clone(),
            description: f.description.clone(),
            file_locations: non_empty(&f.file_locations),
        })
        .collect()
}

/// Convert spec output features into feature records.
pub fn from_spec_output_features(features: &[SpecOutputFeature]) -> Vec<ImplementedFeature> {
    features
        .iter()
        .map(|f| ImplementedFeature {
            name: f.name.clone(),
            description: f.description.clone(),
            file_locations: non_empty(&f.file_locations),
        })
        .collect()
}
