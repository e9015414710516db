//! Runner configuration.
//!
//! ```yaml
//! instance_policy: shared-across-rows
//! filter: "length"
//! use_colors: false
//! ```

use serde::Deserialize;

use crate::errors::VargaError;

/// How fixture instances are bound to the rows of a parameterized declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstancePolicy {
    /// Every row runs against a newly created fixture.
    #[default]
    FreshPerRow,
    /// Every row runs against the instance that generated the rows, so state
    /// written by one row is visible to the next.
    SharedAcrossRows,
}

/// Configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    pub instance_policy: InstancePolicy,
    /// Case-insensitive substring a test's display name must contain to run.
    pub filter: Option<String>,
    pub use_colors: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            instance_policy: InstancePolicy::default(),
            filter: None,
            use_colors: atty::is(atty::Stream::Stderr),
        }
    }
}

impl RunnerConfig {
    /// Parses a YAML document. Missing keys take their default values.
    pub fn from_yaml_str(source: &str) -> Result<Self, VargaError> {
        serde_yaml::from_str(source).map_err(|e| VargaError::Config {
            message: e.to_string(),
        })
    }

    pub fn with_instance_policy(mut self, policy: InstancePolicy) -> Self {
        self.instance_policy = policy;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Whether a test with this display name passes the filter.
    pub fn selects(&self, display_name: &str) -> bool {
        match &self.filter {
            None => true,
            Some(filter) => display_name.to_lowercase().contains(&filter.to_lowercase()),
        }
    }
}
