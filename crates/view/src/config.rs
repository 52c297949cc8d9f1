use std::path::Path;

use linkview_primitives::Iri;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::options::Limit;

/// Settings shared by every view rendered against one registry.
///
/// ```toml
/// language_preferences = ["nl", "en"]
/// loading_type = "https://ns.example/Loading"
/// error_type = "https://ns.example/Error"
/// default_limit = 1
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
	/// Language tags tried in order when a single value must be picked.
	pub language_preferences: Vec<String>,
	/// Type whose entity renderer is shown while a subject loads.
	pub loading_type: Option<Iri>,
	/// Type whose entity renderer is shown for unresolvable subjects.
	pub error_type: Option<Iri>,
	/// Limit of property views that do not set one.
	pub default_limit: Limit,
}

impl Default for ViewConfig {
	fn default() -> Self {
		Self {
			language_preferences: vec!["en".to_string()],
			loading_type: None,
			error_type: None,
			default_limit: Limit::ONE,
		}
	}
}

impl ViewConfig {
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(src)?;
		config.validate()?;
		Ok(config)
	}

	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&src)?;
		tracing::debug!(path = %path.display(), "loaded view configuration");
		Ok(config)
	}

	fn validate(&self) -> Result<(), ConfigError> {
		if let Some(tag) = self
			.language_preferences
			.iter()
			.find(|tag| tag.trim().is_empty())
		{
			return Err(ConfigError::Invalid(format!("empty language tag {tag:?}")));
		}
		Ok(())
	}
}
