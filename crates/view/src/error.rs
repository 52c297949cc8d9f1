use std::path::PathBuf;

use linkview_primitives::Subject;
use thiserror::Error;

/// Errors raised while building or evaluating a view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
	#[error("limit must be a positive integer or infinity, got {0}")]
	InvalidLimit(i64),
	#[error("unrecognized limit {0:?}")]
	InvalidLimitValue(String),
	#[error("property view needs at least one label unless force_render is set")]
	MissingLabel,
	/// Blank subjects have no defined way to be fetched.
	#[error("cannot load {0}: blank nodes have no defined way to be resolved")]
	UnresolvableSubject(Subject),
}

/// Errors raised while loading a [`crate::ViewConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {path}: {source}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse view configuration: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("invalid view configuration: {0}")]
	Invalid(String),
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
