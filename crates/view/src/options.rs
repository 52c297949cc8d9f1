//! Options of a property view.
//!
//! All option types deserialize from the shapes a host configuration would
//! use: a label is one IRI or a list of them, a limit is a positive integer
//! or `"infinity"`, and a topology is an IRI or `"none"`.

use std::num::NonZeroUsize;

use linkview_primitives::{Iri, TopologyArg};
use serde::{Deserialize, Deserializer};

use crate::error::ViewError;

/// Maximum number of values a property view renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawLimit")]
pub enum Limit {
	Count(NonZeroUsize),
	Unbounded,
}

impl Limit {
	pub const ONE: Self = Self::Count(NonZeroUsize::MIN);

	/// Rejects zero and negative counts.
	pub fn new(count: i64) -> Result<Self, ViewError> {
		usize::try_from(count)
			.ok()
			.and_then(NonZeroUsize::new)
			.map(Self::Count)
			.ok_or(ViewError::InvalidLimit(count))
	}

	/// Number of values to take out of `available`.
	pub fn take(self, available: usize) -> usize {
		match self {
			Self::Count(n) => n.get().min(available),
			Self::Unbounded => available,
		}
	}

	pub fn is_one(self) -> bool {
		self == Self::ONE
	}
}

impl Default for Limit {
	fn default() -> Self {
		Self::ONE
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
	Count(i64),
	Word(String),
}

impl TryFrom<RawLimit> for Limit {
	type Error = ViewError;

	fn try_from(value: RawLimit) -> Result<Self, Self::Error> {
		match value {
			RawLimit::Count(n) => Self::new(n),
			RawLimit::Word(word) if word.eq_ignore_ascii_case("infinity") || word.eq_ignore_ascii_case("inf") => {
				Ok(Self::Unbounded)
			}
			RawLimit::Word(word) => Err(ViewError::InvalidLimitValue(word)),
		}
	}
}

/// One or more predicates a property view selects.
///
/// Order matters: it decides which label's renderer is tried first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct Label(Vec<Iri>);

impl Label {
	pub fn new(iris: impl IntoIterator<Item = Iri>) -> Self {
		Self(iris.into_iter().collect())
	}

	pub fn iris(&self) -> &[Iri] {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Iri> for Label {
	fn from(value: Iri) -> Self {
		Self(vec![value])
	}
}

impl From<&str> for Label {
	fn from(value: &str) -> Self {
		Self(vec![Iri::from(value)])
	}
}

impl<const N: usize> From<[&str; N]> for Label {
	fn from(value: [&str; N]) -> Self {
		Self(value.into_iter().map(Iri::from).collect())
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
	One(Iri),
	Many(Vec<Iri>),
}

impl From<OneOrMany> for Label {
	fn from(value: OneOrMany) -> Self {
		match value {
			OneOrMany::One(iri) => Self(vec![iri]),
			OneOrMany::Many(iris) => Self(iris),
		}
	}
}

/// Options of a single property view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionOptions {
	pub label: Label,
	/// `None` falls back to the configured default limit.
	pub limit: Option<Limit>,
	/// Render even when the subject has no value for the label.
	pub force_render: bool,
	#[serde(deserialize_with = "topology_arg")]
	pub topology: TopologyArg,
}

impl ProjectionOptions {
	pub fn new(label: impl Into<Label>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}

	pub fn limit(mut self, limit: Limit) -> Self {
		self.limit = Some(limit);
		self
	}

	pub fn force_render(mut self, force: bool) -> Self {
		self.force_render = force;
		self
	}

	pub fn topology(mut self, topology: impl Into<TopologyArg>) -> Self {
		self.topology = topology.into();
		self
	}
}

/// `"none"` clears the topology; any other string sets it. A missing field
/// inherits through `#[serde(default)]`.
fn topology_arg<'de, D>(deserializer: D) -> Result<TopologyArg, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	Ok(if raw == "none" {
		TopologyArg::Clear
	} else {
		TopologyArg::Set(Iri::from(raw))
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case::one(1, true)]
	#[case::many(5, true)]
	#[case::zero(0, false)]
	#[case::negative(-3, false)]
	fn limit_must_be_positive(#[case] count: i64, #[case] ok: bool) {
		assert_eq!(Limit::new(count).is_ok(), ok);
	}

	#[test]
	fn limit_take() {
		let two = Limit::new(2).expect("positive");
		assert_eq!(two.take(4), 2);
		assert_eq!(two.take(1), 1);
		assert_eq!(Limit::Unbounded.take(4), 4);
	}

	#[test]
	fn options_from_toml() {
		let options: ProjectionOptions = toml::from_str(
			r#"
			label = ["p:title", "p:name"]
			limit = "infinity"
			force_render = true
			topology = "t:card"
			"#,
		)
		.expect("valid options");

		assert_eq!(options.label, Label::from(["p:title", "p:name"]));
		assert_eq!(options.limit, Some(Limit::Unbounded));
		assert!(options.force_render);
		assert_eq!(options.topology, TopologyArg::Set(Iri::from("t:card")));
	}

	#[test]
	fn options_defaults_inherit_topology() {
		let options: ProjectionOptions = toml::from_str(r#"label = "p:title""#).expect("valid options");
		assert_eq!(options.label, Label::from("p:title"));
		assert_eq!(options.limit, None);
		assert_eq!(options.topology, TopologyArg::Inherit);

		let cleared: ProjectionOptions =
			toml::from_str("label = \"p:title\"\ntopology = \"none\"").expect("valid options");
		assert_eq!(cleared.topology, TopologyArg::Clear);
	}

	#[rstest]
	#[case::zero("limit = 0")]
	#[case::negative("limit = -1")]
	#[case::word("limit = \"lots\"")]
	fn invalid_limits_are_rejected(#[case] src: &str) {
		assert!(toml::from_str::<ProjectionOptions>(src).is_err());
	}
}
