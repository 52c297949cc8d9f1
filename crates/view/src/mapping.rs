//! Mapping subject data onto named renderer inputs.
//!
//! A renderer that needs several predicates of its subject declares a
//! [`DataMapping`] instead of nesting one property view per predicate.

use linkview_primitives::{Canonicalize, Term, Triple};
use serde::Deserialize;

use crate::options::{Label, Limit};

/// Shape of each mapped value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
	#[default]
	Term,
	Statement,
	Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
	Term(Term),
	Statement(Triple),
	/// Lexical form of the object.
	Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PropMapping {
	name: String,
	label: Label,
	limit: Limit,
}

/// Named props and the predicates that feed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMapping {
	props: Vec<PropMapping>,
	/// Produce props even when no triple matched.
	pub force_render: bool,
}

impl DataMapping {
	pub fn new() -> Self {
		Self::default()
	}

	/// Maps the first value of `label` to `name`.
	pub fn prop(self, name: impl Into<String>, label: impl Into<Label>) -> Self {
		self.prop_with_limit(name, label, Limit::ONE)
	}

	pub fn prop_with_limit(mut self, name: impl Into<String>, label: impl Into<Label>, limit: Limit) -> Self {
		self.props.push(PropMapping {
			name: name.into(),
			label: label.into(),
			limit,
		});
		self
	}

	pub fn force_render(mut self, force: bool) -> Self {
		self.force_render = force;
		self
	}

	pub fn len(&self) -> usize {
		self.props.len()
	}

	pub fn is_empty(&self) -> bool {
		self.props.is_empty()
	}
}

/// Props produced by [`map_data_to_props`], in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedProps {
	entries: Vec<(String, Vec<PropValue>)>,
}

impl MappedProps {
	/// Values of `name` in source order; empty when nothing matched.
	pub fn get(&self, name: &str) -> &[PropValue] {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map_or(&[], |(_, values)| values.as_slice())
	}

	pub fn first(&self, name: &str) -> Option<&PropValue> {
		self.get(name).first()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[PropValue])> + '_ {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
	}
}

/// Collects the mapped props of a subject out of its `triples`.
///
/// Returns `None` when no triple feeds any prop, unless the mapping forces
/// rendering.
pub fn map_data_to_props<C: Canonicalize + ?Sized>(
	triples: &[Triple],
	mapping: &DataMapping,
	return_type: ReturnType,
	canon: &C,
) -> Option<MappedProps> {
	let mut matched = false;
	let entries = mapping
		.props
		.iter()
		.map(|prop| {
			let labels: Vec<_> = prop.label.iris().iter().map(|i| canon.canonical_iri(i)).collect();
			let hits: Vec<&Triple> = triples
				.iter()
				.filter(|t| labels.contains(&canon.canonical_iri(&t.predicate)))
				.collect();
			matched |= !hits.is_empty();
			let take = prop.limit.take(hits.len());
			let values = hits[..take].iter().map(|t| shape(t, return_type)).collect();
			(prop.name.clone(), values)
		})
		.collect();

	if !matched && !mapping.force_render {
		return None;
	}
	Some(MappedProps { entries })
}

fn shape(triple: &Triple, return_type: ReturnType) -> PropValue {
	match return_type {
		ReturnType::Term => PropValue::Term(triple.object.clone()),
		ReturnType::Statement => PropValue::Statement(triple.clone()),
		ReturnType::Value => PropValue::Value(triple.object.lexical().to_string()),
	}
}
