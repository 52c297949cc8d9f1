use linkview_primitives::{Canonicalize, vocab};

use crate::matcher::{Matcher, TopologyMatcher};

/// A renderer together with the keys it is registered under.
///
/// `property == None` makes an entity renderer, which presents the whole
/// subject. Registrations are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration<R> {
	pub types: Matcher,
	pub property: Option<Matcher>,
	pub topology: TopologyMatcher,
	pub renderer: R,
}

impl<R> Registration<R> {
	/// Entity renderer for `types` in the default (absent) topology.
	pub fn entity(types: impl Into<Matcher>, renderer: R) -> Self {
		Self {
			types: types.into(),
			property: None,
			topology: TopologyMatcher::Absent,
			renderer,
		}
	}

	/// Property renderer for `property` of subjects of `types`.
	pub fn property(types: impl Into<Matcher>, property: impl Into<Matcher>, renderer: R) -> Self {
		Self {
			types: types.into(),
			property: Some(property.into()),
			topology: TopologyMatcher::Absent,
			renderer,
		}
	}

	/// Literal renderer for values of `datatype`.
	pub fn literal(datatype: impl Into<Matcher>, renderer: R) -> Self {
		Self::property(vocab::rdfs_literal(), datatype, renderer)
	}

	/// Association renderer, which wraps every rendered property of `types`.
	pub fn association(types: impl Into<Matcher>, renderer: R) -> Self {
		Self::property(types, vocab::rdf_predicate(), renderer)
	}

	pub fn with_topology(mut self, topology: impl Into<TopologyMatcher>) -> Self {
		self.topology = topology.into();
		self
	}

	/// Same key tuple as `other`; the later of the two shadows the earlier.
	pub fn same_keys(&self, other: &Self) -> bool {
		self.types == other.types && self.property == other.property && self.topology == other.topology
	}

	pub(crate) fn canonicalized(self, canon: &dyn Canonicalize) -> Self {
		Self {
			types: self.types.canonicalized(canon),
			property: self.property.map(|p| p.canonicalized(canon)),
			topology: self.topology.canonicalized(canon),
			renderer: self.renderer,
		}
	}
}
