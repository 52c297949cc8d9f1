//! Matcher vocabulary for registration keys.
//!
//! Types and properties use [`Matcher`]. Topology uses [`TopologyMatcher`],
//! which keeps wildcard, explicit absence, and "some topology" apart; folding
//! them into an `Option` loses the distinction between a renderer written for
//! the default context and one written for every context.

use std::cmp::Reverse;

use linkview_primitives::{Canonicalize, Iri};
use smallvec::SmallVec;

/// Matcher on the type or property axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Matcher {
	Exact(Iri),
	/// Any of the listed identifiers.
	OneOf(SmallVec<[Iri; 2]>),
	Any,
}

impl Matcher {
	pub fn one_of<I>(iris: impl IntoIterator<Item = I>) -> Self
	where
		I: Into<Iri>,
	{
		Self::OneOf(iris.into_iter().map(Into::into).collect())
	}

	/// Concrete identifiers this matcher is keyed by. Empty for [`Matcher::Any`].
	pub fn keys(&self) -> &[Iri] {
		match self {
			Self::Exact(iri) => std::slice::from_ref(iri),
			Self::OneOf(iris) => iris,
			Self::Any => &[],
		}
	}

	#[inline]
	pub fn is_wildcard(&self) -> bool {
		matches!(self, Self::Any)
	}

	pub fn accepts(&self, iri: &Iri) -> bool {
		match self {
			Self::Any => true,
			_ => self.keys().contains(iri),
		}
	}

	pub(crate) fn canonicalized(self, canon: &dyn Canonicalize) -> Self {
		match self {
			Self::Exact(iri) => Self::Exact(canon.canonical_iri(&iri)),
			Self::OneOf(iris) => Self::OneOf(iris.iter().map(|i| canon.canonical_iri(i)).collect()),
			Self::Any => Self::Any,
		}
	}
}

impl From<Iri> for Matcher {
	fn from(value: Iri) -> Self {
		Self::Exact(value)
	}
}

impl From<&str> for Matcher {
	fn from(value: &str) -> Self {
		Self::Exact(Iri::from(value))
	}
}

/// Matcher on the topology axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TopologyMatcher {
	/// Matches with or without a topology.
	Any,
	/// Matches any topology, but not its absence.
	AnyPresent,
	/// Matches only when no topology is set.
	#[default]
	Absent,
	Exact(Iri),
	/// Any of the alternatives; a `None` alternative matches absence.
	OneOf(SmallVec<[Option<Iri>; 2]>),
}

impl TopologyMatcher {
	pub fn one_of(alternatives: impl IntoIterator<Item = Option<Iri>>) -> Self {
		Self::OneOf(alternatives.into_iter().collect())
	}

	/// Ranks how this matcher accepts `topology`, or `None` if it rejects it.
	pub fn rank(&self, topology: Option<&Iri>) -> Option<TopologyRank> {
		match (self, topology) {
			(Self::Any, _) => Some(TopologyRank::Wildcard),
			(Self::AnyPresent, Some(_)) => Some(TopologyRank::Wildcard),
			(Self::AnyPresent, None) => None,
			(Self::Absent, None) => Some(TopologyRank::Absent),
			(Self::Absent, Some(_)) => None,
			(Self::Exact(expected), Some(actual)) if expected == actual => Some(TopologyRank::Exact),
			(Self::Exact(_), _) => None,
			(Self::OneOf(alternatives), topology) => {
				let hit = alternatives.iter().any(|alt| alt.as_ref() == topology);
				match (hit, topology) {
					(false, _) => None,
					(true, Some(_)) => Some(TopologyRank::Exact),
					(true, None) => Some(TopologyRank::Absent),
				}
			}
		}
	}

	pub(crate) fn canonicalized(self, canon: &dyn Canonicalize) -> Self {
		match self {
			Self::Exact(iri) => Self::Exact(canon.canonical_iri(&iri)),
			Self::OneOf(alternatives) => Self::OneOf(
				alternatives
					.iter()
					.map(|alt| alt.as_ref().map(|iri| canon.canonical_iri(iri)))
					.collect(),
			),
			other => other,
		}
	}
}

impl From<Iri> for TopologyMatcher {
	fn from(value: Iri) -> Self {
		Self::Exact(value)
	}
}

/// How a registration's topology matcher accepted the ambient topology.
///
/// Ordered from least to most specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TopologyRank {
	Absent,
	Wildcard,
	Exact,
}

/// How a registration's type matcher accepted the subject's types.
///
/// Ordered from least to most specific; among inherited matches, the nearer
/// ancestor is more specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeRank {
	Wildcard,
	Inherited(Reverse<u32>),
	Exact,
}

impl TypeRank {
	pub(crate) fn from_depth(depth: u32) -> Self {
		if depth == 0 {
			Self::Exact
		} else {
			Self::Inherited(Reverse(depth))
		}
	}
}

/// How a registration's property matcher accepted the requested property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PropertyRank {
	/// Whole-entity registration queried for an entity renderer.
	Entity,
	Wildcard,
	Exact,
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	fn iri(s: &str) -> Iri {
		Iri::from(s)
	}

	#[rstest]
	#[case::any_without(TopologyMatcher::Any, None, Some(TopologyRank::Wildcard))]
	#[case::any_with(TopologyMatcher::Any, Some("t:c"), Some(TopologyRank::Wildcard))]
	#[case::present_without(TopologyMatcher::AnyPresent, None, None)]
	#[case::present_with(TopologyMatcher::AnyPresent, Some("t:c"), Some(TopologyRank::Wildcard))]
	#[case::absent_without(TopologyMatcher::Absent, None, Some(TopologyRank::Absent))]
	#[case::absent_with(TopologyMatcher::Absent, Some("t:c"), None)]
	#[case::exact_hit(TopologyMatcher::Exact(iri("t:c")), Some("t:c"), Some(TopologyRank::Exact))]
	#[case::exact_miss(TopologyMatcher::Exact(iri("t:c")), Some("t:d"), None)]
	#[case::exact_without(TopologyMatcher::Exact(iri("t:c")), None, None)]
	fn topology_rank(
		#[case] matcher: TopologyMatcher,
		#[case] topology: Option<&str>,
		#[case] expected: Option<TopologyRank>,
	) {
		let topology = topology.map(iri);
		assert_eq!(matcher.rank(topology.as_ref()), expected);
	}

	#[test]
	fn topology_alternatives_keep_absence_distinct() {
		let matcher = TopologyMatcher::one_of([None, Some(iri("t:c"))]);
		assert_eq!(matcher.rank(None), Some(TopologyRank::Absent));
		assert_eq!(matcher.rank(Some(&iri("t:c"))), Some(TopologyRank::Exact));
		assert_eq!(matcher.rank(Some(&iri("t:d"))), None);

		let present_only = TopologyMatcher::one_of([Some(iri("t:c"))]);
		assert_eq!(present_only.rank(None), None);
	}

	#[test]
	fn rank_orders() {
		assert!(TopologyRank::Exact > TopologyRank::Wildcard);
		assert!(TopologyRank::Wildcard > TopologyRank::Absent);
		assert!(TypeRank::Exact > TypeRank::from_depth(1));
		assert!(TypeRank::from_depth(1) > TypeRank::from_depth(2));
		assert!(TypeRank::from_depth(7) > TypeRank::Wildcard);
		assert!(PropertyRank::Exact > PropertyRank::Wildcard);
	}

	#[test]
	fn matcher_accepts() {
		let exact = Matcher::from("t:Thing");
		assert!(exact.accepts(&iri("t:Thing")));
		assert!(!exact.accepts(&iri("t:Other")));

		let alts = Matcher::one_of(["t:A", "t:B"]);
		assert!(alts.accepts(&iri("t:B")));
		assert!(!alts.accepts(&iri("t:C")));

		assert!(Matcher::Any.accepts(&iri("t:C")));
		assert!(Matcher::Any.keys().is_empty());
	}
}
