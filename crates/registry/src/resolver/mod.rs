//! Renderer resolution against a pinned registry snapshot.
//!
//! A [`Resolver`] holds one [`Snapshot`] for its whole lifetime, so every
//! lookup made through it sees the same registration set even while other
//! threads keep registering.

use std::sync::Arc;

use linkview_primitives::{Canonicalize, Iri, vocab};
use smallvec::SmallVec;

use crate::ancestry::TypeAncestry;
use crate::matcher::{Matcher, PropertyRank, TopologyRank, TypeRank};
use crate::registration::Registration;
use crate::snapshot::Snapshot;


/// How well a registration matched one query.
///
/// Fields compare lexicographically in declaration order; the greatest value
/// wins. The ordinal makes the order total, so the most recent registration
/// wins otherwise equal matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
	pub property: PropertyRank,
	pub topology: TopologyRank,
	pub types: TypeRank,
	pub ordinal: u32,
}

/// Guard that keeps the winning registration's snapshot alive.
pub struct Resolved<R> {
	snap: Arc<Snapshot<R>>,
	specificity: Specificity,
}

impl<R> Clone for Resolved<R> {
	fn clone(&self) -> Self {
		Self {
			snap: self.snap.clone(),
			specificity: self.specificity,
		}
	}
}

impl<R> Resolved<R> {
	pub fn registration(&self) -> &Registration<R> {
		&self.snap.table[self.specificity.ordinal as usize]
	}

	pub fn ordinal(&self) -> u32 {
		self.specificity.ordinal
	}

	pub fn specificity(&self) -> Specificity {
		self.specificity
	}
}

impl<R> std::ops::Deref for Resolved<R> {
	type Target = R;

	fn deref(&self) -> &R {
		&self.registration().renderer
	}
}

impl<R: std::fmt::Debug> std::fmt::Debug for Resolved<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Resolved")
			.field("renderer", &**self)
			.field("specificity", &self.specificity)
			.finish()
	}
}

pub struct Resolver<R> {
	snap: Arc<Snapshot<R>>,
	canon: Arc<dyn Canonicalize + Send + Sync>,
}

impl<R> Clone for Resolver<R> {
	fn clone(&self) -> Self {
		Self {
			snap: self.snap.clone(),
			canon: self.canon.clone(),
		}
	}
}

impl<R> Resolver<R> {
	pub fn new(snap: Arc<Snapshot<R>>, canon: Arc<dyn Canonicalize + Send + Sync>) -> Self {
		Self { snap, canon }
	}

	pub fn snapshot(&self) -> &Arc<Snapshot<R>> {
		&self.snap
	}

	/// Renderer presenting a whole subject of `types`.
	pub fn resolve_entity_renderer(
		&self,
		types: &TypeAncestry,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		self.best(types, None, topology)
	}

	/// Renderer presenting `property` of a subject of `types`.
	pub fn resolve_property_renderer(
		&self,
		types: &TypeAncestry,
		property: &Iri,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		let property = self.canon.canonical_iri(property);
		self.best(types, Some(&property), topology)
	}

	/// Renderer for literal values of `datatype`.
	///
	/// Literal renderers are property renderers of `rdfs:Literal` keyed by
	/// datatype.
	pub fn resolve_literal_renderer(
		&self,
		datatype: &Iri,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		let types = TypeAncestry::direct([vocab::rdfs_literal()]);
		self.resolve_property_renderer(&types, datatype, topology)
	}

	fn best(
		&self,
		types: &TypeAncestry,
		property: Option<&Iri>,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		let topology = topology.map(|t| self.canon.canonical_iri(t));
		let types: SmallVec<[(Iri, u32); 8]> = types
			.iter()
			.map(|(iri, depth)| (self.canon.canonical_iri(iri), depth))
			.collect();

		let mut candidates: SmallVec<[u32; 16]> = SmallVec::new();
		for (iri, _) in &types {
			candidates.extend_from_slice(self.snap.slots_for(iri));
		}
		candidates.extend_from_slice(&self.snap.wildcard);
		candidates.sort_unstable();
		candidates.dedup();

		let winner = candidates
			.into_iter()
			.filter_map(|ordinal| {
				let registration = &self.snap.table[ordinal as usize];
				Some(Specificity {
					property: property_rank(registration.property.as_ref(), property)?,
					topology: registration.topology.rank(topology.as_ref())?,
					types: type_rank(&registration.types, &types)?,
					ordinal,
				})
			})
			.max();

		match winner {
			Some(specificity) => {
				tracing::trace!(
					?property,
					?topology,
					ordinal = specificity.ordinal,
					"renderer resolved"
				);
				Some(Resolved {
					snap: self.snap.clone(),
					specificity,
				})
			}
			None => {
				tracing::trace!(?property, ?topology, types = types.len(), "no renderer");
				None
			}
		}
	}
}

fn property_rank(matcher: Option<&Matcher>, property: Option<&Iri>) -> Option<PropertyRank> {
	match (matcher, property) {
		(None, None) => Some(PropertyRank::Entity),
		(Some(Matcher::Any), Some(_)) => Some(PropertyRank::Wildcard),
		(Some(matcher), Some(property)) if matcher.accepts(property) => Some(PropertyRank::Exact),
		_ => None,
	}
}

fn type_rank(matcher: &Matcher, types: &[(Iri, u32)]) -> Option<TypeRank> {
	if matcher.is_wildcard() {
		return Some(TypeRank::Wildcard);
	}
	types
		.iter()
		.filter(|(iri, _)| matcher.accepts(iri))
		.map(|(_, depth)| *depth)
		.min()
		.map(TypeRank::from_depth)
}
