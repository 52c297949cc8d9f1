//! Precomputed type ancestry of a subject.
//!
//! Resolution never walks a class hierarchy itself. Callers compute the
//! ancestry once per render pass, either from a plain type list or from the
//! store's `rdf:type` and `rdfs:subClassOf` statements.

use std::collections::VecDeque;

use linkview_primitives::{EntityStore, Iri, Subject, Term, vocab};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Ordered list of a subject's types with their distance from the subject.
///
/// Direct types have depth 0. Every type appears once, at its smallest depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeAncestry {
	entries: SmallVec<[(Iri, u32); 8]>,
}

impl TypeAncestry {
	/// Ancestry made only of direct types.
	pub fn direct(types: impl IntoIterator<Item = Iri>) -> Self {
		let mut ancestry = Self::default();
		for iri in types {
			ancestry.push(iri, 0);
		}
		ancestry
	}

	/// Collects the `rdf:type` values of `subject` and their superclasses.
	///
	/// Superclasses are discovered breadth-first through `rdfs:subClassOf`
	/// statements about each type. Cycles in the class graph are tolerated.
	pub fn of_subject<S: EntityStore + ?Sized>(store: &S, subject: &Subject) -> Self {
		let rdf_type = store.canonical_iri(&vocab::rdf_type());
		let direct = store
			.entity_triples(subject)
			.into_iter()
			.filter(|t| store.canonical_iri(&t.predicate) == rdf_type)
			.filter_map(|t| match t.object {
				Term::Subject(Subject::Named(iri)) => Some(iri),
				_ => None,
			});
		Self::expand(store, direct)
	}

	/// Expands `direct` types with their superclasses from `store`.
	pub fn expand<S: EntityStore + ?Sized>(store: &S, direct: impl IntoIterator<Item = Iri>) -> Self {
		let sub_class_of = store.canonical_iri(&vocab::rdfs_sub_class_of());
		let mut ancestry = Self::default();
		let mut seen = FxHashSet::default();
		let mut queue = VecDeque::new();

		for iri in direct {
			let iri = store.canonical_iri(&iri);
			if seen.insert(iri.clone()) {
				queue.push_back((iri, 0u32));
			}
		}

		while let Some((iri, depth)) = queue.pop_front() {
			for triple in store.entity_triples(&Subject::Named(iri.clone())) {
				if store.canonical_iri(&triple.predicate) != sub_class_of {
					continue;
				}
				if let Term::Subject(Subject::Named(parent)) = triple.object {
					let parent = store.canonical_iri(&parent);
					if seen.insert(parent.clone()) {
						queue.push_back((parent, depth + 1));
					}
				}
			}
			ancestry.push(iri, depth);
		}
		ancestry
	}

	fn push(&mut self, iri: Iri, depth: u32) {
		if !self.entries.iter().any(|(known, _)| *known == iri) {
			self.entries.push((iri, depth));
		}
	}

	/// Distance of `iri` from the subject, if it is one of its types.
	pub fn depth_of(&self, iri: &Iri) -> Option<u32> {
		self.entries
			.iter()
			.find(|(known, _)| known == iri)
			.map(|(_, depth)| *depth)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Iri, u32)> + '_ {
		self.entries.iter().map(|(iri, depth)| (iri, *depth))
	}

	/// Direct types only.
	pub fn direct_types(&self) -> impl Iterator<Item = &Iri> + '_ {
		self.iter().filter(|(_, d)| *d == 0).map(|(iri, _)| iri)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl From<&[Iri]> for TypeAncestry {
	fn from(value: &[Iri]) -> Self {
		Self::direct(value.iter().cloned())
	}
}

impl<const N: usize> From<[Iri; N]> for TypeAncestry {
	fn from(value: [Iri; N]) -> Self {
		Self::direct(value)
	}
}
