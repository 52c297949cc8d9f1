//! Immutable registry state.
//!
//! # Role
//!
//! A [`Snapshot`] is the pure view readers resolve against. It contains no
//! mutation logic; [`crate::Registry`] builds extended copies and publishes
//! them atomically.

use std::sync::Arc;

use linkview_primitives::Iri;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::registration::Registration;

pub(crate) type Slots = SmallVec<[u32; 4]>;

/// Registrations in ordinal order plus lookup indices.
pub struct Snapshot<R> {
	/// Index in this table is the registration's ordinal.
	pub(crate) table: Arc<[Arc<Registration<R>>]>,
	/// Ordinals keyed by every concrete type key of their registration.
	pub(crate) by_type: Arc<FxHashMap<Iri, Slots>>,
	/// Ordinals of registrations with a wildcard type matcher.
	pub(crate) wildcard: Arc<[u32]>,
}

impl<R> Clone for Snapshot<R> {
	fn clone(&self) -> Self {
		Self {
			table: self.table.clone(),
			by_type: self.by_type.clone(),
			wildcard: self.wildcard.clone(),
		}
	}
}

impl<R> Default for Snapshot<R> {
	fn default() -> Self {
		Self {
			table: Arc::from(Vec::new()),
			by_type: Arc::new(FxHashMap::default()),
			wildcard: Arc::from(Vec::new()),
		}
	}
}

impl<R> Snapshot<R> {
	/// Copy of this snapshot with `incoming` appended after existing ordinals.
	pub(crate) fn extended(&self, incoming: &[Arc<Registration<R>>]) -> Self {
		let mut table: Vec<Arc<Registration<R>>> = Vec::with_capacity(self.table.len() + incoming.len());
		table.extend(self.table.iter().cloned());
		let mut by_type = (*self.by_type).clone();
		let mut wildcard = self.wildcard.to_vec();

		for registration in incoming {
			let ordinal = table.len() as u32;
			if registration.types.is_wildcard() {
				wildcard.push(ordinal);
			} else {
				for key in registration.types.keys() {
					let slots = by_type.entry(key.clone()).or_default();
					if slots.last() != Some(&ordinal) {
						slots.push(ordinal);
					}
				}
			}
			table.push(registration.clone());
		}

		Self {
			table: Arc::from(table),
			by_type: Arc::new(by_type),
			wildcard: Arc::from(wildcard),
		}
	}

	pub fn len(&self) -> usize {
		self.table.len()
	}

	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	pub fn get(&self, ordinal: u32) -> Option<&Registration<R>> {
		self.table.get(ordinal as usize).map(AsRef::as_ref)
	}

	/// Registrations in ordinal order.
	pub fn iter(&self) -> impl Iterator<Item = &Registration<R>> + '_ {
		self.table.iter().map(AsRef::as_ref)
	}

	/// Ordinals of registrations that may match the given type key.
	pub(crate) fn slots_for(&self, iri: &Iri) -> &[u32] {
		self.by_type.get(iri).map_or(&[], SmallVec::as_slice)
	}

	/// Registrations fully shadowed by a later one with the same key tuple.
	///
	/// Shadowed registrations stay in the table; they can never win a
	/// resolution because the later ordinal wins every tie.
	pub fn shadowed(&self) -> Vec<Shadowed> {
		let mut pairs = FxHashSet::default();
		let groups = self
			.by_type
			.values()
			.map(SmallVec::as_slice)
			.chain(std::iter::once(&*self.wildcard));

		for group in groups {
			for (pos, &earlier) in group.iter().enumerate() {
				let shadowing = group[pos + 1..]
					.iter()
					.rev()
					.find(|&&later| self.table[later as usize].same_keys(&self.table[earlier as usize]));
				if let Some(&by) = shadowing {
					pairs.insert(Shadowed { ordinal: earlier, by });
				}
			}
		}

		let mut out: Vec<_> = pairs.into_iter().collect();
		out.sort_unstable_by_key(|s| s.ordinal);
		out
	}
}

/// A registration hidden behind a later registration with identical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shadowed {
	pub ordinal: u32,
	/// Latest registration with the same keys.
	pub by: u32,
}
