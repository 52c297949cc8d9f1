//! Subjects a view instance depends on.

use indexmap::IndexMap;
use linkview_primitives::{Canonicalize, EntityStore, Subject};
use rustc_hash::FxBuildHasher;

/// Ordered, de-duplicated set of canonical subjects.
///
/// Each member carries the change timestamp observed for it when the set was
/// built. A subscription only reacts to a member changing past its own stamp;
/// stamps of different members are never compared.
#[derive(Debug, Clone, Default)]
pub struct DependencySet {
	subjects: IndexMap<Subject, u64, FxBuildHasher>,
}

impl DependencySet {
	/// Dependencies of a view rendering `subject`.
	///
	/// Contains the canonical subject, the canonical `extra` data subjects, and
	/// for named subjects the enclosing document when it differs.
	pub fn for_subject<S: EntityStore + ?Sized>(
		store: &S,
		subject: &Subject,
		extra: impl IntoIterator<Item = Subject>,
	) -> Self {
		let canonical = store.canonicalize(subject);
		let document = store
			.enclosing_document(&canonical)
			.map(|doc| store.canonicalize(&doc));

		let mut set = Self::default();
		set.subjects.insert(canonical, 0);
		for subject in extra {
			set.subjects.entry(store.canonicalize(&subject)).or_insert(0);
		}
		if let Some(document) = document {
			set.subjects.entry(document).or_insert(0);
		}
		set.observe(store)
	}

	/// Set of explicitly listed subjects with no observed changes.
	pub fn from_subjects<C: Canonicalize + ?Sized>(
		canon: &C,
		subjects: impl IntoIterator<Item = Subject>,
	) -> Self {
		let mut set = Self::default();
		for subject in subjects {
			set.subjects.entry(canon.canonicalize(&subject)).or_insert(0);
		}
		set
	}

	/// Records the current change timestamp of every member.
	pub fn observe<S: EntityStore + ?Sized>(mut self, store: &S) -> Self {
		for (subject, stamp) in &mut self.subjects {
			*stamp = store.change_timestamp(subject);
		}
		self
	}

	/// Highest change timestamp of any member, as reported by `store` now.
	pub fn current_timestamp<S: EntityStore + ?Sized>(&self, store: &S) -> u64 {
		self.subjects
			.keys()
			.map(|s| store.change_timestamp(s))
			.max()
			.unwrap_or(0)
	}

	/// Timestamp observed for `subject`; 0 for non-members.
	pub fn observed(&self, subject: &Subject) -> u64 {
		self.subjects.get(subject).copied().unwrap_or(0)
	}

	/// Members with their observed timestamps, in order.
	pub fn observations(&self) -> impl Iterator<Item = (&Subject, u64)> + '_ {
		self.subjects.iter().map(|(s, stamp)| (s, *stamp))
	}

	pub fn contains(&self, subject: &Subject) -> bool {
		self.subjects.contains_key(subject)
	}

	pub fn is_subset(&self, other: &Self) -> bool {
		self.subjects.keys().all(|s| other.subjects.contains_key(s))
	}

	pub fn iter(&self) -> impl Iterator<Item = &Subject> + '_ {
		self.subjects.keys()
	}

	pub fn to_vec(&self) -> Vec<Subject> {
		self.subjects.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.subjects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.subjects.is_empty()
	}
}

/// Same members in the same order; observed timestamps are ignored.
impl PartialEq for DependencySet {
	fn eq(&self, other: &Self) -> bool {
		self.subjects.keys().eq(other.subjects.keys())
	}
}

impl Eq for DependencySet {}
