use std::ops::Range;
use std::sync::Arc;

use arc_swap::ArcSwap;
use linkview_primitives::{Canonicalize, Identity, Iri};

use crate::ancestry::TypeAncestry;
use crate::registration::Registration;
use crate::resolver::{Resolved, Resolver};
use crate::snapshot::{Shadowed, Snapshot};

/// Shared, append-only set of renderer registrations.
///
/// Readers pin an immutable [`Snapshot`]; writers build an extended copy and
/// publish it with a compare-and-swap. A batch registered through
/// [`Registry::register_all`] becomes visible atomically.
pub struct Registry<R> {
	snap: ArcSwap<Snapshot<R>>,
	canon: Arc<dyn Canonicalize + Send + Sync>,
}

impl<R> Default for Registry<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Registry<R> {
	/// Registry comparing identifiers verbatim.
	pub fn new() -> Self {
		Self::with_canonicalizer(Arc::new(Identity))
	}

	/// Registry that canonicalizes registration keys and queries through `canon`.
	pub fn with_canonicalizer(canon: Arc<dyn Canonicalize + Send + Sync>) -> Self {
		Self {
			snap: ArcSwap::from_pointee(Snapshot::default()),
			canon,
		}
	}

	pub fn canonicalizer(&self) -> &Arc<dyn Canonicalize + Send + Sync> {
		&self.canon
	}

	/// Registers one renderer and returns its ordinal.
	pub fn register(&self, registration: Registration<R>) -> u32 {
		self.register_all(std::iter::once(registration)).start
	}

	/// Registers a batch and returns the ordinals assigned to it, in input order.
	///
	/// Concurrent resolvers see either none or all of the batch.
	pub fn register_all<I>(&self, registrations: I) -> Range<u32>
	where
		I: IntoIterator<Item = Registration<R>>,
	{
		let incoming: Vec<Arc<Registration<R>>> = registrations
			.into_iter()
			.map(|r| Arc::new(r.canonicalized(&*self.canon)))
			.collect();

		loop {
			let cur = self.snap.load_full();
			let start = cur.len() as u32;
			if incoming.is_empty() {
				return start..start;
			}

			let next_arc = Arc::new(cur.extended(&incoming));
			let end = next_arc.len() as u32;
			let prev = self.snap.compare_and_swap(&cur, next_arc);
			if Arc::ptr_eq(&prev, &cur) {
				let shadowing = incoming
					.iter()
					.filter(|new| cur.iter().any(|old| old.same_keys(new)))
					.count();
				tracing::debug!(
					added = incoming.len(),
					total = end,
					shadowing,
					"registered renderers"
				);
				return start..end;
			}
		}
	}

	/// Current snapshot. Stays valid while later registrations are published.
	#[inline]
	pub fn snapshot(&self) -> Arc<Snapshot<R>> {
		self.snap.load_full()
	}

	/// Resolver pinned to the current snapshot.
	pub fn resolver(&self) -> Resolver<R> {
		Resolver::new(self.snapshot(), self.canon.clone())
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Registrations that can no longer win any resolution.
	pub fn shadowed(&self) -> Vec<Shadowed> {
		self.snap.load().shadowed()
	}

	pub fn resolve_entity_renderer(
		&self,
		types: &TypeAncestry,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		self.resolver().resolve_entity_renderer(types, topology)
	}

	pub fn resolve_property_renderer(
		&self,
		types: &TypeAncestry,
		property: &Iri,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		self.resolver()
			.resolve_property_renderer(types, property, topology)
	}

	pub fn resolve_literal_renderer(
		&self,
		datatype: &Iri,
		topology: Option<&Iri>,
	) -> Option<Resolved<R>> {
		self.resolver().resolve_literal_renderer(datatype, topology)
	}
}

impl<R> std::fmt::Debug for Registry<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("len", &self.len())
			.finish_non_exhaustive()
	}
}
