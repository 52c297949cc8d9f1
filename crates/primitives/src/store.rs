//! Interfaces of the external graph store.
//!
//! Resolution and invalidation never own subject data. They read it through
//! [`EntityStore`], compare identities through [`Canonicalize`], and learn
//! about mutations through [`ChangeFeed`].

use std::sync::Arc;

use crate::iri::Iri;
use crate::term::{Subject, Triple};

/// Maps equivalent subject references to one canonical form.
///
/// Every set-membership or map-key comparison on subjects happens on the
/// output of this trait.
pub trait Canonicalize {
	fn canonicalize(&self, subject: &Subject) -> Subject;

	/// Canonical form of an identifier used as a type, property, or topology key.
	///
	/// Keeps `iri` when it canonicalizes to a blank node, which has no IRI form.
	fn canonical_iri(&self, iri: &Iri) -> Iri {
		match self.canonicalize(&Subject::Named(iri.clone())) {
			Subject::Named(canonical) => canonical,
			Subject::Blank(_) => iri.clone(),
		}
	}
}

/// Canonicalizer that treats every subject as its own canonical form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Canonicalize for Identity {
	#[inline]
	fn canonicalize(&self, subject: &Subject) -> Subject {
		subject.clone()
	}
}

impl<T: Canonicalize + ?Sized> Canonicalize for &T {
	fn canonicalize(&self, subject: &Subject) -> Subject {
		(**self).canonicalize(subject)
	}
}

impl<T: Canonicalize + ?Sized> Canonicalize for Arc<T> {
	fn canonicalize(&self, subject: &Subject) -> Subject {
		(**self).canonicalize(subject)
	}
}

/// How a load request should be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadMode {
	/// Go to the network even when a cached copy exists.
	Fetch,
	/// Serve from cache when possible.
	Get,
}

/// Read access to subject data.
pub trait EntityStore: Canonicalize {
	/// Triples whose subject is `subject`, in store order. Empty when unknown.
	fn entity_triples(&self, subject: &Subject) -> Vec<Triple>;

	/// Change counter of a canonical subject; monotonically non-decreasing.
	///
	/// Counters of different subjects need not be comparable.
	fn change_timestamp(&self, subject: &Subject) -> u64;

	/// Document a named subject lives in. `None` for blank subjects.
	fn enclosing_document(&self, subject: &Subject) -> Option<Subject>;

	/// Fire-and-forget load request. Retry policy belongs to the store.
	fn ensure_loaded(&self, subject: &Subject, mode: LoadMode);
}

impl<T: EntityStore + ?Sized> EntityStore for &T {
	fn entity_triples(&self, subject: &Subject) -> Vec<Triple> {
		(**self).entity_triples(subject)
	}

	fn change_timestamp(&self, subject: &Subject) -> u64 {
		(**self).change_timestamp(subject)
	}

	fn enclosing_document(&self, subject: &Subject) -> Option<Subject> {
		(**self).enclosing_document(subject)
	}

	fn ensure_loaded(&self, subject: &Subject, mode: LoadMode) {
		(**self).ensure_loaded(subject, mode)
	}
}

impl<T: EntityStore + ?Sized> EntityStore for Arc<T> {
	fn entity_triples(&self, subject: &Subject) -> Vec<Triple> {
		(**self).entity_triples(subject)
	}

	fn change_timestamp(&self, subject: &Subject) -> u64 {
		(**self).change_timestamp(subject)
	}

	fn enclosing_document(&self, subject: &Subject) -> Option<Subject> {
		(**self).enclosing_document(subject)
	}

	fn ensure_loaded(&self, subject: &Subject, mode: LoadMode) {
		(**self).ensure_loaded(subject, mode)
	}
}

/// Callback invoked with a changed filtered subject and its new change timestamp.
///
/// The subject is the one named in the filter.
pub type ChangeCallback = Arc<dyn Fn(&Subject, u64) + Send + Sync>;

/// Opaque handle of a store-level change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreSubscription(pub u64);

/// Push-based change notifications.
pub trait ChangeFeed {
	/// Invokes `callback` whenever one of `filter` (canonical subjects) changes.
	fn subscribe_to_changes(&self, filter: &[Subject], callback: ChangeCallback)
	-> StoreSubscription;

	fn unsubscribe(&self, subscription: StoreSubscription);
}

impl<T: ChangeFeed + ?Sized> ChangeFeed for Arc<T> {
	fn subscribe_to_changes(
		&self,
		filter: &[Subject],
		callback: ChangeCallback,
	) -> StoreSubscription {
		(**self).subscribe_to_changes(filter, callback)
	}

	fn unsubscribe(&self, subscription: StoreSubscription) {
		(**self).unsubscribe(subscription)
	}
}
