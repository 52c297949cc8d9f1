use linkview_primitives::{EntityStore, Iri, Subject};
use linkview_registry::{Registry, Resolved, TypeAncestry};

use crate::config::ViewConfig;

/// Subject and topology a view renders within.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContext {
	pub subject: Subject,
	pub topology: Option<Iri>,
}

impl ViewContext {
	pub fn new(subject: Subject, topology: Option<Iri>) -> Self {
		Self { subject, topology }
	}
}

/// Everything a view reads while rendering.
pub struct Views<'a, S: ?Sized, R> {
	pub store: &'a S,
	pub registry: &'a Registry<R>,
	pub config: &'a ViewConfig,
}

impl<S: ?Sized, R> Clone for Views<'_, S, R> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<S: ?Sized, R> Copy for Views<'_, S, R> {}

impl<'a, S, R> Views<'a, S, R>
where
	S: EntityStore + ?Sized,
{
	pub fn new(store: &'a S, registry: &'a Registry<R>, config: &'a ViewConfig) -> Self {
		Self {
			store,
			registry,
			config,
		}
	}

	/// Entity renderer registered for the status type `ty`, if configured.
	pub(crate) fn status_renderer(&self, ty: Option<&Iri>, topology: Option<&Iri>) -> Option<Resolved<R>> {
		let types = TypeAncestry::direct([ty?.clone()]);
		self.registry.resolve_entity_renderer(&types, topology)
	}
}
