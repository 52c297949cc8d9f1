//! Resource views: one subject drawn by its entity renderer.
//!
//! A subject without data is not an error unless it is blank. Named subjects
//! are handed to the store for loading and the configured loading renderer
//! stands in until the data arrives and the instance is invalidated.

use linkview_primitives::{EntityStore, Iri, LoadMode, Subject, TopologyArg};
use linkview_registry::TypeAncestry;

use crate::context::Views;
use crate::error::ViewError;
use crate::node::Node;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceView<R> {
	pub subject: Subject,
	pub topology: TopologyArg,
	/// Draw `children` without waiting for data.
	pub force_render: bool,
	pub load_mode: LoadMode,
	/// Drawn instead of the entity renderer once the subject has data.
	pub children: Option<Node<R>>,
}

impl<R: Clone> ResourceView<R> {
	pub fn new(subject: Subject) -> Self {
		Self {
			subject,
			topology: TopologyArg::Inherit,
			force_render: false,
			load_mode: LoadMode::Fetch,
			children: None,
		}
	}

	pub fn topology(mut self, topology: impl Into<TopologyArg>) -> Self {
		self.topology = topology.into();
		self
	}

	pub fn force_render(mut self, force: bool) -> Self {
		self.force_render = force;
		self
	}

	pub fn load_mode(mut self, mode: LoadMode) -> Self {
		self.load_mode = mode;
		self
	}

	pub fn children(mut self, children: Node<R>) -> Self {
		self.children = Some(children);
		self
	}

	/// Renders the subject inside a parent rendering in `parent_topology`.
	pub fn render<S>(
		&self,
		views: Views<'_, S, R>,
		parent_topology: Option<&Iri>,
	) -> Result<Node<R>, ViewError>
	where
		S: EntityStore + ?Sized,
	{
		let topology = self.topology.resolve(parent_topology);
		if self.force_render
			&& let Some(children) = &self.children
		{
			return Ok(children.clone());
		}

		let subject = views.store.canonicalize(&self.subject);
		if views.store.entity_triples(&subject).is_empty() {
			return self.not_ready(views, subject, topology);
		}
		if let Some(children) = &self.children {
			return Ok(children.clone());
		}

		let types = TypeAncestry::of_subject(views.store, &subject);
		match views.registry.resolve_entity_renderer(&types, topology.as_ref()) {
			Some(renderer) => Ok(Node::render((*renderer).clone(), subject, topology)),
			None => {
				tracing::trace!(%subject, types = types.len(), "no view for resource");
				Ok(Node::Empty)
			}
		}
	}

	fn not_ready<S>(
		&self,
		views: Views<'_, S, R>,
		subject: Subject,
		topology: Option<Iri>,
	) -> Result<Node<R>, ViewError>
	where
		S: EntityStore + ?Sized,
	{
		if subject.is_blank() {
			tracing::warn!(%subject, "blank subject without data cannot be loaded");
			return match views.status_renderer(views.config.error_type.as_ref(), topology.as_ref()) {
				Some(renderer) => Ok(Node::render((*renderer).clone(), subject, topology)),
				None => Err(ViewError::UnresolvableSubject(subject)),
			};
		}

		views.store.ensure_loaded(&subject, self.load_mode);
		Ok(
			match views.status_renderer(views.config.loading_type.as_ref(), topology.as_ref()) {
				Some(renderer) => Node::render((*renderer).clone(), subject, topology),
				None => Node::Empty,
			},
		)
	}
}
