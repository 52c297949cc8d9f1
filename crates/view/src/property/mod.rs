//! Property views: the values of one or more predicates of the context subject.
//!
//! Values are selected by [`crate::projector`] and drawn one by one:
//!
//! - by the property renderer of the first label that resolves one,
//! - as nested [`ResourceView`]s for node values,
//! - by the literal renderer of the value's datatype,
//! - or as the raw lexical value.
//!
//! An association renderer registered for `rdf:predicate` wraps the result.

use linkview_primitives::{EntityStore, Iri, Subject, Term, TopologyArg, vocab};
use linkview_registry::{Resolved, TypeAncestry};

use crate::context::{ViewContext, Views};
use crate::error::ViewError;
use crate::node::{Node, Rendered};
use crate::options::ProjectionOptions;
use crate::projector;
use crate::resource::ResourceView;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyView<R> {
	pub options: ProjectionOptions,
	/// Drawn instead of raw values and passed on to nested resources.
	pub children: Option<Node<R>>,
}

struct Pass<'v, 'a, S: ?Sized, R> {
	views: Views<'a, S, R>,
	view: &'v PropertyView<R>,
	subject: Subject,
	topology: Option<Iri>,
	types: TypeAncestry,
}

impl<R: Clone> PropertyView<R> {
	pub fn new(options: ProjectionOptions) -> Self {
		Self {
			options,
			children: None,
		}
	}

	pub fn children(mut self, children: Node<R>) -> Self {
		self.children = Some(children);
		self
	}

	pub fn render<S>(&self, views: Views<'_, S, R>, ctx: &ViewContext) -> Result<Node<R>, ViewError>
	where
		S: EntityStore + ?Sized,
	{
		if self.options.label.is_empty() && !self.options.force_render {
			return Err(ViewError::MissingLabel);
		}

		let subject = views.store.canonicalize(&ctx.subject);
		let triples = views.store.entity_triples(&subject);
		if triples.is_empty() {
			return Ok(Node::Empty);
		}
		let values = projector::matching_values(&triples, &self.options.label, views.store);
		if values.is_empty() && !self.options.force_render {
			return Ok(Node::Empty);
		}

		let pass = Pass {
			views,
			view: self,
			topology: self.options.topology.resolve(ctx.topology.as_ref()),
			types: TypeAncestry::of_subject(views.store, &subject),
			subject,
		};
		pass.run(values)
	}
}

impl<S, R> Pass<'_, '_, S, R>
where
	S: EntityStore + ?Sized,
	R: Clone,
{
	fn run(&self, values: Vec<Term>) -> Result<Node<R>, ViewError> {
		let limit = self.view.options.limit.unwrap_or(self.views.config.default_limit);
		let selected = projector::select(values, limit, &self.views.config.language_preferences).into_values();

		if let Some(renderer) = self.property_renderer() {
			let body = if selected.is_empty() {
				self.invoke(&renderer, None)
			} else {
				Node::fragment(selected.into_iter().map(|v| self.invoke(&renderer, Some(v))).collect())
			};
			return Ok(self.associate(body));
		}

		if selected.is_empty() {
			return Ok(match &self.view.children {
				Some(children) => self.associate(children.clone()),
				None => Node::Empty,
			});
		}

		let nodes = selected
			.into_iter()
			.map(|value| self.value(value))
			.collect::<Result<Vec<_>, _>>()?;
		Ok(self.associate(Node::fragment(nodes)))
	}

	/// Property renderer of the first label that has one.
	fn property_renderer(&self) -> Option<Resolved<R>> {
		self.view.options.label.iris().iter().find_map(|label| {
			self.views
				.registry
				.resolve_property_renderer(&self.types, label, self.topology.as_ref())
		})
	}

	fn value(&self, value: Term) -> Result<Node<R>, ViewError> {
		match value {
			Term::Subject(subject) => {
				let mut nested = ResourceView::new(subject).topology(TopologyArg::Inherit);
				nested.children = self.view.children.clone();
				nested.render(self.views, self.topology.as_ref())
			}
			Term::Literal(literal) => {
				if let Some(children) = &self.view.children {
					return Ok(children.clone());
				}
				let renderer = self
					.views
					.registry
					.resolve_literal_renderer(literal.datatype(), self.topology.as_ref());
				Ok(match renderer {
					Some(renderer) => self.invoke(&renderer, Some(Term::Literal(literal))),
					None => Node::Raw(literal.value().to_string()),
				})
			}
		}
	}

	fn invoke(&self, renderer: &Resolved<R>, value: Option<Term>) -> Node<R> {
		Node::Rendered(Rendered {
			renderer: (**renderer).clone(),
			subject: self.subject.clone(),
			value,
			topology: self.topology.clone(),
			children: self.view.children.clone().map(Node::into_children).unwrap_or_default(),
		})
	}

	fn associate(&self, body: Node<R>) -> Node<R> {
		let association = self.views.registry.resolve_property_renderer(
			&self.types,
			&vocab::rdf_predicate(),
			self.topology.as_ref(),
		);
		match association {
			Some(renderer) => Node::Rendered(Rendered {
				renderer: (*renderer).clone(),
				subject: self.subject.clone(),
				value: None,
				topology: self.topology.clone(),
				children: body.into_children(),
			}),
			None => body,
		}
	}
}
