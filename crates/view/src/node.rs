use linkview_primitives::{Iri, Subject, Term};

/// Output of a view: what the host should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<R> {
	/// Nothing to draw.
	Empty,
	/// Lexical value drawn as-is.
	Raw(String),
	Fragment(Vec<Node<R>>),
	Rendered(Rendered<R>),
}

/// Invocation of a registered renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered<R> {
	pub renderer: R,
	pub subject: Subject,
	/// Value being presented, for property and literal renderers.
	pub value: Option<Term>,
	/// Topology the renderer was resolved in; nested views inherit it.
	pub topology: Option<Iri>,
	pub children: Vec<Node<R>>,
}

impl<R> Node<R> {
	pub fn render(renderer: R, subject: Subject, topology: Option<Iri>) -> Self {
		Self::Rendered(Rendered {
			renderer,
			subject,
			value: None,
			topology,
			children: Vec::new(),
		})
	}

	/// Collapses zero or one nodes instead of wrapping them.
	pub fn fragment(mut nodes: Vec<Node<R>>) -> Self {
		match nodes.len() {
			0 => Self::Empty,
			1 => nodes.swap_remove(0),
			_ => Self::Fragment(nodes),
		}
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	pub(crate) fn into_children(self) -> Vec<Node<R>> {
		match self {
			Self::Empty => Vec::new(),
			Self::Fragment(nodes) => nodes,
			node => vec![node],
		}
	}

	/// Renderers in this tree, depth first.
	pub fn renderers(&self) -> Vec<&R> {
		let mut out = Vec::new();
		self.walk(&mut |node| {
			if let Self::Rendered(r) = node {
				out.push(&r.renderer);
			}
		});
		out
	}

	/// Raw values in this tree, depth first.
	pub fn raw_values(&self) -> Vec<&str> {
		let mut out = Vec::new();
		self.walk(&mut |node| {
			if let Self::Raw(value) = node {
				out.push(value.as_str());
			}
		});
		out
	}

	fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
		visit(self);
		match self {
			Self::Fragment(nodes) => nodes.iter().for_each(|n| n.walk(visit)),
			Self::Rendered(r) => r.children.iter().for_each(|n| n.walk(visit)),
			Self::Empty | Self::Raw(_) => {}
		}
	}
}

impl<R> From<&str> for Node<R> {
	fn from(value: &str) -> Self {
		Self::Raw(value.to_string())
	}
}
