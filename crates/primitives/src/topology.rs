use crate::iri::Iri;

/// Topology argument given to a view instance.
///
/// The ambient topology a view resolves against is an `Option<Iri>`; this type
/// describes how a view derives it from its parent's context. `Clear` and
/// `Inherit` are distinct: a cleared view renders without topology even when
/// its parent has one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TopologyArg {
	/// Use the topology of the enclosing context.
	#[default]
	Inherit,
	/// Render without any topology.
	Clear,
	/// Render in the given topology.
	Set(Iri),
}

impl TopologyArg {
	/// Computes the effective topology given the enclosing context.
	pub fn resolve(&self, context: Option<&Iri>) -> Option<Iri> {
		match self {
			Self::Inherit => context.cloned(),
			Self::Clear => None,
			Self::Set(iri) => Some(iri.clone()),
		}
	}
}

impl From<Iri> for TopologyArg {
	fn from(value: Iri) -> Self {
		Self::Set(value)
	}
}

impl From<Option<Iri>> for TopologyArg {
	/// `None` maps to [`TopologyArg::Clear`], never to `Inherit`.
	fn from(value: Option<Iri>) -> Self {
		value.map_or(Self::Clear, Self::Set)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inherit_uses_context() {
		let ctx = Iri::from("https://ex.org/collection");
		assert_eq!(TopologyArg::Inherit.resolve(Some(&ctx)), Some(ctx.clone()));
		assert_eq!(TopologyArg::Inherit.resolve(None), None);
	}

	#[test]
	fn clear_drops_context() {
		let ctx = Iri::from("https://ex.org/collection");
		assert_eq!(TopologyArg::Clear.resolve(Some(&ctx)), None);
	}

	#[test]
	fn set_overrides_context() {
		let ctx = Iri::from("https://ex.org/collection");
		let own = Iri::from("https://ex.org/card");
		assert_eq!(TopologyArg::Set(own.clone()).resolve(Some(&ctx)), Some(own));
	}
}
