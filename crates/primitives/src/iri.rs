use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// An absolute IRI.
///
/// Cloning is a reference count bump, so IRIs are passed by value freely
/// through registries and snapshots.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub struct Iri(Arc<str>);

impl Iri {
	pub fn new(iri: impl Into<Arc<str>>) -> Self {
		Self(iri.into())
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the IRI with any fragment removed.
	///
	/// Returns `None` when the IRI has no fragment and is therefore its own
	/// document.
	pub fn document(&self) -> Option<Iri> {
		self.0.find('#').map(|idx| Iri::new(&self.0[..idx]))
	}
}

impl fmt::Debug for Iri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}>", self.0)
	}
}

impl fmt::Display for Iri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl Borrow<str> for Iri {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Iri {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for Iri {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

/// Label of a blank (anonymous) node, unique within one store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankId(Arc<str>);

impl BlankId {
	pub fn new(label: impl Into<Arc<str>>) -> Self {
		Self(label.into())
	}

	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for BlankId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "_:{}", self.0)
	}
}

impl fmt::Display for BlankId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "_:{}", self.0)
	}
}
