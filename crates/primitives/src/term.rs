use std::fmt;
use std::sync::Arc;

use crate::iri::{BlankId, Iri};
use crate::vocab;

/// An entity reference: either a named node or a blank node.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Subject {
	Named(Iri),
	Blank(BlankId),
}

impl Subject {
	pub fn named(iri: impl Into<Iri>) -> Self {
		Self::Named(iri.into())
	}

	pub fn blank(label: impl Into<Arc<str>>) -> Self {
		Self::Blank(BlankId::new(label))
	}

	#[inline]
	pub fn is_blank(&self) -> bool {
		matches!(self, Self::Blank(_))
	}

	#[inline]
	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Self::Named(iri) => Some(iri),
			Self::Blank(_) => None,
		}
	}

	/// Identifier text without any syntax decoration.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Named(iri) => iri.as_str(),
			Self::Blank(id) => id.as_str(),
		}
	}
}

impl fmt::Debug for Subject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named(iri) => fmt::Debug::fmt(iri, f),
			Self::Blank(id) => fmt::Debug::fmt(id, f),
		}
	}
}

impl fmt::Display for Subject {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Named(iri) => write!(f, "<{iri}>"),
			Self::Blank(id) => fmt::Display::fmt(id, f),
		}
	}
}

impl From<Iri> for Subject {
	fn from(value: Iri) -> Self {
		Self::Named(value)
	}
}

/// A typed literal value.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Literal {
	value: Arc<str>,
	datatype: Iri,
	language: Option<Arc<str>>,
}

impl Literal {
	/// Plain `xsd:string` literal.
	pub fn string(value: impl Into<Arc<str>>) -> Self {
		Self::typed(value, vocab::xsd_string())
	}

	pub fn typed(value: impl Into<Arc<str>>, datatype: impl Into<Iri>) -> Self {
		Self {
			value: value.into(),
			datatype: datatype.into(),
			language: None,
		}
	}

	/// Language-tagged string (`rdf:langString`).
	pub fn lang(value: impl Into<Arc<str>>, language: impl Into<Arc<str>>) -> Self {
		Self {
			value: value.into(),
			datatype: vocab::rdf_lang_string(),
			language: Some(language.into()),
		}
	}

	#[inline]
	pub fn value(&self) -> &str {
		&self.value
	}

	#[inline]
	pub fn datatype(&self) -> &Iri {
		&self.datatype
	}

	#[inline]
	pub fn language(&self) -> Option<&str> {
		self.language.as_deref()
	}
}

impl fmt::Debug for Literal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.language {
			Some(lang) => write!(f, "{:?}@{lang}", self.value),
			None => write!(f, "{:?}^^{:?}", self.value, self.datatype),
		}
	}
}

/// Object position of a triple.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
	Subject(Subject),
	Literal(Literal),
}

impl Term {
	#[inline]
	pub fn as_subject(&self) -> Option<&Subject> {
		match self {
			Self::Subject(subject) => Some(subject),
			Self::Literal(_) => None,
		}
	}

	#[inline]
	pub fn as_literal(&self) -> Option<&Literal> {
		match self {
			Self::Literal(literal) => Some(literal),
			Self::Subject(_) => None,
		}
	}

	/// Whether the term references another entity.
	#[inline]
	pub fn is_node(&self) -> bool {
		matches!(self, Self::Subject(_))
	}

	/// Raw textual value: the identifier for nodes, the lexical form for literals.
	pub fn lexical(&self) -> &str {
		match self {
			Self::Subject(subject) => subject.as_str(),
			Self::Literal(literal) => literal.value(),
		}
	}
}

impl fmt::Debug for Term {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Subject(subject) => fmt::Debug::fmt(subject, f),
			Self::Literal(literal) => fmt::Debug::fmt(literal, f),
		}
	}
}

impl From<Subject> for Term {
	fn from(value: Subject) -> Self {
		Self::Subject(value)
	}
}

impl From<Literal> for Term {
	fn from(value: Literal) -> Self {
		Self::Literal(value)
	}
}

/// A single statement about a subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
	pub subject: Subject,
	pub predicate: Iri,
	pub object: Term,
}

impl Triple {
	pub fn new(subject: Subject, predicate: impl Into<Iri>, object: impl Into<Term>) -> Self {
		Self {
			subject,
			predicate: predicate.into(),
			object: object.into(),
		}
	}
}
