//! Core types for linked-data views: identifiers, terms, topology, and the
//! interfaces of the external entity store.

/// IRI and blank node identifiers.
pub mod iri;
/// In-memory reference implementation of the store interfaces.
pub mod memory;
/// Store interfaces consumed by resolution and invalidation.
pub mod store;
/// Subjects, literals, terms, and triples.
pub mod term;
/// Positional context a view renders in.
pub mod topology;
/// Well-known vocabulary identifiers.
pub mod vocab;

pub use iri::{BlankId, Iri};
pub use memory::MemoryStore;
pub use store::{
	ChangeCallback, ChangeFeed, Canonicalize, EntityStore, Identity, LoadMode, StoreSubscription,
};
pub use term::{Literal, Subject, Term, Triple};
pub use topology::TopologyArg;
