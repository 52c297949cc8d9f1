//! Renderer registry and resolution.
//!
//! Renderers are registered under a type, property, and topology key and
//! resolved by specificity against a subject's [`TypeAncestry`]. The registry
//! is append-only and lock-free for readers.

pub mod ancestry;
pub mod matcher;
pub mod registration;
mod registry;
pub mod resolver;
pub mod snapshot;


pub use ancestry::TypeAncestry;
pub use matcher::{Matcher, PropertyRank, TopologyMatcher, TopologyRank, TypeRank};
pub use registration::Registration;
pub use registry::Registry;
pub use resolver::{Resolved, Resolver, Specificity};
pub use snapshot::{Shadowed, Snapshot};
