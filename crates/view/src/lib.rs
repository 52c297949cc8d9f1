//! Views over linked data.
//!
//! [`ResourceView`] draws a subject with its entity renderer and
//! [`PropertyView`] draws selected values of the subject in context. Both
//! resolve renderers from a [`linkview_registry::Registry`] and produce a
//! [`Node`] tree for the host to draw.

pub mod config;
pub mod context;
pub mod error;
pub mod mapping;
pub mod node;
pub mod options;
pub mod projector;
pub mod property;
pub mod resource;

pub use config::ViewConfig;
pub use context::{ViewContext, Views};
pub use error::{ConfigError, ViewError};
pub use mapping::{DataMapping, MappedProps, PropValue, ReturnType, map_data_to_props};
pub use node::{Node, Rendered};
pub use options::{Label, Limit, ProjectionOptions};
pub use projector::{Projection, best_lang, project};
pub use property::PropertyView;
pub use resource::ResourceView;
