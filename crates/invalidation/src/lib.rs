//! Change invalidation for view instances.
//!
//! A view instance depends on a [`DependencySet`] of canonical subjects. The
//! [`Tracker`] turns store change notifications for that set into `on_change`
//! calls, and a [`Binding`] drives the subscription from mount to unmount,
//! queueing re-renders on a [`RenderQueue`].

pub mod binding;
pub mod dependency;
pub mod queue;
pub mod tracker;

pub use binding::{Binding, BindingError, BindingState};
pub use dependency::DependencySet;
pub use queue::{InstanceId, RenderQueue};
pub use tracker::{OnChange, SubscriptionHandle, Tracker};
