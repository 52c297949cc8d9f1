//! Subscription lifecycle of one view instance.
//!
//! ```text
//! Unmounted --mount--> Subscribed --change_subject--> Subscribed --unmount--> Unmounted
//! ```
//!
//! Changes to the bound dependencies enqueue a re-render request for the
//! instance on the shared [`RenderQueue`].

use std::sync::Arc;

use linkview_primitives::{ChangeFeed, EntityStore, Subject};
use thiserror::Error;

use crate::dependency::DependencySet;
use crate::queue::{InstanceId, RenderQueue};
use crate::tracker::{SubscriptionHandle, Tracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
	Unmounted,
	Subscribed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindingError {
	#[error("instance {0:?} is already mounted")]
	AlreadyMounted(InstanceId),
	#[error("instance {0:?} is not mounted")]
	NotMounted(InstanceId),
}

pub struct Binding<S> {
	instance: InstanceId,
	store: Arc<S>,
	tracker: Tracker,
	queue: Arc<RenderQueue>,
	/// Canonical subject while mounted.
	subject: Option<Subject>,
	data_subjects: Vec<Subject>,
	handle: Option<SubscriptionHandle>,
}

impl<S> Binding<S>
where
	S: EntityStore + ChangeFeed + Send + Sync + 'static,
{
	pub fn new(store: Arc<S>, queue: Arc<RenderQueue>) -> Self {
		let tracker = Tracker::new(store.clone());
		Self {
			instance: queue.instance(),
			store,
			tracker,
			queue,
			subject: None,
			data_subjects: Vec::new(),
			handle: None,
		}
	}

	pub fn instance(&self) -> InstanceId {
		self.instance
	}

	pub fn state(&self) -> BindingState {
		match self.handle {
			Some(_) => BindingState::Subscribed,
			None => BindingState::Unmounted,
		}
	}

	pub fn subject(&self) -> Option<&Subject> {
		self.subject.as_ref()
	}

	pub fn dependencies(&self) -> Option<&DependencySet> {
		self.handle.as_ref().map(SubscriptionHandle::dependencies)
	}

	pub fn mount(
		&mut self,
		subject: &Subject,
		data_subjects: impl IntoIterator<Item = Subject>,
	) -> Result<(), BindingError> {
		if self.handle.is_some() {
			return Err(BindingError::AlreadyMounted(self.instance));
		}
		let subject = self.store.canonicalize(subject);
		self.data_subjects = data_subjects.into_iter().collect();
		let deps = self.deps_for(&subject);

		let queue = self.queue.clone();
		let instance = self.instance;
		let handle = self.tracker.subscribe(deps, move |ts| {
			tracing::trace!(?instance, ts, "re-render requested");
			queue.request(instance, ts);
		});
		handle.catch_up(&*self.store);
		tracing::debug!(?instance, %subject, "mounted");
		self.subject = Some(subject);
		self.handle = Some(handle);
		Ok(())
	}

	/// Rebinds to `subject`. Returns `false` when it is equivalent to the
	/// current subject, in which case nothing changes.
	pub fn change_subject(&mut self, subject: &Subject) -> Result<bool, BindingError> {
		let subject = self.store.canonicalize(subject);
		if self.handle.is_none() {
			return Err(BindingError::NotMounted(self.instance));
		}
		if self.subject.as_ref() == Some(&subject) {
			return Ok(false);
		}
		self.rebind(subject);
		Ok(true)
	}

	/// Replaces the extra data subjects the instance depends on.
	pub fn set_data_subjects(
		&mut self,
		data_subjects: impl IntoIterator<Item = Subject>,
	) -> Result<(), BindingError> {
		let subject = self
			.subject
			.clone()
			.ok_or(BindingError::NotMounted(self.instance))?;
		self.data_subjects = data_subjects.into_iter().collect();
		self.rebind(subject);
		Ok(())
	}

	/// Recomputes the dependency set after a render and resubscribes when its
	/// members changed, for example once the subject gained an alias.
	pub fn refresh(&mut self) -> Result<bool, BindingError> {
		let subject = self
			.subject
			.as_ref()
			.ok_or(BindingError::NotMounted(self.instance))?;
		let subject = self.store.canonicalize(subject);
		let deps = self.deps_for(&subject);
		if self.dependencies() == Some(&deps) {
			return Ok(false);
		}
		self.rebind(subject);
		Ok(true)
	}

	pub fn unmount(&mut self) -> Result<(), BindingError> {
		let handle = self
			.handle
			.take()
			.ok_or(BindingError::NotMounted(self.instance))?;
		self.tracker.unsubscribe(handle);
		self.queue.cancel(self.instance);
		self.subject = None;
		tracing::debug!(instance = ?self.instance, "unmounted");
		Ok(())
	}

	fn rebind(&mut self, subject: Subject) {
		let deps = self.deps_for(&subject);
		if let Some(handle) = self.handle.as_mut() {
			self.tracker.resubscribe(handle, deps);
			handle.catch_up(&*self.store);
		}
		self.subject = Some(subject);
	}

	fn deps_for(&self, subject: &Subject) -> DependencySet {
		DependencySet::for_subject(&*self.store, subject, self.data_subjects.iter().cloned())
	}
}

impl<S> Drop for Binding<S> {
	fn drop(&mut self) {
		if self.handle.take().is_some() {
			self.queue.cancel(self.instance);
		}
	}
}
