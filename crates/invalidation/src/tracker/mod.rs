//! Change subscriptions over dependency sets.
//!
//! # Delivery
//!
//! Each subscription owns one [`Delivery`] shared by every store-level
//! subscription made on its behalf. A notification reaches `on_change` only
//! while the delivery is active and only when its timestamp is newer than
//! anything seen for that subject. Stamps are kept per subject, so stores whose
//! counters run independently per subject lose nothing. Both checks and the
//! callback run under the delivery lock, which is also taken to deactivate it.
//! Once [`SubscriptionHandle`] is dropped no callback can be running or start.
//!
//! The lock is reentrant so `on_change` may resubscribe or drop its own handle.
//!
//! # Resubscription
//!
//! [`Tracker::resubscribe`] registers the new store subscription before
//! removing the old one. A change landing in between reaches both, and the
//! shared per-subject stamps let exactly one of them through.
//!
//! # Catching up
//!
//! A change landing after the dependency set observed the store but before the
//! store subscription exists produces no notification.
//! [`SubscriptionHandle::catch_up`] re-reads the store and delivers such
//! changes through the same filter.

use std::cell::RefCell;
use std::sync::Arc;

use linkview_primitives::{ChangeFeed, EntityStore, StoreSubscription, Subject};
use parking_lot::ReentrantMutex;
use rustc_hash::FxHashMap;

use crate::dependency::DependencySet;

#[cfg(test)]
mod tests;

pub type OnChange = Arc<dyn Fn(u64) + Send + Sync>;

struct DeliveryState {
	active: bool,
	last_seen: FxHashMap<Subject, u64>,
}

struct Delivery {
	state: ReentrantMutex<RefCell<DeliveryState>>,
	on_change: OnChange,
}

impl Delivery {
	fn new(deps: &DependencySet, on_change: OnChange) -> Self {
		let last_seen = deps.observations().map(|(s, ts)| (s.clone(), ts)).collect();
		Self {
			state: ReentrantMutex::new(RefCell::new(DeliveryState { active: true, last_seen })),
			on_change,
		}
	}

	fn deliver(&self, subject: &Subject, ts: u64) {
		let guard = self.state.lock();
		{
			let mut state = guard.borrow_mut();
			if !state.active {
				return;
			}
			let seen = state.last_seen.entry(subject.clone()).or_insert(0);
			if *seen >= ts {
				tracing::trace!(%subject, ts, "stale change skipped");
				return;
			}
			*seen = ts;
		}
		(self.on_change)(ts);
	}

	/// Raises the stamps of `deps` members to what the set observed.
	fn merge(&self, deps: &DependencySet) {
		let guard = self.state.lock();
		let mut state = guard.borrow_mut();
		for (subject, ts) in deps.observations() {
			let seen = state.last_seen.entry(subject.clone()).or_insert(0);
			*seen = (*seen).max(ts);
		}
	}

	fn last_seen(&self, subject: &Subject) -> u64 {
		let guard = self.state.lock();
		let state = guard.borrow();
		state.last_seen.get(subject).copied().unwrap_or(0)
	}

	fn deactivate(&self) {
		self.state.lock().borrow_mut().active = false;
	}

	fn is_active(&self) -> bool {
		self.state.lock().borrow().active
	}
}

/// Subscribes dependency sets to a store's change feed.
#[derive(Clone)]
pub struct Tracker {
	feed: Arc<dyn ChangeFeed + Send + Sync>,
}

impl Tracker {
	pub fn new(feed: Arc<dyn ChangeFeed + Send + Sync>) -> Self {
		Self { feed }
	}

	/// Calls `on_change` with the new timestamp whenever a member of `deps`
	/// changes past its [`DependencySet::observed`] stamp.
	pub fn subscribe<F>(&self, deps: DependencySet, on_change: F) -> SubscriptionHandle
	where
		F: Fn(u64) + Send + Sync + 'static,
	{
		let delivery = Arc::new(Delivery::new(&deps, Arc::new(on_change)));
		let store = self.attach(&delivery, &deps);
		tracing::debug!(subjects = deps.len(), "subscribed");
		SubscriptionHandle {
			feed: self.feed.clone(),
			delivery,
			store: Some(store),
			deps,
		}
	}

	/// Ends `handle`. Equivalent to dropping it.
	pub fn unsubscribe(&self, handle: SubscriptionHandle) {
		drop(handle);
	}

	/// Moves `handle` to `deps` without losing or duplicating notifications.
	pub fn resubscribe(&self, handle: &mut SubscriptionHandle, deps: DependencySet) {
		handle.delivery.merge(&deps);
		let next = self.attach(&handle.delivery, &deps);
		if let Some(prev) = handle.store.replace(next) {
			handle.feed.unsubscribe(prev);
		}
		tracing::debug!(
			from = handle.deps.len(),
			to = deps.len(),
			"resubscribed"
		);
		handle.feed = self.feed.clone();
		handle.deps = deps;
	}

	fn attach(&self, delivery: &Arc<Delivery>, deps: &DependencySet) -> StoreSubscription {
		let delivery = delivery.clone();
		self.feed.subscribe_to_changes(
			&deps.to_vec(),
			Arc::new(move |subject: &Subject, ts: u64| delivery.deliver(subject, ts)),
		)
	}
}

impl std::fmt::Debug for Tracker {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Tracker").finish_non_exhaustive()
	}
}

/// Live subscription. Dropping it unsubscribes.
pub struct SubscriptionHandle {
	feed: Arc<dyn ChangeFeed + Send + Sync>,
	delivery: Arc<Delivery>,
	store: Option<StoreSubscription>,
	deps: DependencySet,
}

impl SubscriptionHandle {
	pub fn dependencies(&self) -> &DependencySet {
		&self.deps
	}

	/// Highest timestamp of `subject` delivered or observed so far.
	pub fn last_seen(&self, subject: &Subject) -> u64 {
		self.delivery.last_seen(subject)
	}

	/// Delivers member changes the store recorded without notifying this
	/// subscription, such as those between observing and attaching.
	pub fn catch_up<S: EntityStore + ?Sized>(&self, store: &S) {
		for subject in self.deps.iter() {
			let ts = store.change_timestamp(subject);
			if ts > 0 {
				self.delivery.deliver(subject, ts);
			}
		}
	}

	pub fn is_active(&self) -> bool {
		self.delivery.is_active()
	}
}

impl Drop for SubscriptionHandle {
	fn drop(&mut self) {
		self.delivery.deactivate();
		if let Some(store) = self.store.take() {
			self.feed.unsubscribe(store);
		}
		tracing::debug!(subjects = self.deps.len(), "unsubscribed");
	}
}

impl std::fmt::Debug for SubscriptionHandle {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SubscriptionHandle")
			.field("deps", &self.deps)
			.field("active", &self.is_active())
			.field("store", &self.store)
			.finish()
	}
}
