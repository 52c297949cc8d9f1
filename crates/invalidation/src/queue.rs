use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;

/// Identity of one live view instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub u64);

/// Pending re-render requests, at most one per instance.
///
/// Change callbacks only enqueue; the host drains the queue and re-renders.
/// Requests for one instance keep the highest timestamp; requests for
/// different instances are never merged.
#[derive(Debug, Default)]
pub struct RenderQueue {
	pending: Mutex<IndexMap<InstanceId, u64, FxBuildHasher>>,
	next_instance: AtomicU64,
}

impl RenderQueue {
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocates an identity for a new view instance.
	pub fn instance(&self) -> InstanceId {
		InstanceId(self.next_instance.fetch_add(1, Ordering::Relaxed))
	}

	pub fn request(&self, instance: InstanceId, ts: u64) {
		let mut pending = self.pending.lock();
		let slot = pending.entry(instance).or_insert(ts);
		*slot = (*slot).max(ts);
	}

	/// Takes all pending requests in the order instances were first requested.
	pub fn drain(&self) -> Vec<(InstanceId, u64)> {
		let drained: Vec<_> = self.pending.lock().drain(..).collect();
		if !drained.is_empty() {
			tracing::trace!(count = drained.len(), "render queue drained");
		}
		drained
	}

	/// Drops the pending request of `instance`, if any.
	pub fn cancel(&self, instance: InstanceId) -> Option<u64> {
		self.pending.lock().shift_remove(&instance)
	}

	pub fn pending(&self, instance: InstanceId) -> Option<u64> {
		self.pending.lock().get(&instance).copied()
	}

	pub fn len(&self) -> usize {
		self.pending.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.pending.lock().is_empty()
	}
}
