//! In-memory entity store.
//!
//! Implements every store interface with plain maps. Used by tests and by
//! embedders that keep their whole graph resident.
//!
//! # Change counter
//!
//! A single store-wide counter is bumped on every mutation and recorded as the
//! change timestamp of the touched canonical subject. Timestamps are therefore
//! monotonic per subject and comparable across subjects.
//!
//! # Notification
//!
//! Subscribers are collected under the feed lock and invoked after it is
//! released, so a callback may subscribe or unsubscribe re-entrantly.
//! Callbacks receive the filtered subject that changed, which is the alias
//! itself for subscribers that canonicalized before the alias existed.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};
use slab::Slab;

use crate::store::{
	Canonicalize, ChangeCallback, ChangeFeed, EntityStore, LoadMode, StoreSubscription,
};
use crate::term::{Subject, Triple};

#[cfg(test)]
mod tests;

#[derive(Default)]
struct Graph {
	triples: FxHashMap<Subject, Vec<Triple>>,
	aliases: FxHashMap<Subject, Subject>,
	stamps: FxHashMap<Subject, u64>,
}

impl Graph {
	fn canonical(&self, subject: &Subject) -> Subject {
		self.aliases
			.get(subject)
			.cloned()
			.unwrap_or_else(|| subject.clone())
	}
}

struct FeedEntry {
	filter: FxHashSet<Subject>,
	callback: ChangeCallback,
}

/// Subscription slots, addressed by serial so a released handle never
/// reaches a reused slot.
#[derive(Default)]
struct Feed {
	entries: Slab<FeedEntry>,
	slots: FxHashMap<u64, usize>,
}

/// Store holding all triples in memory.
#[derive(Default)]
pub struct MemoryStore {
	graph: RwLock<Graph>,
	feed: Mutex<Feed>,
	loads: Mutex<Vec<(Subject, LoadMode)>>,
	clock: AtomicU64,
	next_blank: AtomicU64,
	next_serial: AtomicU64,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store pre-populated with `triples`.
	pub fn with_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
		let store = Self::new();
		store.add_all(triples);
		store
	}

	/// Allocates a fresh blank node label.
	pub fn blank_node(&self) -> Subject {
		let n = self.next_blank.fetch_add(1, Ordering::Relaxed);
		Subject::blank(format!("b{n}"))
	}

	/// Appends one triple and notifies subscribers of its subject.
	pub fn add(&self, triple: Triple) {
		self.add_all(std::iter::once(triple));
	}

	/// Appends triples; each touched canonical subject is notified once.
	pub fn add_all(&self, triples: impl IntoIterator<Item = Triple>) {
		let mut touched = Vec::new();
		{
			let mut graph = self.graph.write();
			for triple in triples {
				let key = graph.canonical(&triple.subject);
				if !touched.contains(&key) {
					touched.push(key.clone());
				}
				graph.triples.entry(key).or_default().push(triple);
			}
		}
		for subject in touched {
			self.touch(&subject);
		}
	}

	/// Replaces all triples of `subject`.
	pub fn replace(&self, subject: &Subject, triples: impl IntoIterator<Item = Triple>) {
		let key = {
			let mut graph = self.graph.write();
			let key = graph.canonical(subject);
			graph.triples.insert(key.clone(), triples.into_iter().collect());
			key
		};
		self.touch(&key);
	}

	/// Removes all triples of `subject`.
	pub fn remove(&self, subject: &Subject) {
		let key = {
			let mut graph = self.graph.write();
			let key = graph.canonical(subject);
			graph.triples.remove(&key);
			key
		};
		self.touch(&key);
	}

	/// Declares `alias` equivalent to `target`.
	///
	/// Data previously stored under `alias` moves to the canonical subject,
	/// and both are notified.
	pub fn alias(&self, alias: &Subject, target: &Subject) {
		let canonical = {
			let mut graph = self.graph.write();
			let canonical = graph.canonical(target);
			if canonical == *alias {
				return;
			}
			for value in graph.aliases.values_mut() {
				if value == alias {
					*value = canonical.clone();
				}
			}
			graph.aliases.insert(alias.clone(), canonical.clone());
			if let Some(moved) = graph.triples.remove(alias) {
				graph
					.triples
					.entry(canonical.clone())
					.or_default()
					.extend(moved);
			}
			canonical
		};
		// Subscribers that canonicalized before the alias existed still hold the
		// alias itself as their key.
		self.bump(alias.clone());
		self.bump(canonical);
	}

	/// Bumps the change timestamp of `subject` and notifies its subscribers.
	pub fn touch(&self, subject: &Subject) -> u64 {
		let key = self.canonicalize(subject);
		self.bump(key)
	}

	fn bump(&self, key: Subject) -> u64 {
		let ts = self.clock.fetch_add(1, Ordering::SeqCst) + 1;
		self.graph.write().stamps.insert(key.clone(), ts);

		let callbacks: Vec<ChangeCallback> = self
			.feed
			.lock()
			.entries
			.iter()
			.filter(|(_, entry)| entry.filter.contains(&key))
			.map(|(_, entry)| entry.callback.clone())
			.collect();

		tracing::trace!(subject = %key, ts, listeners = callbacks.len(), "store change");
		for callback in callbacks {
			callback(&key, ts);
		}
		ts
	}

	/// Load requests received so far, in order.
	pub fn load_requests(&self) -> Vec<(Subject, LoadMode)> {
		self.loads.lock().clone()
	}

	/// Number of live change subscriptions.
	pub fn subscriber_count(&self) -> usize {
		self.feed.lock().entries.len()
	}
}

impl Canonicalize for MemoryStore {
	fn canonicalize(&self, subject: &Subject) -> Subject {
		self.graph.read().canonical(subject)
	}
}

impl EntityStore for MemoryStore {
	fn entity_triples(&self, subject: &Subject) -> Vec<Triple> {
		let graph = self.graph.read();
		graph
			.triples
			.get(&graph.canonical(subject))
			.cloned()
			.unwrap_or_default()
	}

	fn change_timestamp(&self, subject: &Subject) -> u64 {
		let graph = self.graph.read();
		graph
			.stamps
			.get(&graph.canonical(subject))
			.copied()
			.unwrap_or(0)
	}

	fn enclosing_document(&self, subject: &Subject) -> Option<Subject> {
		let iri = subject.as_iri()?;
		Some(Subject::Named(iri.document().unwrap_or_else(|| iri.clone())))
	}

	fn ensure_loaded(&self, subject: &Subject, mode: LoadMode) {
		tracing::debug!(%subject, ?mode, "load requested");
		self.loads.lock().push((subject.clone(), mode));
	}
}

impl ChangeFeed for MemoryStore {
	fn subscribe_to_changes(
		&self,
		filter: &[Subject],
		callback: ChangeCallback,
	) -> StoreSubscription {
		let filter = {
			let graph = self.graph.read();
			filter.iter().map(|s| graph.canonical(s)).collect()
		};
		let serial = self.next_serial.fetch_add(1, Ordering::Relaxed);
		let mut feed = self.feed.lock();
		let slot = feed.entries.insert(FeedEntry { filter, callback });
		feed.slots.insert(serial, slot);
		StoreSubscription(serial)
	}

	fn unsubscribe(&self, subscription: StoreSubscription) {
		let mut feed = self.feed.lock();
		if let Some(slot) = feed.slots.remove(&subscription.0) {
			feed.entries.remove(slot);
		}
	}
}

impl std::fmt::Debug for MemoryStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let graph = self.graph.read();
		f.debug_struct("MemoryStore")
			.field("subjects", &graph.triples.len())
			.field("aliases", &graph.aliases.len())
			.field("subscribers", &self.feed.lock().entries.len())
			.finish()
	}
}
