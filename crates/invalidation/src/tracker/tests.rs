use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use linkview_primitives::{
	ChangeCallback, ChangeFeed, Identity, MemoryStore, StoreSubscription, Subject,
};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

fn subject(n: usize) -> Subject {
	Subject::named(format!("ex:s{n}"))
}

fn recorder() -> (Arc<Mutex<Vec<u64>>>, impl Fn(u64) + Send + Sync + 'static) {
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	(seen, move |ts| sink.lock().push(ts))
}

fn deps(store: &MemoryStore, subjects: &[usize]) -> DependencySet {
	DependencySet::from_subjects(store, subjects.iter().map(|&n| subject(n))).observe(store)
}

#[test]
fn member_changes_notify() {
	let store = Arc::new(MemoryStore::new());
	let tracker = Tracker::new(store.clone());
	let (seen, on_change) = recorder();
	let _handle = tracker.subscribe(deps(&store, &[1, 2]), on_change);

	let t1 = store.touch(&subject(1));
	store.touch(&subject(3));
	let t2 = store.touch(&subject(2));

	assert_eq!(*seen.lock(), vec![t1, t2]);
}

#[test]
fn changes_before_observed_are_ignored() {
	let store = Arc::new(MemoryStore::new());
	store.touch(&subject(1));
	let set = DependencySet::for_subject(&*store, &subject(1), []);
	let observed = set.observed(&subject(1));
	assert!(observed > 0);

	let tracker = Tracker::new(store.clone());
	let (seen, on_change) = recorder();
	let handle = tracker.subscribe(set, on_change);
	assert_eq!(handle.last_seen(&subject(1)), observed);

	let next = store.touch(&subject(1));
	assert_eq!(*seen.lock(), vec![next]);
	assert_eq!(handle.last_seen(&subject(1)), next);
}

#[test]
fn unsubscribe_stops_callbacks() {
	let store = Arc::new(MemoryStore::new());
	let tracker = Tracker::new(store.clone());
	let (seen, on_change) = recorder();
	let handle = tracker.subscribe(deps(&store, &[1]), on_change);
	assert_eq!(store.subscriber_count(), 1);

	tracker.unsubscribe(handle);
	store.touch(&subject(1));

	assert!(seen.lock().is_empty());
	assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn resubscribe_switches_dependencies() {
	let store = Arc::new(MemoryStore::new());
	let tracker = Tracker::new(store.clone());
	let (seen, on_change) = recorder();
	let mut handle = tracker.subscribe(deps(&store, &[1]), on_change);

	tracker.resubscribe(&mut handle, deps(&store, &[2]));
	store.touch(&subject(1));
	let t = store.touch(&subject(2));

	assert_eq!(*seen.lock(), vec![t]);
	assert_eq!(store.subscriber_count(), 1);
	assert!(handle.dependencies().contains(&subject(2)));
}

/// Feed that emits a change on `trigger` right after every new subscription is
/// in place, before the caller can tear down anything else.
struct RacingFeed {
	store: Arc<MemoryStore>,
	trigger: Subject,
	armed: AtomicBool,
}

impl ChangeFeed for RacingFeed {
	fn subscribe_to_changes(&self, filter: &[Subject], callback: ChangeCallback) -> StoreSubscription {
		let sub = self.store.subscribe_to_changes(filter, callback);
		if self.armed.load(Ordering::Acquire) {
			self.store.touch(&self.trigger);
		}
		sub
	}

	fn unsubscribe(&self, subscription: StoreSubscription) {
		self.store.unsubscribe(subscription);
	}
}

#[test]
fn change_during_resubscribe_is_delivered_once() {
	let store = Arc::new(MemoryStore::new());
	let feed = Arc::new(RacingFeed {
		store: store.clone(),
		trigger: subject(1),
		armed: AtomicBool::new(false),
	});
	let tracker = Tracker::new(feed.clone());
	let (seen, on_change) = recorder();
	let mut handle = tracker.subscribe(deps(&store, &[1]), on_change);

	feed.armed.store(true, Ordering::Release);
	tracker.resubscribe(&mut handle, deps(&store, &[1, 2]));

	assert_eq!(seen.lock().len(), 1);
	assert_eq!(store.subscriber_count(), 1);
}

/// Feed whose subjects each count their own changes from 1.
#[derive(Default)]
struct PerSubjectFeed {
	counters: Mutex<FxHashMap<Subject, u64>>,
	subscribers: Mutex<Vec<(StoreSubscription, Vec<Subject>, ChangeCallback)>>,
	next: AtomicUsize,
}

impl PerSubjectFeed {
	fn touch(&self, subject: &Subject) -> u64 {
		let ts = {
			let mut counters = self.counters.lock();
			let counter = counters.entry(subject.clone()).or_insert(0);
			*counter += 1;
			*counter
		};
		let callbacks: Vec<ChangeCallback> = self
			.subscribers
			.lock()
			.iter()
			.filter(|(_, filter, _)| filter.contains(subject))
			.map(|(_, _, callback)| callback.clone())
			.collect();
		for callback in callbacks {
			callback(subject, ts);
		}
		ts
	}
}

impl ChangeFeed for PerSubjectFeed {
	fn subscribe_to_changes(&self, filter: &[Subject], callback: ChangeCallback) -> StoreSubscription {
		let sub = StoreSubscription(self.next.fetch_add(1, Ordering::Relaxed) as u64);
		self.subscribers.lock().push((sub, filter.to_vec(), callback));
		sub
	}

	fn unsubscribe(&self, subscription: StoreSubscription) {
		self.subscribers.lock().retain(|(sub, _, _)| *sub != subscription);
	}
}

#[test]
fn lagging_subject_counter_still_notifies() {
	let feed = Arc::new(PerSubjectFeed::default());
	let tracker = Tracker::new(feed.clone());
	let (seen, on_change) = recorder();
	let mut handle = tracker.subscribe(DependencySet::from_subjects(&Identity, [subject(1), subject(2)]), on_change);

	for _ in 0..3 {
		feed.touch(&subject(1));
	}
	feed.touch(&subject(2));
	assert_eq!(*seen.lock(), vec![1, 2, 3, 1]);

	tracker.resubscribe(&mut handle, DependencySet::from_subjects(&Identity, [subject(2), subject(3)]));
	feed.touch(&subject(3));
	feed.touch(&subject(2));
	feed.touch(&subject(1));
	assert_eq!(*seen.lock(), vec![1, 2, 3, 1, 1, 2]);
	assert_eq!(handle.last_seen(&subject(2)), 2);
	assert_eq!(feed.subscribers.lock().len(), 1);
}

#[test]
fn change_before_attach_is_caught_up() {
	let store = Arc::new(MemoryStore::new());
	let tracker = Tracker::new(store.clone());
	let set = deps(&store, &[1, 2]);
	let missed = store.touch(&subject(1));

	let (seen, on_change) = recorder();
	let handle = tracker.subscribe(set, on_change);
	assert!(seen.lock().is_empty());

	handle.catch_up(&*store);
	handle.catch_up(&*store);
	assert_eq!(*seen.lock(), vec![missed]);

	let next = store.touch(&subject(2));
	assert_eq!(*seen.lock(), vec![missed, next]);
}

#[test]
fn no_callback_runs_after_drop_returns() {
	let store = Arc::new(MemoryStore::new());
	let tracker = Tracker::new(store.clone());
	let calls = Arc::new(AtomicUsize::new(0));
	let dropped = Arc::new(AtomicBool::new(false));

	let handle = {
		let calls = calls.clone();
		let dropped = dropped.clone();
		tracker.subscribe(deps(&store, &[1]), move |_| {
			assert!(!dropped.load(Ordering::Acquire), "callback after unsubscribe");
			calls.fetch_add(1, Ordering::AcqRel);
		})
	};

	let stop = Arc::new(AtomicBool::new(false));
	let writer = {
		let store = store.clone();
		let stop = stop.clone();
		thread::spawn(move || {
			while !stop.load(Ordering::Acquire) {
				store.touch(&subject(1));
			}
		})
	};

	while calls.load(Ordering::Acquire) == 0 {
		thread::yield_now();
	}
	drop(handle);
	dropped.store(true, Ordering::Release);
	let after = calls.load(Ordering::Acquire);
	for _ in 0..100 {
		store.touch(&subject(1));
	}
	stop.store(true, Ordering::Release);
	writer.join().expect("writer thread");

	assert_eq!(calls.load(Ordering::Acquire), after);
}

proptest! {
	/// With D1 a subset of D2, changes in D1 reach both subscribers and
	/// changes only in D2 reach only D2's subscriber.
	#[test]
	fn subset_subscriptions_are_independent(
		d2 in proptest::collection::btree_set(0usize..8, 1..8),
		pick in proptest::collection::vec(any::<bool>(), 8),
		changes in proptest::collection::vec(0usize..10, 1..20),
	) {
		let d2: Vec<usize> = d2.into_iter().collect();
		let d1: Vec<usize> = d2.iter().copied().zip(&pick).filter(|(_, keep)| **keep).map(|(n, _)| n).collect();

		let store = Arc::new(MemoryStore::new());
		let tracker = Tracker::new(store.clone());
		let (seen1, on1) = recorder();
		let (seen2, on2) = recorder();
		let _h1 = tracker.subscribe(deps(&store, &d1), on1);
		let _h2 = tracker.subscribe(deps(&store, &d2), on2);

		let mut expect1 = Vec::new();
		let mut expect2 = Vec::new();
		for n in changes {
			let ts = store.touch(&subject(n));
			if d1.contains(&n) {
				expect1.push(ts);
			}
			if d2.contains(&n) {
				expect2.push(ts);
			}
		}

		prop_assert_eq!(&*seen1.lock(), &expect1);
		prop_assert_eq!(&*seen2.lock(), &expect2);
	}

	/// After unsubscribing, changes to the former dependencies produce no callbacks.
	#[test]
	fn unsubscribed_instances_stay_silent(
		members in proptest::collection::btree_set(0usize..6, 1..6),
		changes in proptest::collection::vec(0usize..6, 0..16),
	) {
		let members: Vec<usize> = members.into_iter().collect();
		let store = Arc::new(MemoryStore::new());
		let tracker = Tracker::new(store.clone());
		let (seen, on_change) = recorder();
		let handle = tracker.subscribe(deps(&store, &members), on_change);
		drop(handle);

		for n in changes {
			store.touch(&subject(n));
		}
		prop_assert!(seen.lock().is_empty());
	}
}
