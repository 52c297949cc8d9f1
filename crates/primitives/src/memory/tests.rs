use std::sync::Arc;

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use super::MemoryStore;
use crate::store::{Canonicalize, ChangeFeed, EntityStore, LoadMode};
use crate::term::{Literal, Subject, Triple};
use crate::vocab;

fn subject(iri: &str) -> Subject {
	Subject::named(iri)
}

fn recorder() -> (Arc<Mutex<Vec<u64>>>, crate::ChangeCallback) {
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	(seen, Arc::new(move |_: &Subject, ts: u64| sink.lock().push(ts)))
}

#[test]
fn triples_keep_insertion_order() {
	let s = subject("https://ex.org/1");
	let store = MemoryStore::with_triples([
		Triple::new(s.clone(), "https://ex.org/tag", Literal::string("a")),
		Triple::new(s.clone(), "https://ex.org/tag", Literal::string("b")),
		Triple::new(s.clone(), vocab::RDF_TYPE, subject("https://ex.org/Thing")),
	]);

	let values: Vec<_> = store
		.entity_triples(&s)
		.iter()
		.map(|t| t.object.lexical().to_string())
		.collect();
	assert_eq!(values, vec!["a", "b", "https://ex.org/Thing"]);
	assert!(store.entity_triples(&subject("https://ex.org/unknown")).is_empty());
}

#[test]
fn timestamps_are_monotonic_per_subject() {
	let s = subject("https://ex.org/1");
	let store = MemoryStore::new();
	assert_eq!(store.change_timestamp(&s), 0);

	let first = store.touch(&s);
	let second = store.touch(&s);
	assert!(second > first);
	assert_eq!(store.change_timestamp(&s), second);
}

#[test]
fn aliases_share_canonical_data() {
	let canonical = subject("https://ex.org/canonical");
	let alias = subject("https://ex.org/alias");
	let store = MemoryStore::new();
	store.add(Triple::new(alias.clone(), "https://ex.org/name", Literal::string("x")));
	store.alias(&alias, &canonical);

	assert_eq!(store.canonicalize(&alias), canonical);
	assert_eq!(store.entity_triples(&canonical).len(), 1);
	assert_eq!(store.entity_triples(&alias).len(), 1);
	assert_eq!(store.change_timestamp(&alias), store.change_timestamp(&canonical));
}

#[test]
fn chained_aliases_collapse() {
	let a = subject("https://ex.org/a");
	let b = subject("https://ex.org/b");
	let c = subject("https://ex.org/c");
	let store = MemoryStore::new();
	store.alias(&a, &b);
	store.alias(&b, &c);

	assert_eq!(store.canonicalize(&a), c);
	assert_eq!(store.canonicalize(&b), c);
}

#[test]
fn feed_notifies_only_filtered_subjects() {
	let watched = subject("https://ex.org/watched");
	let other = subject("https://ex.org/other");
	let store = MemoryStore::new();
	let (seen, callback) = recorder();
	store.subscribe_to_changes(std::slice::from_ref(&watched), callback);

	store.touch(&other);
	let ts = store.touch(&watched);

	assert_eq!(*seen.lock(), vec![ts]);
}

#[test]
fn feed_canonicalizes_filter() {
	let canonical = subject("https://ex.org/canonical");
	let alias = subject("https://ex.org/alias");
	let store = MemoryStore::new();
	store.alias(&alias, &canonical);
	let (seen, callback) = recorder();
	store.subscribe_to_changes(std::slice::from_ref(&alias), callback);

	let ts = store.touch(&canonical);
	assert_eq!(*seen.lock(), vec![ts]);
}

#[test]
fn unsubscribe_stops_delivery() {
	let s = subject("https://ex.org/1");
	let store = MemoryStore::new();
	let (seen, callback) = recorder();
	let sub = store.subscribe_to_changes(std::slice::from_ref(&s), callback);
	store.unsubscribe(sub);
	store.touch(&s);

	assert!(seen.lock().is_empty());
	assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn stale_handle_does_not_remove_reused_slot() {
	let s = subject("https://ex.org/1");
	let store = MemoryStore::new();
	let (_, first_cb) = recorder();
	let first = store.subscribe_to_changes(std::slice::from_ref(&s), first_cb);
	store.unsubscribe(first);

	let (seen, second_cb) = recorder();
	store.subscribe_to_changes(std::slice::from_ref(&s), second_cb);
	store.unsubscribe(first);

	let ts = store.touch(&s);
	assert_eq!(*seen.lock(), vec![ts]);
}

#[test]
fn handles_are_never_reissued() {
	let s = subject("https://ex.org/1");
	let store = MemoryStore::new();
	let mut issued = Vec::new();
	for _ in 0..4 {
		let (_, callback) = recorder();
		let sub = store.subscribe_to_changes(std::slice::from_ref(&s), callback);
		store.unsubscribe(sub);
		issued.push(sub);
	}
	issued.dedup();
	assert_eq!(issued.len(), 4);

	let (seen, callback) = recorder();
	let live = store.subscribe_to_changes(std::slice::from_ref(&s), callback);
	for sub in issued {
		store.unsubscribe(sub);
	}
	assert_eq!(store.subscriber_count(), 1);
	let ts = store.touch(&s);
	assert_eq!(*seen.lock(), vec![ts]);
	store.unsubscribe(live);
	assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn callback_receives_filtered_subject() {
	let canonical = subject("https://ex.org/canonical");
	let alias = subject("https://ex.org/alias");
	let store = MemoryStore::new();
	let seen = Arc::new(Mutex::new(Vec::new()));
	let sink = seen.clone();
	store.subscribe_to_changes(
		&[alias.clone(), canonical.clone()],
		Arc::new(move |subject: &Subject, ts: u64| sink.lock().push((subject.clone(), ts))),
	);

	let first = store.touch(&canonical);
	store.alias(&alias, &canonical);
	let after = store.change_timestamp(&canonical);

	assert_eq!(
		*seen.lock(),
		vec![(canonical.clone(), first), (alias, after - 1), (canonical, after)]
	);
}

#[test]
fn documents_strip_fragments() {
	let store = MemoryStore::new();
	assert_eq!(
		store.enclosing_document(&subject("https://ex.org/page#item")),
		Some(subject("https://ex.org/page"))
	);
	assert_eq!(
		store.enclosing_document(&subject("https://ex.org/page")),
		Some(subject("https://ex.org/page"))
	);
	assert_eq!(store.enclosing_document(&store.blank_node()), None);
}

#[test]
fn load_requests_are_recorded() {
	let s = subject("https://ex.org/1");
	let store = MemoryStore::new();
	store.ensure_loaded(&s, LoadMode::Fetch);
	store.ensure_loaded(&s, LoadMode::Get);

	assert_eq!(
		store.load_requests(),
		vec![(s.clone(), LoadMode::Fetch), (s, LoadMode::Get)]
	);
}
