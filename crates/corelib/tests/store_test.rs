//! End-to-end scenarios through the file store facade.

use std::collections::HashMap;

use parking_lot::Mutex;
use ringstore_core::{Error, FileStore, HashRing, MemoryBackend, Node, RingConfig, StorageBackend};

fn store_abc() -> FileStore {
    let store = FileStore::new();
    for id in ["A", "B", "C"] {
        store.add_node(id).unwrap();
    }
    store
}

#[test]
fn test_store_retrieve_remove_cycle() {
    let store = store_abc();
    assert_eq!(store.ring().virtual_nodes(), 3);

    store.store_file("report.txt", "data").unwrap();
    assert_eq!(store.retrieve_file("report.txt").unwrap().as_deref(), Some("data"));
    assert!(store.contains_file("report.txt").unwrap());

    store.remove_file("report.txt").unwrap();
    assert!(!store.contains_file("report.txt").unwrap());
    assert_eq!(store.retrieve_file("report.txt").unwrap(), None);
}

#[test]
fn test_overwrite_and_empty_content() {
    let store = store_abc();
    store.store_file("a", "v1").unwrap();
    store.store_file("a", "v2").unwrap();
    assert_eq!(store.retrieve_file("a").unwrap().as_deref(), Some("v2"));

    store.store_file("empty", "").unwrap();
    assert_eq!(store.retrieve_file("empty").unwrap(), Some(String::new()));
    assert!(store.contains_file("empty").unwrap());
}

#[test]
fn test_membership_errors() {
    let store = FileStore::new();
    store.add_node("A").unwrap();
    assert_eq!(store.add_node("A").unwrap_err(), Error::AlreadyExists("A".into()));

    let empty = FileStore::new();
    assert_eq!(empty.remove_node("Z").unwrap_err(), Error::NotFound("Z".into()));
}

#[test]
fn test_empty_ring_is_the_only_facade_error() {
    let store = FileStore::new();
    assert_eq!(store.store_file("f", "x").unwrap_err(), Error::EmptyRing);
    assert_eq!(store.retrieve_file("f").unwrap_err(), Error::EmptyRing);
    assert_eq!(store.contains_file("f").unwrap_err(), Error::EmptyRing);
    assert_eq!(store.remove_file("f").unwrap_err(), Error::EmptyRing);

    store.add_node("A").unwrap();
    store.remove_node("A").unwrap();
    assert_eq!(store.retrieve_file("f").unwrap_err(), Error::EmptyRing);
}

#[test]
fn test_list_nodes_and_count() {
    let store = store_abc();
    assert_eq!(store.node_count(), 3);
    let mut ids: Vec<String> = store.list_nodes().iter().map(|n| n.id().to_owned()).collect();
    ids.sort();
    assert_eq!(ids, vec!["A", "B", "C"]);
}

/// Removing a node discards its files: nothing is migrated to the survivors.
#[test]
fn test_removing_node_loses_its_files() {
    let store = store_abc();
    let names: Vec<String> = (0..300).map(|i| format!("doc-{i}")).collect();
    for name in &names {
        store.store_file(name, name).unwrap();
    }

    let victim = store.locate(&names[0]).unwrap();
    let lost: Vec<&String> = names
        .iter()
        .filter(|n| store.locate(n).unwrap() == victim)
        .collect();
    let orphan = store.remove_node(&victim).unwrap();

    for name in &lost {
        assert_eq!(store.retrieve_file(name).unwrap(), None, "{name} was migrated");
        assert!(!store.contains_file(name).unwrap());
        assert!(orphan.contains_key(name));
    }
    for name in names.iter().filter(|n| !lost.contains(n)) {
        assert_eq!(store.retrieve_file(name).unwrap().as_deref(), Some(name.as_str()));
    }
}

/// Keys claimed by a newly joined node are not copied over either.
#[test]
fn test_joining_node_starts_empty() {
    let store = store_abc();
    let names: Vec<String> = (0..300).map(|i| format!("doc-{i}")).collect();
    for name in &names {
        store.store_file(name, "x").unwrap();
    }

    let joined = store.add_node("D").unwrap();
    assert!(joined.is_empty());
    for name in &names {
        let found = store.contains_file(name).unwrap();
        assert_eq!(found, store.locate(name).unwrap() != "D");
    }
}

#[test]
fn test_custom_ring_and_config() {
    let ring = HashRing::builder()
        .with_virtual_nodes(10)
        .add_node(Node::new("A"))
        .build()
        .unwrap();
    let store = FileStore::from(ring);
    assert_eq!(store.ring().entry_count(), 10);

    let config = RingConfig::from_json_str(r#"{ "digest": "xxh3", "nodes": ["x", "y"] }"#).unwrap();
    let store = FileStore::from_config(&config).unwrap();
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.ring().partitioner_name(), "Xxh3Partitioner");
}

/// Backend that records every write before delegating to memory.
#[derive(Default)]
struct JournalBackend {
    inner: MemoryBackend,
    journal: std::sync::Arc<Mutex<Vec<String>>>,
}

impl StorageBackend for JournalBackend {
    fn put(&self, key: &str, value: &str) {
        self.journal.lock().push(key.to_owned());
        self.inner.put(key, value);
    }
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }
    fn contains(&self, key: &str) -> bool {
        self.inner.contains(key)
    }
    fn delete(&self, key: &str) {
        self.inner.delete(key)
    }
    fn snapshot(&self) -> HashMap<String, String> {
        self.inner.snapshot()
    }
    fn len(&self) -> usize {
        self.inner.len()
    }
}

#[test]
fn test_custom_backend_node() {
    let backend = JournalBackend::default();
    let journal = std::sync::Arc::clone(&backend.journal);

    let store = FileStore::new();
    store.add(Node::with_backend("J", backend)).unwrap();
    assert_eq!(
        store.add(Node::new("J")).unwrap_err(),
        Error::AlreadyExists("J".into())
    );

    store.store_file("a.txt", "1").unwrap();
    store.store_file("b.txt", "2").unwrap();
    assert_eq!(store.retrieve_file("b.txt").unwrap().as_deref(), Some("2"));
    assert_eq!(*journal.lock(), vec!["a.txt", "b.txt"]);
}

#[test]
fn test_zero_vnode_ring_cannot_be_built() {
    let err = HashRing::with_partitioner(ringstore_core::AnyPartitioner::default(), 0).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
