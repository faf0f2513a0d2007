#![allow(dead_code)]

use braindump_core::repo::kv_store::StoreResult;
use braindump_core::{KeyValueStore, KvNoteRepository, ManualClock, NoteStore, NoteStoreConfig};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const START_MS: i64 = 1_700_000_000_000;

/// Key-value store that keeps every write for later inspection.
#[derive(Default)]
pub struct RecordingStore {
    entries: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<(String, String)>>,
}

impl RecordingStore {
    pub fn writes_for(&self, key: &str) -> Vec<String> {
        self.writes
            .borrow()
            .iter()
            .filter(|(written_key, _)| written_key == key)
            .map(|(_, value)| value.clone())
            .collect()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for RecordingStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.seed(key, value);
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

pub type TestStore = NoteStore<KvNoteRepository<Rc<RecordingStore>>, Rc<ManualClock>>;

pub struct Fixture {
    pub store: TestStore,
    pub kv: Rc<RecordingStore>,
    pub clock: Rc<ManualClock>,
}

/// Builds an uninitialized store over `kv`.
pub fn store_over(kv: Rc<RecordingStore>) -> Fixture {
    let clock = Rc::new(ManualClock::new(START_MS));
    let store = NoteStore::new(
        KvNoteRepository::new(Rc::clone(&kv)),
        Rc::clone(&clock),
        NoteStoreConfig::default(),
    );
    Fixture { store, kv, clock }
}

/// Builds and initializes a store over an empty key-value store.
pub fn fresh() -> Fixture {
    let mut fixture = store_over(Rc::new(RecordingStore::default()));
    fixture.store.initialize();
    fixture
}
