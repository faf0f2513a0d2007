mod common;

use braindump_core::model::note::{DEFAULT_FONT, DEFAULT_FONT_SIZE, UNTITLED_NOTE};
use braindump_core::repo::note_repo::NOTES_KEY;
use braindump_core::{Note, NoteId, NoteStoreError, NoteType};
use common::{fresh, store_over, RecordingStore};
use std::collections::HashSet;
use std::rc::Rc;

fn stored_notes(kv: &RecordingStore) -> Vec<Note> {
    let raw = kv.writes_for(NOTES_KEY).pop().expect("notes should be written");
    serde_json::from_str(&raw).expect("stored notes should parse")
}

fn ids(notes: &[Note]) -> Vec<NoteId> {
    notes.iter().map(|note| note.id.clone()).collect()
}

#[test]
fn initialize_on_empty_store_seeds_one_default_note() {
    let fixture = fresh();
    let store = &fixture.store;

    assert_eq!(store.notes().len(), 1);
    let active = store.active().expect("a note should be active");
    assert_eq!(active.id, store.notes()[0].id);
    assert_eq!(active.kind, NoteType::Braindump);
    assert_eq!(active.timestamp, common::START_MS);
    assert!(store.buffer().content.is_empty());
    assert_eq!(store.buffer().font, DEFAULT_FONT);
    assert_eq!(store.buffer().font_size, DEFAULT_FONT_SIZE);
    assert_eq!(stored_notes(&fixture.kv).len(), 1);
}

#[test]
fn initialize_restores_last_inserted_note_without_writing() {
    let mut newest = Note::new(300);
    newest.content = "newest by time".to_string();
    let mut last = Note::new(100);
    last.content = "last by order".to_string();
    last.kind = NoteType::Idea;
    last.font = "font-mono".to_string();

    let kv = Rc::new(RecordingStore::default());
    kv.seed(
        NOTES_KEY,
        &serde_json::to_string(&vec![newest.clone(), last.clone()]).unwrap(),
    );
    let mut fixture = store_over(kv);
    fixture.store.initialize();

    assert_eq!(fixture.store.notes(), &[newest, last.clone()]);
    assert_eq!(fixture.store.active_id(), Some(&last.id));
    assert_eq!(fixture.store.buffer().content, "last by order");
    assert_eq!(fixture.store.buffer().kind, NoteType::Idea);
    assert_eq!(fixture.store.buffer().font, "font-mono");
    assert!(fixture.kv.writes_for(NOTES_KEY).is_empty());
}

#[test]
fn initialize_with_malformed_data_seeds_fresh_note() {
    let kv = Rc::new(RecordingStore::default());
    kv.seed(NOTES_KEY, "[{\"id\": 1,");
    let mut fixture = store_over(kv);
    fixture.store.initialize();

    assert_eq!(fixture.store.notes().len(), 1);
    assert!(fixture.store.notes()[0].content.is_empty());
}

#[test]
fn created_note_ids_are_pairwise_distinct() {
    let mut fixture = fresh();
    for _ in 0..50 {
        fixture.store.create_note();
    }
    let unique: HashSet<NoteId> = ids(fixture.store.notes()).into_iter().collect();
    assert_eq!(unique.len(), 51);
}

#[test]
fn create_note_commits_outgoing_buffer_and_resets_editor() {
    let mut fixture = fresh();
    let first = fixture.store.active_id().cloned().unwrap();
    fixture.store.set_content("morning pages\nmore");
    fixture.store.set_note_type(NoteType::Idea);
    fixture.store.set_font_size("text-xl");

    let second = fixture.store.create_note();

    let notes = fixture.store.notes();
    assert_eq!(ids(notes), vec![first, second.clone()]);
    assert_eq!(notes[0].content, "morning pages\nmore");
    assert_eq!(notes[0].kind, NoteType::Idea);
    assert_eq!(notes[0].font_size, "text-xl");
    assert_eq!(notes[0].title.as_deref(), Some("morning pages"));
    assert_eq!(fixture.store.active_id(), Some(&second));
    assert!(fixture.store.buffer().content.is_empty());
    assert_eq!(fixture.store.buffer().kind, NoteType::Braindump);
    assert_eq!(fixture.store.buffer().font_size, DEFAULT_FONT_SIZE);
    assert_eq!(stored_notes(&fixture.kv), fixture.store.notes());
}

#[test]
fn save_active_note_is_idempotent() {
    let mut fixture = fresh();
    fixture.store.set_content("same text");
    fixture.store.save_active_note();
    let after_first = fixture.store.notes().to_vec();
    let stored_first = fixture.kv.writes_for(NOTES_KEY).pop();

    fixture.store.save_active_note();
    assert_eq!(fixture.store.notes(), after_first.as_slice());
    assert_eq!(fixture.kv.writes_for(NOTES_KEY).pop(), stored_first);
    assert_eq!(fixture.store.active(), after_first.last());
}

#[test]
fn explicit_save_with_pending_autosave_writes_once() {
    let mut fixture = fresh();
    fixture.store.set_content("draft");
    fixture.store.set_font("font-mono");
    fixture.kv.clear_writes();

    assert!(fixture.store.commit_active_note());
    assert!(!fixture.store.has_pending_autosave());
    assert!(fixture.kv.writes_for(NOTES_KEY).is_empty());

    fixture.store.sync_to_store().unwrap();
    assert_eq!(fixture.kv.writes_for(NOTES_KEY).len(), 1);
    let stored = stored_notes(&fixture.kv);
    assert_eq!(stored[0].content, "draft");
    assert_eq!(stored[0].font, "font-mono");
    assert_eq!(stored[0].title.as_deref(), Some("draft"));
}

#[test]
fn save_recomputes_title_with_fallback() {
    let mut fixture = fresh();
    fixture.store.set_content("");
    fixture.store.save_active_note();
    assert_eq!(fixture.store.notes()[0].title.as_deref(), Some(UNTITLED_NOTE));

    fixture.store.set_content("y".repeat(60));
    fixture.store.save_active_note();
    let expected = "y".repeat(50);
    assert_eq!(fixture.store.notes()[0].title.as_deref(), Some(expected.as_str()));
}

#[test]
fn load_note_keeps_unsaved_edits_of_outgoing_note() {
    let mut fixture = fresh();
    let a = fixture.store.active_id().cloned().unwrap();
    let b = fixture.store.create_note();
    fixture.store.load_note(&a).unwrap();
    fixture.store.set_content("edited a");

    fixture.store.load_note(&b).unwrap();

    let notes = fixture.store.notes();
    assert_eq!(ids(notes), vec![a.clone(), b.clone()]);
    assert_eq!(notes[0].content, "edited a");
    assert_eq!(fixture.store.active_id(), Some(&b));
    assert!(fixture.store.buffer().content.is_empty());
    assert_eq!(stored_notes(&fixture.kv)[0].content, "edited a");
}

#[test]
fn load_unknown_note_is_rejected_without_state_change() {
    let mut fixture = fresh();
    fixture.store.set_content("unsaved");
    let before = fixture.store.notes().to_vec();

    let missing = NoteId::from("not-a-note");
    let err = fixture.store.load_note(&missing).unwrap_err();

    assert!(matches!(err, NoteStoreError::NoteNotFound(id) if id == missing));
    assert_eq!(fixture.store.notes(), before.as_slice());
    assert_eq!(fixture.store.buffer().content, "unsaved");
}

#[test]
fn deleting_active_note_selects_last_remaining() {
    let mut fixture = fresh();
    let a = fixture.store.active_id().cloned().unwrap();
    let b = fixture.store.create_note();
    let c = fixture.store.create_note();
    fixture.store.load_note(&b).unwrap();

    assert!(fixture.store.delete_note(&b));

    assert_eq!(ids(fixture.store.notes()), vec![a.clone(), c.clone()]);
    assert_eq!(fixture.store.active_id(), Some(&c));
    assert_eq!(ids(&stored_notes(&fixture.kv)), vec![a, c]);
}

#[test]
fn deleting_active_note_does_not_resurrect_its_buffer() {
    let mut fixture = fresh();
    let a = fixture.store.active_id().cloned().unwrap();
    let b = fixture.store.create_note();
    fixture.store.set_content("about to vanish");

    fixture.store.delete_note(&b);

    assert_eq!(ids(fixture.store.notes()), vec![a.clone()]);
    assert_eq!(fixture.store.active_id(), Some(&a));
    assert!(stored_notes(&fixture.kv)
        .iter()
        .all(|note| note.content != "about to vanish"));
}

#[test]
fn deleting_sole_note_seeds_fresh_default_note() {
    let mut fixture = fresh();
    let only = fixture.store.active_id().cloned().unwrap();
    fixture.store.set_content("gone soon");
    fixture.store.set_note_type(NoteType::Idea);

    fixture.store.delete_note(&only);

    let notes = fixture.store.notes();
    assert_eq!(notes.len(), 1);
    assert_ne!(notes[0].id, only);
    assert!(notes[0].content.is_empty());
    assert_eq!(notes[0].kind, NoteType::Braindump);
    assert_eq!(fixture.store.active_id(), Some(&notes[0].id));
    assert_eq!(fixture.store.buffer().kind, NoteType::Braindump);
}

#[test]
fn deleting_inactive_note_keeps_editor_untouched() {
    let mut fixture = fresh();
    let a = fixture.store.active_id().cloned().unwrap();
    let b = fixture.store.create_note();
    fixture.store.set_content("editing b");

    assert!(fixture.store.delete_note(&a));

    assert_eq!(ids(fixture.store.notes()), vec![b.clone()]);
    assert_eq!(fixture.store.active_id(), Some(&b));
    assert_eq!(fixture.store.buffer().content, "editing b");
}

#[test]
fn deleting_absent_note_is_noop() {
    let mut fixture = fresh();
    fixture.kv.clear_writes();
    assert!(!fixture.store.delete_note(&NoteId::from("missing")));
    assert_eq!(fixture.store.notes().len(), 1);
    assert!(fixture.kv.writes_for(NOTES_KEY).is_empty());
}

#[test]
fn empty_collection_is_never_written() {
    let mut fixture = fresh();
    for _ in 0..3 {
        let active = fixture.store.active_id().cloned().unwrap();
        fixture.store.delete_note(&active);
    }
    fixture.store.save_active_note();

    let writes = fixture.kv.writes_for(NOTES_KEY);
    assert!(!writes.is_empty());
    for payload in writes {
        let notes: Vec<Note> = serde_json::from_str(&payload).unwrap();
        assert!(!notes.is_empty());
    }
}
