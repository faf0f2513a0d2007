//! Active-note lifecycle: create/load/save/delete with debounced autosave.
//!
//! # Responsibility
//! - Own the ordered note collection, the active note, and its edit buffer.
//! - Write the committed collection through the repository after mutations.
//! - Debounce edits into saves that target the note they were made on.
//!
//! # Invariants
//! - Note ids in the collection are pairwise distinct.
//! - Collection order is creation order; saves replace entries in place.
//! - Switching or creating notes commits the outgoing buffer first.
//! - After `initialize()`, an active note always exists.
//! - An empty collection is never written.
//! - Persistence failures are logged; in-memory state stays committed.

use crate::model::note::{derive_title, Note, NoteId, NoteType, DEFAULT_FONT, DEFAULT_FONT_SIZE};
use crate::repo::note_repo::{NoteRepository, RepoError, SaveOutcome};
use crate::service::autosave::Debouncer;
use crate::service::clock::Clock;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default quiet period before an edit burst is saved.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1_000;

/// Tunables for `NoteStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteStoreConfig {
    pub autosave_delay_ms: u64,
}

impl Default for NoteStoreConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
        }
    }
}

/// Error for note lifecycle calls.
#[derive(Debug)]
pub enum NoteStoreError {
    /// No note with this id exists in the collection.
    NoteNotFound(NoteId),
    /// Persistence-layer failure surfaced by an explicit sync.
    Repo(RepoError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<RepoError> for NoteStoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Live-edit fields of the active note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub content: String,
    pub kind: NoteType,
    pub font: String,
    pub font_size: String,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self {
            content: String::new(),
            kind: NoteType::Braindump,
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
        }
    }
}

impl EditBuffer {
    fn from_note(note: &Note) -> Self {
        Self {
            content: note.content.clone(),
            kind: note.kind,
            font: note.font.clone(),
            font_size: note.font_size.clone(),
        }
    }

    fn merge_into(&self, base: &Note) -> Note {
        Note {
            content: self.content.clone(),
            kind: self.kind,
            font: self.font.clone(),
            font_size: self.font_size.clone(),
            title: Some(derive_title(&self.content)),
            ..base.clone()
        }
    }
}

/// Buffer values captured when an autosave was scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveSnapshot {
    pub note_id: NoteId,
    pub buffer: EditBuffer,
}

/// Single-owner state machine for notes and the active editor.
pub struct NoteStore<R: NoteRepository, C: Clock> {
    repo: R,
    clock: C,
    notes: Vec<Note>,
    active: Option<Note>,
    buffer: EditBuffer,
    autosave: Debouncer<AutosaveSnapshot>,
}

impl<R: NoteRepository, C: Clock> NoteStore<R, C> {
    /// Creates an empty, uninitialized store. Call `initialize()` next.
    pub fn new(repo: R, clock: C, config: NoteStoreConfig) -> Self {
        Self {
            repo,
            clock,
            notes: Vec::new(),
            active: None,
            buffer: EditBuffer::default(),
            autosave: Debouncer::new(config.autosave_delay_ms),
        }
    }

    /// Restores the stored collection and reopens the last note.
    ///
    /// Seeds one empty note when nothing usable is stored. Reading never
    /// writes back.
    pub fn initialize(&mut self) {
        let stored = match self.repo.load_notes() {
            Ok(notes) => notes,
            Err(err) => {
                warn!("event=notes_init module=note_store status=degraded error={err}");
                Vec::new()
            }
        };

        let restored = stored.len();
        self.notes = stored;
        self.active = None;
        match self.notes.last().cloned() {
            Some(last) => {
                self.buffer = EditBuffer::from_note(&last);
                self.active = Some(last);
            }
            None => {
                self.create_note();
            }
        }
        info!("event=notes_init module=note_store status=ok restored={restored}");
    }

    /// Commits the outgoing buffer, then opens a fresh empty note.
    ///
    /// Returns the new note id.
    pub fn create_note(&mut self) -> NoteId {
        self.commit_buffer();

        let note = Note::new(self.clock.now_ms());
        let id = note.id.clone();
        self.notes.push(note.clone());
        self.active = Some(note);
        self.buffer = EditBuffer::default();
        self.persist();

        debug!(
            "event=note_create module=note_store status=ok note_id={id} count={}",
            self.notes.len()
        );
        id
    }

    /// Commits the outgoing buffer, then opens the stored note `id`.
    ///
    /// # Errors
    /// - `NoteNotFound` when `id` is not in the collection; nothing changes.
    pub fn load_note(&mut self, id: &NoteId) -> Result<(), NoteStoreError> {
        if self.position_of(id).is_none() {
            return Err(NoteStoreError::NoteNotFound(id.clone()));
        }

        if self.commit_buffer() {
            self.persist();
        }
        // Re-resolve after the commit so the canonical record is used.
        let Some(target) = self.position_of(id).map(|idx| self.notes[idx].clone()) else {
            return Err(NoteStoreError::NoteNotFound(id.clone()));
        };
        self.buffer = EditBuffer::from_note(&target);
        self.active = Some(target);

        debug!("event=note_load module=note_store status=ok note_id={id}");
        Ok(())
    }

    /// Snapshots the edit buffer into the collection and persists it.
    ///
    /// No-op without an active note. Idempotent for an unchanged buffer.
    pub fn save_active_note(&mut self) {
        if self.commit_buffer() {
            self.persist();
        }
    }

    /// Permanently removes note `id`.
    ///
    /// Deleting the active note opens the last remaining note, or a new one
    /// when none remain. Returns `false` when `id` was not stored.
    pub fn delete_note(&mut self, id: &NoteId) -> bool {
        let Some(idx) = self.position_of(id) else {
            return false;
        };
        self.notes.remove(idx);

        let was_active = self.active_id() == Some(id);
        if was_active {
            // The outgoing buffer belongs to the deleted note; never commit it.
            self.active = None;
            self.buffer = EditBuffer::default();
            match self.notes.last().map(|note| note.id.clone()) {
                Some(next) => {
                    self.persist();
                    if let Err(err) = self.load_note(&next) {
                        error!("event=note_delete module=note_store status=error error={err}");
                    }
                }
                None => {
                    self.create_note();
                }
            }
        } else {
            self.persist();
        }

        debug!(
            "event=note_delete module=note_store status=ok note_id={id} was_active={was_active} count={}",
            self.notes.len()
        );
        true
    }

    /// Replaces the buffer content and schedules an autosave.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.buffer.content = content.into();
        self.schedule_autosave();
    }

    pub fn set_note_type(&mut self, kind: NoteType) {
        self.buffer.kind = kind;
        self.schedule_autosave();
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.buffer.font = font.into();
        self.schedule_autosave();
    }

    pub fn set_font_size(&mut self, font_size: impl Into<String>) {
        self.buffer.font_size = font_size.into();
        self.schedule_autosave();
    }

    /// Fires the pending autosave when its quiet period has elapsed.
    ///
    /// Returns `true` when a snapshot was committed.
    pub fn tick(&mut self) -> bool {
        match self.autosave.poll(self.clock.now_ms()) {
            Some(snapshot) => self.apply_snapshot(snapshot),
            None => false,
        }
    }

    /// Commits the pending autosave immediately, if any.
    pub fn flush_autosave(&mut self) -> bool {
        match self.autosave.flush() {
            Some(snapshot) => self.apply_snapshot(snapshot),
            None => false,
        }
    }

    /// Folds the pending autosave and the edit buffer into the collection
    /// without writing it.
    ///
    /// Follow with `sync_to_store()` to save with a single write and see
    /// its outcome. Returns `false` when nothing was committed.
    pub fn commit_active_note(&mut self) -> bool {
        let flushed = match self.autosave.flush() {
            Some(snapshot) => self.merge_snapshot(snapshot),
            None => false,
        };
        self.commit_buffer() || flushed
    }

    /// Writes the committed collection and reports the outcome.
    pub fn sync_to_store(&self) -> Result<SaveOutcome, NoteStoreError> {
        Ok(self.repo.save_notes(&self.notes)?)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active(&self) -> Option<&Note> {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> Option<&NoteId> {
        self.active.as_ref().map(|note| &note.id)
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn has_pending_autosave(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Deadline of the pending autosave in epoch milliseconds.
    pub fn autosave_deadline_ms(&self) -> Option<i64> {
        self.autosave.deadline_ms()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn schedule_autosave(&mut self) {
        let Some(note_id) = self.active_id().cloned() else {
            return;
        };
        let snapshot = AutosaveSnapshot {
            note_id,
            buffer: self.buffer.clone(),
        };
        let now = self.clock.now_ms();
        self.autosave.schedule(snapshot, now);
    }

    fn apply_snapshot(&mut self, snapshot: AutosaveSnapshot) -> bool {
        let note_id = snapshot.note_id.clone();
        if !self.merge_snapshot(snapshot) {
            return false;
        }
        self.persist();
        debug!("event=autosave module=note_store status=ok note_id={note_id}");
        true
    }

    /// Merges a snapshot into its note in memory.
    ///
    /// Empty content and notes that no longer exist are skipped.
    fn merge_snapshot(&mut self, snapshot: AutosaveSnapshot) -> bool {
        if snapshot.buffer.content.is_empty() {
            return false;
        }

        let targets_active = self.active_id() == Some(&snapshot.note_id);
        let base = if targets_active {
            self.active.clone()
        } else {
            self.position_of(&snapshot.note_id)
                .map(|idx| self.notes[idx].clone())
        };
        let Some(base) = base else {
            debug!(
                "event=autosave module=note_store status=skipped reason=note_gone note_id={}",
                snapshot.note_id
            );
            return false;
        };

        let updated = snapshot.buffer.merge_into(&base);
        self.upsert(updated.clone());
        if targets_active {
            self.active = Some(updated);
        }
        true
    }

    /// Merges the buffer into the active note and its collection entry.
    ///
    /// Returns `false` when there is no active note.
    fn commit_buffer(&mut self) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        let updated = self.buffer.merge_into(active);
        self.upsert(updated.clone());
        self.active = Some(updated);
        true
    }

    fn upsert(&mut self, note: Note) {
        match self.position_of(&note.id) {
            Some(idx) => self.notes[idx] = note,
            None => self.notes.push(note),
        }
    }

    fn position_of(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| &note.id == id)
    }

    fn persist(&self) {
        if self.notes.is_empty() {
            return;
        }
        if let Err(err) = self.repo.save_notes(&self.notes) {
            error!(
                "event=notes_persist module=note_store status=error count={} error={err}",
                self.notes.len()
            );
        }
    }
}
