//! FFI use-case API for the note widget host.
//!
//! # Responsibility
//! - Expose the note lifecycle, autosave tick, prompt URL, theme flag,
//!   focus timer, and presentation catalogs as sync calls.
//! - Keep error semantics simple: envelopes carry `ok` and `message`.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - All note calls go through one process-wide store guarded by a mutex.
//! - The focus timer has its own mutex and never touches the store.

use braindump_core::db::open_db;
use braindump_core::model::note::{FONT_OPTIONS, FONT_SIZE_OPTIONS};
use braindump_core::service::clipboard::COPIED_CONFIRMATION_MS;
use braindump_core::service::focus_timer::COMPLETION_CUE_MS;
use braindump_core::{
    compose_prompt, core_version as core_version_inner, init_logging as init_logging_inner,
    launch_url, ping as ping_inner, Clock, FocusTimer, KvNoteRepository, Note, NoteId, NoteStore,
    NoteStoreConfig, NoteType, PreferenceRepository, SqliteKvStore, SystemClock, TimerEvent,
};
use log::{error, info};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const DB_FILE_NAME: &str = "braindump.sqlite3";
const DB_PATH_ENV: &str = "BRAINDUMP_DB_PATH";

type HostStore = NoteStore<KvNoteRepository<SqliteKvStore>, SystemClock>;

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: Mutex<Option<HostStore>> = Mutex::new(None);
static TIMER: Mutex<Option<FocusTimer>> = Mutex::new(None);

/// Minimal health-check API for host smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory for the rolling log files.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Repeating the same `level + log_dir` is a no-op; a different pair is
///   rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Sidebar row for one stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    /// Always derived from current content.
    pub title: String,
    pub note_type: String,
    pub font: String,
    pub font_size: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
}

/// Full editor state returned by every lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub ok: bool,
    pub message: String,
    /// Notes in creation order.
    pub notes: Vec<NoteItem>,
    pub active_id: Option<String>,
    /// Live-edit buffer of the active note.
    pub content: String,
    pub note_type: String,
    pub font: String,
    pub font_size: String,
    pub autosave_pending: bool,
}

impl EditorState {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            notes: Vec::new(),
            active_id: None,
            content: String::new(),
            note_type: NoteType::default().as_str().to_string(),
            font: String::new(),
            font_size: String::new(),
            autosave_pending: false,
        }
    }
}

/// Returns the current editor state, restoring stored notes on first call.
///
/// # FFI contract
/// - Sync call; the first call opens the database at `BRAINDUMP_DB_PATH`
///   (or the temp-dir default) and migrates it.
/// - Never panics; `ok = false` with a message when the store cannot open.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_state() -> EditorState {
    with_store("notes_state", |_| Ok(()))
}

/// Commits the current note and opens a new empty one.
///
/// # FFI contract
/// - Sync call; writes the collection once.
/// - Never panics; storage write failures are logged, not reported.
/// - Returned state has the new note active with an empty buffer.
#[flutter_rust_bridge::frb(sync)]
pub fn note_create() -> EditorState {
    with_store("note_create", |store| {
        store.create_note();
        Ok(())
    })
}

/// Commits the current note and opens note `id`.
///
/// # FFI contract
/// - Sync call.
/// - Unknown `id` returns `ok = false` and leaves the editor unchanged.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_load(id: String) -> EditorState {
    with_store("note_load", |store| {
        store
            .load_note(&NoteId::from(id))
            .map_err(|err| err.to_string())
    })
}

/// Permanently deletes note `id`.
///
/// # FFI contract
/// - Sync call; no undo.
/// - Deleting the active note opens the last remaining one, or a new
///   note when none remain.
/// - Unknown `id` returns `ok = false`. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(id: String) -> EditorState {
    with_store("note_delete", |store| {
        if store.delete_note(&NoteId::from(id.as_str())) {
            Ok(())
        } else {
            Err(format!("note not found: {id}"))
        }
    })
}

/// Replaces the active note's text; autosave follows after the quiet period.
///
/// # FFI contract
/// - Sync call, non-blocking; does not write.
/// - Returned state reports `autosave_pending = true`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_edit_content(content: String) -> EditorState {
    with_store("note_edit_content", |store| {
        store.set_content(content);
        Ok(())
    })
}

/// Sets the active note type (`braindump|idea`).
///
/// # FFI contract
/// - Sync call, non-blocking; schedules an autosave.
/// - Unknown types return `ok = false` without touching the buffer.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_set_type(note_type: String) -> EditorState {
    with_store("note_set_type", |store| {
        let kind = NoteType::parse(&note_type)
            .ok_or_else(|| format!("unsupported note type `{note_type}`"))?;
        store.set_note_type(kind);
        Ok(())
    })
}

/// Sets the active font tag; the value is stored as given.
///
/// # FFI contract
/// - Sync call, non-blocking; schedules an autosave.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_set_font(font: String) -> EditorState {
    with_store("note_set_font", |store| {
        store.set_font(font);
        Ok(())
    })
}

/// Sets the active font-size tag; the value is stored as given.
///
/// # FFI contract
/// - Sync call, non-blocking; schedules an autosave.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_set_font_size(font_size: String) -> EditorState {
    with_store("note_set_font_size", |store| {
        store.set_font_size(font_size);
        Ok(())
    })
}

/// Saves the active note now and reports storage failures.
///
/// # FFI contract
/// - Sync call; folds any pending autosave in and writes the collection once.
/// - Never panics; a failed write returns `ok = false` with the error.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save() -> EditorState {
    with_store("note_save", |store| {
        store.commit_active_note();
        store
            .sync_to_store()
            .map(|_| ())
            .map_err(|err| err.to_string())
    })
}

/// Drives the autosave timer; hosts call this from their frame/timer loop.
///
/// # FFI contract
/// - Sync call; writes only when the quiet period has elapsed.
/// - Never panics; returns `true` when a save happened.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_tick() -> bool {
    match lock_store() {
        Ok(mut guard) => guard.as_mut().is_some_and(|store| store.tick()),
        Err(err) => {
            error!("event=notes_tick module=ffi status=error error={err}");
            false
        }
    }
}

/// Assistant URL for the active buffer, or `None` when the text is blank.
///
/// # FFI contract
/// - Sync call, non-blocking; the host opens the URL itself.
/// - Never panics; `None` also when the store is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn note_prompt_url() -> Option<String> {
    let guard = lock_store().ok()?;
    let store = guard.as_ref()?;
    let buffer = store.buffer();
    compose_prompt(&buffer.content, buffer.kind).map(|prompt| launch_url(&prompt))
}

/// Stored dark-mode flag.
///
/// # FFI contract
/// - Sync call.
/// - Never panics; `false` when unset, unreadable, or the store is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_get_dark() -> bool {
    let Ok(guard) = lock_store() else {
        return false;
    };
    let Some(store) = guard.as_ref() else {
        return false;
    };
    PreferenceRepository::new(store.repository().store())
        .dark_mode()
        .unwrap_or_default()
}

/// Persists the dark-mode flag.
///
/// # FFI contract
/// - Sync call; one key-value write.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn theme_set_dark(enabled: bool) -> String {
    let guard = match lock_store() {
        Ok(guard) => guard,
        Err(err) => return err,
    };
    let Some(store) = guard.as_ref() else {
        return "note store unavailable".to_string();
    };
    match PreferenceRepository::new(store.repository().store()).set_dark_mode(enabled) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Focus timer snapshot returned by every timer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub running: bool,
    pub remaining_secs: u32,
    /// Remaining time as `MM:SS`.
    pub display: String,
    /// `true` only on the call that observed the countdown reach zero.
    pub completed: bool,
    /// How long the host plays the completion cue.
    pub cue_ms: i64,
}

/// Current focus timer state without advancing it.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_state() -> TimerState {
    with_timer(|_, _| false)
}

/// Starts a paused timer or pauses a running one.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Pausing discards a partially elapsed second.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_toggle() -> TimerState {
    with_timer(|timer, now_ms| {
        timer.toggle(now_ms);
        false
    })
}

/// Stops the timer and restores the full session length.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_reset() -> TimerState {
    with_timer(|timer, _| {
        timer.reset();
        false
    })
}

/// Advances a running timer by the whole seconds elapsed since the last tick.
///
/// # FFI contract
/// - Sync call, non-blocking; hosts call it from their frame/timer loop.
/// - Reaching zero stops and resets the timer and sets `completed`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn timer_tick() -> TimerState {
    with_timer(|timer, now_ms| {
        let completed = matches!(timer.tick(now_ms), Some(TimerEvent::Completed));
        if completed {
            info!("event=focus_timer module=ffi status=completed");
        }
        completed
    })
}

/// One entry of a presentation picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationOption {
    /// Tag stored on the note.
    pub value: String,
    pub label: String,
}

/// Known font tags with display labels, in picker order.
///
/// # FFI contract
/// - Sync call, non-blocking. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn font_options() -> Vec<PresentationOption> {
    to_options(FONT_OPTIONS)
}

/// Known font-size tags with display labels, smallest first.
///
/// # FFI contract
/// - Sync call, non-blocking. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn font_size_options() -> Vec<PresentationOption> {
    to_options(FONT_SIZE_OPTIONS)
}

/// How long the host shows the "copied" confirmation after a clipboard write.
///
/// # FFI contract
/// - Sync call, non-blocking. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn copy_confirmation_ms() -> i64 {
    COPIED_CONFIRMATION_MS
}

fn with_store(
    operation: &'static str,
    f: impl FnOnce(&mut HostStore) -> Result<(), String>,
) -> EditorState {
    let mut guard = match lock_store() {
        Ok(guard) => guard,
        Err(err) => return EditorState::failure(format!("{operation} failed: {err}")),
    };
    let Some(store) = guard.as_mut() else {
        return EditorState::failure(format!("{operation} failed: note store unavailable"));
    };

    match f(store) {
        Ok(()) => editor_state(store, true, String::new()),
        Err(err) => {
            info!("event={operation} module=ffi status=rejected error={err}");
            editor_state(store, false, format!("{operation} failed: {err}"))
        }
    }
}

/// Locks the store, opening and initializing it on first use.
fn lock_store() -> Result<MutexGuard<'static, Option<HostStore>>, String> {
    let mut guard = STORE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.is_none() {
        let db_path = resolve_db_path();
        let conn = open_db(&db_path).map_err(|err| format!("note DB open failed: {err}"))?;
        let mut store = NoteStore::new(
            KvNoteRepository::new(SqliteKvStore::new(conn)),
            SystemClock,
            NoteStoreConfig::default(),
        );
        store.initialize();
        info!(
            "event=store_open module=ffi status=ok db_path={}",
            db_path.display()
        );
        *guard = Some(store);
    }
    Ok(guard)
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn editor_state(store: &HostStore, ok: bool, message: String) -> EditorState {
    let buffer = store.buffer();
    EditorState {
        ok,
        message,
        notes: store.notes().iter().map(to_note_item).collect(),
        active_id: store.active_id().map(ToString::to_string),
        content: buffer.content.clone(),
        note_type: buffer.kind.as_str().to_string(),
        font: buffer.font.clone(),
        font_size: buffer.font_size.clone(),
        autosave_pending: store.has_pending_autosave(),
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.to_string(),
        title: note.display_title(),
        note_type: note.kind.as_str().to_string(),
        font: note.font.clone(),
        font_size: note.font_size.clone(),
        timestamp: note.timestamp,
    }
}

fn with_timer(f: impl FnOnce(&mut FocusTimer, i64) -> bool) -> TimerState {
    let mut guard = TIMER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let timer = guard.get_or_insert_with(FocusTimer::default);
    let completed = f(timer, SystemClock.now_ms());
    TimerState {
        running: timer.is_running(),
        remaining_secs: timer.remaining_secs(),
        display: timer.display(),
        completed,
        cue_ms: COMPLETION_CUE_MS,
    }
}

fn to_options(catalog: &[(&str, &str)]) -> Vec<PresentationOption> {
    catalog
        .iter()
        .map(|(value, label)| PresentationOption {
            value: (*value).to_string(),
            label: (*label).to_string(),
        })
        .collect()
}
