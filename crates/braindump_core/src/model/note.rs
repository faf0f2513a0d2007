//! Note record, note kinds, and presentation tag catalog.
//!
//! # Invariants
//! - `id` is assigned once at creation and stays stable.
//! - `timestamp` is the creation time and is never rewritten.
//! - `font` and `font_size` are opaque tags; the core never interprets them.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fallback title for notes whose first line is empty.
pub const UNTITLED_NOTE: &str = "Untitled Note";
/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 50;
pub const DEFAULT_FONT: &str = "font-sans";
pub const DEFAULT_FONT_SIZE: &str = "text-base";

/// Font tags offered to hosts as `(tag, label)`.
pub const FONT_OPTIONS: &[(&str, &str)] = &[
    ("font-sans", "Sans Serif"),
    ("font-serif", "Serif"),
    ("font-mono", "Monospace"),
];

/// Font size tags offered to hosts as `(tag, label)`.
pub const FONT_SIZE_OPTIONS: &[(&str, &str)] = &[
    ("text-sm", "Small"),
    ("text-base", "Medium"),
    ("text-lg", "Large"),
    ("text-xl", "Extra Large"),
];

/// Opaque note identifier.
///
/// New ids are UUID v4 strings. Any string is accepted when reading stored
/// collections so older id formats survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Allocates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of note, which selects the assistant prompt template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// Unstructured free writing.
    #[default]
    Braindump,
    /// Structured concept to be developed.
    Idea,
}

impl NoteType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Braindump => "braindump",
            Self::Idea => "idea",
        }
    }

    /// Parses the serialized tag; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "braindump" => Some(Self::Braindump),
            "idea" => Some(Self::Idea),
            _ => None,
        }
    }
}

/// Persisted note record.
///
/// Serialized with camelCase keys (`fontSize`) and `type` for the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NoteType,
    pub font: String,
    pub font_size: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Note {
    /// Creates an empty braindump note with default presentation tags.
    pub fn new(timestamp: i64) -> Self {
        Self {
            id: NoteId::generate(),
            content: String::new(),
            kind: NoteType::Braindump,
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE.to_string(),
            timestamp,
            title: None,
        }
    }

    /// Title derived from current content, ignoring the cached copy.
    pub fn display_title(&self) -> String {
        derive_title(&self.content)
    }
}

/// Derives a note title from its content.
///
/// Takes the first line, keeps at most 50 characters, and falls back to
/// `"Untitled Note"` when that line is empty.
pub fn derive_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or_default();
    let title: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
    if title.is_empty() {
        UNTITLED_NOTE.to_string()
    } else {
        title
    }
}
