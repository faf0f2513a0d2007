//! Copy-to-clipboard flow.

use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How long hosts show the "copied" confirmation.
pub const COPIED_CONFIRMATION_MS: i64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError(pub String);

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "clipboard write failed: {}", self.0)
    }
}

impl Error for ClipboardError {}

/// Host clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Copies `text` and reports whether the confirmation should be shown.
///
/// Failures are only logged; there is no retry.
pub fn copy_note_text(text: &str, clipboard: &impl Clipboard) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => {
            info!(
                "event=clipboard_copy module=clipboard status=ok chars={}",
                text.chars().count()
            );
            true
        }
        Err(err) => {
            error!("event=clipboard_copy module=clipboard status=error error={err}");
            false
        }
    }
}
