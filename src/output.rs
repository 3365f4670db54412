//! CLI output formatting.
//!
//! Each piece of operator-facing text has a `format_*` function (returns
//! `String` or `Vec<String>`) for testability. The session loop and `main`
//! write the lines out; format functions are pure.
//!
//! # Output Format
//!
//! ## Menu
//!
//! ```text
//! Options:
//! 1. Apply Grayscale Filter
//! ...
//! 19. Exit without Saving
//! ```
//!
//! ## Status
//!
//! ```text
//! Edited 640x480 | 3 undo, 1 redo
//! ```
//!
//! ## Apply
//!
//! ```text
//! 001 sepia (0.5)
//! 002 brightness +20, contrast 1.2
//! Saved 2 edits → out.png
//! ```

use crate::history::EditSession;
use crate::imaging::Edit;
use crate::session::MenuChoice;
use std::path::Path;

pub const WELCOME: &str = "Welcome to the Advanced Image Filter & Editing Application!";

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// The numbered menu, one line per command.
pub fn format_menu() -> Vec<String> {
    let mut lines = vec![String::new(), "Options:".to_string()];
    lines.extend(
        MenuChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| format!("{}. {}", i + 1, choice.label())),
    );
    lines
}

/// One-line summary of the session's image and history depth.
pub fn format_status(session: &EditSession) -> String {
    let (width, height) = session.current().dimensions();
    let state = if session.is_dirty() { "Edited" } else { "Original" };
    format!(
        "{state} {width}x{height} | {} undo, {} redo",
        session.undo_depth(),
        session.redo_depth()
    )
}

/// Line for one applied step in `apply` mode.
pub fn format_apply_step(index: usize, edit: &Edit) -> String {
    format!("{} {}", format_index(index), edit)
}

/// Summary after `apply` writes its output.
pub fn format_apply_summary(count: usize, output: &Path) -> String {
    let noun = if count == 1 { "edit" } else { "edits" };
    format!("Saved {count} {noun} → {}", output.display())
}
