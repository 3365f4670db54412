//! # Image Editor
//!
//! An interactive command-line image editor. Load a photo, apply filters and
//! adjustments from a numbered menu, step back and forth through the edit
//! history, and save the result.
//!
//! # Architecture
//!
//! ```text
//! stdin ──▶ session (menu loop) ──▶ history (EditSession) ──▶ imaging (pure pixel ops)
//!                 │                                                  ▲
//!                 └──────── backend (decode / encode / preview) ─────┘
//! ```
//!
//! Every pixel operation is a pure function from `&RgbImage` to a new
//! `RgbImage`, so the history can keep whole snapshots and undo is a pointer
//! swap rather than a recomputation. The session loop is generic over
//! `BufRead`/`Write` and over the [`imaging::ImageBackend`] trait, which lets
//! tests script a full editing run in memory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Filters, brightness/contrast, preview rendering, codec backend |
//! | [`history`] | [`history::EditSession`]: original, current, undo and redo stacks |
//! | [`session`] | The interactive menu loop and the non-interactive `apply` runner |
//! | [`prompt`] | Validated numeric prompts that re-ask until input is in range |
//! | [`config`] | `editor.toml` loading and validation |
//! | [`output`] | Menu, status, and `apply` output formatting |
//!
//! # Design Decisions
//!
//! ## Preview As A File
//!
//! There is no GUI window. After every command the original and edited images
//! are scaled to a common width, placed side by side, and written to a PNG.
//! Any viewer that reloads on change shows edits as they happen, and the
//! editor itself stays a plain terminal program.
//!
//! ## Snapshot History
//!
//! Undo stores full images instead of inverse operations. Several filters
//! (posterize, edges, sketch) are not invertible, and snapshots make undo and
//! redo pixel-exact. The cost is memory; `history.max_depth` caps it.

pub mod config;
pub mod history;
pub mod imaging;
pub mod output;
pub mod prompt;
pub mod session;
