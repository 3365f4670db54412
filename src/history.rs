//! Edit history: the original image, the current image, and two snapshot stacks.
//!
//! [`EditSession`] is the single owner of every image in a run. Mutations go
//! through [`EditSession::apply`] (or [`EditSession::commit`] for arbitrary
//! transforms), which moves the pre-edit image onto the undo stack and clears
//! redo. Undo and redo shuttle whole snapshots between the two stacks, so a
//! step back and forth restores pixel-exact buffers.
//!
//! ```text
//!          apply / reset                 undo
//! current ───────────────▶ undo  ◀────────────── redo
//!                                 ──────────────▶
//!                                      redo
//! ```
//!
//! By default both stacks are unbounded. [`EditSession::with_max_depth`]
//! caps the undo stack, dropping the oldest snapshots first.

use crate::imaging::Edit;
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Nothing to undo.")]
    NothingToUndo,
    #[error("Nothing to redo.")]
    NothingToRedo,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    original: RgbImage,
    current: RgbImage,
    undo: Vec<RgbImage>,
    redo: Vec<RgbImage>,
    max_depth: Option<usize>,
}

impl EditSession {
    /// Start a session on a freshly loaded image.
    pub fn new(image: RgbImage) -> Self {
        Self {
            current: image.clone(),
            original: image,
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth: None,
        }
    }

    /// Cap the undo stack at `max_depth` snapshots (`None` = unbounded).
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self.trim_undo();
        self
    }

    pub fn original(&self) -> &RgbImage {
        &self.original
    }

    pub fn current(&self) -> &RgbImage {
        &self.current
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// True once any mutating command has been recorded.
    pub fn is_dirty(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Apply `edit` to the current image, recording the previous one.
    pub fn apply(&mut self, edit: &Edit) {
        log::debug!("apply {edit}");
        self.commit(|current| edit.apply(current));
    }

    /// Replace the current image with `transform(current)`, recording the
    /// previous image for undo and clearing redo.
    pub fn commit(&mut self, transform: impl FnOnce(&RgbImage) -> RgbImage) {
        let next = transform(&self.current);
        let previous = std::mem::replace(&mut self.current, next);
        self.push_undo(previous);
        self.redo.clear();
    }

    pub fn undo(&mut self) -> Result<(), HistoryError> {
        let previous = self.undo.pop().ok_or(HistoryError::NothingToUndo)?;
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo.push(undone);
        log::debug!("undo (undo {}, redo {})", self.undo.len(), self.redo.len());
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), HistoryError> {
        let next = self.redo.pop().ok_or(HistoryError::NothingToRedo)?;
        let redone = std::mem::replace(&mut self.current, next);
        self.push_undo(redone);
        log::debug!("redo (undo {}, redo {})", self.undo.len(), self.redo.len());
        Ok(())
    }

    /// Snap back to the original image. Recorded like any other edit.
    pub fn reset(&mut self) {
        let original = self.original.clone();
        self.commit(move |_| original);
    }

    /// Consume the session, keeping only the edited image.
    pub fn into_current(self) -> RgbImage {
        self.current
    }

    fn push_undo(&mut self, snapshot: RgbImage) {
        self.undo.push(snapshot);
        self.trim_undo();
    }

    fn trim_undo(&mut self) {
        if let Some(max) = self.max_depth {
            if self.undo.len() > max {
                let excess = self.undo.len() - max;
                self.undo.drain(..excess);
                log::debug!("dropped {excess} oldest undo snapshot(s)");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{Filter, FilterRequest, apply_filter};
    use image::Rgb;

    fn red(size: u32) -> RgbImage {
        RgbImage::from_pixel(size, size, Rgb([255, 0, 0]))
    }

    fn gradient() -> RgbImage {
        RgbImage::from_fn(12, 8, |x, y| Rgb([x as u8 * 20, y as u8 * 30, 90]))
    }

    #[test]
    fn fresh_session_is_clean() {
        let session = EditSession::new(red(4));
        assert!(!session.is_dirty());
        assert_eq!(session.current(), session.original());
        assert_eq!(session.undo_depth(), 0);
        assert_eq!(session.redo_depth(), 0);
    }

    #[test]
    fn undo_on_fresh_session_reports_and_keeps_current() {
        let mut session = EditSession::new(red(4));
        let err = session.undo().unwrap_err();
        assert_eq!(err, HistoryError::NothingToUndo);
        assert_eq!(err.to_string(), "Nothing to undo.");
        assert_eq!(session.current(), &red(4));
    }

    #[test]
    fn redo_without_undo_reports() {
        let mut session = EditSession::new(red(4));
        session.apply(&Edit::from(Filter::Invert));
        assert_eq!(session.redo(), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn apply_pushes_previous_and_clears_redo() {
        let mut session = EditSession::new(gradient());
        session.apply(&Edit::from(Filter::Invert));
        session.undo().unwrap();
        assert_eq!(session.redo_depth(), 1);

        session.apply(&Edit::from(Filter::FlipVertical));
        assert_eq!(session.undo_depth(), 1);
        assert_eq!(session.redo_depth(), 0);
    }

    #[test]
    fn undo_redo_inverse_law() {
        let image = gradient();
        let mut session = EditSession::new(image.clone());
        let edits = [
            Edit::from(Filter::Sepia),
            Edit::Filter(FilterRequest::with_intensity(Filter::Posterize, 0.3)),
            Edit::BrightnessContrast {
                brightness: 20,
                contrast: 1.2,
            },
        ];

        for edit in &edits {
            let before = session.current().clone();
            session.apply(edit);
            let after = session.current().clone();

            session.undo().unwrap();
            assert_eq!(session.current(), &before, "undo after {edit}");
            session.redo().unwrap();
            assert_eq!(session.current(), &after, "redo after {edit}");
        }
        assert_eq!(session.undo_depth(), edits.len());
        assert_eq!(session.original(), &image);
    }

    #[test]
    fn grayscale_invert_undo_redo_scenario() {
        let image = red(100);
        let grayscale = apply_filter(Filter::Grayscale, &image, 1.0);
        let inverted = apply_filter(Filter::Invert, &grayscale, 1.0);

        let mut session = EditSession::new(image);
        session.apply(&Edit::from(Filter::Grayscale));
        session.apply(&Edit::from(Filter::Invert));

        session.undo().unwrap();
        assert_eq!(session.current(), &grayscale);

        session.redo().unwrap();
        assert_eq!(session.current(), &inverted);
    }

    #[test]
    fn reset_is_idempotent_and_recorded() {
        let image = gradient();
        let mut session = EditSession::new(image.clone());
        session.apply(&Edit::from(Filter::Invert));
        session.undo().unwrap();
        session.redo().unwrap();

        session.reset();
        assert_eq!(session.current(), &image);
        assert_eq!(session.undo_depth(), 2);
        assert_eq!(session.redo_depth(), 0);

        session.reset();
        assert_eq!(session.current(), &image);
        assert_eq!(session.undo_depth(), 3);
    }

    #[test]
    fn undo_after_reset_restores_edited_image() {
        let mut session = EditSession::new(gradient());
        session.apply(&Edit::from(Filter::Rotate));
        let rotated = session.current().clone();

        session.reset();
        session.undo().unwrap();
        assert_eq!(session.current(), &rotated);
    }

    #[test]
    fn original_is_never_mutated() {
        let image = gradient();
        let mut session = EditSession::new(image.clone());
        for filter in Filter::ALL {
            session.apply(&Edit::from(filter));
        }
        session.reset();
        session.undo().unwrap();
        assert_eq!(session.original(), &image);
    }

    #[test]
    fn max_depth_drops_oldest_snapshots() {
        let mut session = EditSession::new(gradient()).with_max_depth(Some(2));
        session.apply(&Edit::from(Filter::Invert));
        let after_first = session.current().clone();
        session.apply(&Edit::from(Filter::FlipHorizontal));
        session.apply(&Edit::from(Filter::FlipVertical));

        assert_eq!(session.undo_depth(), 2);
        session.undo().unwrap();
        session.undo().unwrap();
        assert_eq!(session.current(), &after_first);
        assert_eq!(session.undo(), Err(HistoryError::NothingToUndo));
    }

    #[test]
    fn commit_accepts_arbitrary_transforms() {
        let mut session = EditSession::new(gradient());
        session.commit(|image| apply_filter(Filter::Invert, image, 1.0));
        assert!(session.is_dirty());
        let edited = session.into_current();
        assert_eq!(edited, apply_filter(Filter::Invert, &gradient(), 1.0));
    }
}
