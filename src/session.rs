//! The interactive editing loop.
//!
//! [`Editor::run`] drives one [`EditSession`] from a line-oriented input:
//! render the preview, print the menu, read a choice, prompt for any numeric
//! parameters, and apply the command. The loop ends when the operator saves,
//! discards, presses the quit key, or input runs out.
//!
//! Input and output are generic (`BufRead` / `Write`), so the whole loop runs
//! under test with scripted input and a mock backend.

use crate::config::{ConfigError, PreviewConfig};
use crate::history::EditSession;
use crate::imaging::params::{BRIGHTNESS, CONTRAST, FILTER_INTENSITY, SATURATION};
use crate::imaging::rust_backend::supported_output_extensions;
use crate::imaging::{BackendError, Edit, Filter, FilterRequest, ImageBackend, write_preview};
use crate::output;
use crate::prompt;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key that leaves the loop without saving, entered at the menu prompt.
pub const QUIT_KEY: &str = "q";

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Could not load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        source: BackendError,
    },
    #[error("Could not save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: BackendError,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Load `path` through `backend` and open a session on it.
pub fn load_session(
    backend: &impl ImageBackend,
    path: &Path,
    max_depth: Option<usize>,
) -> Result<EditSession, EditorError> {
    let image = backend.load(path).map_err(|source| EditorError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(EditSession::new(image).with_max_depth(max_depth))
}

/// Load `input`, run `edits` in order, and save the result to `output`.
///
/// The edits go through an [`EditSession`] like interactive commands do,
/// with the same undo cap; the finished session is returned for inspection.
pub fn apply_to_file(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    edits: &[Edit],
    max_depth: Option<usize>,
) -> Result<EditSession, EditorError> {
    let mut session = load_session(backend, input, max_depth)?;
    for edit in edits {
        session.apply(edit);
    }
    backend
        .save(session.current(), output)
        .map_err(|source| EditorError::Save {
            path: output.to_path_buf(),
            source,
        })?;
    log::info!("wrote {} edit(s) to {}", edits.len(), output.display());
    Ok(session)
}

/// The fixed menu, in display order. Position `n` is menu number `n + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuChoice {
    Apply(Filter),
    BrightnessContrast,
    Undo,
    Redo,
    Reset,
    SaveAndExit,
    ExitWithoutSaving,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 19] = [
        MenuChoice::Apply(Filter::Grayscale),
        MenuChoice::Apply(Filter::Sepia),
        MenuChoice::Apply(Filter::Blur),
        MenuChoice::Apply(Filter::Invert),
        MenuChoice::Apply(Filter::Edges),
        MenuChoice::Apply(Filter::Sketch),
        MenuChoice::Apply(Filter::Posterize),
        MenuChoice::Apply(Filter::Emboss),
        MenuChoice::Apply(Filter::Sharpen),
        MenuChoice::Apply(Filter::FlipHorizontal),
        MenuChoice::Apply(Filter::FlipVertical),
        MenuChoice::Apply(Filter::Rotate),
        MenuChoice::BrightnessContrast,
        MenuChoice::Apply(Filter::Saturation),
        MenuChoice::Undo,
        MenuChoice::Redo,
        MenuChoice::Reset,
        MenuChoice::SaveAndExit,
        MenuChoice::ExitWithoutSaving,
    ];

    /// Parse a 1-based menu number.
    pub fn parse(input: &str) -> Option<MenuChoice> {
        let number: usize = input.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|i| MenuChoice::ALL.get(i))
            .copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Apply(filter) => match filter {
                Filter::Grayscale => "Apply Grayscale Filter",
                Filter::Sepia => "Apply Sepia Filter",
                Filter::Blur => "Apply Blur Filter",
                Filter::Invert => "Invert Colors",
                Filter::Edges => "Apply Edge Detection",
                Filter::Sketch => "Apply Sketch Effect",
                Filter::Posterize => "Apply Posterize Effect",
                Filter::Emboss => "Apply Emboss Effect",
                Filter::Sharpen => "Apply Sharpen Effect",
                Filter::FlipHorizontal => "Flip Horizontally",
                Filter::FlipVertical => "Flip Vertically",
                Filter::Rotate => "Rotate 90°",
                Filter::Saturation => "Adjust Saturation",
                Filter::Identity => "Leave Unchanged",
            },
            MenuChoice::BrightnessContrast => "Adjust Brightness and Contrast",
            MenuChoice::Undo => "Undo Last Change",
            MenuChoice::Redo => "Redo Last Change",
            MenuChoice::Reset => "Reset to Original",
            MenuChoice::SaveAndExit => "Save and Exit",
            MenuChoice::ExitWithoutSaving => "Exit without Saving",
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    Saved(PathBuf),
    Discarded,
    Quit,
    EndOfInput,
}

enum Flow {
    Continue,
    Exit(ExitReason),
}

/// An [`EditSession`] plus the backend and preview settings it runs with.
pub struct Editor<B: ImageBackend> {
    session: EditSession,
    backend: B,
    preview: PreviewConfig,
}

impl<B: ImageBackend> Editor<B> {
    pub fn new(session: EditSession, backend: B, preview: PreviewConfig) -> Self {
        Self {
            session,
            backend,
            preview,
        }
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn into_session(self) -> EditSession {
        self.session
    }

    /// Run the menu loop until the operator leaves or input ends.
    pub fn run(
        &mut self,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<ExitReason, EditorError> {
        loop {
            self.refresh_preview();
            for line in output::format_menu() {
                writeln!(out, "{line}")?;
            }
            let Some(reply) = prompt::ask(input, out, "Enter your choice: ")? else {
                writeln!(out, "Exiting...")?;
                return Ok(ExitReason::EndOfInput);
            };
            let reply = reply.trim();
            if reply.eq_ignore_ascii_case(QUIT_KEY) {
                writeln!(out, "Exiting...")?;
                return Ok(ExitReason::Quit);
            }
            let Some(choice) = MenuChoice::parse(reply) else {
                writeln!(out, "Invalid choice! Please try again.")?;
                continue;
            };
            match self.handle(choice, input, out)? {
                Flow::Continue => log::debug!("{}", output::format_status(&self.session)),
                Flow::Exit(reason) => {
                    log::info!("session ended: {reason:?}");
                    return Ok(reason);
                }
            }
        }
    }

    fn handle(
        &mut self,
        choice: MenuChoice,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> Result<Flow, EditorError> {
        match choice {
            MenuChoice::Apply(filter) => {
                let Some(request) = ask_filter_request(filter, input, out)? else {
                    return Ok(Flow::Exit(ExitReason::EndOfInput));
                };
                self.session.apply(&Edit::Filter(request));
            }
            MenuChoice::BrightnessContrast => {
                let Some(brightness) =
                    prompt::ask_number(input, out, "Enter brightness (-100 to 100): ", BRIGHTNESS)?
                else {
                    return Ok(Flow::Exit(ExitReason::EndOfInput));
                };
                let Some(contrast) =
                    prompt::ask_number(input, out, "Enter contrast (0.1 to 3.0): ", CONTRAST)?
                else {
                    return Ok(Flow::Exit(ExitReason::EndOfInput));
                };
                self.session.apply(&Edit::BrightnessContrast {
                    brightness,
                    contrast,
                });
            }
            MenuChoice::Undo => {
                if let Err(e) = self.session.undo() {
                    writeln!(out, "{e}")?;
                }
            }
            MenuChoice::Redo => {
                if let Err(e) = self.session.redo() {
                    writeln!(out, "{e}")?;
                }
            }
            MenuChoice::Reset => self.session.reset(),
            MenuChoice::SaveAndExit => {
                let Some(path) =
                    prompt::ask(input, out, "Enter the path to save the edited image: ")?
                else {
                    return Ok(Flow::Exit(ExitReason::EndOfInput));
                };
                let path = PathBuf::from(path.trim());
                match self.save(&path) {
                    Ok(()) => {
                        writeln!(out, "Image saved successfully!")?;
                        return Ok(Flow::Exit(ExitReason::Saved(path)));
                    }
                    Err(e) => {
                        log::warn!("{e}");
                        writeln!(out, "Error: {e}")?;
                        if let EditorError::Save {
                            source: BackendError::UnsupportedFormat(_),
                            ..
                        } = e
                        {
                            writeln!(
                                out,
                                "Supported formats: {}",
                                supported_output_extensions().join(", ")
                            )?;
                        }
                    }
                }
            }
            MenuChoice::ExitWithoutSaving => {
                writeln!(out, "Exiting without saving.")?;
                return Ok(Flow::Exit(ExitReason::Discarded));
            }
        }
        Ok(Flow::Continue)
    }

    fn save(&self, path: &Path) -> Result<(), EditorError> {
        self.backend
            .save(self.session.current(), path)
            .map_err(|source| EditorError::Save {
                path: path.to_path_buf(),
                source,
            })
    }

    fn refresh_preview(&self) {
        if !self.preview.enabled {
            return;
        }
        if let Err(e) = write_preview(
            &self.backend,
            self.session.original(),
            self.session.current(),
            self.preview.width,
            &self.preview.path,
        ) {
            log::warn!("could not write preview: {e}");
        }
    }
}

/// Prompt for whatever intensity `filter` takes from the menu.
///
/// Sepia runs at full strength from the menu; its intensity is reachable
/// only through `apply` steps.
fn ask_filter_request(
    filter: Filter,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<FilterRequest>> {
    let (prompt, range) = match filter {
        Filter::Blur => ("Enter blur intensity (0.1 to 1.0): ", FILTER_INTENSITY),
        Filter::Posterize => ("Enter posterize intensity (0.1 to 1.0): ", FILTER_INTENSITY),
        Filter::Sharpen => ("Enter sharpen intensity (0.1 to 1.0): ", FILTER_INTENSITY),
        Filter::Saturation => ("Enter saturation intensity (0.0 to 3.0): ", SATURATION),
        _ => return Ok(Some(FilterRequest::new(filter))),
    };
    Ok(prompt::ask_number(input, out, prompt, range)?
        .map(|intensity| FilterRequest::with_intensity(filter, intensity)))
}
