use clap::{Parser, Subcommand};
use image_editor::imaging::{Edit, RustBackend};
use image_editor::session::{self, Editor};
use image_editor::{config, output, prompt};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-editor")]
#[command(about = "Interactive image filter and editing tool")]
#[command(long_about = "\
Interactive image filter and editing tool

Load an image, pick filters and adjustments from a numbered menu, undo and
redo freely, then save the result. Enter 'q' at the menu to quit.

The original and edited images are written side by side to a preview file
after every command. Open it in any viewer that reloads on change.

Non-interactive use:

  image-editor apply photo.jpg -o out.png sepia:0.5 brightness:20,1.2 rotate

Steps are filter names with an optional intensity:
  grayscale sepia[:0.1-1.0] blur[:0.1-1.0] invert edges sketch
  posterize[:0.1-1.0] emboss sharpen[:0.1-1.0] flip_horizontal flip_vertical
  rotate saturation[:0.0-3.0] brightness:B[,C]

Run 'image-editor gen-config' to generate a documented editor.toml.")]
#[command(version)]
struct Cli {
    /// Image to edit (prompted for when omitted)
    image: Option<PathBuf>,

    /// Config file (defaults to editor.toml in the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where to write the side-by-side preview
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Do not write a preview image
    #[arg(long, conflicts_with = "preview")]
    no_preview: bool,

    /// Log diagnostics (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply edit steps to an image and save it, without the menu
    Apply {
        /// Image to read
        input: PathBuf,
        /// Where to save the result
        #[arg(short, long)]
        output: PathBuf,
        /// Edit steps, applied in order (e.g. sepia:0.5)
        #[arg(required = true)]
        steps: Vec<Edit>,
    },
    /// Print a stock editor.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Some(Command::Apply {
            input,
            output: out_path,
            steps,
        }) => {
            let editor_config = load_editor_config(cli.config.as_deref())?;
            for (i, step) in steps.iter().enumerate() {
                println!("{}", output::format_apply_step(i + 1, step));
            }
            session::apply_to_file(
                &RustBackend::new(),
                &input,
                &out_path,
                &steps,
                editor_config.history.max_depth,
            )?;
            println!("{}", output::format_apply_summary(steps.len(), &out_path));
        }
        Some(Command::GenConfig) => {
            print!("{}", config::stock_config_toml());
        }
        None => interactive(cli.image, cli.config, cli.preview, cli.no_preview)?,
    }

    Ok(())
}

fn interactive(
    image: Option<PathBuf>,
    config_path: Option<PathBuf>,
    preview: Option<PathBuf>,
    no_preview: bool,
) -> Result<(), session::EditorError> {
    let mut editor_config = load_editor_config(config_path.as_deref())?;
    if let Some(path) = preview {
        editor_config.preview.path = path;
    }
    if no_preview {
        editor_config.preview.enabled = false;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    writeln!(out, "{}", output::WELCOME)?;
    let path = match image {
        Some(path) => path,
        None => match prompt::ask(&mut input, &mut out, "Enter the path to the image file: ")? {
            Some(line) => PathBuf::from(line.trim()),
            None => return Ok(()),
        },
    };

    let backend = RustBackend::new();
    let session = match session::load_session(&backend, &path, editor_config.history.max_depth) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{e}");
            writeln!(out, "Error: Could not load the image. Check the file path.")?;
            out.flush()?;
            std::process::exit(1);
        }
    };
    if editor_config.preview.enabled {
        writeln!(
            out,
            "Preview: {} (original | edited)",
            editor_config.preview.path.display()
        )?;
    }

    let mut editor = Editor::new(session, backend, editor_config.preview);
    editor.run(&mut input, &mut out)?;
    Ok(())
}

/// `--config` if given, else `editor.toml` in the working directory.
fn load_editor_config(
    explicit: Option<&std::path::Path>,
) -> Result<config::EditorConfig, session::EditorError> {
    let cwd = std::env::current_dir()?;
    Ok(config::load_config(explicit, &cwd)?)
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the `--verbose` level.
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{style}{}{style:#} {}:{}] {}",
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
