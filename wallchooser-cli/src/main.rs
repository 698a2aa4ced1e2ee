use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use wallchooser_cli::{ChooserCliApp, ChooserOptions};
use wallchooser_core::ScreenResult;

#[derive(Parser)]
#[command(name = "wallchooser")]
#[command(about = "Pick a wallpaper from the bundled gallery")]
#[command(long_about = "Pick a wallpaper from the bundled gallery.\n\n\
Images are read from the drawable directory (default: <config dir>/drawable, \
or --drawables). Each wallpaper needs <name>.jpg|jpeg|png|webp and a \
<name>_small thumbnail. The built-in names (wallpaper_skate, wallpaper_cyan, ...) \
are listed even when their files are absent, but only preview and apply once \
the files are copied there.")]
#[command(version)]
struct Cli {
    /// Directory holding the drawable images
    #[arg(long)]
    drawables: Option<PathBuf>,

    /// File listing extra wallpaper names, one per line
    #[arg(long)]
    extras: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the gallery entries
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply the wallpaper at INDEX
    Set { index: usize },
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut app = ChooserCliApp::new(ChooserOptions {
        drawables: cli.drawables,
        extras: cli.extras,
    })?;
    app.initialize()?;

    let result = match cli.command {
        Some(Command::List { json }) => {
            let rows = app.listing();
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in &rows {
                    println!("{:>3}  {}  ({})", row.index, row.image, row.thumbnail);
                }
            }
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Set { index }) => app.set_index(index)?,
        None => app.run()?,
    };

    Ok(match result {
        ScreenResult::Ok => ExitCode::SUCCESS,
        ScreenResult::Canceled => ExitCode::FAILURE,
    })
}
