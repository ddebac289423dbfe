use anyhow::Context;
use clap::{ArgAction, Parser};
use signpad::Config;
use signpad::SignPad;
use signpad::session::{self, Session};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "signpad")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SIGNPAD_GIT_HASH"), ")"),
    about = "Freehand signature pad with undo, clipboard and PNG export"
)]
struct Cli {
    /// Replay pointer and keyboard events from a JSON-lines script
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Read configuration from FILE instead of ~/.config/signpad/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save images into DIR instead of the configured directory
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(long, value_name = "PX", requires = "height")]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, value_name = "PX", requires = "width")]
    height: Option<u32>,

    /// Write a documented default config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };

    if cli.init_config {
        Config::create_default_file(&config_path)?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let Some(script_path) = cli.script else {
        print_usage();
        return Ok(());
    };

    let mut config = Config::load_from(&config_path)?;
    if let (Some(width), Some(height)) = (cli.width, cli.height) {
        config.override_canvas_size(width, height);
    }
    if let Some(dir) = &cli.output_dir {
        config.override_save_directory(dir);
    }

    let script = session::load_script(&script_path)?;
    log::info!(
        "Replaying {} events from {}",
        script.len(),
        script_path.display()
    );

    let pad = SignPad::from_config(&config)?;
    let mut session = Session::new(pad, config.ui.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let report = runtime.block_on(session.run(&script))?;

    for path in &report.saved {
        println!("Saved signature to {}", path.display());
    }
    if report.copies > 0 {
        println!("Copied signature to clipboard ({}x)", report.copies);
    }
    for err in &report.errors {
        eprintln!("Export failed: {}", err);
    }
    println!(
        "{} strokes, {} saved, {} copied, {} failed",
        report.strokes,
        report.saved.len(),
        report.copies,
        report.errors.len()
    );
    println!("{}", report.status);

    Ok(())
}

fn print_usage() {
    println!("signpad: Freehand signature pad with undo, clipboard and PNG export");
    println!();
    println!("Usage:");
    println!("  signpad --script FILE          Replay a recorded input script");
    println!("  signpad --init-config          Write ~/.config/signpad/config.toml");
    println!("  signpad --help                 Show all options");
    println!();
    println!("Script format (one JSON object per line):");
    println!("  {{\"type\": \"press\", \"x\": 40, \"y\": 200}}");
    println!("  {{\"type\": \"move\", \"x\": 120, \"y\": 180, \"pressure\": 0.6}}");
    println!("  {{\"type\": \"release\"}}");
    println!("  {{\"type\": \"key\", \"chord\": \"Ctrl+S\"}}");
    println!();
    println!("Shortcuts:");
    println!("  Delete          Clear the canvas");
    println!("  Ctrl/Cmd+Z      Undo the last stroke");
    println!("  Ctrl/Cmd+C      Copy the signature to the clipboard");
    println!("  Ctrl/Cmd+S      Save the signature as sign.png");
}
