use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use outline_mirror::cli::{CliArgs, CliCommand};
use outline_mirror::config::OutlineConfig;
use outline_mirror::config_paths;
use outline_mirror::messages::Msg;
use outline_mirror::outline::{render_outline, OutlineNode};
use outline_mirror::protocol::{HostEvent, PublishOutlineParams};
use outline_mirror::runtime::App;
use outline_mirror::surface::{MemoryStatus, MemorySurfaceFactory};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    outline_mirror::tracing::init(args.verbose);

    let config = args.resolve_config();

    match args.command {
        CliCommand::Render { file } => render(&file, &config),
        CliCommand::Replay { file } => replay(file, config),
        CliCommand::Logs => print_latest_log(),
    }
}

fn print_latest_log() -> Result<()> {
    let dir = config_paths::logs_dir().ok_or_else(|| anyhow!("no config directory available"))?;
    match config_paths::latest_log_file(&dir) {
        Some(path) => println!("{}", path.display()),
        None => println!("no log files in {}", dir.display()),
    }
    Ok(())
}

fn render(path: &Path, config: &OutlineConfig) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let params = PublishOutlineParams::from_json(&json)?;
    let tree = OutlineNode::from(params.outline);
    let rendered = render_outline(&tree, &config.render_options());

    let mut out = io::stdout().lock();
    for line in &rendered.lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn replay(file: Option<PathBuf>, config: OutlineConfig) -> Result<()> {
    let reader: Box<dyn BufRead + Send> = match &file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (msg_tx, msg_rx) = mpsc::channel();
    let reader_thread = thread::spawn(move || feed_events(reader, msg_tx));

    let mut app = App::new(config, MemorySurfaceFactory::default(), MemoryStatus::default());
    let processed = app.run(msg_rx);

    let skipped = reader_thread
        .join()
        .map_err(|_| anyhow!("event reader thread panicked"))??;
    tracing::info!("replayed {} events, skipped {}", processed, skipped);

    let mut out = io::stdout().lock();
    match app.surface() {
        Some(surface) => {
            for line in surface.lines() {
                writeln!(out, "{}", line)?;
            }
        }
        None => writeln!(out, "(view not open)")?,
    }
    if !app.status().text.is_empty() {
        writeln!(out, "breadcrumb:{}", app.status().text)?;
    }
    Ok(())
}

/// Parse events line by line into the runtime's channel. Returns how many
/// malformed lines were skipped.
fn feed_events(reader: Box<dyn BufRead + Send>, msg_tx: Sender<Msg>) -> Result<usize> {
    let mut skipped = 0;
    for (index, line) in reader.lines().enumerate() {
        let line = line.context("failed to read event stream")?;
        if line.trim().is_empty() {
            continue;
        }
        match HostEvent::from_json_line(&line) {
            Ok(event) => {
                if msg_tx.send(Msg::from(event)).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!("line {}: {:#}", index + 1, e);
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}
