use anyhow::{Context, Result};
use clap::Parser;
use fish_client::{load_events, load_settings, Host};
use fish_shared::SchoolSettings;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless fish school simulation", long_about = None)]
struct Args {
    /// JSON settings file; missing fields use defaults
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// JSON-lines event script, one {"tick": n, "event": {...}} per line
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Elapsed time per tick, in simulation seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for headings and leader scores
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write a frame every N ticks
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Output file for frames (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => SchoolSettings::default(),
    };
    let events = match &args.events {
        Some(path) => load_events(path)?,
        None => Vec::new(),
    };

    let mut host = Host::new(&settings, args.seed, events).context("Failed to initialize host")?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    host.run(args.ticks, args.dt, args.every, &mut out)
        .context("Simulation error")?;

    Ok(())
}
