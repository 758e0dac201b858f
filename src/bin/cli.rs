//! paramvault CLI
//!
//! Operator tool for record windows in file-backed devices: import a text
//! configuration into a device file, show or export the stored pairs, or
//! clear the window.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use paramvault::tokenizer::{parse_into, ReaderSource};
use paramvault::{FileDevice, ParamMap, ParamStore, StorageDescriptor};

/// paramvault CLI
#[derive(Parser, Debug)]
#[command(name = "paramvault-cli")]
#[command(about = "Manage parameter records in file-backed devices")]
#[command(version)]
struct Args {
    /// Device file backing the record
    #[arg(short, long)]
    store: PathBuf,

    /// Device size in bytes
    #[arg(long, default_value = "4096")]
    device_size: usize,

    /// Schema token the record is written under
    #[arg(short, long)]
    token: String,

    /// First byte of the record window
    #[arg(short, long, default_value = "0")]
    base: usize,

    /// Record window capacity in bytes
    #[arg(short, long, default_value = "256")]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a text configuration file and persist it
    Import {
        /// The text file to parse
        file: PathBuf,

        /// Exact number of pairs to accept (0 = all pairs until end)
        #[arg(short = 'n', long, default_value = "0")]
        count: u16,
    },

    /// Print the stored pairs
    Show,

    /// Print the stored pairs as importable text
    Export,

    /// Zero the record window
    Clear,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,paramvault=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> paramvault::Result<()> {
    let descriptor = StorageDescriptor::builder()
        .base_address(args.base)
        .capacity(args.capacity)
        .token(args.token.as_str())
        .build();

    let device = FileDevice::open(&args.store, args.device_size)?;
    let mut store = ParamStore::new(descriptor, device);
    store.begin()?;

    match args.command {
        Commands::Import { file, count } => {
            let reader = BufReader::new(File::open(&file)?);
            let mut source = ReaderSource::new(reader);

            let mut map = ParamMap::new();
            let accepted = parse_into(&mut source, &mut map, count)?;
            tracing::info!(pairs = accepted, file = %file.display(), "parsed");

            let changed = store.save(&map)?;
            if changed {
                tracing::info!(token = %args.token, "record written");
            } else {
                tracing::info!(token = %args.token, "record already up to date");
            }
        }

        Commands::Show => {
            let map = store.load()?;
            for pair in map.iter() {
                println!(
                    "{} = {}",
                    String::from_utf8_lossy(&pair.key),
                    String::from_utf8_lossy(&pair.value)
                );
            }
        }

        Commands::Export => {
            let map = store.load()?;
            println!("{}", render_text(&map));
        }

        Commands::Clear => {
            store.clear()?;
            tracing::info!(token = %args.token, "record window cleared");
        }
    }

    Ok(())
}

/// Render a map back into the text format `import` accepts
fn render_text(map: &ParamMap) -> String {
    let mut out = String::from("{\n");
    for (i, pair) in map.iter().enumerate() {
        out.push_str("  \"");
        out.push_str(&escape_text(&pair.key));
        out.push_str("\": \"");
        out.push_str(&escape_text(&pair.value));
        out.push('"');
        if i + 1 < map.count() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// Escape quotes and backslashes so the output re-imports cleanly
fn escape_text(bytes: &[u8]) -> String {
    let mut out = String::new();
    for ch in String::from_utf8_lossy(bytes).chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}
