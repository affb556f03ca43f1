//! SGR dump tool
//!
//! Decodes captured process output and prints the styled fragments. Useful
//! for inspecting what a program's colored output turns into.
//!
//! # Usage
//!
//! ```bash
//! # Fragments with their canonical keys
//! printf 'ok \x1b[1;32mpassed\x1b[0m\n' | sgr-dump
//!
//! # JSON lines, decoding the file in 3-byte chunks
//! sgr-dump --input build.log --format json --chunk-size 3
//!
//! # Distinct style handles registered for stderr output
//! sgr-dump --input errors.log --stream stderr --format handles
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use sgr_console::app::{init_logging, Config, ConfigError};
use sgr_console::parser::{Decoder, StreamTag, TextFragment};
use sgr_console::style::StyleRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One line per fragment: canonical key and escaped text
    Text,
    /// One JSON object per fragment
    Json,
    /// The style handles registered while decoding
    Handles,
}

/// Decode ANSI SGR sequences into styled fragments
#[derive(Debug, Parser)]
#[command(name = "sgr-dump", version, about)]
struct Args {
    /// Input file (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Stream the input is tagged with
    #[arg(short, long, default_value = "stdout")]
    stream: StreamTag,

    /// Feed the decoder in chunks of this many bytes (0 = whole input)
    #[arg(short, long, default_value_t = 0)]
    chunk_size: usize,

    /// Configuration file (defaults to ~/.config/sgr-console/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, thiserror::Error)]
enum DumpError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            init_logging("warn");
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.log_filter);

    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Fatal error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config, ConfigError> {
    match &args.config {
        Some(path) => Config::load(path),
        None => Ok(Config::load_or_default()),
    }
}

fn run(args: &Args, config: Config) -> Result<(), DumpError> {
    let input = read_input(args.input.as_ref())?;
    let mut decoder = Decoder::with_config(config.decoder);
    let registry = StyleRegistry::with_palette(config.palette);

    let mut fragments: Vec<TextFragment> = Vec::new();
    for chunk in chunks(&input, args.chunk_size) {
        fragments.extend(decoder.feed(chunk, args.stream));
    }
    fragments.extend(decoder.finish(args.stream));
    tracing::info!(fragments = fragments.len(), "decoded input");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for fragment in &fragments {
        let handle = registry.resolve_state(&fragment.state, fragment.stream);
        match args.format {
            Format::Text => {
                writeln!(out, "[{}] {:?}", handle.key, fragment.text)?;
            }
            Format::Json => {
                serde_json::to_writer(&mut out, fragment)?;
                writeln!(out)?;
            }
            Format::Handles => {}
        }
    }

    if args.format == Format::Handles {
        for handle in registry.handles() {
            serde_json::to_writer(&mut out, &*handle)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    let mut bytes = Vec::new();
    match path {
        Some(path) => {
            File::open(path)?.read_to_end(&mut bytes)?;
        }
        None => {
            io::stdin().read_to_end(&mut bytes)?;
        }
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split `input` into pieces of at most `size` bytes on char boundaries
fn chunks(input: &str, size: usize) -> Vec<&str> {
    if size == 0 || input.len() <= size {
        return vec![input];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    while start < input.len() {
        let mut end = (start + size).min(input.len());
        while !input.is_char_boundary(end) {
            end += 1;
        }
        pieces.push(&input[start..end]);
        start = end;
    }
    pieces
}
