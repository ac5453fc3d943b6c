//! Command line front end for the `rhuff` Huffman compressor.
//!
//! ```bash
//! rhuff compress notes.txt            # writes notes.txt.huff
//! rhuff decompress notes.txt.huff     # writes notes.txt
//! rhuff inspect notes.txt.huff        # prints the header and the code table
//! ```
mod progress;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use console::style;
use progress::{fmt_size, ProgressMonitor};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Extension appended to compressed files.
const EXTENSION: &str = "huff";

#[derive(Parser, Debug)]
#[command(version, about = "A two-pass Huffman file compressor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log every step, not only the results
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors, and hide the progress bar
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress a file
    Compress {
        input: PathBuf,
        /// Where to write the result [default: <INPUT>.huff]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite the output if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Decompress a file
    Decompress {
        input: PathBuf,
        /// Where to write the result [default: <INPUT> without .huff, or <INPUT>.out]
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite the output if it exists
        #[arg(short, long)]
        force: bool,
    },
    /// Print the header of a compressed file
    Inspect { input: PathBuf },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stderr_writer()),
        )
        .with(indicatif_layer)
        .with(level)
        .init();

    match cli.command {
        Command::Compress {
            input,
            output,
            force,
        } => {
            let output = output.unwrap_or_else(|| compressed_name(&input));
            compress(&input, &output, force, cli.quiet)
        }
        Command::Decompress {
            input,
            output,
            force,
        } => {
            let output = output.unwrap_or_else(|| decompressed_name(&input));
            decompress(&input, &output, force, cli.quiet)
        }
        Command::Inspect { input } => inspect(&input),
    }
}

fn compress(input: &Path, output: &Path, force: bool, quiet: bool) -> Result<()> {
    let source = File::open(input).wrap_err_with(|| format!("opening {}", input.display()))?;
    let len = source.metadata()?.len();
    debug!("compressing {} into {}", input.display(), output.display());

    // the input is read once to count and once to encode
    let mut monitor = ProgressMonitor::new(source, len * 2, quiet)?;
    let summary = write_output(output, force, |target| {
        rhuff::compress(&mut monitor, target)
            .wrap_err_with(|| format!("compressing {}", input.display()))
    })?;
    monitor.finish("read");

    debug!(
        "{} distinct symbols, {} header bytes",
        summary.distinct_symbols, summary.header_bytes
    );
    info!(
        "{} -> {} ({})",
        fmt_size(summary.total_symbols as f64),
        fmt_size(summary.bytes_written as f64),
        ratio(summary.bytes_written, summary.total_symbols),
    );
    Ok(())
}

fn decompress(input: &Path, output: &Path, force: bool, quiet: bool) -> Result<()> {
    let source = File::open(input).wrap_err_with(|| format!("opening {}", input.display()))?;
    let len = source.metadata()?.len();
    debug!("decompressing {} into {}", input.display(), output.display());

    let mut monitor = ProgressMonitor::new(source, len, quiet)?;
    let summary = write_output(output, force, |target| {
        rhuff::decompress(&mut monitor, target)
            .wrap_err_with(|| format!("decompressing {}", input.display()))
    })?;
    monitor.finish("read");

    if summary.stopped_early() {
        warn!(
            "{} ended after {} of {} symbols, the output is incomplete",
            input.display(),
            summary.decoded_symbols,
            summary.expected_symbols
        );
    }
    info!(
        "{} -> {}",
        fmt_size(len as f64),
        fmt_size(summary.decoded_symbols as f64)
    );
    Ok(())
}

fn inspect(input: &Path) -> Result<()> {
    let file = File::open(input).wrap_err_with(|| format!("opening {}", input.display()))?;
    let len = file.metadata()?.len();
    let header = rhuff::read_header(&mut BufReader::new(file))
        .wrap_err_with(|| format!("reading the header of {}", input.display()))?;

    println!("{}", style(input.display()).bold());
    println!(
        "  {:<16}{}",
        "tree:",
        if header.is_single_symbol() {
            String::from("single symbol")
        } else {
            format!(
                "{} leaves, depth {}",
                header.tree.leaf_count(),
                header.tree.depth()
            )
        }
    );
    println!("  {:<16}{} bytes", "header:", header.header_bytes);
    println!(
        "  {:<16}{} bytes",
        "payload:",
        len.saturating_sub(header.header_bytes)
    );
    println!("  {:<16}{}", "symbols:", header.symbol_count);

    println!("{}", style("codes").bold());
    for (symbol, code) in header.tree.code_table().iter() {
        let bits: String = code.iter().map(|bit| if *bit { '1' } else { '0' }).collect();
        println!(
            "  {:<8}{}",
            style(format!("{:?}", char::from(symbol))).cyan(),
            if bits.is_empty() { "-" } else { &bits }
        );
    }
    debug!("tree:\n{}", header.tree);
    Ok(())
}

/// Hand `produce` a fresh file next to `path` and move it onto `path` once `produce`
/// succeeded. On failure the partial file is removed and an existing `path` is untouched.
fn write_output<T>(
    path: &Path,
    force: bool,
    produce: impl FnOnce(File) -> Result<T>,
) -> Result<T> {
    if path.exists() && !force {
        bail!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        );
    }
    let partial = partial_name(path);
    let file =
        File::create(&partial).wrap_err_with(|| format!("creating {}", partial.display()))?;

    let result = produce(file).and_then(|value| {
        fs::rename(&partial, path)
            .wrap_err_with(|| format!("moving the result to {}", path.display()))?;
        Ok(value)
    });
    if result.is_err() {
        if let Err(e) = fs::remove_file(&partial) {
            debug!("could not remove {}: {e}", partial.display());
        }
    }
    result
}

fn partial_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn compressed_name(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

fn decompressed_name(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        input.with_extension("")
    } else {
        let mut name = input.as_os_str().to_owned();
        name.push(".out");
        PathBuf::from(name)
    }
}

fn ratio(compressed: u64, original: u64) -> String {
    if original == 0 {
        return String::from("-");
    }
    format!("{:.1}%", compressed as f64 * 100.0 / original as f64)
}
