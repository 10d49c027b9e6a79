use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use levdp::benchmark;
use levdp::compare::{compare_pairs, WordComparison};
use levdp::config::BenchConfig;
use levdp::input::{load_pairs, normalize_word, prompt_words};
use levdp::report;

#[derive(Parser)]
#[command(name = "levdp", version, about = "Edit distance by full table and rolling rows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time both variants on worst-case inputs of increasing size
    Bench {
        /// TOML file with sizes, symbols, variants and memory limit
        #[arg(long)]
        config: Option<PathBuf>,
        /// Comma-separated sizes, overriding the config
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
        /// Print measurements as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Also write measurements to an Arrow IPC file
        #[arg(long)]
        ipc: Option<PathBuf>,
    },
    /// Distance between two words (prompts for them when omitted)
    Compare {
        first: Option<String>,
        second: Option<String>,
        /// Compare case-sensitively instead of lower-casing both words
        #[arg(long)]
        keep_case: bool,
        #[arg(long)]
        json: bool,
    },
    /// Distances for every word pair in a file (one pair per line, .gz allowed)
    Pairs {
        file: PathBuf,
        #[arg(long)]
        keep_case: bool,
        #[arg(long)]
        json: bool,
        /// Also write comparisons to an Arrow IPC file
        #[arg(long)]
        ipc: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Bench {
            config,
            sizes,
            json,
            ipc,
        } => cmd_bench(config.as_deref(), sizes, json, ipc.as_deref()),
        Commands::Compare {
            first,
            second,
            keep_case,
            json,
        } => cmd_compare(first, second, keep_case, json),
        Commands::Pairs {
            file,
            keep_case,
            json,
            ipc,
        } => cmd_pairs(&file, keep_case, json, ipc.as_deref()),
    }
}

fn cmd_bench(
    config_path: Option<&Path>,
    sizes: Option<Vec<usize>>,
    json: bool,
    ipc: Option<&Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => BenchConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => BenchConfig::default(),
    };
    if let Some(sizes) = sizes {
        config.sizes = sizes;
    }

    info!(
        sizes = config.sizes.len(),
        max_full_table_bytes = config.max_full_table_bytes,
        "starting worst-case benchmark"
    );
    let measurements = benchmark::run(&config, |m| {
        if !json {
            println!("{}", report::render_measurement(m));
        }
    })
    .context("Benchmark failed")?;

    if json {
        println!("{}", report::measurements_to_json(&measurements)?);
    }
    if let Some(path) = ipc {
        write_ipc_file(path, |w| report::write_measurements_ipc(w, &measurements))?;
    }
    Ok(())
}

fn cmd_compare(
    first: Option<String>,
    second: Option<String>,
    keep_case: bool,
    json: bool,
) -> Result<()> {
    let (a, b) = match (first, second) {
        (Some(first), Some(second)) => (
            normalize_word(&first, keep_case),
            normalize_word(&second, keep_case),
        ),
        (None, None) => prompt_words(keep_case).context("Failed to read words")?,
        _ => bail!("Pass both words or neither"),
    };

    let comparison = WordComparison::new(&a, &b);
    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{}", report::render_comparison(&comparison));
    }
    Ok(())
}

fn cmd_pairs(file: &Path, keep_case: bool, json: bool, ipc: Option<&Path>) -> Result<()> {
    let pairs = load_pairs(file)?;
    if pairs.is_empty() {
        println!("No word pairs in {}.", file.display());
        return Ok(());
    }
    info!(count = pairs.len(), "loaded word pairs");

    let comparisons = compare_pairs(pairs, keep_case, |done, total| {
        info!("compared {done}/{total} pairs");
    });

    if json {
        println!("{}", report::comparisons_to_json(&comparisons)?);
    } else {
        for comparison in &comparisons {
            println!("{}", report::render_comparison(comparison));
        }
    }
    if let Some(path) = ipc {
        write_ipc_file(path, |w| report::write_comparisons_ipc(w, &comparisons))?;
    }
    Ok(())
}

fn write_ipc_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> levdp::Result<BufWriter<File>>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
    let buf_writer = BufWriter::with_capacity(128 * 1024, file);
    let mut buf_writer = write(buf_writer)
        .with_context(|| format!("Failed to write Arrow IPC file '{}'", path.display()))?;
    buf_writer.flush()?;
    info!(path = %path.display(), "wrote Arrow IPC file");
    Ok(())
}
