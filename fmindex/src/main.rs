use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use fmindex::rank::{DEFAULT_OCC_CHECKPOINT, DEFAULT_WAVELET_CHECKPOINT};
use fmindex::{BidirectionalIndex, FmIndex, IndexConfig, RankBackend, naive};
use storage::{SourceKind, infer_source_kind, load_sequence, read_source};

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Backend {
    Full,
    Checkpointed,
    Wavelet,
}

/// Example:
/// cargo run --release -- -t data/chimpansee_dna.txt --pattern "TCGC" -b wavelet --locate --measure-time
/// cargo run --release -- -t data/sample.fasta --fasta --pattern-file pattern.txt --alphabet ACGT --verify
#[derive(Debug, clap::Parser)]
#[command(
    name = "fmindex",
    about = "Build an FM-index over one or more texts and search one pattern in each"
)]
struct Cli {
    #[arg(short = 't', long = "text", value_name = "TEXT", required = true)]
    texts: Vec<PathBuf>,

    /// Parse every text as FASTA (records are concatenated); otherwise guessed from the extension
    #[arg(long)]
    fasta: bool,

    #[arg(
        long,
        conflicts_with = "pattern_file",
        required_unless_present = "pattern_file"
    )]
    pattern: Option<String>,

    #[arg(
        long = "pattern-file",
        value_name = "PATTERN_FILE",
        conflicts_with = "pattern",
        required_unless_present = "pattern"
    )]
    pattern_file: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Backend::Full)]
    backend: Backend,

    /// Checkpoint interval for the checkpointed and wavelet backends
    #[arg(long = "checkpoint-interval", value_name = "N")]
    checkpoint_interval: Option<usize>,

    /// Sentinel byte terminating the text; must not occur inside it
    #[arg(long, default_value_t = '$')]
    sentinel: char,

    /// Fixed symbol set (e.g. ACGT); derived from each text if omitted
    #[arg(long, value_name = "SYMBOLS")]
    alphabet: Option<String>,

    /// Search through the bidirectional index instead of plain backward search
    #[arg(long)]
    bidirectional: bool,

    /// Print the match offsets, not just the count
    #[arg(long)]
    locate: bool,

    /// Cross-check every result against a brute-force scan
    #[arg(long)]
    verify: bool,

    /// Optional output file; if omitted, results are written to stdout
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Measure and print construction and search time
    #[arg(long)]
    measure_time: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let pattern = load_pattern(&cli)?;

    let mut out: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    writeln!(
        out,
        "# backend={:?}, bidirectional={}, pattern-length={}",
        config.backend,
        cli.bidirectional,
        pattern.len()
    )?;

    for text_path in &cli.texts {
        let kind = if cli.fasta {
            SourceKind::Fasta
        } else {
            infer_source_kind(text_path)
        };
        let sequence = load_sequence(text_path, kind)?;
        log::debug!(
            "loaded {} ({} bytes, {} records)",
            sequence.name,
            sequence.data.len(),
            sequence.records.len()
        );

        let run = if cli.bidirectional {
            run_bidirectional(&cli, &config, &sequence.data, &pattern)?
        } else {
            run_backward(&cli, &config, &sequence.data, &pattern)?
        };

        writeln!(out, "text={:?}", text_path)?;
        if let Some(d) = run.build_time {
            writeln!(out, "build_time: {}ns", d.as_nanos())?;
        }
        if let Some(d) = run.search_time {
            writeln!(out, "execution_time: {}ns", d.as_nanos())?;
        }
        writeln!(out, "count: {}", run.matches.len())?;
        if cli.locate {
            writeln!(out, "matches: {:?}", run.matches)?;
        }
        if cli.verify {
            verify(&run, &pattern)?;
            writeln!(out, "verified: ok")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

struct Run {
    /// The indexed text with its sentinel, as searched.
    indexed: Vec<u8>,
    matches: Vec<usize>,
    build_time: Option<Duration>,
    search_time: Option<Duration>,
}

fn resolve_config(cli: &Cli) -> Result<IndexConfig, Box<dyn std::error::Error>> {
    if !cli.sentinel.is_ascii() {
        return Err(format!("Sentinel must be a single ASCII character (got {:?})", cli.sentinel).into());
    }

    let backend = match cli.backend {
        Backend::Full => {
            if cli.checkpoint_interval.is_some() {
                return Err("--checkpoint-interval has no effect with the full backend".into());
            }
            RankBackend::Full
        }
        Backend::Checkpointed => RankBackend::Checkpointed {
            interval: cli.checkpoint_interval.unwrap_or(DEFAULT_OCC_CHECKPOINT),
        },
        Backend::Wavelet => RankBackend::WaveletTree {
            interval: cli.checkpoint_interval.unwrap_or(DEFAULT_WAVELET_CHECKPOINT),
        },
    };
    backend.validate()?;

    Ok(IndexConfig {
        sentinel: cli.sentinel as u8,
        alphabet: cli.alphabet.as_ref().map(|s| s.as_bytes().to_vec()),
        backend,
    })
}

fn load_pattern(cli: &Cli) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(ref pat) = cli.pattern {
        Ok(pat.as_bytes().to_vec())
    } else if let Some(ref path) = cli.pattern_file {
        let mut pattern = read_source(path)?;
        while matches!(pattern.last(), Some(b'\n' | b'\r')) {
            pattern.pop();
        }
        Ok(pattern)
    } else {
        Err("Either --pattern or --pattern-file must be provided".into())
    }
}

fn run_backward(
    cli: &Cli,
    config: &IndexConfig,
    text: &[u8],
    pattern: &[u8],
) -> Result<Run, Box<dyn std::error::Error>> {
    let start = cli.measure_time.then(Instant::now);
    let index = FmIndex::build(text, config)?;
    let build_time = start.map(|s| s.elapsed());
    log::debug!(
        "index over {} symbols uses ~{} bytes ({})",
        index.text_len(),
        index.heap_bytes(),
        index.rank().name()
    );

    let start = cli.measure_time.then(Instant::now);
    let matches = index.locate(pattern);
    let search_time = start.map(|s| s.elapsed());

    Ok(Run {
        indexed: index.core().alphabet().decode(index.core().text()),
        matches,
        build_time,
        search_time,
    })
}

fn run_bidirectional(
    cli: &Cli,
    config: &IndexConfig,
    text: &[u8],
    pattern: &[u8],
) -> Result<Run, Box<dyn std::error::Error>> {
    let start = cli.measure_time.then(Instant::now);
    let index = BidirectionalIndex::build(text, config)?;
    let build_time = start.map(|s| s.elapsed());

    let start = cli.measure_time.then(Instant::now);
    let matches = index
        .search(pattern)
        .map(|state| index.locate(&state))
        .unwrap_or_default();
    let search_time = start.map(|s| s.elapsed());

    Ok(Run {
        indexed: index.alphabet().decode(index.forward().text()),
        matches,
        build_time,
        search_time,
    })
}

fn verify(run: &Run, pattern: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    // Only occurrences that start inside the indexed text count, which drops
    // the end position the brute-force scan reports for an empty pattern.
    let mut expected = naive::find_all(&run.indexed, pattern);
    expected.retain(|&i| i < run.indexed.len());

    if expected != run.matches {
        return Err(format!(
            "verification failed: index reported {} matches, brute force found {}",
            run.matches.len(),
            expected.len()
        )
        .into());
    }
    Ok(())
}
