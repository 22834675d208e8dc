use clap::{ArgAction, Parser};
use crossterm::style::Stylize;
use nera_core::batch::{read_batch, AlignerConfig, BatchAligner};
use nera_core::persistence::{load_lexicon_snapshot, save_alignment, save_lexicon_snapshot, OutputFormat};
use nera_core::{MatchConfig, Result, TranslationLexicon, THRESHOLD};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Aligns named entities across parallel annotated texts and writes a bilingual
/// entity lexicon (`source \t target \t score`).
///
/// The translation-equivalence lexicon is read from a file named `<source>_<target>`
/// in the working directory unless `--lexicon` is given.
#[derive(Parser, Debug)]
#[command(name = "nera", version)]
struct Args {
    /// Batch file: one `source_file \t target_file` pair per line.
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the aligned entity pairs.
    #[arg(short, long)]
    output: PathBuf,

    /// Source language code.
    #[arg(long, default_value = "en")]
    source: String,

    /// Target language code.
    #[arg(long, default_value = "ro")]
    target: String,

    /// `aa=true` signals additional xml-like markup inside entity spans.
    #[arg(long, value_parser = parse_param, default_value = "aa=false", action = ArgAction::Set)]
    param: bool,

    /// Translation lexicon path (overrides the `<source>_<target>` naming rule).
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Binary lexicon snapshot: loaded when present, written after parsing otherwise.
    #[arg(long)]
    lexicon_cache: Option<PathBuf>,

    /// Output format: tsv or json.
    #[arg(long, default_value = "tsv")]
    format: OutputFormat,

    /// Minimum cognate or translation score for pairing different forms.
    #[arg(long, default_value_t = THRESHOLD)]
    threshold: f64,

    /// Align file pairs in parallel.
    #[arg(long)]
    parallel: bool,

    /// Suppress per-pair progress on stdout.
    #[arg(short, long)]
    quiet: bool,

    /// Log filter, e.g. `debug` or `nera_core=trace`. `RUST_LOG` takes precedence.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_param(value: &str) -> std::result::Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "aa=true" => Ok(true),
        "aa=false" => Ok(false),
        other => Err(format!("unknown parameter '{other}' (expected aa=true or aa=false)")),
    }
}

fn load_lexicon(path: &Path, cache: Option<&Path>) -> Result<TranslationLexicon> {
    if let Some(cache) = cache {
        if cache.is_file() {
            info!("Loading lexicon snapshot from {}", cache.display());
            return load_lexicon_snapshot(cache);
        }
    }

    info!("Loading translation lexicon from {}", path.display());
    let lexicon = TranslationLexicon::from_path(path)?;

    if let Some(cache) = cache {
        match save_lexicon_snapshot(&lexicon, cache) {
            Ok(()) => info!("Saved lexicon snapshot to {}", cache.display()),
            Err(e) => warn!("Could not save lexicon snapshot: {}", e),
        }
    }
    Ok(lexicon)
}

fn run(args: &Args) -> Result<()> {
    let lexicon_path = args
        .lexicon
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}_{}", args.source, args.target)));
    let lexicon = load_lexicon(&lexicon_path, args.lexicon_cache.as_deref())?;

    let pairs = read_batch(&args.input)?;
    let config = AlignerConfig {
        match_config: MatchConfig {
            threshold: args.threshold,
        },
        strip_annotation: args.param,
        parallel: args.parallel,
    };
    let aligner = BatchAligner::new(&lexicon, config);

    let alignment = aligner.run(&pairs, |pair| {
        if !args.quiet {
            println!(
                "Processing pair {} - {} ... {}",
                pair.source.display(),
                pair.target.display(),
                "done!".green()
            );
        }
    })?;

    save_alignment(&alignment, args.format, &args.output)?;
    if !args.quiet {
        println!();
        println!(
            "{} {} entity pairs written to {}",
            "Job finished.".bold(),
            alignment.len(),
            args.output.display()
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
