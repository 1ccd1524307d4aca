use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use inglish_etymology::grouper::{GroupingStrategy, DEFAULT_LOOKBACK};
use inglish_etymology::output::{
    discover_files, ensure_dir, output_path, read_source, write_json, write_text,
};
use inglish_etymology::parallel::{process_files, ParallelConfig, Stats};
use inglish_etymology::tables::init_tables;
use inglish_etymology::{extract_histories, Pipeline, PipelineConfig, Result, TransformerSet};
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Entry grouping strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// One entry per blank-line delimited block
    BlankLine,
    /// Entries anchored on [ME] lines; blank-line fallback when none
    MarkerBased,
}

#[derive(Parser)]
#[command(name = "inglish-etymology")]
#[command(about = "Convert hand-written etymology stanzas into structured records")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Tables YAML file (default: built-in schema/tables.yaml)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Number of threads (0 = auto-detect)
    #[arg(short, long, global = true, default_value_t = 0)]
    threads: usize,

    /// Quiet mode - no progress or summary
    #[arg(short, long, global = true)]
    quiet: bool,

    /// More log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every source file to a JSON array of records
    Convert(ConvertArgs),
    /// Write one history file per stanza with a POS marker and headword
    Histories(IoArgs),
}

#[derive(Args)]
struct IoArgs {
    /// Input directory (or a single file)
    input: PathBuf,

    /// Output directory
    output: PathBuf,

    /// Source file extension
    #[arg(long, default_value = "txt")]
    extension: String,
}

#[derive(Args)]
struct ConvertArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Entry grouping strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::BlankLine)]
    strategy: Strategy,

    /// Lines before an [ME] marker that belong to its entry
    #[arg(long, default_value_t = DEFAULT_LOOKBACK)]
    lookback: usize,

    /// Attach verb/noun/adjective details where the native line allows
    #[arg(long)]
    pos: bool,

    /// Named transformer to run (repeatable); output keyed by name
    #[arg(long = "transformer", value_name = "NAME")]
    transformers: Vec<String>,

    /// Group each file as-is, without joining untagged sections
    #[arg(long)]
    no_merge: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} files ({elapsed})") {
        bar.set_style(style);
    }
    bar
}

/// Input root and the files under it. A single file is its own list.
fn collect_inputs(io: &IoArgs) -> Result<(PathBuf, Vec<PathBuf>)> {
    if io.input.is_file() {
        let root = io.input.parent().map(Path::to_path_buf).unwrap_or_default();
        return Ok((root, vec![io.input.clone()]));
    }
    Ok((io.input.clone(), discover_files(&io.input, &io.extension)?))
}

fn pipeline_config(args: &ConvertArgs) -> Result<PipelineConfig> {
    let grouping = match args.strategy {
        Strategy::BlankLine => GroupingStrategy::BlankLine,
        Strategy::MarkerBased => GroupingStrategy::MarkerBased {
            lookback: args.lookback,
        },
    };
    let transformers = if !args.transformers.is_empty() {
        TransformerSet::from_names(args.transformers.as_slice())?
    } else if args.pos {
        TransformerSet::PosAware
    } else {
        TransformerSet::Plain
    };
    Ok(PipelineConfig {
        grouping,
        transformers,
        merge_sections: !args.no_merge,
    })
}

fn run_convert(args: &ConvertArgs, config: &ParallelConfig, quiet: bool) -> Result<Stats> {
    let pipeline = Arc::new(Pipeline::new(pipeline_config(args)?));
    let (input_root, files) = collect_inputs(&args.io)?;
    ensure_dir(&args.io.output)?;
    info!("converting {} files with {:?}", files.len(), pipeline.config());

    let output_root = args.io.output.clone();
    let progress = progress_bar(files.len(), quiet);
    let outcomes = process_files(&files, config, &progress, move |path| {
        let content = read_source(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let records = pipeline.process(&content, &file_name);
        write_json(&output_path(&input_root, path, &output_root, "json"), &records)?;
        Ok(records.len())
    });
    progress.finish_and_clear();

    Ok(Stats::from_outcomes(outcomes))
}

fn run_histories(io: &IoArgs, config: &ParallelConfig, quiet: bool) -> Result<Stats> {
    let (_, files) = collect_inputs(io)?;
    ensure_dir(&io.output)?;
    info!("extracting histories from {} files", files.len());

    let output_root = io.output.clone();
    let progress = progress_bar(files.len(), quiet);
    let outcomes = process_files(&files, config, &progress, move |path| {
        let content = read_source(path)?;
        let histories = extract_histories(&content);
        for history in &histories {
            write_text(&output_root.join(&history.name), &history.contents)?;
        }
        Ok(histories.len())
    });
    progress.finish_and_clear();

    Ok(Stats::from_outcomes(outcomes))
}

fn print_stats(stats: &Stats, mode: &str) {
    println!();
    println!("============================================================");
    println!("Mode: {}", mode);
    println!("Files processed: {}", stats.files_processed);
    println!("Files succeeded: {}", stats.files_succeeded);
    println!("Files failed: {}", stats.files_failed);
    println!("Records written: {}", stats.records_written);
    if !stats.failures.is_empty() {
        println!("------------------------------------------------------------");
        println!("Failures:");
        for (path, message) in &stats.failures {
            println!("  {}: {}", path.display(), message);
        }
    }
    println!("Time: {:.2}s", stats.elapsed.as_secs_f64());
    println!("============================================================");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = init_tables(cli.tables.as_deref()) {
        eprintln!("Error loading tables: {}", e);
        std::process::exit(1);
    }

    let mut config = ParallelConfig::default();
    if cli.threads > 0 {
        config.num_threads = cli.threads;
    }

    let start_time = Instant::now();
    let (result, mode) = match &cli.command {
        Command::Convert(args) => (run_convert(args, &config, cli.quiet), "convert"),
        Command::Histories(io) => (run_histories(io, &config, cli.quiet), "histories"),
    };

    match result {
        Ok(mut stats) => {
            stats.elapsed = start_time.elapsed();
            if !cli.quiet {
                print_stats(&stats, mode);
            }
            if stats.files_failed > 0 {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
