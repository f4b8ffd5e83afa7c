use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use asterism_io::{
    builtin_catalog, CatalogReader, DrawingReader, DrawingSet, ExperimentName, ResultWriter,
};
use asterism_match::{Catalog, MatchConfig, MatchResult, Matcher, PreparedCatalog, MIN_POINTS};

#[derive(Parser)]
#[command(name = "asterism")]
#[command(about = "Match hand-drawn gestures against a catalog of constellations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for batch matching (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Where the reference shapes come from and how they are prepared.
#[derive(Args, Debug, Clone)]
struct CatalogArgs {
    /// JSON catalog file (defaults to the built-in constellations)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Prepared catalog cache written by `prepare`
    #[arg(long, conflicts_with = "catalog")]
    cache: Option<PathBuf>,

    /// Number of points every shape is resampled to
    #[arg(long, default_value_t = MatchConfig::DEFAULT_SAMPLE_COUNT)]
    sample_count: usize,

    /// Longer bounding-box side after normalization
    #[arg(long, default_value_t = MatchConfig::DEFAULT_NORMALIZE_SIZE)]
    normalize_size: f64,
}

/// Optional JSON artifact output.
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    experiment: Option<String>,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Find the catalog entry closest to a single drawing
    Match {
        /// CSV file with `x,y` columns holding one drawing
        #[arg(long)]
        drawing: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the closest catalog entries for a single drawing, best first
    Rank {
        /// CSV file with `x,y` columns holding one drawing
        #[arg(long)]
        drawing: PathBuf,

        /// Number of entries to report
        #[arg(long, default_value_t = 3)]
        top_k: usize,

        #[command(flatten)]
        catalog: CatalogArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Match every drawing of an `id,x,y` CSV file in parallel
    Batch {
        /// CSV file with `id,x,y` columns
        #[arg(long)]
        drawings: PathBuf,

        /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Prepare a catalog once and save it as a binary cache
    Prepare {
        /// Experiment name for the cache file (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        experiment: String,

        /// Output directory for the cache file
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Show the entries of a catalog
    Catalog {
        /// JSON catalog file (defaults to the built-in constellations)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct MatchOutput<'a> {
    drawing: &'a str,
    n_points: usize,
    #[serde(rename = "match")]
    result: Option<&'a MatchResult>,
}

#[derive(Serialize)]
struct RankOutput<'a> {
    drawing: &'a str,
    n_points: usize,
    ranking: &'a [MatchResult],
}

#[derive(Serialize)]
struct BatchOutput {
    experiment: String,
    n_drawings: usize,
    n_matched: usize,
    output: PathBuf,
}

#[derive(Serialize)]
struct PrepareOutput {
    experiment: String,
    n_entries: usize,
    n_skipped: usize,
    sample_count: usize,
    normalize_size: f64,
    cache: PathBuf,
}

#[derive(Serialize)]
struct CatalogEntryOutput<'a> {
    index: usize,
    name: &'a str,
    n_stars: usize,
    matchable: bool,
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => CatalogReader::new(path)
            .read()
            .with_context(|| format!("failed to read catalog {}", path.display())),
        None => builtin_catalog().context("built-in catalog is malformed"),
    }
}

fn build_matcher(args: &CatalogArgs) -> Result<Matcher> {
    let config = MatchConfig::new(args.sample_count, args.normalize_size)
        .context("invalid matching parameters")?;

    if let Some(cache) = &args.cache {
        let prepared = PreparedCatalog::load(cache)
            .with_context(|| format!("failed to load catalog cache {}", cache.display()))?;
        return Matcher::from_prepared(prepared, config)
            .context("catalog cache was prepared with different parameters");
    }

    let catalog = load_catalog(args.catalog.as_deref())?;
    Ok(Matcher::new(&catalog, config))
}

/// Read a drawing file that must hold exactly one drawing.
fn read_single_drawing(path: &Path) -> Result<DrawingSet> {
    let set = DrawingReader::new(path)
        .read()
        .with_context(|| format!("failed to read drawing {}", path.display()))?;
    if set.len() != 1 {
        anyhow::bail!(
            "{} holds {} drawings, expected one (use `batch` for many)",
            path.display(),
            set.len()
        );
    }
    Ok(set)
}

/// Build a result writer when an experiment name was given.
fn writer_for(output: &OutputArgs) -> Result<Option<ResultWriter>> {
    let Some(name) = &output.experiment else {
        return Ok(None);
    };
    let experiment = ExperimentName::new(name.clone())?;
    Ok(Some(ResultWriter::new(&output.output_dir, experiment)?))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Match {
            drawing,
            catalog,
            output,
        } => {
            let matcher = build_matcher(&catalog)?;
            let set = read_single_drawing(&drawing)?;
            let (id, drawing) = (&set.ids[0], &set.drawings[0]);

            let result = matcher.find(drawing);
            match &result {
                Some(m) => info!(name = %m.name, score = %m.score, "matched"),
                None => info!("no match"),
            }

            if let Some(writer) = writer_for(&output)? {
                let ranking: Vec<MatchResult> = result.iter().cloned().collect();
                writer.write_match(id, &matcher.config(), &ranking)?;
            }

            let out = MatchOutput {
                drawing: id.as_str(),
                n_points: drawing.len(),
                result: result.as_ref(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Command::Rank {
            drawing,
            top_k,
            catalog,
            output,
        } => {
            let matcher = build_matcher(&catalog)?;
            let set = read_single_drawing(&drawing)?;
            let (id, drawing) = (&set.ids[0], &set.drawings[0]);

            let ranking = matcher.rank(drawing, top_k);
            info!(n_ranked = ranking.len(), "ranked catalog");

            if let Some(writer) = writer_for(&output)? {
                writer.write_match(id, &matcher.config(), &ranking)?;
            }

            let out = RankOutput {
                drawing: id.as_str(),
                n_points: drawing.len(),
                ranking: &ranking,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Command::Batch {
            drawings,
            experiment,
            output_dir,
            catalog,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let matcher = build_matcher(&catalog)?;

            // 1. Read drawings
            let set = DrawingReader::new(&drawings)
                .read()
                .with_context(|| format!("failed to read drawings {}", drawings.display()))?;

            // 2. Match in parallel
            let results = matcher.find_batch(&set.drawings);
            let n_matched = results.iter().filter(|r| r.is_some()).count();
            info!(n_drawings = set.len(), n_matched, "batch matched");

            // 3. Write batch JSON
            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let path = writer.write_batch(&set.ids, &matcher.config(), &results)?;

            // 4. Print summary
            let out = BatchOutput {
                experiment,
                n_drawings: set.len(),
                n_matched,
                output: path,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Command::Prepare {
            experiment,
            output_dir,
            catalog,
        } => {
            let experiment_name = ExperimentName::new(experiment.clone())?;
            let matcher = build_matcher(&catalog)?;
            let prepared = matcher.prepared();

            let writer = ResultWriter::new(&output_dir, experiment_name)?;
            let cache = writer.cache_path();
            prepared
                .save(&cache)
                .with_context(|| format!("failed to save catalog cache {}", cache.display()))?;

            let out = PrepareOutput {
                experiment,
                n_entries: prepared.len(),
                n_skipped: prepared.skipped(),
                sample_count: prepared.config().sample_count(),
                normalize_size: prepared.config().normalize_size(),
                cache,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Command::Catalog { catalog } => {
            let catalog = load_catalog(catalog.as_deref())?;
            let entries: Vec<CatalogEntryOutput> = catalog
                .iter()
                .enumerate()
                .map(|(index, entry)| CatalogEntryOutput {
                    index,
                    name: entry.name(),
                    n_stars: entry.stars().len(),
                    matchable: entry.stars().len() >= MIN_POINTS,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}
