use clap::{Args, Parser, Subcommand, ValueEnum};
use dedupe::{
    build_local_pipeline, cluster_preview, io, retail_schema, summarize, DatasetGenerator,
    EmbeddingBackend, PipelineConfig, RETAIL_COLUMNS,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Customer entity-resolution engine
#[derive(Parser, Debug)]
#[command(name = "dedupe")]
#[command(about = "Deduplicate customer records into clusters", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate or load a dataset, run the pipeline, and write clusters + summary
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Number of records to generate (ignored when --input is given)
    #[arg(long, default_value_t = 2000)]
    size: usize,

    /// Fraction of generated records that are perturbed duplicates
    #[arg(long, default_value_t = 0.15)]
    duplicate_rate: f64,

    /// Dataset generator seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Minimum embedding similarity for a candidate pair
    #[arg(long, default_value_t = 0.95)]
    similarity_threshold: f32,

    /// Edit budget for the deterministic name rule
    #[arg(long, default_value_t = 1)]
    max_edits: usize,

    /// Load records from a JSON file instead of generating them
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for dataset, clusters, and summary outputs
    #[arg(long, default_value = "data/run_output")]
    output_dir: PathBuf,

    /// Embedding backend
    #[arg(long, value_enum, default_value_t = BackendArg::Hashing)]
    embedding_backend: BackendArg,

    /// Model name for the local embedding backend
    #[arg(long, default_value = "all-minilm-l6-v2")]
    embedding_model: String,

    /// Number of sample clusters to print (0 disables the preview)
    #[arg(long, default_value_t = 10)]
    show_clusters: usize,

    /// Disable the canonical-email candidate filter
    #[arg(long)]
    no_email_constraint: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Hashing,
    Local,
}

impl From<BackendArg> for EmbeddingBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Hashing => EmbeddingBackend::Hashing,
            BackendArg::Local => EmbeddingBackend::Local,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting dedupe v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run(args) => run(args),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.output_dir)?;

    let schema = retail_schema()?;

    let (records, dataset_path) = match &args.input {
        Some(path) => {
            info!("Loading records from {:?}", path);
            (io::read_records(path)?, path.clone())
        }
        None => {
            info!(size = args.size, seed = args.seed, "Generating dataset");
            let records = DatasetGenerator::new(args.seed).generate(
                &RETAIL_COLUMNS,
                &schema,
                args.size,
                args.duplicate_rate,
            );
            let path = args.output_dir.join("dataset.json");
            io::write_records(&path, &records)?;
            (records, path)
        }
    };

    let config = PipelineConfig {
        embedding_backend: args.embedding_backend.into(),
        local_model: args.embedding_model.clone(),
        similarity_threshold: args.similarity_threshold,
        max_edits: args.max_edits,
        email_constraint: !args.no_email_constraint,
        ..PipelineConfig::default()
    };
    let pipeline = build_local_pipeline(&config, schema)?;

    let outcome = pipeline.run_with_stats(&records)?;
    let summary = summarize(&outcome.stats, &outcome.clusters);

    let clusters_path = args.output_dir.join("clusters.json");
    let summary_path = args.output_dir.join("summary.json");
    io::write_json(&clusters_path, &outcome.clusters)?;
    io::write_json(&summary_path, &summary)?;

    println!("Dataset: {}", dataset_path.display());
    println!("Clusters: {}", clusters_path.display());
    println!("Summary: {}", summary_path.display());
    println!("---");
    println!("records={}", summary.record_count);
    println!("candidate_pairs={}", summary.candidate_pair_count);
    println!(
        "candidate_pairs_after_email_constraint={}",
        summary.retained_candidate_count
    );
    println!("clusters={}", summary.cluster_count);
    println!("clustered_records={}", summary.clustered_record_count);
    println!("avg_cluster_size={}", summary.avg_cluster_size);

    if args.show_clusters > 0 {
        let preview = cluster_preview(&outcome.clusters, &records, args.show_clusters);
        println!("---");
        println!("sample_clusters=");
        println!("{}", serde_json::to_string_pretty(&preview)?);
    }

    Ok(())
}
