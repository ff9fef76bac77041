use anyhow::Context;
use clap::Parser;
use grievance_search::{
    catalog::Catalog,
    config::Config,
    models::ComplaintRecord,
    search::{self, InMemoryComplaintFeed, SearchAggregator},
};
use serde_json::json;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grievance-search")]
#[command(about = "Grievance portal live search", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to $CONFIG_PATH or config/default.toml)
    #[arg(short, long, env = "GRIEVANCE_SEARCH_CONFIG")]
    config: Option<PathBuf>,

    /// JSON array of complaints to seed the live feed with
    #[arg(long, value_name = "FILE")]
    complaints: Option<PathBuf>,

    /// Query to run; repeat for several. Reads one query per stdin line when absent
    #[arg(short, long = "query", value_name = "TEXT")]
    queries: Vec<String>,

    /// Override the maximum number of hits
    #[arg(long)]
    max_results: Option<usize>,

    /// Print Prometheus metrics after the queries
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            eprintln!("Failed to load configuration: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }),
    };
    if let Some(max_results) = cli.max_results {
        config.search.max_results = max_results;
        config.validate()?;
    }

    // Initialize tracing; stdout is reserved for results
    let json_logs = config.observability.json_logs;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("grievance_search={}", config.observability.log_level).into()
            }),
        )
        .with(json_logs.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    tracing::info!("Starting grievance-search v{}", env!("CARGO_PKG_VERSION"));

    config.search.metrics_enabled &= config.observability.metrics_enabled;
    if config.search.metrics_enabled {
        search::init_search_metrics();
        tracing::debug!("Prometheus metrics initialized");
    }

    let catalog = Catalog::from_config(&config.catalog).context("failed to load catalog")?;

    let feed = InMemoryComplaintFeed::new();
    if let Some(path) = &cli.complaints {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let records: Vec<ComplaintRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("invalid complaints file {}", path.display()))?;

        let count = records.len();
        for record in records {
            let id = record.id.clone();
            feed.upsert(record)
                .with_context(|| format!("invalid complaint {}", id))?;
        }
        tracing::info!(complaints = count, "Complaint feed seeded");
    }

    let aggregator = SearchAggregator::from_catalog(&feed, catalog, config.search.clone());
    if let Some(error) = aggregator.upstream_error() {
        tracing::warn!("{}", error);
    }

    if cli.queries.is_empty() {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            run_query(&aggregator, &line).await?;
        }
    } else {
        for query in &cli.queries {
            run_query(&aggregator, query).await?;
        }
    }

    if cli.metrics {
        print!("{}", search::metrics::gather_text()?);
    }

    let stats = aggregator.stats();
    tracing::info!(
        computations = stats.computations,
        stale_discards = stats.stale_discards,
        "Shutting down"
    );
    aggregator.dispose();

    Ok(())
}

async fn run_query(aggregator: &SearchAggregator, query: &str) -> anyhow::Result<()> {
    aggregator.set_query(query);
    let state = aggregator.settled().await;

    let output = json!({
        "query": state.query,
        "phase": state.phase,
        "results": &*state.results,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
