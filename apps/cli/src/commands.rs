//! CLI command definitions, routing, and tracing setup.

use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use logofill_core::pipeline::{self, EnrichProgress, RunReport};
use logofill_records::TableClient;
use logofill_resolve::{AliasResolver, ResolverChain};
use logofill_shared::{
    AppConfig, Credentials, EnrichOptions, SkipReason, StrategyKind, init_config, load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Fill missing company logos in a tabular base.
#[derive(Parser)]
#[command(
    name = "logofill",
    version,
    about = "Resolve company logo URLs and write them back to your base in batches.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Enrich the configured table with logo URLs.
    Run {
        /// Table to enrich, overriding the configured name.
        #[arg(long)]
        table: Option<String>,

        /// Comma-separated strategy order, e.g. "alias,brandfetch,clearbit".
        #[arg(long)]
        strategies: Option<String>,

        /// Updates per batch-update call (the store caps this at 10).
        #[arg(long)]
        batch_size: Option<usize>,

        /// Pause between batch flushes, in milliseconds.
        #[arg(long)]
        pause_ms: Option<u64>,

        /// Stop after scanning this many records.
        #[arg(long)]
        limit: Option<usize>,

        /// Resolve and report without writing anything back.
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the alias table (built-ins merged with config entries).
    Aliases,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "logofill=info",
        1 => "logofill=debug",
        _ => "logofill=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run {
            table,
            strategies,
            batch_size,
            pause_ms,
            limit,
            dry_run,
        } => cmd_run(table, strategies, batch_size, pause_ms, limit, dry_run).await,
        Command::Aliases => cmd_aliases().await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_run(
    table: Option<String>,
    strategies: Option<String>,
    batch_size: Option<usize>,
    pause_ms: Option<u64>,
    limit: Option<usize>,
    dry_run: bool,
) -> Result<()> {
    let mut config = load_config()?;
    if let Some(list) = strategies {
        config.resolver.strategies = list
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<StrategyKind>, _>>()?;
    }

    let mut credentials = Credentials::from_env(&config)?;
    if let Some(table) = table {
        credentials.table = table;
    }

    let table = TableClient::new(
        credentials.airtable_token.clone(),
        credentials.base_id.clone(),
        credentials.table.clone(),
    )?;
    let chain = ResolverChain::from_config(&config, &credentials)?;
    if chain.is_empty() {
        return Err(eyre!(
            "no resolution strategy is active; check [resolver] strategies and provider credentials"
        ));
    }

    // CLI flags override config file values
    let mut options = EnrichOptions::from(&config);
    if let Some(batch_size) = batch_size {
        options.batch_size = batch_size;
    }
    if let Some(pause_ms) = pause_ms {
        options.pause_ms = pause_ms;
    }
    options.limit = limit;
    options.dry_run = dry_run;

    info!(
        table = %credentials.table,
        strategies = ?chain.strategy_names(),
        dry_run,
        "starting logo enrichment"
    );

    let reporter = CliProgress::new();
    let report = pipeline::run_enrichment(&options, &table, &chain, &reporter).await?;

    // Print summary
    println!();
    if report.dry_run {
        println!("  Dry run complete, nothing written.");
    } else {
        println!("  Enrichment complete!");
    }
    println!("  Run ID:   {}", report.run_id);
    println!("  Scanned:  {}", report.scanned);
    println!("  Updated:  {}", report.updated);
    println!(
        "  Skipped:  {} enriched, {} nameless, {} unresolved",
        report.skipped_enriched, report.skipped_nameless, report.skipped_unresolved
    );
    println!("  Time:     {:.1}s", report.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }
}

impl EnrichProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn record_resolved(&self, company: &str, _url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Resolved [{current}/{total}] {company}"));
    }

    fn record_skipped(&self, record_id: &str, reason: SkipReason) {
        self.spinner
            .set_message(format!("Skipped {record_id} ({reason})"));
    }

    fn batch_flushed(&self, size: usize) {
        self.spinner.set_message(format!("Wrote batch of {size}"));
    }

    fn pacing(&self, pause: Duration) {
        self.spinner
            .set_message(format!("Pausing {:.1}s", pause.as_secs_f64()));
    }

    fn done(&self, _report: &RunReport) {
        self.spinner.finish_and_clear();
    }
}

async fn cmd_aliases() -> Result<()> {
    let config = load_config()?;
    let resolver = AliasResolver::with_extra(&config.aliases);

    println!();
    for (name, domain) in resolver.entries() {
        println!("  {name:<24} {domain}");
    }
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
