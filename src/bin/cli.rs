//! MoMo Dashboard CLI
//!
//! Command-line interface for the dashboard:
//! - Show the summary cards and charts
//! - Browse the transaction table
//! - Aggregate a transaction export into a snapshot document
//! - Check server status

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use momo_dashboard::client::{DashboardSource, HttpSource};
use momo_dashboard::config::Config;
use momo_dashboard::dashboard::Dashboard;
use momo_dashboard::ingest::{SmsClassifier, TransactionStore};
use momo_dashboard::snapshot::write_snapshot;
use momo_dashboard::table::{refresh_table, TableState};
use momo_dashboard::view::render::{render_dashboard, render_table};

#[derive(Parser)]
#[command(name = "momo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mobile-money transaction dashboard")]
#[command(long_about = "MoMo Dashboard turns MoMo SMS transaction exports into summary cards,\ncharts and a searchable transaction table.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dashboard server URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Output of `momo dashboard`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewFormat {
    Table,
    Json,
}

/// Output of `momo transactions`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Table,
    Json,
    Csv,
}

/// Output of `momo aggregate`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SnapshotFormat {
    Xml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show summary cards, charts and top contacts
    Dashboard {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ViewFormat::Table)]
        format: ViewFormat,
    },

    /// List transactions
    Transactions {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Rows per page (default: from config)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Search details and phone numbers
        #[arg(short, long, default_value = "")]
        search: String,
        /// Transaction type, e.g. payment or incoming_money
        #[arg(short = 't', long = "type", default_value = "")]
        type_filter: String,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = TableFormat::Table)]
        format: TableFormat,
    },

    /// Aggregate a transaction or SMS backup export into a snapshot
    Aggregate {
        /// Transaction XML file
        input: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = SnapshotFormat::Xml)]
        format: SnapshotFormat,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.base_url {
        config.dashboard.base_url = url.clone();
    }

    momo_dashboard::logging::init(&config.logging);

    match cli.command {
        Commands::Dashboard { format } => {
            let source = HttpSource::new(config.dashboard.clone())?;
            let mut dashboard = Dashboard::new();

            if !dashboard.load(&source).await {
                eprintln!("Cannot load the dashboard from {}", source.snapshot_url());
                eprintln!();
                eprintln!("Make sure the dashboard server is running:");
                eprintln!("  cargo run --bin momo-api");
                std::process::exit(1);
            }

            if let Some(view) = dashboard.view() {
                match format {
                    ViewFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
                    ViewFormat::Table => print!("{}", render_dashboard(view)),
                }
            }
        }

        Commands::Transactions {
            page,
            limit,
            search,
            type_filter,
            format,
        } => {
            let source = HttpSource::new(config.dashboard.clone())?;
            let state = TableState::new(limit.unwrap_or(config.dashboard.page_size))
                .with_filters(search, type_filter)
                .with_page(page);

            match format {
                TableFormat::Json | TableFormat::Csv => {
                    let result = source.fetch_transactions(&state.query()).await;
                    let page = match result {
                        Ok(page) => page,
                        Err(e) => {
                            eprintln!("Failed to fetch transactions: {}", e);
                            std::process::exit(1);
                        }
                    };

                    if format == TableFormat::Json {
                        println!("{}", serde_json::to_string_pretty(&page)?);
                    } else {
                        let mut writer = csv::Writer::from_writer(std::io::stdout());
                        for tx in &page.transactions {
                            writer.serialize(tx)?;
                        }
                        writer.flush()?;
                    }
                }
                TableFormat::Table => {
                    let (_state, view) = refresh_table(&source, state).await;
                    match view {
                        Some(view) => print!("{}", render_table(&view)),
                        None => {
                            eprintln!("Failed to fetch transactions from {}", config.dashboard.base_url);
                            std::process::exit(1);
                        }
                    }
                }
            }
        }

        Commands::Aggregate {
            input,
            output,
            format,
        } => {
            let classifier = SmsClassifier::new()?;
            let store = TransactionStore::load(&input, &classifier)?;
            let snapshot = store.summarize();

            let document = match format {
                SnapshotFormat::Json => serde_json::to_string_pretty(&snapshot)?,
                SnapshotFormat::Xml => write_snapshot(&snapshot)?,
            };

            match output {
                Some(path) => {
                    write_output(&path, &document)?;
                    println!(
                        "Aggregated {} transactions into {:?}",
                        snapshot.total_transactions, path
                    );
                }
                None => println!("{}", document),
            }
        }

        Commands::Status => {
            let url = format!("{}/health", config.dashboard.base_url.trim_end_matches('/'));
            let response = reqwest::Client::new().get(&url).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("MoMo Dashboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    if let Some(count) = health["transactions"].as_u64() {
                        println!("Transactions: {}", count);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to the dashboard server at {}", config.dashboard.base_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the dashboard server is running:");
                    eprintln!("  cargo run --bin momo-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = momo_dashboard::config::generate_default_config();

            match output {
                Some(path) => {
                    write_output(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Write a file, creating its parent directory if needed
fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_per_command() {
        let cli = Cli::try_parse_from(["momo", "transactions", "--format", "csv", "-t", "payment"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Transactions { format: TableFormat::Csv, .. }
        ));

        let cli = Cli::try_parse_from(["momo", "aggregate", "export.xml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Aggregate { format: SnapshotFormat::Xml, .. }
        ));

        let cli = Cli::try_parse_from(["momo", "dashboard"]).unwrap();
        assert!(matches!(cli.command, Commands::Dashboard { format: ViewFormat::Table }));
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        assert!(Cli::try_parse_from(["momo", "dashboard", "--format", "csv"]).is_err());
        assert!(Cli::try_parse_from(["momo", "aggregate", "export.xml", "--format", "table"]).is_err());
        assert!(Cli::try_parse_from(["momo", "transactions", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(3_725), "1h 2m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }
}
