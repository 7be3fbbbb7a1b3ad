//! # Soldera Dashboard
//!
//! Command-line front end: loads the latest auction results, runs one backend
//! refresh cycle, and prints the selected batch's summary tables.

use anyhow::Context;
use clap::Parser;
use soldera_core::logging::init_structured_logging;
use soldera_core::{AuctionDashboard, BatchSummary, SolderaConfig, Technology};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "soldera-dashboard")]
#[command(about = "Refresh and summarize French Guarantees of Origin auction results")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Anti-forgery token for the refresh submission
    #[arg(long, env = "SOLDERA_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Batch date to display instead of the newest one
    #[arg(long)]
    select: Option<String>,

    /// Only fetch current results, do not start a backend refresh
    #[arg(long)]
    no_refresh: bool,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config =
        SolderaConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }
    if cli.csrf_token.is_some() {
        config.api.csrf_token = cli.csrf_token;
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }
    config.validate()?;
    init_structured_logging(&config.logging);

    let dashboard = AuctionDashboard::from_config(&config)?;
    let mut cycle = dashboard.watch_cycle();

    if cli.no_refresh {
        let _ = dashboard.fetch().await;
    } else {
        let (_, job) = dashboard.bootstrap().await;
        if let Ok(job_id) = job {
            info!(job_id = %job_id, "Waiting for refresh job");
            cycle.arm();
            tokio::select! {
                _ = cycle.settled() => {}
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted, stopping refresh");
                    dashboard.shutdown();
                }
            }
        }
    }

    if let Some(date) = cli.select {
        dashboard.select(date);
    }

    let snapshot = dashboard.snapshot();
    if snapshot.notification.visible {
        println!("[{}] {}\n", snapshot.notification.title(), snapshot.notification.text);
    }

    match dashboard.summary() {
        Some(summary) => print_summary(&summary),
        None => println!("No data available"),
    }

    dashboard.shutdown();
    Ok(())
}

fn print_summary(summary: &BatchSummary) {
    println!(
        "{} ({} participants, {} auctions)\n",
        summary.date, summary.number_of_participants, summary.record_count
    );

    println!(
        "{:<22} {:>14} {:>14} {:>9} {:>12}",
        "Technology", "Auctioned MWh", "Sold MWh", "Winners", "Avg €/MWh"
    );
    for tech in &summary.by_technology {
        println!(
            "{:<22} {:>14.0} {:>14.0} {:>9} {:>12.3}",
            tech.technology.label(),
            tech.volume_auctioned,
            tech.volume_sold,
            tech.total_winners,
            tech.display_average_price()
        );
    }

    println!();
    print!("{:<28}", "Region");
    for technology in &Technology::KNOWN {
        print!(" {:>20}", technology.label());
    }
    println!(" {:>12}", "Total MWh");
    for region in &summary.by_region {
        print!("{:<28}", region.region);
        for technology in &Technology::KNOWN {
            print!(
                " {:>9.0} @ {:>8.3}",
                region.volume_sold(technology),
                region.average_price(technology)
            );
        }
        println!(" {:>12.0}", region.total_volume_sold);
    }
}
