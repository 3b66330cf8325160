//! qoffer CLI: fetch the public salary feed and print the MLB qualifying offer.
//!
//! Takes no arguments. Exits 0 with the report on stdout, or 1 with
//! `Error: ...` on stderr when the feed cannot be fetched, has no usable
//! table, or yields no valid records. Diagnostic logs go to stderr and are
//! controlled by `RUST_LOG` (default `warn`).

use anyhow::Result;
use clap::Parser;
use qoffer_core::data::HttpProvider;
use qoffer_core::{pipeline, CleanReport, OfferConfig, OfferReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qoffer",
    version,
    about = "Compute the MLB qualifying offer from the latest season's top 125 salaries"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let config = OfferConfig::default();
    let provider = HttpProvider::new(&config)?;

    println!("Retrieving salary data from {}...", provider.url());
    let report = pipeline::run(&provider, &config)?;

    print_parse_summary(&report.clean);
    print_offer(&report, config.preview);
    Ok(())
}

fn print_parse_summary(clean: &CleanReport) {
    let seasons: Vec<String> = clean.seasons.iter().map(|s| s.to_string()).collect();

    println!();
    println!("=== Parsing Summary ===");
    println!("Rows scanned:       {:>6}", clean.rows_total);
    println!("Rows kept:          {:>6}", clean.rows_kept);
    println!("Rows dropped:       {:>6}", clean.rows_dropped);
    println!("  Bad salaries:     {:>6}", clean.bad_salaries);
    println!("  Bad seasons:      {:>6}", clean.bad_seasons);
    println!("Missing level:      {:>6}", clean.missing_level);
    println!("Non-MLB level:      {:>6}", clean.non_major_league);
    println!("Seasons seen:       {}", seasons.join(", "));
}

fn print_offer(report: &OfferReport, preview: usize) {
    let offer = &report.offer;

    println!();
    println!("=== Qualifying Offer ===");
    println!("Season:             {}", offer.season);
    println!("Players in season:  {:>6}", offer.season_total);
    println!(
        "Salaries averaged:  {:>6} (threshold {})",
        offer.sample_size(),
        offer.threshold
    );
    println!("Top earner:         {}", format_money(offer.ceiling));
    println!("Lowest included:    {}", format_money(offer.floor));
    println!("Dataset:            {}", report.fingerprint.short());
    println!("Fetched at:         {}", report.fetched_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();
    println!("QUALIFYING OFFER:   {}", format_money(offer.value));

    let shown = offer.preview(preview);
    println!();
    println!("--- Top {} Earners ---", shown.len());
    println!("{:<4} {:<30} {:>16}", "#", "Player", "Salary");
    println!("{}", "-".repeat(52));
    for (idx, rec) in shown.iter().enumerate() {
        println!(
            "{:<4} {:<30} {:>16}",
            idx + 1,
            rec.player,
            format_money(rec.salary)
        );
    }
    let rest = offer.remaining_after(preview);
    if rest > 0 {
        println!("... plus {rest} more");
    }
    println!();
}

/// `$1,234,567.89`, rounded to cents.
fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}
