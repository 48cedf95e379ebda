mod commands;
mod render;
mod utils;

use anyhow::Result;
use calendario_core::config::CalendarioConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "calendario")]
#[command(about = "Browse the academic calendar by month, year or list")]
struct Cli {
    /// CSV export to read (path or http(s) URL), overrides the config file
    #[arg(long, global = true)]
    source: Option<String>,

    /// Only show events of this product (repeatable)
    #[arg(short, long = "product", global = true)]
    products: Vec<String>,

    /// Only show events of this module (repeatable)
    #[arg(short, long = "module", global = true)]
    modules: Vec<String>,

    /// Only show events of this category (repeatable)
    #[arg(short, long = "category", global = true)]
    categories: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Month grid, shaded by the running academic period
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        month: Option<String>,
    },
    /// Overview of all twelve months
    Year {
        /// Year to show, defaults to the current year
        year: Option<i32>,
    },
    /// Events happening on one day
    Day {
        /// Day to show (DD/MM/YYYY or YYYY-MM-DD)
        date: String,
    },
    /// Every event, grouped by the month it starts in
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Summary grouped by module and category, as printed
    Report,
    /// Available products, modules and categories
    Facets,
    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = CalendarioConfig::load()?;

    if let Commands::Config = cli.command {
        return commands::config::run(&config);
    }

    let filters = commands::Filters {
        products: cli.products,
        modules: cli.modules,
        categories: cli.categories,
    };
    let session = commands::open_session(&config, cli.source.as_deref(), &filters).await?;

    match cli.command {
        Commands::Month { month } => commands::month::run(&session, month.as_deref()),
        Commands::Year { year } => commands::year::run(&session, year),
        Commands::Day { date } => commands::day::run(&session, &date),
        Commands::List { json } => commands::list::run(&session, json),
        Commands::Report => commands::report::run(&session),
        Commands::Facets => commands::facets::run(&session),
        Commands::Config => Ok(()),
    }
}

/// Logs go to stderr; `RUST_LOG=calendario_core=debug` shows skipped rows.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_with_filters() {
        let cli = Cli::try_parse_from([
            "calendario", "month", "2026-03", "-p", "EAD", "--module", "2026-51", "-p", "Graduação",
        ])
        .unwrap();

        assert_eq!(cli.products, vec!["EAD", "Graduação"]);
        assert_eq!(cli.modules, vec!["2026-51"]);
        assert!(cli.categories.is_empty());
        assert!(matches!(cli.command, Commands::Month { month: Some(ref m) } if m == "2026-03"));
    }

    #[test]
    fn test_parse_list_json_and_source() {
        let cli = Cli::try_parse_from(["calendario", "--source", "feed.csv", "list", "--json"]).unwrap();

        assert_eq!(cli.source.as_deref(), Some("feed.csv"));
        assert!(matches!(cli.command, Commands::List { json: true }));
    }

    #[test]
    fn test_day_requires_date() {
        assert!(Cli::try_parse_from(["calendario", "day"]).is_err());
    }
}
