//! Black-Scholes report CLI
//!
//! Prices the call chain of a ticker for one expiry and prints either the
//! model table or the model-vs-market comparison.
//!
//! ```text
//! bs_report compare AAPL 2028-01-21
//! bs_report --rate 0.04 --format json model SPY 2027-12-17
//! bs_report expiries AAPL
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bs_options::prelude::*;
use bs_options::report::DEFAULT_RISK_FREE_RATE;

#[derive(Parser)]
#[command(name = "bs_report")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Continuously compounded risk-free rate
    #[arg(short, long, global = true, default_value_t = DEFAULT_RISK_FREE_RATE)]
    rate: f64,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Pretty)]
    format: Format,

    /// Skip rows with negative quotes or bid above ask
    #[arg(long, global = true)]
    strict_quotes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Model call/put prices per strike
    Model {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
        /// Expiry date (YYYY-MM-DD)
        expiry: String,
    },

    /// Model call price against the market mid price per strike
    Compare {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
        /// Expiry date (YYYY-MM-DD)
        expiry: String,
    },

    /// List the expiries the provider has for a ticker
    Expiries {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

impl Format {
    fn renderer(self) -> Box<dyn TableRenderer> {
        match self {
            Format::Pretty => Box::new(PrettyTable),
            Format::Json => Box::new(JsonTable),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_upstream() {
                eprintln!("(market data unavailable; check the ticker or try again later)");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> BsResult<()> {
    let policy = if cli.strict_quotes {
        QuotePolicy::Strict
    } else {
        QuotePolicy::Permissive
    };
    let config = ReportConfig::default()
        .with_rate(cli.rate)
        .with_quote_policy(policy);
    let decimals = config.display_decimals;

    let client = YahooClient::new()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Model { ticker, expiry } => {
            let expiry = parse_expiry(expiry)?;
            let report = Reporter::new(client, config).model_table(ticker, expiry)?;
            cli.format.renderer().render(&report.to_table(decimals), &mut out)?;
            note_skipped(report.table.skipped.len());
        }
        Commands::Compare { ticker, expiry } => {
            let expiry = parse_expiry(expiry)?;
            let report = Reporter::new(client, config).comparison_table(ticker, expiry)?;
            cli.format.renderer().render(&report.to_table(decimals), &mut out)?;
            note_skipped(report.table.skipped.len());
        }
        Commands::Expiries { ticker } => {
            for expiry in client.get_expirations(ticker)? {
                writeln!(out, "{}", expiry)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn note_skipped(count: usize) {
    if count > 0 {
        tracing::info!("{} rows skipped for missing or invalid data", count);
    }
}
