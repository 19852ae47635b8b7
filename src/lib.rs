//! # BS Options - Black-Scholes model vs. market
//!
//! Prices European calls and puts with the Black-Scholes closed form and
//! lines the model up against live option chain quotes.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: call/put pricer with explicit input validation
//! - **Data Fetching**: Yahoo Finance spot prices and option chains behind
//!   the [`data::MarketDataSource`] trait
//! - **Reports**: model price table and model-vs-market table, rendered as
//!   a text table or JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bs_options::prelude::*;
//!
//! let reporter = Reporter::new(YahooClient::new().unwrap(), ReportConfig::default());
//! let expiry = parse_expiry("2028-01-21").unwrap();
//!
//! let report = reporter.comparison_table("AAPL", expiry).unwrap();
//! PrettyTable
//!     .render(&report.to_table(4), &mut std::io::stdout())
//!     .unwrap();
//! ```
//!
//! ## What This Crate Does NOT Do
//!
//! - Solve for implied volatility (the chain's quoted IV is used as given)
//! - Price American exercise or dividends
//! - Cache or persist market data

pub mod core;
pub mod data;
pub mod models;
pub mod report;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        parse_expiry, time_to_expiry, time_to_expiry_now, BsError, BsResult, CallChain, ChainRow,
        OptionType, PricingInput, PricingResult,
    };

    // Data fetching
    pub use crate::data::{MarketDataSource, StaticMarketData, YahooClient};

    // Models
    pub use crate::models::{
        call_price, norm_cdf, norm_pdf, price as bs_price, put_price,
    };

    // Reports
    pub use crate::report::{
        build_comparison_table, build_model_table, round_dp, ComparisonRow, ComparisonTable,
        JsonTable, ModelRow, ModelTable, PrettyTable, QuotePolicy, QuotedRow, Report,
        ReportConfig, ReportContext, Reporter, RowStatus, SkipReason, Table, TableRenderer,
        ValidRow,
    };
}

// Re-export main types at crate root
pub use crate::core::{BsError, BsResult};
pub use crate::models::black_scholes::price;
