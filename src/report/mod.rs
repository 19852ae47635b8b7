//! Model and model-vs-market reports
//!
//! Two report variants over the call side of an option chain:
//! - Model table: Black-Scholes call/put price and volatility per strike
//! - Comparison table: model call price against the market mid price
//!
//! [`Reporter`] wires a [`MarketDataSource`] to the table builders; the
//! builders themselves are pure and can be called directly.

pub mod comparison;
pub mod config;
pub mod model_table;
pub mod render;
pub mod validation;

pub use comparison::*;
pub use config::*;
pub use model_table::*;
pub use render::*;
pub use validation::*;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{time_to_expiry, BsError, BsResult};
use crate::data::MarketDataSource;

/// Spot, rate and time shared by every row of a report
pub(crate) fn check_market_inputs(
    spot: f64,
    risk_free_rate: f64,
    time_to_expiry: f64,
) -> BsResult<()> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(BsError::invalid_input(format!(
            "spot must be positive and finite, got {}",
            spot
        )));
    }
    if !risk_free_rate.is_finite() {
        return Err(BsError::invalid_input(format!(
            "risk-free rate must be finite, got {}",
            risk_free_rate
        )));
    }
    if !(time_to_expiry.is_finite() && time_to_expiry > 0.0) {
        return Err(BsError::invalid_input(format!(
            "time to expiry must be positive, got {} years",
            time_to_expiry
        )));
    }
    Ok(())
}

/// Inputs a report was built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    pub underlying: String,
    pub expiry: NaiveDate,
    pub as_of: NaiveDate,
    pub spot: f64,
    pub risk_free_rate: f64,
    pub time_to_expiry: f64,
}

impl ReportContext {
    /// One-line summary used as the table title
    pub fn title(&self) -> String {
        format!(
            "{} calls expiring {} | spot {:.2} | rate {:.2}% | T {:.4}y",
            self.underlying,
            self.expiry,
            self.spot,
            self.risk_free_rate * 100.0,
            self.time_to_expiry
        )
    }
}

/// A built report together with its context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report<T> {
    pub context: ReportContext,
    pub table: T,
}

impl Report<ModelTable> {
    pub fn to_table(&self, decimals: u32) -> Table {
        self.table.to_table(decimals).with_title(self.context.title())
    }
}

impl Report<ComparisonTable> {
    pub fn to_table(&self, decimals: u32) -> Table {
        self.table.to_table(decimals).with_title(self.context.title())
    }
}

/// Fetches market data and builds reports
pub struct Reporter<S> {
    source: S,
    config: ReportConfig,
}

impl<S: MarketDataSource> Reporter<S> {
    pub fn new(source: S, config: ReportConfig) -> Self {
        Self { source, config }
    }

    /// Model table as of today's UTC date
    pub fn model_table(&self, symbol: &str, expiry: NaiveDate) -> BsResult<Report<ModelTable>> {
        self.model_table_on(symbol, expiry, Utc::now().date_naive())
    }

    pub fn model_table_on(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        today: NaiveDate,
    ) -> BsResult<Report<ModelTable>> {
        let (context, rows) = self.fetch(symbol, expiry, today)?;
        let table = build_model_table(
            context.spot,
            context.risk_free_rate,
            context.time_to_expiry,
            &rows,
        )?;
        Ok(Report { context, table })
    }

    /// Comparison table as of today's UTC date
    pub fn comparison_table(
        &self,
        symbol: &str,
        expiry: NaiveDate,
    ) -> BsResult<Report<ComparisonTable>> {
        self.comparison_table_on(symbol, expiry, Utc::now().date_naive())
    }

    pub fn comparison_table_on(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        today: NaiveDate,
    ) -> BsResult<Report<ComparisonTable>> {
        let (context, rows) = self.fetch(symbol, expiry, today)?;
        let table = build_comparison_table(
            context.spot,
            context.risk_free_rate,
            context.time_to_expiry,
            &rows,
            self.config.quote_policy,
        )?;
        Ok(Report { context, table })
    }

    /// Check the request, then pull spot and chain from the source
    fn fetch(
        &self,
        symbol: &str,
        expiry: NaiveDate,
        today: NaiveDate,
    ) -> BsResult<(ReportContext, Vec<crate::core::ChainRow>)> {
        self.config.validate()?;

        let tte = time_to_expiry(expiry, today, self.config.days_per_year);
        if tte <= 0.0 {
            return Err(BsError::invalid_input(format!(
                "expiry {} is not after {}",
                expiry, today
            )));
        }

        let spot = self.source.spot_price(symbol).map_err(|e| {
            tracing::warn!("Failed to get spot for {}: {}", symbol, e);
            e
        })?;
        let chain = self.source.call_chain(symbol, expiry).map_err(|e| {
            tracing::warn!("Failed to get chain for {} {}: {}", symbol, expiry, e);
            e
        })?;

        tracing::info!(
            "{} spot {} with {} calls expiring {} ({:.4}y)",
            symbol,
            spot,
            chain.len(),
            expiry,
            tte
        );

        let context = ReportContext {
            underlying: symbol.to_string(),
            expiry,
            as_of: today,
            spot,
            risk_free_rate: self.config.risk_free_rate,
            time_to_expiry: tte,
        };

        Ok((context, chain.rows))
    }
}
