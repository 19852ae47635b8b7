//! Model-vs-market table
//!
//! Black-Scholes call prices next to the observed mid price.

use serde::{Deserialize, Serialize};

use super::check_market_inputs;
use super::render::Table;
use super::validation::{validate_for_comparison, QuotePolicy, RowStatus, SkippedRow};
use crate::core::{BsResult, ChainRow, PricingInput};

/// Model and market call price at one strike, full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub strike: f64,
    pub volatility: f64,
    pub model_price: f64,
    pub market_price: f64,
    /// market_price - model_price
    pub difference: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub rows: Vec<ComparisonRow>,
    pub skipped: Vec<SkippedRow>,
}

impl ComparisonTable {
    pub const HEADERS: [&'static str; 5] = [
        "Strike",
        "Volatility",
        "Model Call Price",
        "Market Call Price",
        "Difference",
    ];

    pub fn to_table(&self, decimals: u32) -> Table {
        let mut table = Table::new(&Self::HEADERS);
        for row in &self.rows {
            table.push_row(vec![
                row.strike,
                row.volatility,
                row.model_price,
                row.market_price,
                row.difference,
            ]);
        }
        table.round_columns(&[1, 2, 3, 4], decimals);
        table
    }
}

/// Compare Black-Scholes call prices against the chain's mid prices.
///
/// A row is skipped when its implied volatility is unusable or its mid
/// price is missing or non-finite; `policy` adds bid/ask sanity checks.
pub fn build_comparison_table(
    spot: f64,
    risk_free_rate: f64,
    time_to_expiry: f64,
    rows: &[ChainRow],
    policy: QuotePolicy,
) -> BsResult<ComparisonTable> {
    check_market_inputs(spot, risk_free_rate, time_to_expiry)?;

    let mut table = ComparisonTable::default();

    for (index, row) in rows.iter().enumerate() {
        match validate_for_comparison(row, policy) {
            RowStatus::Valid(valid) => {
                let market_price = valid.market_price;
                let model_price = PricingInput::new(
                    spot,
                    valid.strike,
                    time_to_expiry,
                    risk_free_rate,
                    valid.volatility,
                )
                .price()?
                .call;

                table.rows.push(ComparisonRow {
                    strike: valid.strike,
                    volatility: valid.volatility,
                    model_price,
                    market_price,
                    difference: market_price - model_price,
                });
            }
            RowStatus::Skipped(reason) => {
                tracing::debug!("Skipping strike {} (row {}): {}", row.strike, index, reason);
                table.skipped.push(SkippedRow {
                    index,
                    strike: row.strike,
                    reason,
                });
            }
        }
    }

    tracing::info!(
        "Comparison table: {} rows compared, {} skipped",
        table.rows.len(),
        table.skipped.len()
    );

    Ok(table)
}
