//! Model price table
//!
//! Black-Scholes call and put prices for every usable strike of a chain.

use serde::{Deserialize, Serialize};

use super::check_market_inputs;
use super::render::Table;
use super::validation::{validate_for_model, RowStatus, SkippedRow};
use crate::core::{BsResult, ChainRow, PricingInput};

/// Model prices at one strike, full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRow {
    pub strike: f64,
    pub call: f64,
    pub put: f64,
    pub volatility: f64,
}

/// Rows in chain order plus the rows that were left out
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelTable {
    pub rows: Vec<ModelRow>,
    pub skipped: Vec<SkippedRow>,
}

impl ModelTable {
    pub const HEADERS: [&'static str; 4] = ["Strike", "Call Price", "Put Price", "Volatility"];

    /// Display form; every column but the strike is rounded
    pub fn to_table(&self, decimals: u32) -> Table {
        let mut table = Table::new(&Self::HEADERS);
        for row in &self.rows {
            table.push_row(vec![row.strike, row.call, row.put, row.volatility]);
        }
        table.round_columns(&[1, 2, 3], decimals);
        table
    }
}

/// Price every row of a chain under Black-Scholes.
///
/// Rows without a usable implied volatility are skipped and recorded in
/// `skipped`; they never fail the table. Spot, rate and time apply to the
/// whole chain and are rejected up front.
pub fn build_model_table(
    spot: f64,
    risk_free_rate: f64,
    time_to_expiry: f64,
    rows: &[ChainRow],
) -> BsResult<ModelTable> {
    check_market_inputs(spot, risk_free_rate, time_to_expiry)?;

    let mut table = ModelTable::default();

    for (index, row) in rows.iter().enumerate() {
        match validate_for_model(row) {
            RowStatus::Valid(valid) => {
                let prices = PricingInput::new(
                    spot,
                    valid.strike,
                    time_to_expiry,
                    risk_free_rate,
                    valid.volatility,
                )
                .price()?;

                table.rows.push(ModelRow {
                    strike: valid.strike,
                    call: prices.call,
                    put: prices.put,
                    volatility: valid.volatility,
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
        "Model table: {} rows priced, {} skipped",
        table.rows.len(),
        table.skipped.len()
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BsError;
    use crate::models::black_scholes;
    use crate::report::validation::SkipReason;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_skips_nan_vol_and_keeps_order() {
        let rows = vec![
            ChainRow::new(110.0).with_vol(0.30),
            ChainRow::new(90.0).with_vol(f64::NAN),
            ChainRow::new(100.0).with_vol(0.25),
        ];

        let table = build_model_table(100.0, 0.045, 0.5, &rows).unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].strike, 110.0);
        assert_eq!(table.rows[1].strike, 100.0);
        assert_eq!(
            table.skipped,
            vec![SkippedRow {
                index: 1,
                strike: 90.0,
                reason: SkipReason::NonFiniteVolatility
            }]
        );
    }

    #[test]
    fn test_rows_match_pricer() {
        let rows = vec![ChainRow::new(100.0).with_vol(0.20)];
        let table = build_model_table(100.0, 0.05, 1.0, &rows).unwrap();
        let expected = black_scholes::price(100.0, 100.0, 1.0, 0.05, 0.20).unwrap();

        let row = table.rows[0];
        assert_eq!(row.call, expected.call);
        assert_eq!(row.put, expected.put);
        assert_eq!(row.volatility, 0.20);
        assert_abs_diff_eq!(row.call, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn test_all_rows_skipped() {
        let rows = vec![
            ChainRow::new(100.0),
            ChainRow::new(105.0).with_vol(0.0),
            ChainRow::new(-5.0).with_vol(0.2),
        ];
        let table = build_model_table(100.0, 0.045, 0.5, &rows).unwrap();

        assert!(table.rows.is_empty());
        let reasons: Vec<SkipReason> = table.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::MissingVolatility,
                SkipReason::NonPositiveVolatility,
                SkipReason::InvalidStrike
            ]
        );
    }

    #[test]
    fn test_rejects_expired_chain() {
        let rows = vec![ChainRow::new(100.0).with_vol(0.20)];
        let err = build_model_table(100.0, 0.045, 0.0, &rows).unwrap_err();
        assert!(matches!(err, BsError::InvalidInput(_)));

        let err = build_model_table(-1.0, 0.045, 0.5, &rows).unwrap_err();
        assert!(matches!(err, BsError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_rate_that_overflows_prices() {
        let rows = vec![ChainRow::new(100.0).with_vol(0.20)];
        let err = build_model_table(100.0, -800.0, 1.0, &rows).unwrap_err();
        assert!(matches!(err, BsError::InvalidInput(_)));
    }

    #[test]
    fn test_to_table_rounds() {
        let table = ModelTable {
            rows: vec![ModelRow {
                strike: 102.5,
                call: 10.45067,
                put: 5.573526,
                volatility: 0.254449,
            }],
            skipped: Vec::new(),
        };

        let display = table.to_table(4);
        assert_eq!(display.headers(), &ModelTable::HEADERS.map(String::from));
        assert_eq!(display.rows()[0], vec![102.5, 10.4507, 5.5735, 0.2544]);
    }
}
