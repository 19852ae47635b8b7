//! Table rendering
//!
//! Reports are turned into a plain [`Table`] of numbers and handed to a
//! [`TableRenderer`]. Rounding happens here and nowhere else.

use serde::Serialize;
use std::io::Write;

use crate::core::{BsError, BsResult};

/// Round half away from zero to `decimals` places
pub fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Headers plus numeric rows, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            title: None,
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn push_row(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    /// Round the given columns in place
    pub fn round_columns(&mut self, columns: &[usize], decimals: u32) {
        for row in &mut self.rows {
            for &c in columns {
                if let Some(v) = row.get_mut(c) {
                    *v = round_dp(*v, decimals);
                }
            }
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Something that can write a table to an output stream
pub trait TableRenderer {
    fn render(&self, table: &Table, out: &mut dyn Write) -> BsResult<()>;
}

/// Bordered text table with centred cells
///
/// ```text
/// +--------+------------+
/// | Strike | Call Price |
/// +--------+------------+
/// |  100   |  10.4507   |
/// +--------+------------+
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyTable;

impl PrettyTable {
    fn separator(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for w in widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut line = String::from("|");
        for (cell, &w) in cells.iter().zip(widths) {
            line.push_str(&format!(" {:^w$} |", cell, w = w));
        }
        line
    }
}

impl TableRenderer for PrettyTable {
    fn render(&self, table: &Table, out: &mut dyn Write) -> BsResult<()> {
        let cells: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();

        let mut widths: Vec<usize> = table.headers().iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let separator = Self::separator(&widths);

        if let Some(title) = table.title() {
            writeln!(out, "{}", title)?;
        }
        writeln!(out, "{}", separator)?;
        writeln!(out, "{}", Self::line(table.headers(), &widths))?;
        writeln!(out, "{}", separator)?;
        for row in &cells {
            writeln!(out, "{}", Self::line(row, &widths))?;
        }
        writeln!(out, "{}", separator)?;

        Ok(())
    }
}

/// The table as a JSON document: `{"title", "headers", "rows"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTable;

impl TableRenderer for JsonTable {
    fn render(&self, table: &Table, out: &mut dyn Write) -> BsResult<()> {
        serde_json::to_writer_pretty(&mut *out, table)
            .map_err(|e| BsError::Serialization(e.to_string()))?;
        writeln!(out)?;
        Ok(())
    }
}
