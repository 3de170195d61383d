//! Descriptive summaries of a [`Table`].
//!
//! [`summarize`] derives a [`Summary`]: shape, column names and types, missing-value counts, the
//! numeric and categorical column subsets, an estimated memory footprint, and `describe`-style
//! statistics for every numeric column.
//!
//! ```rust
//! use table_loader::summary::summarize;
//! use table_loader::types::{Column, DataType, Table, Value};
//!
//! let table = Table::new(vec![
//!     Column::new("id", DataType::Int64, (1..=5).map(Value::Int64).collect()),
//!     Column::new(
//!         "label",
//!         DataType::Utf8,
//!         ["a", "b", "c", "d", "e"].iter().map(|s| Value::Utf8(s.to_string())).collect(),
//!     ),
//! ]);
//!
//! let summary = summarize(&table);
//! assert_eq!(summary.shape, (5, 2));
//! assert_eq!(summary.numeric_columns, vec!["id"]);
//! assert_eq!(summary.categorical_columns, vec!["label"]);
//! assert_eq!(summary.stats("id").and_then(|s| s.mean), Some(3.0));
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Column, DataType, Table};

/// Per-column descriptive statistics over non-missing values.
///
/// All fields except `count` are `None` when the column has no values; `std` is also `None` with a
/// single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    /// Number of non-missing values.
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator).
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q25: Option<f64>,
    #[serde(rename = "50%")]
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl NumericStats {
    /// Compute statistics over `values` (missing values already removed).
    pub fn from_values(values: &[f64]) -> Self {
        let count = values.len();
        if count == 0 {
            return Self {
                count,
                mean: None,
                std: None,
                min: None,
                q25: None,
                median: None,
                q75: None,
                max: None,
            };
        }

        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let std = (count > 1).then(|| {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1.0)).sqrt()
        });

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Self {
            count,
            mean: Some(mean),
            std,
            min: sorted.first().copied(),
            q25: Some(quantile(&sorted, 0.25)),
            median: Some(quantile(&sorted, 0.5)),
            q75: Some(quantile(&sorted, 0.75)),
            max: sorted.last().copied(),
        }
    }
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Descriptive bundle derived from a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// `(rows, columns)`.
    pub shape: (usize, usize),
    /// Column names in table order.
    pub columns: Vec<String>,
    /// Inferred type per column.
    pub dtypes: BTreeMap<String, DataType>,
    /// Missing-value count per column.
    pub missing_values: BTreeMap<String, usize>,
    /// Columns typed `Int64` / `Float64`, in table order.
    pub numeric_columns: Vec<String>,
    /// Text columns, in table order.
    pub categorical_columns: Vec<String>,
    /// Estimated memory footprint of the table in bytes.
    pub memory_usage: usize,
    /// Statistics per numeric column; absent when there are none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_stats: Option<BTreeMap<String, NumericStats>>,
}

impl Summary {
    /// Statistics of a numeric column.
    pub fn stats(&self, column: &str) -> Option<&NumericStats> {
        self.numeric_stats.as_ref()?.get(column)
    }

    /// Pretty-printed JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive a [`Summary`] from `table`.
pub fn summarize(table: &Table) -> Summary {
    let columns = table.columns();

    let names_where = |pred: fn(DataType) -> bool| -> Vec<String> {
        columns
            .iter()
            .filter(|c| pred(c.data_type))
            .map(|c| c.name.clone())
            .collect()
    };
    let numeric_columns = names_where(DataType::is_numeric);
    let categorical_columns = names_where(DataType::is_categorical);

    let numeric_stats = (!numeric_columns.is_empty()).then(|| {
        columns
            .iter()
            .filter(|c| c.data_type.is_numeric())
            .map(|c| (c.name.clone(), NumericStats::from_values(&c.numeric_values())))
            .collect()
    });

    Summary {
        shape: table.shape(),
        columns: table.column_names(),
        dtypes: columns.iter().map(|c| (c.name.clone(), c.data_type)).collect(),
        missing_values: columns
            .iter()
            .map(|c| (c.name.clone(), Column::null_count(c)))
            .collect(),
        numeric_columns,
        categorical_columns,
        memory_usage: table.estimated_size(),
        numeric_stats,
    }
}
