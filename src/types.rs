//! Core data model types.
//!
//! Loading produces a column-oriented [`Table`]: an ordered list of named [`Column`]s, each holding
//! values of a single inferred [`DataType`].

use std::fmt;
use std::mem::size_of;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Inferred logical type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Date and time without timezone (spreadsheet date cells).
    DateTime,
}

impl DataType {
    /// `true` for [`DataType::Int64`] and [`DataType::Float64`].
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }

    /// `true` for text columns.
    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Utf8)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
            Self::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// A single named, typed field of a [`Table`]'s schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing a table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Date and time.
    DateTime(NaiveDateTime),
}

impl Value {
    /// `true` for [`Value::Null`] and NaN floats.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Float64(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value, for `Int64` and `Float64` cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    fn heap_size(&self) -> usize {
        match self {
            Self::Utf8(s) => s.len(),
            _ => 0,
        }
    }
}

/// A named column of values sharing one [`DataType`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name (unique within a table).
    pub name: String,
    /// Inferred column type. Non-null values match it.
    pub data_type: DataType,
    /// One value per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Create a column.
    pub fn new(name: impl Into<String>, data_type: DataType, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    /// Number of missing values.
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Non-null numeric values in row order. Empty for non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(Value::as_f64)
            .filter(|v| !v.is_nan())
            .collect()
    }

    /// Estimated bytes held by this column, including string payloads.
    pub fn estimated_size(&self) -> usize {
        size_of::<Self>()
            + self.name.len()
            + self.values.len() * size_of::<Value>()
            + self.values.iter().map(Value::heap_size).sum::<usize>()
    }
}

/// In-memory, column-oriented table.
///
/// All columns have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns.
    ///
    /// # Panics
    ///
    /// Panics if columns have different lengths.
    pub fn new(columns: Vec<Column>) -> Self {
        if let Some(first) = columns.first() {
            let rows = first.values.len();
            assert!(
                columns.iter().all(|c| c.values.len() == rows),
                "all columns must have the same length"
            );
        }
        Self { columns }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The table's schema (name and type of each column).
    pub fn schema(&self) -> Schema {
        Schema::new(
            self.columns
                .iter()
                .map(|c| Field::new(c.name.clone(), c.data_type))
                .collect(),
        )
    }

    /// Missing-value count of a column, if present.
    pub fn null_count(&self, name: &str) -> Option<usize> {
        self.column(name).map(Column::null_count)
    }

    /// Values of row `idx`, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&Value>> {
        if idx >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    /// Estimated memory footprint in bytes: value slots, string payloads and column names.
    pub fn estimated_size(&self) -> usize {
        size_of::<Self>() + self.columns.iter().map(Column::estimated_size).sum::<usize>()
    }
}
