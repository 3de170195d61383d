//! `table-loader` loads spreadsheet and CSV files into an in-memory, column-oriented
//! [`types::Table`] and derives descriptive [`summary::Summary`] bundles from it.
//!
//! The primary entrypoint is [`ingestion::load_table`], which picks the reader from the file
//! extension. [`ingestion::load_table_with_summary`] also returns a summary, and
//! [`ingestion::sheet_names`] lists the sheets of a workbook.
//!
//! ## What you can load
//!
//! **File formats (detected by extension, case-insensitive):**
//!
//! - **CSV**: `.csv`
//! - **Excel workbooks** (Cargo feature `excel`, on by default): `.xlsx`, `.xls`
//!
//! Any other extension fails with [`LoadError::UnsupportedFormat`]; a missing file fails with
//! [`LoadError::NotFound`]. Both checks happen before the file is read.
//!
//! **Column types** are inferred per column:
//!
//! - [`types::DataType::Int64`], [`types::DataType::Float64`]: numeric columns
//! - [`types::DataType::Utf8`]: text (categorical) columns
//! - [`types::DataType::Bool`], [`types::DataType::DateTime`]: neither numeric nor categorical
//!
//! Empty cells and the markers in [`ingestion::DEFAULT_NA_VALUES`] map to [`types::Value::Null`].
//!
//! ## Quick example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use table_loader::ingestion::{load_table_with_summary, LoadOptions, SheetSelector};
//!
//! # fn main() -> Result<(), table_loader::LoadError> {
//! let opts = LoadOptions {
//!     sheet: SheetSelector::Name("Films".to_string()),
//!     ..Default::default()
//! };
//! let (table, summary) = load_table_with_summary(Some(Path::new("films.xlsx")), &opts)?;
//! println!("rows={} numeric={:?}", table.row_count(), summary.numeric_columns);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Progress and failures are reported through the [`log`] facade. The library installs no logger;
//! binaries pick one (e.g. `env_logger`).
//!
//! ## Modules
//!
//! - [`ingestion`]: loading entrypoints, options and format readers
//! - [`types`]: table, column and value types
//! - [`summary`]: descriptive statistics
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod summary;
pub mod types;

pub use error::{LoadError, LoadResult};
