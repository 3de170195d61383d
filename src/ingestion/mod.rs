//! Loading entrypoints and format readers.
//!
//! Most callers should use the functions re-exported from [`load`] and [`sheets`]:
//!
//! - [`load_table`]: load a `.csv` / `.xlsx` / `.xls` file into a [`crate::types::Table`]
//! - [`load_table_with_summary`]: the same, plus a [`crate::summary::Summary`]
//! - [`sheet_names`]: list the sheets of a workbook (empty for CSV)
//!
//! Format-specific readers are also available under:
//! - [`csv`]
//! - `excel` (requires the `excel` feature)

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
mod infer;
pub mod load;
pub mod observability;
pub mod options;
pub mod sheets;

pub use infer::DEFAULT_NA_VALUES;
pub use load::{
    DEFAULT_DATA_PATH, LoadRequest, TableFormat, load_table, load_table_with_summary, resolve_path,
};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
};
pub use options::{CsvOptions, LoadOptions, ReadOptions, SheetSelector};
pub use sheets::sheet_names;
