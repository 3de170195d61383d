use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for load operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned by the loader, the sheet inspector and the summarizer.
///
/// `NotFound` and `UnsupportedFormat` are raised before any read is attempted. Errors surfaced by
/// the format readers are passed through unchanged in the `Io`, `Csv` and `Excel` variants.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The resolved path does not exist.
    #[error("file not found at: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The file extension is not one of `.xlsx`, `.xls`, `.csv`.
    #[error(
        "unsupported file format: '{extension}' ({}). Only .xlsx, .xls, and .csv files are supported",
        .path.display()
    )]
    UnsupportedFormat { extension: String, path: PathBuf },

    /// Underlying I/O error (e.g. permission denied, current directory unavailable).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Spreadsheet read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// Spreadsheet support was compiled out.
    #[error("excel loading not enabled (enable cargo feature 'excel')")]
    ExcelDisabled,

    /// A positional sheet selector points past the last sheet of the workbook.
    #[error("sheet index {index} out of range (workbook has {sheet_count} sheets)")]
    SheetIndexOutOfRange { index: usize, sheet_count: usize },

    /// A column requested through `use_columns` is not present in the header.
    #[error("column '{column}' not found. headers={headers:?}")]
    ColumnNotFound { column: String, headers: Vec<String> },

    /// A CSV record has more fields than the header.
    #[error("malformed row {row}: expected {expected} fields, saw {found}")]
    Malformed {
        row: usize,
        expected: usize,
        found: usize,
    },
}
