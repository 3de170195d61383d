//! Path-based loading entrypoints.
//!
//! [`load_table`] resolves a path, checks that it exists, parses the extension into a
//! [`TableFormat`] and dispatches to the CSV or spreadsheet reader. [`load_table_with_summary`]
//! additionally derives a [`Summary`].

use std::fmt;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::{LoadError, LoadResult};
use crate::summary::{Summary, summarize};
use crate::types::Table;

use super::csv;
use super::observability::{LoadContext, LoadSeverity, LoadStats};
use super::options::{LoadOptions, ReadOptions, SheetSelector};

/// Workbook used when no path is given, relative to the current working directory.
pub const DEFAULT_DATA_PATH: &str = "examples/data/BDFO film analysis_2025-04-23.xlsx";

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Spreadsheet workbook (`.xlsx`, `.xls`).
    Excel,
}

impl TableFormat {
    /// Parse a format from a file extension without the leading dot (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" => Some(Self::Excel),
            _ => None,
        }
    }

    /// Format of `path`, or [`LoadError::UnsupportedFormat`] naming the offending extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| LoadError::UnsupportedFormat {
            extension: if ext.is_empty() {
                String::new()
            } else {
                format!(".{}", ext.to_ascii_lowercase())
            },
            path: path.to_path_buf(),
        })
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => f.write_str("CSV"),
            Self::Excel => f.write_str("Excel"),
        }
    }
}

/// Resolve an optional path: `None` becomes [`DEFAULT_DATA_PATH`] under the current directory.
pub fn resolve_path(path: Option<&Path>) -> LoadResult<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => {
            let resolved = std::env::current_dir()?.join(DEFAULT_DATA_PATH);
            info!("no file path provided, using {}", resolved.display());
            Ok(resolved)
        }
    }
}

/// Resolve `path`, check it exists and determine its format.
pub(crate) fn locate(path: Option<&Path>) -> LoadResult<(PathBuf, TableFormat)> {
    let path = resolve_path(path)?;
    if !path.exists() {
        return Err(LoadError::NotFound { path });
    }
    let format = TableFormat::from_path(&path)?;
    Ok((path, format))
}

/// Load a CSV or Excel file into a [`Table`].
///
/// - `path = None` loads [`DEFAULT_DATA_PATH`].
/// - Fails with [`LoadError::NotFound`] / [`LoadError::UnsupportedFormat`] before reading.
/// - `options.sheet` selects the workbook sheet; it is ignored for CSV files.
/// - Reader errors are logged and returned unchanged.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and column counts
/// - `on_failure` on a read failure, with a computed severity
/// - `on_alert` on a read failure when the severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use table_loader::ingestion::{load_table, LoadOptions};
///
/// # fn main() -> Result<(), table_loader::LoadError> {
/// let table = load_table(Some(Path::new("films.csv")), &LoadOptions::default())?;
/// println!("shape={:?}", table.shape());
/// # Ok(())
/// # }
/// ```
///
/// Selecting a sheet by name:
///
/// ```no_run
/// use std::path::Path;
///
/// use table_loader::ingestion::{load_table, LoadOptions};
///
/// # fn main() -> Result<(), table_loader::LoadError> {
/// let opts = LoadOptions::with_sheet("Summary");
/// let table = load_table(Some(Path::new("films.xlsx")), &opts)?;
/// println!("columns={:?}", table.column_names());
/// # Ok(())
/// # }
/// ```
pub fn load_table(path: Option<&Path>, options: &LoadOptions) -> LoadResult<Table> {
    let (path, format) = locate(path).inspect_err(|e| error!("error loading data: {e}"))?;

    let ctx = LoadContext {
        path: path.clone(),
        format,
    };

    let result = match format {
        TableFormat::Csv => csv::read_csv_from_path(&path, &options.read, &options.csv),
        TableFormat::Excel => read_excel_dispatch(&path, &options.sheet, &options.read),
    };

    match &result {
        Ok(table) => {
            info!("successfully loaded {format} data from: {}", path.display());
            info!("data shape: {:?}", table.shape());
            info!("columns: {:?}", table.column_names());
        }
        Err(e) => error!("error loading data from {}: {e}", path.display()),
    }

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                    columns: table.column_count(),
                },
            ),
            Err(e) => {
                let sev = LoadSeverity::of(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Load a file with [`load_table`] and derive its [`Summary`].
///
/// Fails exactly when [`load_table`] fails.
///
/// ```no_run
/// use std::path::Path;
///
/// use table_loader::ingestion::{load_table_with_summary, LoadOptions};
///
/// # fn main() -> Result<(), table_loader::LoadError> {
/// let (_table, summary) = load_table_with_summary(Some(Path::new("films.csv")), &LoadOptions::default())?;
/// println!("numeric={:?}", summary.numeric_columns);
/// # Ok(())
/// # }
/// ```
pub fn load_table_with_summary(
    path: Option<&Path>,
    options: &LoadOptions,
) -> LoadResult<(Table, Summary)> {
    let table = load_table(path, options)?;
    let summary = summarize(&table);

    info!("dataset information:");
    info!("shape: {:?}", summary.shape);
    info!("memory usage: {:.2} KB", summary.memory_usage as f64 / 1024.0);
    info!("numeric columns: {:?}", summary.numeric_columns);
    info!("categorical columns: {:?}", summary.categorical_columns);

    Ok((table, summary))
}

fn read_excel_dispatch(path: &Path, sheet: &SheetSelector, read: &ReadOptions) -> LoadResult<Table> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, sheet, read);

    #[cfg(feature = "excel")]
    {
        super::excel::read_excel_from_path(path, sheet, read)
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(LoadError::ExcelDisabled)
    }
}

/// Owned load request: a path plus options.
///
/// Useful when loads are described up front and executed later.
#[derive(Debug, Clone, Default)]
pub struct LoadRequest {
    /// Input path; `None` uses [`DEFAULT_DATA_PATH`].
    pub path: Option<PathBuf>,
    /// Options controlling the load.
    pub options: LoadOptions,
}

impl LoadRequest {
    /// Request for `path` with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            options: LoadOptions::default(),
        }
    }

    /// Execute the request by calling [`load_table`].
    pub fn run(&self) -> LoadResult<Table> {
        load_table(self.path.as_deref(), &self.options)
    }

    /// Execute the request by calling [`load_table_with_summary`].
    pub fn run_with_summary(&self) -> LoadResult<(Table, Summary)> {
        load_table_with_summary(self.path.as_deref(), &self.options)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::TableFormat;
    use crate::error::LoadError;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(TableFormat::from_extension("CSV"), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_extension("Xlsx"), Some(TableFormat::Excel));
        assert_eq!(TableFormat::from_extension("xls"), Some(TableFormat::Excel));
        assert_eq!(TableFormat::from_extension("xlsm"), None);
        assert_eq!(TableFormat::from_extension("json"), None);
    }

    #[test]
    fn unsupported_extension_is_named_with_dot() {
        let err = TableFormat::from_path(Path::new("data.TXT")).unwrap_err();
        match err {
            LoadError::UnsupportedFormat { extension, .. } => assert_eq!(extension, ".txt"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = TableFormat::from_path(Path::new("README")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { ref extension, .. } if extension.is_empty()));
    }
}
