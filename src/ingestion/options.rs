//! Read configuration.
//!
//! [`LoadOptions`] replaces a free-form option bag with typed fields: shared settings in
//! [`ReadOptions`], CSV dialect settings in [`CsvOptions`], and the spreadsheet [`SheetSelector`].

use std::fmt;
use std::sync::Arc;

use super::observability::{LoadObserver, LoadSeverity};

/// Which sheet of a workbook to load. Ignored for CSV files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSelector {
    /// Zero-based position in workbook order.
    Index(usize),
    /// Sheet name.
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl From<usize> for SheetSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for SheetSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for SheetSelector {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(n) => write!(f, "'{n}'"),
        }
    }
}

/// Options shared by every format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Row holding the column names, counted after `skip_rows`. Rows above it are dropped.
    ///
    /// `None` means the data has no header; columns are named `0`, `1`, ...
    pub header_row: Option<usize>,
    /// Leading rows to drop before looking for the header.
    pub skip_rows: usize,
    /// Maximum number of data rows to load.
    pub n_rows: Option<usize>,
    /// Only load these columns (kept in file order).
    pub use_columns: Option<Vec<String>>,
    /// Additional strings treated as missing values.
    pub na_values: Vec<String>,
    /// Also treat the built-in markers ([`super::DEFAULT_NA_VALUES`]) as missing.
    pub keep_default_na: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            header_row: Some(0),
            skip_rows: 0,
            n_rows: None,
            use_columns: None,
            na_values: Vec::new(),
            keep_default_na: true,
        }
    }
}

/// CSV dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
    /// Lines starting with this byte are ignored.
    pub comment: Option<u8>,
    /// Trim surrounding whitespace from fields and headers. Untrimmed header names keep their
    /// whitespace.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            comment: None,
            trim: true,
        }
    }
}

/// Options controlling [`super::load_table`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Sheet to load from a workbook.
    pub sheet: SheetSelector,
    /// Format-independent read settings.
    pub read: ReadOptions,
    /// CSV-specific settings.
    pub csv: CsvOptions,
    /// Optional observer for load outcomes.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("sheet", &self.sheet)
            .field("read", &self.read)
            .field("csv", &self.csv)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sheet: SheetSelector::default(),
            read: ReadOptions::default(),
            csv: CsvOptions::default(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Default options with the given sheet selected.
    pub fn with_sheet(sheet: impl Into<SheetSelector>) -> Self {
        Self {
            sheet: sheet.into(),
            ..Default::default()
        }
    }
}
