//! Sheet listing.

use std::path::Path;

use log::{error, info};

use crate::error::LoadResult;

use super::load::{TableFormat, locate};

/// List the sheets of a workbook.
///
/// - `path = None` inspects [`super::DEFAULT_DATA_PATH`].
/// - Excel files return their sheet names in workbook order.
/// - CSV files have no sheets and return an empty list.
/// - Missing files and unsupported extensions fail before the file is opened.
///
/// ```no_run
/// use std::path::Path;
///
/// use table_loader::ingestion::sheet_names;
///
/// # fn main() -> Result<(), table_loader::LoadError> {
/// for name in sheet_names(Some(Path::new("films.xlsx")))? {
///     println!("{name}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn sheet_names(path: Option<&Path>) -> LoadResult<Vec<String>> {
    let (path, format) = locate(path).inspect_err(|e| error!("error reading sheet names: {e}"))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match format {
        TableFormat::Excel => {
            let names = workbook_sheet_names(&path)
                .inspect_err(|e| error!("error reading sheet names: {e}"))?;
            info!("available sheets in {file_name}: {names:?}");
            Ok(names)
        }
        TableFormat::Csv => {
            info!("CSV file {file_name} has no sheets (single table format)");
            Ok(Vec::new())
        }
    }
}

#[cfg(feature = "excel")]
fn workbook_sheet_names(path: &Path) -> LoadResult<Vec<String>> {
    super::excel::excel_sheet_names(path)
}

#[cfg(not(feature = "excel"))]
fn workbook_sheet_names(_path: &Path) -> LoadResult<Vec<String>> {
    Err(crate::error::LoadError::ExcelDisabled)
}
