#![cfg(feature = "excel")]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, DataType as _, Reader, Sheets, Xls, Xlsx, open_workbook};

use crate::error::{LoadError, LoadResult};
use crate::types::Table;

use super::infer::{Cell, build_table};
use super::options::{ReadOptions, SheetSelector};

/// Read one sheet of an Excel workbook (`.xlsx`, `.xls`) into a [`Table`].
///
/// Behavior:
/// - Picks the sheet by position or name
/// - Rows are counted from the first used row of the sheet
/// - Cells keep their spreadsheet type (number, boolean, date, string); error cells are missing
pub fn read_excel_from_path(
    path: impl AsRef<Path>,
    sheet: &SheetSelector,
    read: &ReadOptions,
) -> LoadResult<Table> {
    let mut workbook = open_workbook_by_extension(path.as_ref())?;

    let range = match sheet {
        SheetSelector::Name(name) => workbook.worksheet_range(name)?,
        SheetSelector::Index(index) => {
            let sheet_count = workbook.sheet_names().len();
            workbook
                .worksheet_range_at(*index)
                .ok_or(LoadError::SheetIndexOutOfRange {
                    index: *index,
                    sheet_count,
                })??
        }
    };

    // Report 1-based row numbers (Excel-like).
    let first_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let grid: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    build_table(grid, first_row, read)
}

/// Names of all sheets in workbook order.
pub fn excel_sheet_names(path: impl AsRef<Path>) -> LoadResult<Vec<String>> {
    let workbook = open_workbook_by_extension(path.as_ref())?;
    Ok(workbook.sheet_names().to_vec())
}

/// `.xls` opens the legacy BIFF reader; everything else the OOXML reader. Matching is
/// case-insensitive.
fn open_workbook_by_extension(path: &Path) -> LoadResult<Sheets<BufReader<File>>> {
    let is_xls = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xls"));

    let sheets = if is_xls {
        Sheets::Xls(open_workbook::<Xls<_>, _>(path).map_err(calamine::Error::Xls)?)
    } else {
        Sheets::Xlsx(open_workbook::<Xlsx<_>, _>(path).map_err(calamine::Error::Xlsx)?)
    };
    Ok(sheets)
}

fn convert_cell(c: &Data) -> Cell {
    match c {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::Str(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match c.as_datetime() {
            Some(dt) => Cell::DateTime(dt),
            None => Cell::Str(c.to_string()),
        },
        Data::DurationIso(s) => Cell::Str(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{CellErrorType, Data};

    use super::convert_cell;
    use crate::ingestion::infer::Cell;

    #[test]
    fn error_cells_are_missing() {
        assert_eq!(convert_cell(&Data::Error(CellErrorType::NA)), Cell::Empty);
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn scalar_cells_keep_their_type() {
        assert_eq!(convert_cell(&Data::Float(1.5)), Cell::Float(1.5));
        assert_eq!(convert_cell(&Data::Int(3)), Cell::Int(3));
        assert_eq!(convert_cell(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(
            convert_cell(&Data::String("x".to_string())),
            Cell::Str("x".to_string())
        );
    }

    #[test]
    fn iso_datetime_strings_become_dates() {
        let cell = convert_cell(&Data::DateTimeIso("2025-04-23T10:30:00".to_string()));
        match cell {
            Cell::DateTime(dt) => assert_eq!(dt.to_string(), "2025-04-23 10:30:00"),
            other => panic!("expected datetime, got {other:?}"),
        }
    }
}
