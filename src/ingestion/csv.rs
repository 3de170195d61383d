//! CSV reader.

use std::path::Path;

use crate::error::LoadResult;
use crate::types::Table;

use super::infer::{Cell, build_table};
use super::options::{CsvOptions, ReadOptions};

/// Read a CSV file into a [`Table`], inferring column types.
///
/// Rules:
///
/// - The header row is selected by [`ReadOptions::header_row`] (first row by default).
/// - Blank and whitespace-only lines are skipped; a line of bare delimiters is a row of missing
///   values.
/// - Rows shorter than the header are padded with missing values; longer rows are an error.
pub fn read_csv_from_path(
    path: impl AsRef<Path>,
    read: &ReadOptions,
    dialect: &CsvOptions,
) -> LoadResult<Table> {
    let mut rdr = reader_builder(dialect).from_path(path)?;
    read_csv_from_reader(&mut rdr, read)
}

/// Read CSV data from an existing reader.
///
/// The reader should be built without header handling (see [`reader_builder`]) so the header row
/// reaches [`ReadOptions`] processing.
pub fn read_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    read: &ReadOptions,
) -> LoadResult<Table> {
    let mut grid: Vec<Vec<Cell>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // Whitespace-only lines; delimiter-only lines stay as rows of missing values.
        if record.len() == 1 && record.get(0).is_some_and(|f| f.trim().is_empty()) {
            continue;
        }
        grid.push(record.iter().map(|f| Cell::Raw(f.to_owned())).collect());
    }

    build_table(grid, 1, read)
}

/// A `csv::ReaderBuilder` configured for `dialect`.
///
/// Header handling and record length checks are left to the loader.
pub fn reader_builder(dialect: &CsvOptions) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .delimiter(dialect.delimiter)
        .quote(dialect.quote)
        .comment(dialect.comment)
        .trim(if dialect.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        });
    builder
}

#[cfg(test)]
mod tests {
    use super::{read_csv_from_reader, reader_builder};
    use crate::ingestion::options::{CsvOptions, ReadOptions};
    use crate::types::{DataType, Value};

    #[test]
    fn semicolon_dialect_with_comments() {
        let dialect = CsvOptions {
            delimiter: b';',
            comment: Some(b'#'),
            ..Default::default()
        };
        let input = "# exported\nid;name\n1;Ada\n\n2;Grace\n";
        let mut rdr = reader_builder(&dialect).from_reader(input.as_bytes());

        let t = read_csv_from_reader(&mut rdr, &ReadOptions::default()).unwrap();
        assert_eq!(t.shape(), (2, 2));
        assert_eq!(t.column("id").unwrap().data_type, DataType::Int64);
        assert_eq!(t.column("name").unwrap().values[1], Value::Utf8("Grace".to_string()));
    }

    #[test]
    fn trims_fields_by_default() {
        let input = " id , name \n 1 , Ada \n";
        let mut rdr = reader_builder(&CsvOptions::default()).from_reader(input.as_bytes());

        let t = read_csv_from_reader(&mut rdr, &ReadOptions::default()).unwrap();
        assert_eq!(t.column_names(), vec!["id", "name"]);
        assert_eq!(t.column("id").unwrap().values[0], Value::Int64(1));
    }

    #[test]
    fn delimiter_only_line_is_a_row_of_missing_values() {
        let input = "a,b\n1,x\n,\n   \n3,z\n";
        let mut rdr = reader_builder(&CsvOptions::default()).from_reader(input.as_bytes());

        let t = read_csv_from_reader(&mut rdr, &ReadOptions::default()).unwrap();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.null_count("a"), Some(1));
        assert_eq!(t.null_count("b"), Some(1));
        assert_eq!(t.column("a").unwrap().values[1], Value::Null);
        assert_eq!(t.column("a").unwrap().data_type, DataType::Int64);
    }

    #[test]
    fn untrimmed_dialect_keeps_header_whitespace() {
        let dialect = CsvOptions {
            trim: false,
            ..Default::default()
        };
        let input = " id ,name\n 1 ,Ada\n";
        let mut rdr = reader_builder(&dialect).from_reader(input.as_bytes());

        let t = read_csv_from_reader(&mut rdr, &ReadOptions::default()).unwrap();
        assert_eq!(t.column_names(), vec![" id ", "name"]);
        assert_eq!(t.column(" id ").unwrap().values[0], Value::Utf8(" 1 ".to_string()));
    }

    #[test]
    fn nan_text_without_default_markers_is_missing() {
        let read = ReadOptions {
            keep_default_na: false,
            ..Default::default()
        };
        let input = "v\n1\nnan\n3\n";
        let mut rdr = reader_builder(&CsvOptions::default()).from_reader(input.as_bytes());

        let t = read_csv_from_reader(&mut rdr, &read).unwrap();
        let col = t.column("v").unwrap();
        assert_eq!(col.data_type, DataType::Float64);
        assert_eq!(col.values, vec![Value::Float64(1.0), Value::Null, Value::Float64(3.0)]);
        assert_eq!(col.null_count(), 1);
    }

    #[test]
    fn header_only_input_has_zero_rows() {
        let input = "a,b\n";
        let mut rdr = reader_builder(&CsvOptions::default()).from_reader(input.as_bytes());

        let t = read_csv_from_reader(&mut rdr, &ReadOptions::default()).unwrap();
        assert_eq!(t.shape(), (0, 2));
        assert_eq!(t.column("a").unwrap().data_type, DataType::Float64);
    }
}
