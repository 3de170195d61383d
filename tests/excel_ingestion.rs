#![cfg(feature = "excel")]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use table_loader::LoadError;
use table_loader::ingestion::excel::{excel_sheet_names, read_excel_from_path};
use table_loader::ingestion::{
    LoadOptions, ReadOptions, SheetSelector, load_table, load_table_with_summary, sheet_names,
};
use table_loader::types::{DataType, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("table-loader-{name}-{nanos}.xlsx"))
}

fn write_films_xlsx(path: &Path) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();

    // Films: 3 rows, one missing rating
    let ws1 = wb.add_worksheet();
    ws1.set_name("Films").unwrap();
    ws1.write_string(0, 0, "title").unwrap();
    ws1.write_string(0, 1, "year").unwrap();
    ws1.write_string(0, 2, "rating").unwrap();
    ws1.write_string(0, 3, "released").unwrap();
    ws1.write_string(1, 0, "Alien").unwrap();
    ws1.write_number(1, 1, 1979).unwrap();
    ws1.write_number(1, 2, 8.5).unwrap();
    ws1.write_boolean(1, 3, true).unwrap();
    ws1.write_string(2, 0, "Heat").unwrap();
    ws1.write_number(2, 1, 1995).unwrap();
    ws1.write_boolean(2, 3, true).unwrap();
    ws1.write_string(3, 0, "Dune").unwrap();
    ws1.write_number(3, 1, 2021).unwrap();
    ws1.write_number(3, 2, 8.0).unwrap();
    ws1.write_boolean(3, 3, false).unwrap();

    // Notes: 1 row
    let ws2 = wb.add_worksheet();
    ws2.set_name("Notes").unwrap();
    ws2.write_string(0, 0, "note").unwrap();
    ws2.write_string(1, 0, "imported").unwrap();

    wb.save(path).unwrap();
}

#[test]
fn sheet_names_in_workbook_order() {
    let path = tmp_file("sheets");
    write_films_xlsx(&path);

    assert_eq!(sheet_names(Some(path.as_path())).unwrap(), vec!["Films", "Notes"]);
    assert_eq!(excel_sheet_names(&path).unwrap(), vec!["Films", "Notes"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_first_sheet_by_default() {
    let path = tmp_file("default");
    write_films_xlsx(&path);

    let t = load_table(Some(path.as_path()), &LoadOptions::default()).unwrap();
    assert_eq!(t.shape(), (3, 4));
    assert_eq!(t.column_names(), vec!["title", "year", "rating", "released"]);
    assert_eq!(t.column("year").unwrap().data_type, DataType::Int64);
    assert_eq!(t.column("year").unwrap().values[0], Value::Int64(1979));
    assert_eq!(t.column("rating").unwrap().data_type, DataType::Float64);
    assert_eq!(t.column("rating").unwrap().values[1], Value::Null);
    assert_eq!(t.column("released").unwrap().data_type, DataType::Bool);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn summary_excludes_bool_columns_from_both_sets() {
    let path = tmp_file("summary");
    write_films_xlsx(&path);

    let (t, summary) = load_table_with_summary(Some(path.as_path()), &LoadOptions::default()).unwrap();
    assert_eq!(summary.shape, t.shape());
    assert_eq!(summary.numeric_columns, vec!["year", "rating"]);
    assert_eq!(summary.categorical_columns, vec!["title"]);
    assert_eq!(summary.missing_values["rating"], 1);
    assert_eq!(summary.stats("rating").and_then(|s| s.mean), Some(8.25));
    assert_eq!(summary.stats("year").and_then(|s| s.max), Some(2021.0));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn select_sheet_by_name_and_index() {
    let path = tmp_file("select");
    write_films_xlsx(&path);

    let by_name = load_table(Some(path.as_path()), &LoadOptions::with_sheet("Notes")).unwrap();
    let by_index = load_table(Some(path.as_path()), &LoadOptions::with_sheet(SheetSelector::Index(1))).unwrap();
    assert_eq!(by_name, by_index);
    assert_eq!(by_name.shape(), (1, 1));
    assert_eq!(
        by_name.column("note").unwrap().values[0],
        Value::Utf8("imported".to_string())
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn sheet_index_out_of_range() {
    let path = tmp_file("oob");
    write_films_xlsx(&path);

    let err = load_table(Some(path.as_path()), &LoadOptions::with_sheet(SheetSelector::Index(5))).unwrap_err();
    assert!(matches!(
        err,
        LoadError::SheetIndexOutOfRange {
            index: 5,
            sheet_count: 2
        }
    ));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn unknown_sheet_name_is_passed_through() {
    let path = tmp_file("unknown");
    write_films_xlsx(&path);

    let err = load_table(Some(path.as_path()), &LoadOptions::with_sheet("Nope")).unwrap_err();
    assert!(matches!(err, LoadError::Excel(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_options_apply_to_sheets() {
    let path = tmp_file("options");
    write_films_xlsx(&path);

    let read = ReadOptions {
        use_columns: Some(vec!["rating".to_string(), "title".to_string()]),
        n_rows: Some(2),
        ..Default::default()
    };
    let t = read_excel_from_path(&path, &SheetSelector::default(), &read).unwrap();
    assert_eq!(t.column_names(), vec!["title", "rating"]);
    assert_eq!(t.row_count(), 2);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn corrupt_workbook_is_a_read_failure() {
    let path = std::env::temp_dir().join(format!(
        "table-loader-corrupt-{}.xls",
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(&path, b"not a workbook").unwrap();

    let err = load_table(Some(path.as_path()), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Excel(_)));
    let err = sheet_names(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, LoadError::Excel(_)));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn extension_match_is_case_insensitive() {
    let lower = tmp_file("case");
    write_films_xlsx(&lower);
    let upper = lower.with_extension("XLSX");
    std::fs::rename(&lower, &upper).unwrap();

    let t = load_table(Some(upper.as_path()), &LoadOptions::default()).unwrap();
    assert_eq!(t.row_count(), 3);

    let _ = std::fs::remove_file(&upper);
}
