//! Grid-to-[`Table`] conversion shared by the CSV and spreadsheet readers.
//!
//! Readers produce a grid of [`Cell`]s (header row included). This module applies the shared
//! [`ReadOptions`]: row skipping, header detection and normalization, missing-value markers,
//! column projection and per-column type inference.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;

use crate::error::{LoadError, LoadResult};
use crate::types::{Column, DataType, Table, Value};

use super::options::ReadOptions;

/// Missing-value markers recognized when [`ReadOptions::keep_default_na`] is set.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A raw cell as produced by a format reader.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Empty,
    /// Untyped text (CSV field); its type is inferred from its content.
    Raw(String),
    /// A string cell from a typed source (spreadsheet); always text.
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Int,
    Float,
    Bool,
    DateTime,
    Text,
}

/// Build a [`Table`] from a reader grid.
///
/// `first_row` is the 1-based position of `grid[0]` in the source, used in error messages.
pub(crate) fn build_table(
    grid: Vec<Vec<Cell>>,
    first_row: usize,
    options: &ReadOptions,
) -> LoadResult<Table> {
    let mut rows = grid.into_iter().skip(options.skip_rows);
    let mut data_row_base = first_row + options.skip_rows;

    let header: Option<Vec<Cell>> = match options.header_row {
        Some(h) => {
            let header = rows.nth(h);
            data_row_base += h + 1;
            match header {
                Some(header) => Some(header),
                None => return Ok(Table::default()),
            }
        }
        None => None,
    };

    let mut data: Vec<Vec<Cell>> = match options.n_rows {
        Some(n) => rows.take(n).collect(),
        None => rows.collect(),
    };

    let names = match header {
        Some(cells) => {
            let expected = cells.len();
            for (idx0, row) in data.iter().enumerate() {
                if row.len() > expected {
                    return Err(LoadError::Malformed {
                        row: data_row_base + idx0,
                        expected,
                        found: row.len(),
                    });
                }
            }
            normalize_header(cells.iter().map(cell_to_header_string).collect())
        }
        None => {
            let width = data.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| i.to_string()).collect()
        }
    };

    let na = na_markers(options);
    let projection = project_columns(&names, options.use_columns.as_deref())?;

    let mut columns: Vec<Vec<Cell>> = projection.iter().map(|_| Vec::with_capacity(data.len())).collect();
    for row in data.iter_mut() {
        for (out, &src) in columns.iter_mut().zip(projection.iter()) {
            let cell = row
                .get_mut(src)
                .map(|c| std::mem::replace(c, Cell::Empty))
                .unwrap_or(Cell::Empty);
            out.push(mask_missing(cell, &na));
        }
    }

    let columns = projection
        .iter()
        .zip(columns)
        .map(|(&src, cells)| {
            let data_type = infer_type(&cells);
            let values = cells.into_iter().map(|c| convert_cell(c, data_type)).collect();
            Column::new(names[src].clone(), data_type, values)
        })
        .collect();

    Ok(Table::new(columns))
}

/// Blank names become `Unnamed: {i}`; repeated names get `.1`, `.2`, ... suffixes.
fn normalize_header(raw: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut dup_counts: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<String> = Vec::with_capacity(raw.len());

    for (idx, name) in raw.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            name
        };

        let mut candidate = base.clone();
        if seen.contains(&base) {
            let mut n = dup_counts.get(&base).copied().unwrap_or(0);
            loop {
                n += 1;
                candidate = format!("{base}.{n}");
                if !seen.contains(&candidate) {
                    break;
                }
            }
            dup_counts.insert(base, n);
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

fn project_columns(names: &[String], wanted: Option<&[String]>) -> LoadResult<Vec<usize>> {
    let Some(wanted) = wanted else {
        return Ok((0..names.len()).collect());
    };

    for w in wanted {
        if !names.iter().any(|n| n == w) {
            return Err(LoadError::ColumnNotFound {
                column: w.clone(),
                headers: names.to_vec(),
            });
        }
    }

    Ok(names
        .iter()
        .enumerate()
        .filter(|(_, n)| wanted.contains(n))
        .map(|(idx, _)| idx)
        .collect())
}

fn na_markers(options: &ReadOptions) -> HashSet<String> {
    let mut set: HashSet<String> = options.na_values.iter().cloned().collect();
    if options.keep_default_na {
        set.extend(DEFAULT_NA_VALUES.iter().map(|s| s.to_string()));
    }
    set
}

fn mask_missing(cell: Cell, na: &HashSet<String>) -> Cell {
    let missing = matches!(&cell, Cell::Raw(s) | Cell::Str(s) if na.contains(s.as_str()));
    if missing { Cell::Empty } else { cell }
}

fn kind_of(cell: &Cell) -> Option<Kind> {
    match cell {
        Cell::Empty => None,
        Cell::Raw(s) => Some(if s.parse::<i64>().is_ok() {
            Kind::Int
        } else if s.parse::<f64>().is_ok() {
            Kind::Float
        } else if parse_bool(s).is_some() {
            Kind::Bool
        } else {
            Kind::Text
        }),
        Cell::Str(_) => Some(Kind::Text),
        Cell::Int(_) => Some(Kind::Int),
        Cell::Float(f) => Some(if integral(*f).is_some() {
            Kind::Int
        } else {
            Kind::Float
        }),
        Cell::Bool(_) => Some(Kind::Bool),
        Cell::DateTime(_) => Some(Kind::DateTime),
    }
}

fn infer_type(cells: &[Cell]) -> DataType {
    let mut acc: Option<Kind> = None;
    for kind in cells.iter().filter_map(kind_of) {
        acc = Some(match (acc, kind) {
            (None, k) => k,
            (Some(a), k) if a == k => a,
            (Some(Kind::Int), Kind::Float) | (Some(Kind::Float), Kind::Int) => Kind::Float,
            _ => Kind::Text,
        });
        if acc == Some(Kind::Text) {
            break;
        }
    }

    match acc {
        // All-missing columns are numeric (NaN-filled).
        None | Some(Kind::Float) => DataType::Float64,
        Some(Kind::Int) => DataType::Int64,
        Some(Kind::Bool) => DataType::Bool,
        Some(Kind::DateTime) => DataType::DateTime,
        Some(Kind::Text) => DataType::Utf8,
    }
}

fn convert_cell(cell: Cell, data_type: DataType) -> Value {
    match (cell, data_type) {
        (Cell::Empty, _) => Value::Null,

        (Cell::Raw(s), DataType::Int64) => s.parse::<i64>().map(Value::Int64).unwrap_or(Value::Null),
        (Cell::Raw(s), DataType::Float64) => s.parse::<f64>().map(float_value).unwrap_or(Value::Null),
        (Cell::Raw(s), DataType::Bool) => parse_bool(&s).map(Value::Bool).unwrap_or(Value::Null),
        (Cell::Raw(s) | Cell::Str(s), _) => Value::Utf8(s),

        (Cell::Int(i), DataType::Int64) => Value::Int64(i),
        (Cell::Int(i), DataType::Float64) => Value::Float64(i as f64),
        (Cell::Float(f), DataType::Int64) => integral(f).map(Value::Int64).unwrap_or(Value::Null),
        (Cell::Float(f), DataType::Float64) => float_value(f),
        (Cell::Bool(b), DataType::Bool) => Value::Bool(b),
        (Cell::DateTime(d), DataType::DateTime) => Value::DateTime(d),

        (other, _) => Value::Utf8(cell_to_header_string(&other)),
    }
}

/// NaN is missing.
fn float_value(f: f64) -> Value {
    if f.is_nan() { Value::Null } else { Value::Float64(f) }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 {
        Some(f as i64)
    } else {
        None
    }
}

fn cell_to_header_string(c: &Cell) -> String {
    match c {
        Cell::Empty => String::new(),
        Cell::Raw(s) | Cell::Str(s) => s.clone(),
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) => match integral(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        Cell::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        Cell::DateTime(d) => d.to_string(),
    }
}
