//! Delimited-text row parsing.
//!
//! Rows follow the conventions of comma-separated literal sources: cells
//! are split on the configured delimiter and trimmed; a cell wrapped in
//! single quotes is taken verbatim (delimiter and surrounding spaces
//! preserved); an unquoted empty cell is nil. Each cell is coerced by its
//! declared column type.

use serde::Deserialize;

use crate::errors::{configuration_error, configuration_error_with_help, AttestResult};
use crate::value::Value;

use super::Case;

/// The delimiter used when a source does not configure one.
pub const DEFAULT_DELIMITER: char = ',';

/// Declared type of one CSV column, directing cell coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Text,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
        }
    }
}

/// Parses all rows into cases, skipping `skip` header rows first.
///
/// Every row is validated here; a wrong cell count or an unparseable cell
/// fails the whole expansion with a configuration error.
pub(crate) fn expand_rows(
    rows: &[String],
    delimiter: char,
    skip: usize,
    columns: &[ColumnType],
) -> AttestResult<Vec<Case>> {
    if columns.is_empty() {
        return Err(configuration_error(
            "CSV source declares no columns".to_string(),
        ));
    }

    rows.iter()
        .skip(skip)
        .map(|row| parse_row(row, delimiter, columns))
        .collect()
}

fn parse_row(row: &str, delimiter: char, columns: &[ColumnType]) -> AttestResult<Case> {
    let cells = split_cells(row, delimiter)?;
    if cells.len() != columns.len() {
        return Err(configuration_error_with_help(
            format!(
                "row '{}' has {} cell(s), expected {}",
                row,
                cells.len(),
                columns.len()
            ),
            format!("cells are separated by '{}'", delimiter),
        ));
    }

    let values = cells
        .iter()
        .zip(columns)
        .map(|(cell, column)| coerce_cell(cell, *column, row))
        .collect::<AttestResult<Vec<Value>>>()?;
    Ok(Case::new(values))
}

/// Splits a row on the delimiter, keeping single-quoted segments intact.
fn split_cells(row: &str, delimiter: char) -> AttestResult<Vec<String>> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in row.chars() {
        if ch == '\'' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == delimiter && !in_quotes {
            cells.push(current);
            current = String::new();
        } else {
            current.push(ch);
        }
    }
    if in_quotes {
        return Err(configuration_error(format!(
            "row '{}' has an unterminated quoted cell",
            row
        )));
    }
    cells.push(current);
    Ok(cells)
}

fn coerce_cell(raw: &str, column: ColumnType, row: &str) -> AttestResult<Value> {
    let trimmed = raw.trim();
    let (cell, quoted) = strip_quotes(trimmed);

    if !quoted && cell.is_empty() {
        return Ok(Value::Nil);
    }

    match column {
        ColumnType::Text => Ok(Value::String(cell.to_string())),
        ColumnType::Number => cell.parse::<f64>().map(Value::Number).map_err(|_| {
            configuration_error(format!("row '{}': cell '{}' is not a number", row, cell))
        }),
        ColumnType::Boolean => cell.parse::<bool>().map(Value::Bool).map_err(|_| {
            configuration_error(format!("row '{}': cell '{}' is not a boolean", row, cell))
        }),
    }
}

/// A cell wrapped in single quotes is taken verbatim.
fn strip_quotes(cell: &str) -> (&str, bool) {
    if cell.len() >= 2 && cell.starts_with('\'') && cell.ends_with('\'') {
        (&cell[1..cell.len() - 1], true)
    } else {
        (cell, false)
    }
}
