//! Loader stage
//!
//! Reads the source CSV into the `raw_sales` table.
//!
//! # Overview
//!
//! The loader module provides:
//! - `read_header` / `validate_header` - Header checks before touching the store
//! - `load_raw` - Materializes the file with DuckDB's `read_csv`
//!
//! Rows are stored verbatim. Every column is read as VARCHAR; `quantity` is
//! then cast to BIGINT and `price` to DOUBLE so the cleaning arithmetic has
//! numeric inputs. The literal `NULL` in those two columns loads as SQL NULL,
//! while text columns keep it as written.

mod parser;

pub use parser::{parse_header_line, read_header, validate_header};

use crate::database::{Store, RAW_TABLE};
use crate::error::{Error, Result};
use std::path::Path;

/// Columns every source file must provide
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "order_id",
    "customer_id",
    "customer_name",
    "product_name",
    "category",
    "quantity",
    "price",
    "order_date",
    "ship_date",
    "region",
    "payment_method",
];

/// Outcome of loading the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadStats {
    /// Rows written to `raw_sales`
    pub rows: u64,
    /// Columns of `raw_sales`, in header order
    pub columns: Vec<String>,
}

/// Load the CSV at `path` into `raw_sales`, replacing any previous content
pub fn load_raw(store: &Store, path: impl AsRef<Path>) -> Result<LoadStats> {
    let path = path.as_ref();
    let header = read_header(path)?;
    validate_header(&header)?;

    let path_str = path
        .to_str()
        .ok_or_else(|| Error::csv(format!("Source path is not UTF-8: {}", path.display())))?;

    let sql = format!(
        "CREATE OR REPLACE TABLE {RAW_TABLE} AS SELECT * REPLACE ({}) FROM read_csv('{}', header = true, delim = ',', quote = '\"', escape = '\"', columns = {});",
        numeric_casts(),
        sql_escape(path_str),
        column_types(&header)
    );

    store.execute_batch(&sql).map_err(|e| {
        Error::csv(format!(
            "Failed to load '{}' into {RAW_TABLE}: {e}",
            path.display()
        ))
    })?;

    Ok(LoadStats {
        rows: store.row_count(RAW_TABLE)?,
        columns: store.column_names(RAW_TABLE)?,
    })
}

/// Numeric source columns and their store types
const NUMERIC_COLUMNS: [(&str, &str); 2] = [("quantity", "BIGINT"), ("price", "DOUBLE")];

/// Text that stands for a missing value in a numeric column
const NULL_SENTINEL: &str = "NULL";

/// `REPLACE` list casting the numeric columns, mapping the sentinel to NULL
///
/// A value that is neither the sentinel nor a number still fails the load.
fn numeric_casts() -> String {
    NUMERIC_COLUMNS
        .iter()
        .map(|(name, ty)| {
            format!("CAST(NULLIF(\"{name}\", '{NULL_SENTINEL}') AS {ty}) AS \"{name}\"")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// DuckDB struct literal reading every header column as text
fn column_types(header: &[String]) -> String {
    let entries: Vec<String> = header
        .iter()
        .map(|name| format!("'{}': 'VARCHAR'", sql_escape(name)))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

/// Escape a value for use inside a single-quoted SQL literal
fn sql_escape(value: &str) -> String {
    value.replace('\'', "''")
}
