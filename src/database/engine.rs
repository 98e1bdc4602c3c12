//! DuckDB-backed store
//!
//! Wraps a single DuckDB connection. Every stage borrows the same `Store`.

use crate::error::{Error, Result};
use duckdb::{params, Connection, Row};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Every DuckDB database file carries this tag after its 8-byte checksum
const DUCKDB_MAGIC: &[u8; 4] = b"DUCK";
const DUCKDB_MAGIC_OFFSET: usize = 8;

/// Single-file relational store used as scratch space for one run
pub struct Store {
    /// DuckDB connection
    conn: Connection,
    /// Backing file (`None` for in-memory stores)
    path: Option<PathBuf>,
}

impl Store {
    /// Open a fresh store at `path`, discarding whatever was there before
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        remove_stale(path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path).map_err(|e| {
            Error::database(format!(
                "Failed to open DuckDB store '{}': {e}",
                path.display()
            ))
        })?;

        tracing::debug!("Opened store at {}", path.display());

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory store
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::database(format!("Failed to create DuckDB connection: {e}")))?;

        Ok(Self { conn, path: None })
    }

    /// Backing file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run one or more statements that return no rows
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        tracing::debug!("Executing statement: {}", sql);
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// Run a query and map every row
    pub fn query_rows<T, F>(&self, sql: &str, f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> duckdb::Result<T>,
    {
        tracing::debug!("Executing query: {}", sql);
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], f)?
            .collect::<std::result::Result<Vec<T>, _>>()?;
        Ok(rows)
    }

    /// Run a query expected to return exactly one row
    pub fn query_one<T, F>(&self, sql: &str, f: F) -> Result<T>
    where
        F: FnOnce(&Row<'_>) -> duckdb::Result<T>,
    {
        tracing::debug!("Executing query: {}", sql);
        Ok(self.conn.query_row(sql, [], f)?)
    }

    /// Check whether a table exists in the main schema
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM information_schema.tables
             WHERE table_schema = 'main' AND table_name = ?",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Fail with `TableNotFound` unless the table exists
    pub fn require_table(&self, table: &str) -> Result<()> {
        if self.table_exists(table)? {
            Ok(())
        } else {
            Err(Error::table_not_found(table))
        }
    }

    /// Number of rows in a table
    pub fn row_count(&self, table: &str) -> Result<u64> {
        self.require_table(table)?;
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| {
                    row.get(0)
                })?;
        Ok(count as u64)
    }

    /// Column names of a table in declaration order
    pub fn column_names(&self, table: &str) -> Result<Vec<String>> {
        self.require_table(table)?;
        let mut stmt = self.conn.prepare(
            "SELECT column_name FROM information_schema.columns
             WHERE table_schema = 'main' AND table_name = ?
             ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map(params![table], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(columns)
    }
}

/// Remove a previous store file and its write-ahead log
///
/// Non-empty files that are not DuckDB databases are left alone.
fn remove_stale(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::database(format!(
            "Store path '{}' is a directory",
            path.display()
        )));
    }
    if path.exists() && !is_duckdb_file(path)? {
        return Err(Error::database(format!(
            "Refusing to replace '{}': it is not a DuckDB store",
            path.display()
        )));
    }

    let mut wal = path.as_os_str().to_owned();
    wal.push(".wal");

    for candidate in [path.to_path_buf(), PathBuf::from(wal)] {
        match fs::remove_file(&candidate) {
            Ok(()) => tracing::debug!("Removed stale store file {}", candidate.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::database(format!(
                    "Failed to remove stale store file '{}': {e}",
                    candidate.display()
                )))
            }
        }
    }

    Ok(())
}

/// Check for the DuckDB header, treating an empty file as replaceable
fn is_duckdb_file(path: &Path) -> Result<bool> {
    let mut file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }

    let mut header = [0u8; DUCKDB_MAGIC_OFFSET + 4];
    match file.read_exact(&mut header) {
        Ok(()) => Ok(&header[DUCKDB_MAGIC_OFFSET..] == DUCKDB_MAGIC),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e.into()),
    }
}
