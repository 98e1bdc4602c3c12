//! Error types for the dashboard pipeline
//!
//! This module defines the error hierarchy for every pipeline stage.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the dashboard pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid or unreadable pipeline configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// Configuration file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Input Errors
    // ============================================================================
    /// Source file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Source file could not be parsed or loaded
    #[error("CSV parsing error: {message}")]
    CsvParse {
        /// Parser or loader message
        message: String,
    },

    /// Source header lacks a required column
    #[error("Source file is missing required column: {column}")]
    MissingColumn {
        /// First required column not found
        column: String,
    },

    // ============================================================================
    // Store Errors
    // ============================================================================
    /// DuckDB statement or connection failure
    #[error("Database error: {message}")]
    Database {
        /// Error text reported by the store
        message: String,
    },

    /// A stage ran before the table it reads was built
    #[error("Table '{table}' does not exist")]
    TableNotFound {
        /// Missing table name
        table: String,
    },

    /// Cleaning changed the number of rows
    #[error("Cleaned table has {cleaned} rows but raw table has {raw}")]
    RowCountMismatch {
        /// Rows in `raw_sales`
        raw: u64,
        /// Rows in `cleaned_sales`
        cleaned: u64,
    },

    // ============================================================================
    // Output Errors
    // ============================================================================
    /// Dashboard document could not be written
    #[error("Output error: {message}")]
    Output {
        /// What failed while writing
        message: String,
    },

    /// Document (de)serialization failure
    #[error("Failed to serialize JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Error wrapped with extra context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a CSV parse error
    pub fn csv(message: impl Into<String>) -> Self {
        Self::CsvParse {
            message: message.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a table-not-found error
    pub fn table_not_found(table: impl Into<String>) -> Self {
        Self::TableNotFound {
            table: table.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(err: duckdb::Error) -> Self {
        Self::database(err.to_string())
    }
}

/// Result type alias for the dashboard pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
