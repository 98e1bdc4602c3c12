//! Relational store backed by DuckDB
//!
//! The store is a single DuckDB file that is rebuilt on every run. It holds
//! the `raw_sales` and `cleaned_sales` tables for the duration of the run.

mod engine;

pub use engine::Store;

/// Table holding the CSV rows exactly as loaded
pub const RAW_TABLE: &str = "raw_sales";

/// Table holding the normalized rows
pub const CLEANED_TABLE: &str = "cleaned_sales";
