//! # Retail Dashboard
//!
//! Turns a flat sales-transaction CSV into the JSON document behind the
//! sales dashboard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retail_dashboard::{Pipeline, PipelineConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::new().with_input("raw_sales_data.csv");
//!     let report = Pipeline::new(config).run()?;
//!     println!("{} orders", report.document.summary.total_orders);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!  CSV ──► Loader ──► raw_sales ──► Cleaner ──► cleaned_sales
//!                                                    │
//!                         ┌──────────────────────────┘
//!                         ▼
//!                    Aggregator ──► category / regional / daily / product / summary
//!                                                    │
//!                                                    ▼
//!                                     Exporter ──► dashboard_data.json
//! ```
//!
//! All stages share one DuckDB store that is rebuilt on every run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pipeline
pub mod error;

/// File locations and their sources
pub mod config;

/// DuckDB-backed relational store
pub mod database;

/// CSV ingestion into the raw table
pub mod loader;

/// Normalization of the raw table
pub mod clean;

/// Aggregate reporting views
pub mod analytics;

/// Dashboard JSON document
pub mod output;

/// Stage orchestration
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PipelineConfig;
pub use engine::{Pipeline, RunReport, Stage};
pub use error::{Error, Result};
pub use output::DashboardDocument;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
