//! Execution engine module
//!
//! Runs the stages in order against one store.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Pipeline` - Owns the configuration and drives a run
//! - `Stage` - Stage identifiers used in progress logging
//! - `RunReport` - What a successful run produced
//!
//! The first failing stage aborts the run; nothing is retried. The stage is
//! logged and its error is returned as-is.

mod types;

pub use types::{RunReport, Stage};

use crate::analytics;
use crate::clean;
use crate::config::PipelineConfig;
use crate::database::Store;
use crate::error::{Error, Result};
use crate::loader;
use crate::output::{write_dashboard, DashboardDocument};
use std::time::Instant;

/// Sales pipeline: load, clean, analyze, export
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a pipeline for the given paths
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every stage against a freshly created store file
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;
        let store = Store::create(&self.config.database)?;
        self.run_with_store(&store)
    }

    /// Run every stage against an existing store
    pub fn run_with_store(&self, store: &Store) -> Result<RunReport> {
        let start = Instant::now();
        tracing::info!("Starting data analysis pipeline");

        log_stage(Stage::Load);
        let load = loader::load_raw(store, &self.config.input)
            .map_err(|e| stage_failed(Stage::Load, e))?;
        tracing::info!(
            "Loaded {} rows ({} columns) from {}",
            load.rows,
            load.columns.len(),
            self.config.input.display()
        );

        log_stage(Stage::Clean);
        let clean = clean::clean(store).map_err(|e| stage_failed(Stage::Clean, e))?;
        tracing::info!("Data cleaning completed: {} rows", clean.cleaned_rows);

        log_stage(Stage::Analyze);
        let analytics =
            analytics::generate(store).map_err(|e| stage_failed(Stage::Analyze, e))?;
        tracing::info!(
            "Computed {} categories, {} regions, {} days, {} products",
            analytics.category.len(),
            analytics.regional.len(),
            analytics.daily.len(),
            analytics.product.len()
        );

        log_stage(Stage::Export);
        let document = DashboardDocument::from(analytics);
        write_dashboard(&document, &self.config.output)
            .map_err(|e| stage_failed(Stage::Export, e))?;
        tracing::info!(
            "Analytics exported to {}",
            self.config.output.display()
        );

        Ok(RunReport {
            load,
            clean,
            output_path: self.config.output.clone(),
            document,
            elapsed: start.elapsed(),
        })
    }
}

fn log_stage(stage: Stage) {
    tracing::info!("[{}/{}] {}...", stage.number(), Stage::ALL.len(), stage);
}

fn stage_failed(stage: Stage, err: Error) -> Error {
    tracing::error!("{} failed: {}", stage, err);
    err
}
