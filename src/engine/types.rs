//! Engine types
//!
//! Stage identifiers and the report returned by a run.

use crate::clean::CleanStats;
use crate::loader::LoadStats;
use crate::output::DashboardDocument;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// CSV into `raw_sales`
    Load,
    /// `raw_sales` into `cleaned_sales`
    Clean,
    /// Aggregate views
    Analyze,
    /// Dashboard document
    Export,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 4] = [Stage::Load, Stage::Clean, Stage::Analyze, Stage::Export];

    /// 1-based position of the stage
    pub fn number(self) -> usize {
        match self {
            Stage::Load => 1,
            Stage::Clean => 2,
            Stage::Analyze => 3,
            Stage::Export => 4,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Load => "Creating database",
            Stage::Clean => "Cleaning data",
            Stage::Analyze => "Generating analytics",
            Stage::Export => "Exporting data",
        };
        write!(f, "{label}")
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Loader outcome
    pub load: LoadStats,
    /// Cleaner outcome
    pub clean: CleanStats,
    /// Where the document was written
    pub output_path: PathBuf,
    /// The exported document
    pub document: DashboardDocument,
    /// Wall-clock time of the whole run
    pub elapsed: Duration,
}
