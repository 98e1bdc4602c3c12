//! Pipeline configuration
//!
//! File locations used by a run. Every field has a fixed default, so a run
//! with no configuration file and no flags reads `raw_sales_data.csv`,
//! rebuilds `sales_analysis.duckdb` and writes `dashboard_data.json` in the
//! working directory.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Default source CSV path
pub const DEFAULT_INPUT: &str = "raw_sales_data.csv";

/// Default DuckDB store path
pub const DEFAULT_DATABASE: &str = "sales_analysis.duckdb";

/// Default dashboard document path
pub const DEFAULT_OUTPUT: &str = "dashboard_data.json";

/// Paths for a single pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Source CSV file
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Store file, rebuilt on every run
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// Dashboard JSON document
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_database() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            database: default_database(),
            output: default_output(),
        }
    }
}

impl PipelineConfig {
    /// Create a config with the default paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("Config file '{}' not found", path.display()))
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    /// Load a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the source CSV path
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the store path
    #[must_use]
    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    /// Set the output document path
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Check that the paths are usable together
    pub fn validate(&self) -> Result<()> {
        for (field, path) in [
            ("input", &self.input),
            ("database", &self.database),
            ("output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(Error::config(format!("'{field}' path cannot be empty")));
            }
        }

        let input = normalize_path(&self.input);
        let database = normalize_path(&self.database);
        let output = normalize_path(&self.output);

        // The store and the document are overwritten on every run.
        if input == database || input == output {
            return Err(Error::config(format!(
                "Input file '{}' would be overwritten by the run",
                self.input.display()
            )));
        }

        if database == output {
            return Err(Error::config(
                "'database' and 'output' must be different paths",
            ));
        }

        Ok(())
    }
}

/// Resolve a path for comparison, whether or not the file exists yet
///
/// Existing files are canonicalized. Otherwise the parent directory is
/// canonicalized and the file name re-attached, falling back to dropping
/// `.` components when the parent does not exist either.
fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect(),
    }
}
