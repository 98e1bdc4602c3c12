//! Dashboard document writer

use crate::analytics::{
    Analytics, CategoryPerformance, DailySales, ProductPerformance, RegionalPerformance,
    SummaryMetrics,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Document consumed by the dashboard
///
/// List entries keep the sort order of their aggregate query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardDocument {
    /// Headline metrics
    pub summary: SummaryMetrics,
    /// Revenue by category
    pub category: Vec<CategoryPerformance>,
    /// Revenue and customers by region
    pub regional: Vec<RegionalPerformance>,
    /// Orders and revenue per order date
    pub daily: Vec<DailySales>,
    /// Top products by revenue
    pub product: Vec<ProductPerformance>,
}

impl From<Analytics> for DashboardDocument {
    fn from(analytics: Analytics) -> Self {
        Self {
            summary: analytics.summary,
            category: analytics.category,
            regional: analytics.regional,
            daily: analytics.daily,
            product: analytics.product,
        }
    }
}

impl DashboardDocument {
    /// Render as two-space indented JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a previously written document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Write the document to `path`, creating parent directories as needed
pub fn write_dashboard(document: &DashboardDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = document.to_json_string()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::output(format!(
                "Failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, json + "\n").map_err(|e| {
        Error::output(format!(
            "Failed to write dashboard to '{}': {e}",
            path.display()
        ))
    })?;

    tracing::debug!("Wrote dashboard document to {}", path.display());
    Ok(())
}
