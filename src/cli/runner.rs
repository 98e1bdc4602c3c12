//! CLI runner - builds the configuration and executes the pipeline

use crate::cli::commands::Cli;
use crate::config::PipelineConfig;
use crate::engine::{Pipeline, RunReport};
use crate::error::Result;
use crate::output::DashboardDocument;
use std::fmt::Write as _;

const RULE_WIDTH: usize = 50;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the pipeline and print the summary
    pub fn run(&self) -> Result<RunReport> {
        let config = self.build_config()?;
        tracing::debug!("Pipeline config: {:?}", config);

        let report = Pipeline::new(config).run()?;

        println!("{}", render_summary(&report.document));
        tracing::info!("Analysis complete in {:.2?}", report.elapsed);

        Ok(report)
    }

    /// Merge defaults, the optional config file and CLI flags
    fn build_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::new(),
        };

        if let Some(input) = &self.cli.input {
            config = config.with_input(input);
        }
        if let Some(database) = &self.cli.database {
            config = config.with_database(database);
        }
        if let Some(output) = &self.cli.output {
            config = config.with_output(output);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Human-readable summary block printed after a run
pub fn render_summary(document: &DashboardDocument) -> String {
    let summary = &document.summary;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "DATA ANALYSIS SUMMARY");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Total Revenue: {}",
        format_currency(summary.total_revenue)
    );
    let _ = writeln!(out, "Total Orders: {}", summary.total_orders);
    let _ = writeln!(out, "Total Customers: {}", summary.total_customers);
    let _ = write!(
        out,
        "Average Order Value: {}",
        summary
            .avg_order_value
            .map_or_else(|| "n/a".to_string(), format_currency)
    );

    if let Some(top) = document.category.first() {
        let _ = write!(
            out,
            "\n\nTop Category by Revenue:\n  {}: {}",
            top.category.as_deref().unwrap_or("Uncategorized"),
            format_currency(top.total_revenue)
        );
    }

    out
}

/// Format an amount as dollars with thousands separators, e.g. `$1,234.56`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}
