//! Aggregate view rows
//!
//! Field order is the key order of the exported JSON entries.

use serde::{Deserialize, Serialize};

/// One row of the category performance view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    /// Cleaned category, `None` for rows without one
    pub category: Option<String>,
    /// Orders in the category
    pub total_orders: i64,
    /// Sum of cleaned quantities
    pub total_units_sold: i64,
    /// Sum of `total_amount`, rounded to cents
    pub total_revenue: f64,
    /// Mean `total_amount`, `None` when no order has one
    pub avg_order_value: Option<f64>,
}

/// One row of the regional performance view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalPerformance {
    /// Region as loaded
    pub region: Option<String>,
    /// Orders in the region
    pub total_orders: i64,
    /// Sum of `total_amount`, rounded to cents
    pub total_revenue: f64,
    /// Distinct `customer_id` values
    pub unique_customers: i64,
}

/// One row of the daily sales view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
    /// Order date text (`YYYY-MM-DD` in well-formed input)
    pub order_date: String,
    /// Orders placed that day
    pub orders: i64,
    /// Sum of `total_amount`, rounded to cents
    pub revenue: f64,
}

/// One row of the top products view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPerformance {
    /// Trimmed product name
    pub product_name: Option<String>,
    /// Cleaned category
    pub category: Option<String>,
    /// Sum of cleaned quantities
    pub units_sold: i64,
    /// Sum of `total_amount`, rounded to cents
    pub revenue: f64,
}

/// Whole-table metrics
///
/// `avg_order_value` is `None` when there are no orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Revenue across all orders
    pub total_revenue: f64,
    /// Number of cleaned rows
    pub total_orders: i64,
    /// Distinct `customer_id` values
    pub total_customers: i64,
    /// Mean order value
    pub avg_order_value: Option<f64>,
}

/// All five views from one run
#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    /// Whole-table metrics
    pub summary: SummaryMetrics,
    /// Category view, highest revenue first
    pub category: Vec<CategoryPerformance>,
    /// Regional view, highest revenue first
    pub regional: Vec<RegionalPerformance>,
    /// Daily view, oldest date first
    pub daily: Vec<DailySales>,
    /// Top products by revenue
    pub product: Vec<ProductPerformance>,
}

impl Analytics {
    /// Highest-revenue category, if any rows exist
    pub fn top_category(&self) -> Option<&CategoryPerformance> {
        self.category.first()
    }
}
