//! Aggregator stage
//!
//! Read-only reporting queries over `cleaned_sales`.
//!
//! # Overview
//!
//! Each view is recomputed in full on every call:
//! - `category_performance` - Orders, units and revenue per category
//! - `regional_performance` - Orders, revenue and distinct customers per region
//! - `daily_sales` - Orders and revenue per order date
//! - `top_products` - Ten best-selling (product, category) pairs
//! - `summary` - Whole-table metrics
//!
//! Revenue sorts break ties on the grouping key so repeated runs produce the
//! same order.

mod types;

pub use types::{
    Analytics, CategoryPerformance, DailySales, ProductPerformance, RegionalPerformance,
    SummaryMetrics,
};

use crate::database::{Store, CLEANED_TABLE};
use crate::error::Result;

/// Rows kept by the top products view
pub const TOP_PRODUCTS_LIMIT: usize = 10;

const CATEGORY_SQL: &str = r"
SELECT
    category,
    COUNT(*) AS total_orders,
    COALESCE(CAST(SUM(quantity) AS BIGINT), 0) AS total_units_sold,
    COALESCE(ROUND(SUM(total_amount), 2), 0) AS total_revenue,
    ROUND(AVG(total_amount), 2) AS avg_order_value
FROM cleaned_sales
GROUP BY category
ORDER BY total_revenue DESC, category ASC NULLS LAST
";

const REGIONAL_SQL: &str = r"
SELECT
    region,
    COUNT(*) AS total_orders,
    COALESCE(ROUND(SUM(total_amount), 2), 0) AS total_revenue,
    COUNT(DISTINCT customer_id) AS unique_customers
FROM cleaned_sales
GROUP BY region
ORDER BY total_revenue DESC, region ASC NULLS LAST
";

const DAILY_SQL: &str = r"
SELECT
    order_date,
    COUNT(*) AS orders,
    COALESCE(ROUND(SUM(total_amount), 2), 0) AS revenue
FROM cleaned_sales
WHERE order_date IS NOT NULL
GROUP BY order_date
ORDER BY order_date ASC
";

const SUMMARY_SQL: &str = r"
SELECT
    COALESCE(ROUND(SUM(total_amount), 2), 0) AS total_revenue,
    COUNT(*) AS total_orders,
    COUNT(DISTINCT customer_id) AS total_customers,
    ROUND(AVG(total_amount), 2) AS avg_order_value
FROM cleaned_sales
";

fn product_sql() -> String {
    format!(
        r"
SELECT
    product_name,
    category,
    COALESCE(CAST(SUM(quantity) AS BIGINT), 0) AS units_sold,
    COALESCE(ROUND(SUM(total_amount), 2), 0) AS revenue
FROM cleaned_sales
GROUP BY product_name, category
ORDER BY revenue DESC, product_name ASC NULLS LAST, category ASC NULLS LAST
LIMIT {TOP_PRODUCTS_LIMIT}
"
    )
}

/// Category performance, highest revenue first
pub fn category_performance(store: &Store) -> Result<Vec<CategoryPerformance>> {
    store.require_table(CLEANED_TABLE)?;
    store.query_rows(CATEGORY_SQL, |row| {
        Ok(CategoryPerformance {
            category: row.get(0)?,
            total_orders: row.get(1)?,
            total_units_sold: row.get(2)?,
            total_revenue: row.get(3)?,
            avg_order_value: row.get(4)?,
        })
    })
}

/// Regional performance, highest revenue first
pub fn regional_performance(store: &Store) -> Result<Vec<RegionalPerformance>> {
    store.require_table(CLEANED_TABLE)?;
    store.query_rows(REGIONAL_SQL, |row| {
        Ok(RegionalPerformance {
            region: row.get(0)?,
            total_orders: row.get(1)?,
            total_revenue: row.get(2)?,
            unique_customers: row.get(3)?,
        })
    })
}

/// Daily sales for rows with a usable order date, oldest first
pub fn daily_sales(store: &Store) -> Result<Vec<DailySales>> {
    store.require_table(CLEANED_TABLE)?;
    store.query_rows(DAILY_SQL, |row| {
        Ok(DailySales {
            order_date: row.get(0)?,
            orders: row.get(1)?,
            revenue: row.get(2)?,
        })
    })
}

/// Best-selling products by revenue
pub fn top_products(store: &Store) -> Result<Vec<ProductPerformance>> {
    store.require_table(CLEANED_TABLE)?;
    store.query_rows(&product_sql(), |row| {
        Ok(ProductPerformance {
            product_name: row.get(0)?,
            category: row.get(1)?,
            units_sold: row.get(2)?,
            revenue: row.get(3)?,
        })
    })
}

/// Whole-table metrics
pub fn summary(store: &Store) -> Result<SummaryMetrics> {
    store.require_table(CLEANED_TABLE)?;
    store.query_one(SUMMARY_SQL, |row| {
        Ok(SummaryMetrics {
            total_revenue: row.get(0)?,
            total_orders: row.get(1)?,
            total_customers: row.get(2)?,
            avg_order_value: row.get(3)?,
        })
    })
}

/// Compute all five views
pub fn generate(store: &Store) -> Result<Analytics> {
    Ok(Analytics {
        summary: summary(store)?,
        category: category_performance(store)?,
        regional: regional_performance(store)?,
        daily: daily_sales(store)?,
        product: top_products(store)?,
    })
}
