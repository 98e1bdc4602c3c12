//! Cleaner stage
//!
//! Rebuilds `cleaned_sales` from `raw_sales` with a single normalization
//! query. The row count is preserved; nothing is filtered out.

use crate::database::{Store, CLEANED_TABLE, RAW_TABLE};
use crate::error::{Error, Result};

/// Normalization query producing `cleaned_sales`
///
/// The `invalid` check on `order_date` is case-sensitive while the category
/// match is not.
pub const CLEANING_SQL: &str = r"
CREATE OR REPLACE TABLE cleaned_sales AS
SELECT
    order_id,
    customer_id,
    CASE
        WHEN customer_name IS NULL OR customer_name = 'NULL' THEN 'Unknown Customer'
        ELSE TRIM(customer_name)
    END AS customer_name,
    TRIM(product_name) AS product_name,
    CASE
        WHEN LOWER(category) = 'electronics' THEN 'Electronics'
        WHEN LOWER(category) = 'furniture' THEN 'Furniture'
        WHEN LOWER(category) = 'stationery' THEN 'Stationery'
        WHEN LOWER(category) = 'office' THEN 'Office'
        ELSE category
    END AS category,
    ABS(quantity) AS quantity,
    price,
    CASE
        WHEN order_date LIKE '%invalid%' THEN NULL
        ELSE order_date
    END AS order_date,
    CASE
        WHEN ship_date IS NULL OR ship_date = '' THEN NULL
        ELSE ship_date
    END AS ship_date,
    region,
    payment_method,
    ROUND(ABS(quantity) * price, 2) AS total_amount
FROM raw_sales;
";

/// Row counts around the cleaning step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanStats {
    /// Rows in `raw_sales`
    pub raw_rows: u64,
    /// Rows in `cleaned_sales`
    pub cleaned_rows: u64,
}

/// Rebuild `cleaned_sales` from `raw_sales`
pub fn clean(store: &Store) -> Result<CleanStats> {
    store.require_table(RAW_TABLE)?;
    let raw_rows = store.row_count(RAW_TABLE)?;

    store.execute_batch(CLEANING_SQL)?;

    let cleaned_rows = store.row_count(CLEANED_TABLE)?;
    if cleaned_rows != raw_rows {
        return Err(Error::RowCountMismatch {
            raw: raw_rows,
            cleaned: cleaned_rows,
        });
    }

    Ok(CleanStats {
        raw_rows,
        cleaned_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn raw_store() -> Store {
        let store = Store::in_memory().unwrap();
        store
            .execute_batch(
                "CREATE TABLE raw_sales (
                    order_id VARCHAR, customer_id VARCHAR, customer_name VARCHAR,
                    product_name VARCHAR, category VARCHAR, quantity BIGINT, price DOUBLE,
                    order_date VARCHAR, ship_date VARCHAR, region VARCHAR, payment_method VARCHAR
                );",
            )
            .unwrap();
        store
    }

    fn insert(store: &Store, values: &str) {
        store
            .execute_batch(&format!("INSERT INTO raw_sales VALUES {values};"))
            .unwrap();
    }

    fn cleaned_string(store: &Store, column: &str) -> Option<String> {
        store
            .query_one(&format!("SELECT {column} FROM cleaned_sales"), |row| {
                row.get(0)
            })
            .unwrap()
    }

    #[test]
    fn test_clean_requires_raw_table() {
        let store = Store::in_memory().unwrap();
        let err = clean(&store).unwrap_err();
        assert!(matches!(err, Error::TableNotFound { ref table } if table == "raw_sales"));
    }

    #[test]
    fn test_clean_reference_row() {
        let store = raw_store();
        insert(
            &store,
            "('1', 'C1', 'NULL', ' Laptop ', 'ELECTRONICS', -3, 10.00, '2024-01-05-invalid', '', 'North', 'Card')",
        );

        let stats = clean(&store).unwrap();
        assert_eq!(stats.raw_rows, 1);
        assert_eq!(stats.cleaned_rows, 1);

        let (quantity, total, category, name, order_date, ship_date, product): (
            i64,
            f64,
            String,
            String,
            Option<String>,
            Option<String>,
            String,
        ) = store
            .query_one(
                "SELECT quantity, total_amount, category, customer_name, order_date, ship_date, product_name FROM cleaned_sales",
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                        row.get(6)?,
                    ))
                },
            )
            .unwrap();

        assert_eq!(quantity, 3);
        assert!((total - 30.0).abs() < 1e-9);
        assert_eq!(category, "Electronics");
        assert_eq!(name, "Unknown Customer");
        assert_eq!(order_date, None);
        assert_eq!(ship_date, None);
        assert_eq!(product, "Laptop");
    }

    #[test_case("electronics", "Electronics" ; "lowercase electronics")]
    #[test_case("FURNITURE", "Furniture" ; "uppercase furniture")]
    #[test_case("StAtIoNeRy", "Stationery" ; "mixed stationery")]
    #[test_case("office", "Office" ; "lowercase office")]
    #[test_case("Garden", "Garden" ; "unknown passthrough")]
    #[test_case("toys", "toys" ; "unknown keeps casing")]
    fn test_category_mapping(raw: &str, expected: &str) {
        let store = raw_store();
        insert(
            &store,
            &format!("('1', 'C1', 'A', 'P', '{raw}', 1, 1.0, '2024-01-01', NULL, 'N', 'Card')"),
        );
        clean(&store).unwrap();
        assert_eq!(cleaned_string(&store, "category").as_deref(), Some(expected));
    }

    #[test_case("  Bob  ", "Bob" ; "trimmed")]
    #[test_case("NULL", "Unknown Customer" ; "sentinel")]
    #[test_case("null", "null" ; "lowercase sentinel kept")]
    fn test_customer_name(raw: &str, expected: &str) {
        let store = raw_store();
        insert(
            &store,
            &format!("('1', 'C1', '{raw}', 'P', 'office', 1, 1.0, '2024-01-01', NULL, 'N', 'Card')"),
        );
        clean(&store).unwrap();
        assert_eq!(
            cleaned_string(&store, "customer_name").as_deref(),
            Some(expected)
        );
    }

    #[test]
    fn test_null_customer_name() {
        let store = raw_store();
        insert(
            &store,
            "('1', 'C1', NULL, 'P', 'office', 1, 1.0, '2024-01-01', NULL, 'N', 'Card')",
        );
        clean(&store).unwrap();
        assert_eq!(
            cleaned_string(&store, "customer_name").as_deref(),
            Some("Unknown Customer")
        );
    }

    #[test_case("2024-01-05", Some("2024-01-05") ; "valid date")]
    #[test_case("invalid_date", None ; "prefix marker")]
    #[test_case("2024-13-45-invalid", None ; "suffix marker")]
    #[test_case("INVALID", Some("INVALID") ; "match is case sensitive")]
    fn test_order_date(raw: &str, expected: Option<&str>) {
        let store = raw_store();
        insert(
            &store,
            &format!("('1', 'C1', 'A', 'P', 'office', 1, 1.0, '{raw}', NULL, 'N', 'Card')"),
        );
        clean(&store).unwrap();
        assert_eq!(cleaned_string(&store, "order_date").as_deref(), expected);
    }

    #[test]
    fn test_ship_date_passthrough() {
        let store = raw_store();
        insert(
            &store,
            "('1', 'C1', 'A', 'P', 'office', 1, 1.0, '2024-01-01', '2024-01-03', 'N', 'Card')",
        );
        clean(&store).unwrap();
        assert_eq!(
            cleaned_string(&store, "ship_date").as_deref(),
            Some("2024-01-03")
        );
    }

    #[test]
    fn test_total_amount_rounding_and_sign() {
        let store = raw_store();
        insert(
            &store,
            "('1', 'C1', 'A', 'P', 'office', -7, 1.333, '2024-01-01', NULL, 'N', 'Card'),
             ('2', 'C2', 'B', 'P', 'office', 4, 2.675, '2024-01-01', NULL, 'N', 'Card'),
             ('3', 'C3', 'C', 'P', 'office', 0, 19.99, '2024-01-01', NULL, 'N', 'Card')",
        );
        clean(&store).unwrap();

        let rows: Vec<(i64, f64, f64)> = store
            .query_rows(
                "SELECT quantity, price, total_amount FROM cleaned_sales ORDER BY order_id",
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .unwrap();

        for (quantity, price, total) in &rows {
            assert!(*quantity >= 0);
            assert!(*total >= 0.0);
            let expected = ((*quantity as f64) * price * 100.0).round() / 100.0;
            assert!((total - expected).abs() < 0.011, "{total} vs {expected}");
        }
        assert!((rows[0].2 - 9.33).abs() < 1e-9);
    }

    #[test]
    fn test_clean_is_rerunnable() {
        let store = raw_store();
        insert(
            &store,
            "('1', 'C1', 'A', 'P', 'office', 1, 1.0, '2024-01-01', NULL, 'N', 'Card')",
        );
        clean(&store).unwrap();
        insert(
            &store,
            "('2', 'C2', 'B', 'P', 'office', 1, 1.0, '2024-01-01', NULL, 'N', 'Card')",
        );
        let stats = clean(&store).unwrap();
        assert_eq!(stats.cleaned_rows, 2);
    }

    #[test]
    fn test_clean_empty_table() {
        let store = raw_store();
        let stats = clean(&store).unwrap();
        assert_eq!(stats.raw_rows, 0);
        assert_eq!(stats.cleaned_rows, 0);
    }
}
