//! Output module
//!
//! Serializes the aggregate views into the dashboard JSON document.
//!
//! # Overview
//!
//! This module provides:
//! - `DashboardDocument` - The exported document shape
//! - `write_dashboard` - Writes the document, replacing any existing file

mod writer;

pub use writer::{write_dashboard, DashboardDocument};
