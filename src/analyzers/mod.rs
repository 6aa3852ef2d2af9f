//! Aggregations behind the dashboard panels.
//!
//! Every aggregation runs over an already filtered table, tolerates zero
//! rows and reports "no data" as `None`. The `summary` module turns the
//! results into the sentences shown under each chart.

pub mod aggregate;
pub mod format;
pub mod summary;
pub mod types;
pub mod utility;
