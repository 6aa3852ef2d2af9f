//! Interactive dashboard over the bike-sharing rental dataset.
//!
//! The hourly and daily tables are loaded once, filtered by date range and
//! season, and turned into bar, line and pie charts with short summaries,
//! served over HTTP or written out as a static report.

pub mod analyzers;
pub mod charts;
pub mod config;
pub mod filter;
pub mod http;
pub mod labels;
pub mod loader;
pub mod output;
pub mod page;
pub mod records;
pub mod render;
