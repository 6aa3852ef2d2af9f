use anyhow::{Result, anyhow};
use std::sync::Arc;

use crate::loader::{DataExtent, Datasets};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub datasets: Arc<Datasets>,
    /// Defaults and bounds of the filter controls.
    pub extent: Arc<DataExtent>,
}

impl AppState {
    pub fn new(datasets: Arc<Datasets>) -> Result<Self> {
        let extent = datasets
            .extent()
            .ok_or_else(|| anyhow!("loaded datasets contain no records"))?;

        Ok(Self {
            datasets,
            extent: Arc::new(extent),
        })
    }
}
