//! Loading of the hourly and daily rental tables.
//!
//! Each table is looked up in a primary location and then a fallback one.
//! The parsed, label-enriched tables are immutable once built; [`shared`]
//! memoizes them for the rest of the process.

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DashboardConfig;
use crate::labels::{Season, enrich};
use crate::records::{DayRow, Grain, HourRow, RentalRecord};

static SHARED: OnceLock<Arc<Datasets>> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset not found (tried {})", display_paths(.tried))]
    NotFound { tried: Vec<PathBuf> },

    #[error("failed to parse {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "{}:{line}: cnt {cnt} does not equal casual {casual} + registered {registered}",
        .path.display()
    )]
    CountMismatch {
        path: PathBuf,
        line: usize,
        casual: u32,
        registered: u32,
        cnt: u32,
    },

    #[error("{} contains no records", .path.display())]
    Empty { path: PathBuf },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Date range and seasons covered by the loaded data; the defaults of the
/// filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataExtent {
    pub first: NaiveDate,
    pub last: NaiveDate,
    /// Seasons in order of first appearance.
    pub seasons: Vec<Season>,
}

/// Both rental tables, parsed and enriched.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub hourly: Vec<RentalRecord>,
    pub daily: Vec<RentalRecord>,
}

impl Datasets {
    /// Builds the datasets from already parsed records, filling their labels.
    pub fn new(mut hourly: Vec<RentalRecord>, mut daily: Vec<RentalRecord>) -> Self {
        hourly.iter_mut().for_each(enrich);
        daily.iter_mut().for_each(enrich);
        Self { hourly, daily }
    }

    /// Extent of the daily table, or of the hourly table when the daily one
    /// is empty. `None` only when both are empty.
    pub fn extent(&self) -> Option<DataExtent> {
        let source = if self.daily.is_empty() {
            &self.hourly
        } else {
            &self.daily
        };

        let first = source.iter().map(|r| r.date).min()?;
        let last = source.iter().map(|r| r.date).max()?;

        let mut seasons = Vec::new();
        for season in source.iter().filter_map(|r| r.season) {
            if !seasons.contains(&season) {
                seasons.push(season);
            }
        }

        Some(DataExtent {
            first,
            last,
            seasons,
        })
    }
}

/// Returns the first candidate path that exists.
pub fn resolve_path(candidates: &[PathBuf]) -> Result<PathBuf, LoadError> {
    for candidate in candidates {
        if candidate.exists() {
            debug!(path = %candidate.display(), "Resolved dataset path");
            return Ok(candidate.clone());
        }
        debug!(path = %candidate.display(), "Dataset path missing, trying next");
    }

    Err(LoadError::NotFound {
        tried: candidates.to_vec(),
    })
}

/// Parses one table and checks `cnt == casual + registered` on every row.
///
/// Labels are not filled here; see [`Datasets::new`].
pub fn load_table(path: &Path, grain: Grain) -> Result<Vec<RentalRecord>, LoadError> {
    let records = match grain {
        Grain::Hourly => read_rows::<HourRow>(path)?,
        Grain::Daily => read_rows::<DayRow>(path)?,
    };

    if records.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(records)
}

fn read_rows<R>(path: &Path) -> Result<Vec<RentalRecord>, LoadError>
where
    R: DeserializeOwned + Into<RentalRecord>,
{
    let csv_error = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::Reader::from_path(path).map_err(csv_error)?;
    let mut records = Vec::new();

    for (index, result) in rdr.deserialize::<R>().enumerate() {
        let record: RentalRecord = result.map_err(csv_error)?.into();

        if !record.is_consistent() {
            return Err(LoadError::CountMismatch {
                path: path.to_path_buf(),
                // header is line 1
                line: index + 2,
                casual: record.casual,
                registered: record.registered,
                cnt: record.cnt,
            });
        }

        records.push(record);
    }

    Ok(records)
}

/// Resolves, parses and enriches both tables.
#[tracing::instrument(skip(config), fields(data_dir = %config.data_dir.display()))]
pub fn load_datasets(config: &DashboardConfig) -> Result<Datasets, LoadError> {
    let hour_path = resolve_path(&config.candidates(Grain::Hourly))?;
    let day_path = resolve_path(&config.candidates(Grain::Daily))?;

    let hourly = load_table(&hour_path, Grain::Hourly)?;
    let daily = load_table(&day_path, Grain::Daily)?;

    info!(
        hour_path = %hour_path.display(),
        day_path = %day_path.display(),
        hourly_rows = hourly.len(),
        daily_rows = daily.len(),
        "Datasets loaded"
    );

    Ok(Datasets::new(hourly, daily))
}

/// Loads the datasets once per process and hands out the same copy on every
/// later call. A failed load is not cached.
pub fn shared(config: &DashboardConfig) -> Result<Arc<Datasets>, LoadError> {
    if let Some(datasets) = SHARED.get() {
        debug!("Reusing loaded datasets");
        return Ok(Arc::clone(datasets));
    }

    let loaded = Arc::new(load_datasets(config)?);
    Ok(Arc::clone(SHARED.get_or_init(|| loaded)))
}
