//! Date-range and season filtering shared by both tables.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::labels::Season;
use crate::loader::{DataExtent, Datasets};
use crate::records::RentalRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// The user's current filter: an inclusive date range and a season set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    start: NaiveDate,
    end: NaiveDate,
    seasons: BTreeSet<Season>,
}

impl FilterSelection {
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        seasons: impl IntoIterator<Item = Season>,
    ) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }

        Ok(Self {
            start,
            end,
            seasons: seasons.into_iter().collect(),
        })
    }

    /// Selection covering every date and season of the loaded data.
    pub fn full_extent(extent: &DataExtent) -> Self {
        Self {
            start: extent.first,
            end: extent.last,
            seasons: extent.seasons.iter().copied().collect(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn seasons(&self) -> &BTreeSet<Season> {
        &self.seasons
    }

    /// Whether a record falls inside the range and has a selected season.
    /// Records without a season label never match.
    pub fn matches(&self, record: &RentalRecord) -> bool {
        (self.start..=self.end).contains(&record.date)
            && record
                .season
                .is_some_and(|season| self.seasons.contains(&season))
    }
}

/// Returns the records matching `selection`, in their original order.
pub fn filter<'a>(records: &'a [RentalRecord], selection: &FilterSelection) -> Vec<&'a RentalRecord> {
    records.iter().filter(|r| selection.matches(r)).collect()
}

/// Both tables narrowed by the same selection.
#[derive(Debug)]
pub struct FilteredData<'a> {
    pub hourly: Vec<&'a RentalRecord>,
    pub daily: Vec<&'a RentalRecord>,
}

impl<'a> FilteredData<'a> {
    pub fn apply(datasets: &'a Datasets, selection: &FilterSelection) -> Self {
        Self {
            hourly: filter(&datasets.hourly, selection),
            daily: filter(&datasets.daily, selection),
        }
    }
}
