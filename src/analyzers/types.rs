//! Data types produced by the aggregation pipeline.

use serde::Serialize;

use crate::labels::{TempBand, Weekday};

/// Mean rental count of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean: f64,
    /// Number of records averaged.
    pub records: usize,
}

/// Grouped means in display order plus the group to highlight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMeans<K> {
    pub groups: Vec<GroupMean<K>>,
    /// Key of the first group holding the maximum mean.
    pub peak: K,
}

impl<K: PartialEq> CategoryMeans<K> {
    pub fn peak_group(&self) -> Option<&GroupMean<K>> {
        self.groups.iter().find(|g| g.key == self.peak)
    }

    pub fn max_mean(&self) -> f64 {
        self.groups.iter().map(|g| g.mean).fold(0.0, f64::max)
    }
}

/// Mean daily rentals per weekday, Sunday first.
pub type WeekdayMeans = CategoryMeans<Weekday>;
/// Mean hourly rentals per hour of day (0–23), hours without data omitted.
pub type HourlyMeans = CategoryMeans<u8>;
/// Mean daily rentals per temperature band.
pub type TempBandMeans = CategoryMeans<TempBand>;

/// A casual/registered split summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Proportions {
    pub casual: f64,
    pub registered: f64,
}

/// Casual vs registered users over the filtered hourly table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserMix {
    pub casual_rides: u64,
    pub registered_rides: u64,
    pub total_rides: u64,
    pub distinct_casual_values: usize,
    pub distinct_registered_values: usize,
    /// Share of rides per user type; `None` when no rides were counted.
    pub volume: Option<Proportions>,
    /// Share of distinct non-zero count values per user type; `None` when
    /// neither column has one.
    pub diversity: Option<Proportions>,
}
