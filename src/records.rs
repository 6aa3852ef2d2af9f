use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::labels::{Season, TempBand, Weekday};

/// Time granularity of a rental table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grain {
    Hourly,
    Daily,
}

impl Grain {
    pub fn file_name(self) -> &'static str {
        match self {
            Grain::Hourly => "hour.csv",
            Grain::Daily => "day.csv",
        }
    }
}

/// Hour-of-day values accepted from `hour.csv`.
pub const HOURS: std::ops::RangeInclusive<i64> = 0..=23;

/// A row of `hour.csv`. Columns not listed here are ignored.
///
/// Code columns are read wide and may be blank; values that map to no
/// label are dropped during enrichment instead of failing the load.
#[derive(Debug, Deserialize)]
pub struct HourRow {
    pub dteday: NaiveDate,
    pub season: Option<i64>,
    pub hr: Option<i64>,
    pub weekday: Option<i64>,
    pub temp: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

/// A row of `day.csv`. Columns not listed here are ignored.
#[derive(Debug, Deserialize)]
pub struct DayRow {
    pub dteday: NaiveDate,
    pub season: Option<i64>,
    pub weekday: Option<i64>,
    pub temp: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,
}

/// One rental bucket (an hour or a day) with its derived labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalRecord {
    pub date: NaiveDate,
    /// Hour of day; `None` for daily records and out-of-range hours.
    pub hour: Option<u8>,
    pub season_code: Option<i64>,
    pub weekday_code: Option<i64>,
    /// Normalized temperature (°C / 40).
    pub temp: f64,
    pub casual: u32,
    pub registered: u32,
    pub cnt: u32,

    // derived labels
    pub weekday: Option<Weekday>,
    pub season: Option<Season>,
    pub temp_band: Option<TempBand>,
}

impl RentalRecord {
    /// Whether the record satisfies `cnt == casual + registered`.
    pub fn is_consistent(&self) -> bool {
        u64::from(self.casual) + u64::from(self.registered) == u64::from(self.cnt)
    }
}

impl From<HourRow> for RentalRecord {
    fn from(row: HourRow) -> Self {
        RentalRecord {
            date: row.dteday,
            hour: row
                .hr
                .filter(|hr| HOURS.contains(hr))
                .and_then(|hr| u8::try_from(hr).ok()),
            season_code: row.season,
            weekday_code: row.weekday,
            temp: row.temp,
            casual: row.casual,
            registered: row.registered,
            cnt: row.cnt,
            weekday: None,
            season: None,
            temp_band: None,
        }
    }
}

impl From<DayRow> for RentalRecord {
    fn from(row: DayRow) -> Self {
        RentalRecord {
            date: row.dteday,
            hour: None,
            season_code: row.season,
            weekday_code: row.weekday,
            temp: row.temp,
            casual: row.casual,
            registered: row.registered,
            cnt: row.cnt,
            weekday: None,
            season: None,
            temp_band: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_row_conversion_has_no_hour() {
        let row = DayRow {
            dteday: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            season: Some(1),
            weekday: Some(6),
            temp: 0.34,
            casual: 331,
            registered: 654,
            cnt: 985,
        };
        let record = RentalRecord::from(row);

        assert_eq!(record.hour, None);
        assert_eq!(record.cnt, 985);
        assert!(record.is_consistent());
    }

    #[test]
    fn test_inconsistent_count_detected() {
        let row = HourRow {
            dteday: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            season: Some(1),
            hr: Some(3),
            weekday: Some(6),
            temp: 0.24,
            casual: 3,
            registered: 13,
            cnt: 17,
        };
        let record = RentalRecord::from(row);

        assert_eq!(record.hour, Some(3));
        assert!(!record.is_consistent());
    }

    #[test]
    fn test_out_of_range_hour_is_dropped() {
        for hr in [Some(24), Some(-1), None] {
            let row = HourRow {
                dteday: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
                season: Some(1),
                hr,
                weekday: Some(6),
                temp: 0.24,
                casual: 3,
                registered: 13,
                cnt: 16,
            };
            assert_eq!(RentalRecord::from(row).hour, None, "hr {hr:?}");
        }
    }
}
