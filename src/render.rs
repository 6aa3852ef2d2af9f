//! The dashboard as a pure function of the loaded data and a filter.

use serde::Serialize;
use tracing::debug;

use crate::analyzers::aggregate::{hourly_means, temp_band_means, user_mix, weekday_means};
use crate::analyzers::summary::Summaries;
use crate::analyzers::types::{HourlyMeans, TempBandMeans, UserMix, WeekdayMeans};
use crate::filter::{FilterSelection, FilteredData};
use crate::loader::Datasets;

/// Everything the presentation layer shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub selection: FilterSelection,
    pub hourly_rows: usize,
    pub daily_rows: usize,
    pub weekday: Option<WeekdayMeans>,
    pub hourly: Option<HourlyMeans>,
    pub users: UserMix,
    pub weather: Option<TempBandMeans>,
    pub summaries: Summaries,
}

impl DashboardViews {
    /// Whether the selection matched no records at all.
    pub fn is_empty(&self) -> bool {
        self.hourly_rows == 0 && self.daily_rows == 0
    }
}

/// Filters both tables with `selection` and recomputes every aggregation.
pub fn render(datasets: &Datasets, selection: &FilterSelection) -> DashboardViews {
    let filtered = FilteredData::apply(datasets, selection);
    debug!(
        hourly_rows = filtered.hourly.len(),
        daily_rows = filtered.daily.len(),
        "Selection applied"
    );

    let weekday = weekday_means(&filtered.daily);
    let hourly = hourly_means(&filtered.hourly);
    let users = user_mix(&filtered.hourly);
    let weather = temp_band_means(&filtered.daily);

    let summaries = Summaries::build(
        selection,
        weekday.as_ref(),
        hourly.as_ref(),
        &users,
        weather.as_ref(),
    );

    DashboardViews {
        selection: selection.clone(),
        hourly_rows: filtered.hourly.len(),
        daily_rows: filtered.daily.len(),
        weekday,
        hourly,
        users,
        weather,
        summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::summary::NO_DATA;
    use crate::labels::{Season, Weekday};
    use crate::records::RentalRecord;
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn record(d: u32, hour: Option<u8>, season: u8, casual: u32, registered: u32) -> RentalRecord {
        RentalRecord {
            date: date(d),
            hour,
            season_code: Some(i64::from(season)),
            weekday_code: Some(i64::from(d % 7)),
            temp: 0.3,
            casual,
            registered,
            cnt: casual + registered,
            weekday: None,
            season: None,
            temp_band: None,
        }
    }

    fn datasets() -> Datasets {
        Datasets::new(
            vec![
                record(1, Some(8), 1, 10, 40),
                record(1, Some(17), 1, 20, 80),
                record(8, Some(8), 2, 5, 5),
            ],
            vec![
                record(1, None, 1, 20, 80),
                record(2, None, 1, 50, 150),
                record(8, None, 2, 10, 40),
            ],
        )
    }

    #[test]
    fn test_render_filters_both_tables_alike() {
        let data = datasets();
        let selection = FilterSelection::new(date(1), date(2), [Season::Spring]).unwrap();

        let views = render(&data, &selection);

        assert_eq!(views.daily_rows, 2);
        assert_eq!(views.hourly_rows, 2);
        let weather = views.weather.unwrap();
        assert_eq!(weather.groups.len(), 1);
        assert_eq!(weather.groups[0].mean, 150.0);

        let weekday = views.weekday.unwrap();
        assert_eq!(weekday.peak, Weekday::Tuesday);
        assert_eq!(views.users.total_rides, 150);
    }

    #[test]
    fn test_render_empty_selection_reports_no_data() {
        let data = datasets();
        let selection = FilterSelection::new(date(1), date(31), [Season::Winter]).unwrap();

        let views = render(&data, &selection);

        assert!(views.is_empty());
        assert_eq!(views.weekday, None);
        assert_eq!(views.hourly, None);
        assert_eq!(views.weather, None);
        assert_eq!(views.users.volume, None);
        assert_eq!(views.summaries.weekday, NO_DATA);
        assert_eq!(views.summaries.hourly, NO_DATA);
    }

    #[test]
    fn test_render_serializes_to_json() {
        let data = datasets();
        let selection = FilterSelection::full_extent(&data.extent().unwrap());

        let views = render(&data, &selection);
        let json = serde_json::to_value(&views).unwrap();

        assert_eq!(json["daily_rows"], 3);
        assert_eq!(json["selection"]["start"], "2024-01-01");
        assert_eq!(json["weekday"]["groups"][0]["key"], "Monday");
    }
}
