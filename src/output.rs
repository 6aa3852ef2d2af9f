//! Output formatting and persistence for dashboard views.
//!
//! Supports pretty-printing, JSON serialization, CSV tables and a static
//! report directory holding every chart and summary.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::format::{format_count, format_hour};
use crate::analyzers::types::CategoryMeans;
use crate::charts::ChartSet;
use crate::page::dashboard_page;
use crate::render::DashboardViews;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};

/// Logs the views using Rust's debug pretty-print format.
pub fn print_pretty(views: &DashboardViews) {
    debug!("{:#?}", views);
}

/// Logs the views as pretty-printed JSON.
pub fn print_json(views: &DashboardViews) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(views)?);
    Ok(())
}

/// One row of an exported group table.
#[derive(Debug, Serialize)]
struct GroupRow {
    group: String,
    mean_cnt: f64,
    display: String,
    records: usize,
    peak: bool,
}

fn group_rows<K, F>(means: Option<&CategoryMeans<K>>, label: F) -> Vec<GroupRow>
where
    K: PartialEq + Copy,
    F: Fn(K) -> String,
{
    let Some(means) = means else {
        return Vec::new();
    };

    means
        .groups
        .iter()
        .map(|g| GroupRow {
            group: label(g.key),
            mean_cnt: g.mean,
            display: format_count(g.mean),
            records: g.records,
            peak: g.key == means.peak,
        })
        .collect()
}

/// Writes `rows` to a CSV file with a header line, replacing any existing file.
pub fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing CSV table");

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the static report for one selection into `dir`.
///
/// Produces the five SVG charts, `index.html`, `summary.md`, `views.json`
/// and one CSV table per grouped aggregation. Returns the written paths.
#[tracing::instrument(skip(views, charts), fields(dir = %dir.display()))]
pub fn write_report(dir: &Path, views: &DashboardViews, charts: &ChartSet) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    let mut write_file = |name: &str, contents: &str| -> Result<()> {
        let path = dir.join(name);
        fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
        Ok(())
    };

    for (name, svg) in charts.files() {
        write_file(name, svg)?;
    }
    write_file("index.html", &dashboard_page(views, charts, None))?;
    write_file("summary.md", &summary_markdown(views))?;
    write_file("views.json", &serde_json::to_string_pretty(views)?)?;

    let tables = [
        (
            "weekday_means.csv",
            group_rows(views.weekday.as_ref(), |day| day.to_string()),
        ),
        (
            "hourly_means.csv",
            group_rows(views.hourly.as_ref(), format_hour),
        ),
        (
            "temp_band_means.csv",
            group_rows(views.weather.as_ref(), |band| band.to_string()),
        ),
    ];
    for (name, rows) in &tables {
        let path = dir.join(name);
        write_table(&path, rows)?;
        written.push(path);
    }

    info!(files = written.len(), "Report written");
    Ok(written)
}

/// Renders the panel summaries as Markdown.
pub fn summary_markdown(views: &DashboardViews) -> String {
    let bullets = |lines: &[String]| -> String {
        lines.iter().map(|l| format!("- {l}\n")).collect()
    };
    let s = &views.summaries;

    format!(
        "# Bike Rental Dashboard\n\n\
         ## Rental trends\n\n{}\n\n{}\n\n\
         ## User statistics\n\n{}\n\
         ## Weather impact\n\n{}\n{}",
        s.weekday,
        s.hourly,
        bullets(&s.users),
        bullets(&s.temperature_bands),
        bullets(&s.weather),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::render_charts;
    use crate::filter::FilterSelection;
    use crate::labels::Season;
    use crate::loader::Datasets;
    use crate::records::RentalRecord;
    use crate::render::render;
    use chrono::NaiveDate;
    use std::env;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("bike_rental_dashboard_output_{name}"));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn views(season: Season) -> DashboardViews {
        let record = |day: u32, hour: Option<u8>, cnt: u32| RentalRecord {
            date: NaiveDate::from_ymd_opt(2011, 1, day).unwrap(),
            hour,
            season_code: Some(1),
            weekday_code: Some(i64::from(day % 7)),
            temp: 0.2,
            casual: cnt / 4,
            registered: cnt - cnt / 4,
            cnt,
            weekday: None,
            season: None,
            temp_band: None,
        };
        let datasets = Datasets::new(
            vec![record(1, Some(0), 16), record(1, Some(1), 40)],
            vec![record(1, None, 985), record(2, None, 801)],
        );
        let selection = FilterSelection::new(
            NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2011, 1, 31).unwrap(),
            [season],
        )
        .unwrap();
        render(&datasets, &selection)
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&views(Season::Spring));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&views(Season::Spring)).unwrap();
    }

    #[test]
    fn test_write_table_writes_header_once() {
        let dir = temp_dir("table");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("weekday.csv");

        let v = views(Season::Spring);
        let rows = group_rows(v.weekday.as_ref(), |day| day.to_string());
        write_table(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "group,mean_cnt,display,records,peak");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Monday,985"));
        assert!(lines[1].ends_with("true"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_report_creates_every_file() {
        let dir = temp_dir("report");
        let v = views(Season::Spring);
        let charts = render_charts(&v).unwrap();

        let written = write_report(&dir, &v, &charts).unwrap();

        assert_eq!(written.len(), 11);
        for path in &written {
            assert!(path.exists(), "{} missing", path.display());
        }
        let summary = fs::read_to_string(dir.join("summary.md")).unwrap();
        assert!(summary.contains("Monday"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_report_without_data() {
        let dir = temp_dir("report_empty");
        let v = views(Season::Winter);
        let charts = render_charts(&v).unwrap();

        write_report(&dir, &v, &charts).unwrap();

        let table = fs::read_to_string(dir.join("hourly_means.csv")).unwrap();
        assert!(table.trim().is_empty() || table.lines().count() == 1);
        let summary = fs::read_to_string(dir.join("summary.md")).unwrap();
        assert!(summary.contains("No data"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
