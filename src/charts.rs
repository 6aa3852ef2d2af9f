//! SVG charts for the three dashboard panels.
//!
//! Charts are drawn with plotters into in-memory SVG strings so the same
//! output can be written to disk or inlined into the HTML page. A chart
//! whose aggregation has no data draws a placeholder instead.

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::Serialize;

use crate::analyzers::format::{format_count, format_percent};
use crate::analyzers::types::{CategoryMeans, HourlyMeans, Proportions};
use crate::render::DashboardViews;

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

pub const NO_DATA_LABEL: &str = "No data for this selection";

const FONT: &str = "sans-serif";

const WEEKDAY_BAR: RGBColor = RGBColor(0x87, 0xce, 0xeb);
const WEEKDAY_PEAK: RGBColor = RGBColor(0x00, 0x3f, 0x5c);
const BAND_BAR: RGBColor = RGBColor(0xad, 0xd8, 0xe6);
const BAND_PEAK: RGBColor = RGBColor(0x00, 0x00, 0x8b);
const HOURLY_LINE: RGBColor = RGBColor(0x41, 0x69, 0xe1);
const CASUAL: RGBColor = RGBColor(0xff, 0xaa, 0x33);
const REGISTERED: RGBColor = RGBColor(0x33, 0x99, 0xff);
const EDGE: RGBColor = RGBColor(0x44, 0x44, 0x44);
const MUTED: RGBColor = RGBColor(0x80, 0x80, 0x80);

// matplotlib's startangle=140, counter-clockwise
const PIE_START_DEG: f64 = 140.0;

/// Rendered SVG documents, one per chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSet {
    pub weekday: String,
    pub hourly: String,
    pub users_diversity: String,
    pub users_volume: String,
    pub weather: String,
}

impl ChartSet {
    /// File names used when the charts are written to a report directory.
    pub fn files(&self) -> [(&'static str, &str); 5] {
        [
            ("weekday.svg", &self.weekday),
            ("hourly.svg", &self.hourly),
            ("users_diversity.svg", &self.users_diversity),
            ("users_volume.svg", &self.users_volume),
            ("weather.svg", &self.weather),
        ]
    }
}

struct Bar {
    label: String,
    value: f64,
    highlight: bool,
}

impl Bar {
    fn from_means<K, F>(means: &CategoryMeans<K>, label: F) -> Vec<Bar>
    where
        K: PartialEq + Copy,
        F: Fn(K) -> String,
    {
        means
            .groups
            .iter()
            .map(|g| Bar {
                label: label(g.key),
                value: g.mean,
                highlight: g.key == means.peak,
            })
            .collect()
    }
}

pub fn render_charts(views: &DashboardViews) -> Result<ChartSet> {
    let weekday = svg((900, 450), |root| {
        let title = "Average Bike Rentals per Day of the Week";
        match &views.weekday {
            Some(means) => draw_bar_chart(
                root,
                title,
                &Bar::from_means(means, |day| day.to_string()),
                (WEEKDAY_BAR, WEEKDAY_PEAK),
            ),
            None => draw_no_data(root, title),
        }
    })?;

    let hourly = svg((900, 450), |root| {
        let title = "Average Bike Rentals per Hour";
        match &views.hourly {
            Some(means) => draw_hourly_chart(root, title, means),
            None => draw_no_data(root, title),
        }
    })?;

    let users_diversity = svg((450, 450), |root| {
        draw_pie(root, "Distinct Casual vs Registered Counts", views.users.diversity)
    })?;

    let users_volume = svg((450, 450), |root| {
        draw_pie(root, "Rentals by Casual vs Registered Users", views.users.volume)
    })?;

    let weather = svg((600, 400), |root| {
        let title = "Average Bike Rentals by Temperature Band";
        match &views.weather {
            Some(means) => draw_bar_chart(
                root,
                title,
                &Bar::from_means(means, |band| format!("{} ({})", band, band.celsius_range())),
                (BAND_BAR, BAND_PEAK),
            ),
            None => draw_no_data(root, title),
        }
    })?;

    Ok(ChartSet {
        weekday,
        hourly,
        users_diversity,
        users_volume,
        weather,
    })
}

/// Runs `draw` against a blank SVG canvas and returns the document.
fn svg<F>(size: (u32, u32), draw: F) -> Result<String>
where
    F: FnOnce(&Area<'_>) -> Result<()>,
{
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, size).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }
    Ok(buf)
}

fn centered(size: u32, color: &RGBColor) -> TextStyle<'static> {
    (FONT, size)
        .into_font()
        .color(color)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

fn draw_no_data(root: &Area<'_>, title: &str) -> Result<()> {
    let area = root.titled(title, (FONT, 20))?;
    let (w, h) = area.dim_in_pixel();
    area.draw(&Text::new(
        NO_DATA_LABEL,
        ((w / 2) as i32, (h / 2) as i32),
        centered(16, &MUTED),
    ))?;
    Ok(())
}

/// Bar chart over categorical labels; highlighted bars use the second color.
///
/// The segmented x axis keeps one empty slot after the last bar.
fn draw_bar_chart(
    root: &Area<'_>,
    title: &str,
    bars: &[Bar],
    (base, peak): (RGBColor, RGBColor),
) -> Result<()> {
    let n = bars.len() as u32;
    let top = bars.iter().map(|b| b.value).fold(0.0, f64::max);
    let y_max = if top > 0.0 { top * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 20))
        .margin(15)
        .x_label_area_size(35)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len() + 1)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_desc("Rentals")
        .draw()?;

    chart.draw_series(bars.iter().zip(0u32..).map(|(bar, i)| {
        let color = if bar.highlight { peak } else { base };
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value),
            ],
            color.filled(),
        );
        rect.set_margin(0, 0, 8, 8);
        rect
    }))?;

    chart.draw_series(bars.iter().zip(0u32..).map(|(bar, i)| {
        Text::new(
            format_count(bar.value),
            (SegmentValue::CenterOf(i), bar.value + y_max * 0.005),
            (FONT, 12)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        )
    }))?;

    Ok(())
}

fn draw_hourly_chart(root: &Area<'_>, title: &str, means: &HourlyMeans) -> Result<()> {
    let y_max = means.max_mean().max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, (FONT, 20))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..23u32, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(24)
        .x_desc("Hour")
        .y_desc("Average rentals")
        .draw()?;

    let points: Vec<(u32, f64)> = means
        .groups
        .iter()
        .map(|g| (u32::from(g.key), g.mean))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), &HOURLY_LINE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 4, HOURLY_LINE.filled())),
    )?;

    Ok(())
}

/// Two-slice pie (casual vs registered) with one-decimal percentages.
fn draw_pie(root: &Area<'_>, title: &str, split: Option<Proportions>) -> Result<()> {
    let Some(split) = split else {
        return draw_no_data(root, title);
    };

    let area = root.titled(title, (FONT, 18))?;
    let (w, h) = area.dim_in_pixel();
    let center = ((w / 2) as i32, (h / 2) as i32);
    let radius = f64::from(w.min(h)) * 0.35;

    let slices = [
        ("Casual Users", split.casual, CASUAL),
        ("Registered Users", split.registered, REGISTERED),
    ];

    let mut start = PIE_START_DEG;
    for (label, share, color) in slices {
        if share <= 0.0 {
            continue;
        }
        let sweep = share * 360.0;
        let outline = wedge(center, radius, start, sweep);

        area.draw(&Polygon::new(outline.clone(), color.filled()))?;
        area.draw(&PathElement::new(outline, EDGE.stroke_width(1)))?;

        let mid = start + sweep / 2.0;
        area.draw(&Text::new(
            format_percent(share),
            polar(center, radius * 0.6, mid),
            centered(14, &BLACK),
        ))?;
        area.draw(&Text::new(
            label,
            polar(center, radius * 1.2, mid),
            centered(14, &BLACK),
        ))?;

        start += sweep;
    }

    Ok(())
}

/// Point at `radius` from `center`, `degrees` counter-clockwise from east.
fn polar(center: (i32, i32), radius: f64, degrees: f64) -> (i32, i32) {
    let rad = degrees.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

/// Closed outline of a pie slice, approximated every two degrees.
fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = (sweep / 2.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 3);
    points.push(center);
    for k in 0..=steps {
        let angle = start + sweep * k as f64 / steps as f64;
        points.push(polar(center, radius, angle));
    }
    points.push(center);
    points
}
