//! Sentences shown next to each chart.

use serde::Serialize;

use crate::analyzers::format::{format_count, format_hour, format_percent};
use crate::analyzers::types::{HourlyMeans, TempBandMeans, UserMix, WeekdayMeans};
use crate::filter::FilterSelection;
use crate::labels::{TEMP_SCALE_CELSIUS, TempBand};

pub const NO_DATA: &str = "No data is available for the selected date range and seasons.";

/// Text blocks of the three dashboard panels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summaries {
    pub weekday: String,
    pub hourly: String,
    pub users: Vec<String>,
    pub weather: Vec<String>,
    pub temperature_bands: Vec<String>,
}

impl Summaries {
    pub fn build(
        selection: &FilterSelection,
        weekday: Option<&WeekdayMeans>,
        hourly: Option<&HourlyMeans>,
        users: &UserMix,
        weather: Option<&TempBandMeans>,
    ) -> Self {
        Self {
            weekday: weekday_summary(weekday),
            hourly: hourly_summary(hourly),
            users: user_mix_summary(selection, users),
            weather: weather_summary(weather),
            temperature_bands: temperature_band_notes(),
        }
    }
}

pub fn weekday_summary(means: Option<&WeekdayMeans>) -> String {
    match means.and_then(|m| m.peak_group()) {
        Some(peak) => format!(
            "Rentals are highest on {} with an average of {} rentals per day.",
            peak.key,
            format_count(peak.mean)
        ),
        None => NO_DATA.to_string(),
    }
}

pub fn hourly_summary(means: Option<&HourlyMeans>) -> String {
    match means.and_then(|m| m.peak_group()) {
        Some(peak) => format!(
            "Rentals peak at {} with an average of {} rentals per hour.",
            format_hour(peak.key),
            format_count(peak.mean)
        ),
        None => NO_DATA.to_string(),
    }
}

/// Describes the selection, then the registered share of each split.
pub fn user_mix_summary(selection: &FilterSelection, mix: &UserMix) -> Vec<String> {
    let seasons = if selection.seasons().is_empty() {
        "none".to_string()
    } else {
        selection
            .seasons()
            .iter()
            .map(|s| s.name())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![format!(
        "Based on the date range {} – {} and seasons {}:",
        selection.start(),
        selection.end(),
        seasons
    )];

    match (mix.diversity, mix.volume) {
        (None, None) => lines.push(NO_DATA.to_string()),
        (diversity, volume) => {
            if let Some(d) = diversity {
                lines.push(format!(
                    "{} of the distinct user counts belong to Registered Users.",
                    format_percent(d.registered)
                ));
            }
            if let Some(v) = volume {
                lines.push(format!(
                    "{} of all rentals were made by Registered Users.",
                    format_percent(v.registered)
                ));
            }
        }
    }

    lines
}

pub fn weather_summary(means: Option<&TempBandMeans>) -> Vec<String> {
    match means {
        Some(m) => vec![
            format!("Most rentals happen in the {} temperature band.", m.peak),
            "This result reflects the selected date range and seasons.".to_string(),
        ],
        None => vec![NO_DATA.to_string()],
    }
}

/// Explains how the normalized temperature maps to the three bands.
pub fn temperature_band_notes() -> Vec<String> {
    let mut notes = vec![format!(
        "Temperatures are normalized to 0–1 against a maximum of {TEMP_SCALE_CELSIUS}°C."
    )];
    notes.extend(
        TempBand::ALL
            .iter()
            .map(|band| format!("{}: {}", band, band.celsius_range())),
    );
    notes
}
