//! Human-readable labels derived from the numeric codes in the rental data.
//!
//! Every mapping is total: an unknown code yields `None` rather than an
//! error, so one bad row never blocks a render.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::records::RentalRecord;

/// Upper bound (inclusive) of the `Cold` band on the normalized scale.
pub const COLD_MAX: f64 = 0.366;
/// Upper bound (inclusive) of the `Moderate` band on the normalized scale.
pub const MODERATE_MAX: f64 = 0.732;
/// Maximum temperature in °C used to normalize `temp`.
pub const TEMP_SCALE_CELSIUS: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Display order of the weekday bar chart.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Maps the dataset's weekday code (Sunday = 0) to a label.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Maps the dataset's season code (1..=4) to a label.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Season::Spring),
            2 => Some(Season::Summer),
            3 => Some(Season::Fall),
            4 => Some(Season::Winter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Season::ALL
            .into_iter()
            .find(|season| season.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!("unknown season '{wanted}' (expected Spring, Summer, Fall or Winter)")
            })
    }
}

/// Three-level grouping of the normalized temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TempBand {
    Cold,
    Moderate,
    Extreme,
}

impl TempBand {
    pub const ALL: [TempBand; 3] = [TempBand::Cold, TempBand::Moderate, TempBand::Extreme];

    /// Bins a normalized temperature using the breakpoints 0, 0.366, 0.732
    /// and 1.0. The lowest bin includes 0; every bin includes its upper edge.
    pub fn from_normalized(t: f64) -> Option<Self> {
        match t {
            t if !(0.0..=1.0).contains(&t) => None,
            t if t <= COLD_MAX => Some(TempBand::Cold),
            t if t <= MODERATE_MAX => Some(TempBand::Moderate),
            _ => Some(TempBand::Extreme),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TempBand::Cold => "Cold",
            TempBand::Moderate => "Moderate",
            TempBand::Extreme => "Extreme",
        }
    }

    /// Approximate range in °C, as shown to the user.
    pub fn celsius_range(self) -> &'static str {
        match self {
            TempBand::Cold => "< 15°C",
            TempBand::Moderate => "15–30°C",
            TempBand::Extreme => "> 30°C",
        }
    }
}

impl fmt::Display for TempBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fills the derived labels of a freshly parsed record.
pub fn enrich(record: &mut RentalRecord) {
    record.weekday = record.weekday_code.and_then(Weekday::from_code);
    record.season = record.season_code.and_then(Season::from_code);
    record.temp_band = TempBand::from_normalized(record.temp);
}
