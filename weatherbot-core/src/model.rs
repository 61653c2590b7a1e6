use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inbound message, split into its command word, flag tokens and
/// argument tokens. Produced once per message by [`crate::command::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommand {
    pub command: String,
    pub flags: Vec<String>,
    pub arguments: Vec<String>,
}

/// Unit system requested by the user. Also selects the unit words used in
/// rendered replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the `units` query parameter understood by OpenWeather.
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_word(&self) -> &'static str {
        match self {
            Units::Metric => "Celsius",
            Units::Imperial => "Fahrenheit",
        }
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

/// Structured request distilled from a [`RawCommand`].
///
/// `location` is `Some` exactly when `task` is `"forecast"` (and may then be
/// the empty string). `forecast_offset` is present only when the user passed
/// a `--<digits>` flag. `detail_fields` keeps every flag that was not
/// consumed as a unit or offset flag, in original order, duplicates and all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub task: Option<String>,
    pub location: Option<String>,
    pub units: Units,
    pub forecast_offset: Option<u64>,
    pub detail_fields: Vec<String>,
}

/// A geocoded place. Nominatim reports coordinates as strings; the adapter
/// parses them into degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    /// Direction the wind blows from, 0..=359.
    pub direction_degrees: u16,
}

/// Expected precipitation volume over the 3-hour forecast slot, in mm.
/// Only attached when the condition code matches the volume kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Precipitation {
    Rain(f64),
    Snow(f64),
}

/// One 3-hour forecast slot, already converted to the requested unit system
/// by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub temperature: f64,
    pub minimum_temperature: f64,
    pub maximum_temperature: f64,
    /// "Feels like" temperature.
    pub heat_index: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Cloud cover, percent.
    pub cloudiness: u8,
    /// Condition group code as reported upstream, e.g. "Rain", "Clouds".
    pub condition: String,
    /// Sentence-cased human description, e.g. "Scattered clouds".
    pub description: String,
    /// End of the 3-hour window this slot forecasts.
    pub forecast_time: DateTime<Utc>,
    pub wind: Wind,
    pub precipitation: Option<Precipitation>,
}
