//! Reply selection and rendering.
//!
//! The orchestrator boils every inbound command down to one [`Reply`]
//! variant; [`Reply::render`] maps that variant to the final message text.
//! Rendering is pure and total: any value in the documented domain yields a
//! non-empty string, and the same value always yields the same string.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::model::{Forecast, Precipitation, Units};
use crate::wind::compass_direction;

/// Lowest forecast offset a user may request.
pub const MIN_FORECAST_OFFSET: u64 = 1;
/// Highest forecast offset a user may request (the OpenWeather forecast
/// list covers 5 days in 3-hour steps).
pub const MAX_FORECAST_OFFSET: u64 = 39;

const INTRODUCTION_MESSAGE: &str = "Hello! As my name implies, I'm a bot that delivers weather information. Type \"!weather help\" to see what I can do for you.";

const HELP_MESSAGE: &str = "To use, provide \"!weather forecast (location)\" (without the parentheses).
You can provide optional flags to change the output:
--imperial for imperial units on temperature and wind speed,
--snow to display snow volume (only if it's snowing),
--rain to display rain volume (only if it's raining),
--humidity to display humidity,
--temp_min_max to display minimum and maximum temperature of forecast,
--wind to display wind speed and direction,
--cloud to display cloudiness, in percentage,
--(number) looks up future forecasts in 3h increment relative to current (ex. --1 would give the 3-6pm forecast if current time is 1pm), must be between 1 and 39 (inclusive)";

const NO_LOCATION_MESSAGE: &str = "Did you want me to provide you a forecast of a location? Type \"!weather forecast (location) (without the parentheses) to do so!";

const LOCATION_NOT_FOUND_MESSAGE: &str =
    "Sorry, this bot cannot find the location you have provided. Please try again.";

const SOURCES_DOWN_MESSAGE: &str = "Sorry, my sources are down. Can you try again later?";

const CORRECTION_MESSAGE: &str = "Sorry, this bot doesn't understand your command, try typing \"!weather help\" to learn how to communicate with me!";

const OFFSET_OUT_OF_RANGE_MESSAGE: &str = "Sorry, I can only look up forecasts between 1 and 39 steps (3 hours each) ahead. Please try again with a number in that range.";

/// en-US style, e.g. `1/30/2017, 7:00:00 PM`.
const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Everything the forecast message needs, captured at classification time.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReply {
    /// The location exactly as the user typed it.
    pub location: String,
    pub weather: Forecast,
    pub units: Units,
    /// Timezone of the forecast location; `None` degrades timestamps to UTC.
    pub timezone: Option<Tz>,
    /// Requested forecast offset in 3-hour steps, 0 for "current".
    pub offset: u64,
    /// Unconsumed flags selecting optional sentences.
    pub details: Vec<String>,
}

/// Terminal outcome of one inbound command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// No task given at all.
    Introduction,
    Help,
    /// `forecast` without a location.
    MissingLocation,
    /// Geocoding found no match.
    LocationNotFound,
    /// Either upstream failed; deliberately not telling which.
    SourcesDown,
    /// Numeric flag outside 1..=39.
    OffsetOutOfRange,
    Forecast(Box<ForecastReply>),
    /// Task word the bot does not know.
    Unrecognized,
}

impl Reply {
    pub fn render(&self) -> String {
        match self {
            Reply::Introduction => INTRODUCTION_MESSAGE.to_string(),
            Reply::Help => HELP_MESSAGE.to_string(),
            Reply::MissingLocation => NO_LOCATION_MESSAGE.to_string(),
            Reply::LocationNotFound => LOCATION_NOT_FOUND_MESSAGE.to_string(),
            Reply::SourcesDown => SOURCES_DOWN_MESSAGE.to_string(),
            Reply::OffsetOutOfRange => OFFSET_OUT_OF_RANGE_MESSAGE.to_string(),
            Reply::Forecast(forecast) => render_forecast(forecast),
            Reply::Unrecognized => CORRECTION_MESSAGE.to_string(),
        }
    }
}

fn render_forecast(reply: &ForecastReply) -> String {
    let weather = &reply.weather;
    let degrees = reply.units.temperature_word();

    let mut message = format!(
        "The weather in {} is {} with a temperature of {} degrees {}, and feels like {} degrees {}.",
        reply.location, weather.description, weather.temperature, degrees, weather.heat_index, degrees,
    );

    let wants = |flag: &str| reply.details.iter().any(|d| d == flag);

    if wants("--humidity") {
        message.push_str(&format!(" The humidity is at {} percent.", weather.humidity));
    }
    if wants("--temp_min_max") {
        message.push_str(&format!(
            " The minimum temperature expected is {} degrees {}, and the maximum temperature expected is {} degrees {}.",
            weather.minimum_temperature, degrees, weather.maximum_temperature, degrees,
        ));
    }
    if wants("--cloud") {
        message.push_str(&format!(" The sky's cloudiness is {} percent.", weather.cloudiness));
    }
    if wants("--wind") {
        message.push_str(&format!(
            " The wind speed is {} {} {}.",
            weather.wind.speed,
            reply.units.wind_speed_unit(),
            compass_direction(weather.wind.direction_degrees),
        ));
    }

    match weather.precipitation {
        Some(Precipitation::Rain(volume)) => {
            message.push_str(&format!(" The rain volume is expected to be {volume}mm."));
        }
        Some(Precipitation::Snow(volume)) => {
            message.push_str(&format!(" The snow volume is expected to be {volume}mm."));
        }
        None => {}
    }

    let until = localize(weather.forecast_time, reply.timezone);
    if reply.offset >= 1 {
        let from = localize(weather.forecast_time - Duration::hours(3), reply.timezone);
        message.push_str(&format!(
            " This forecast is intended from {from} until {until} (Local time)."
        ));
    } else {
        message.push_str(&format!(
            " This forecast is intended from now until {until} (Local time)."
        ));
    }

    message
}

fn localize(time: DateTime<Utc>, timezone: Option<Tz>) -> String {
    match timezone {
        Some(tz) => time.with_timezone(&tz).format(TIMESTAMP_FORMAT).to_string(),
        None => time.format(TIMESTAMP_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Wind;
    use chrono::TimeZone;

    fn forecast() -> Forecast {
        Forecast {
            temperature: 2.0,
            minimum_temperature: -1.0,
            maximum_temperature: 4.0,
            heat_index: 1.0,
            humidity: 41,
            cloudiness: 21,
            condition: "Clouds".to_string(),
            description: "Scattered clouds".to_string(),
            // 2017-01-30 18:00:00 UTC
            forecast_time: Utc.timestamp_opt(1_485_799_200, 0).unwrap(),
            wind: Wind { speed: 4.0, direction_degrees: 52 },
            precipitation: None,
        }
    }

    fn forecast_reply(details: &[&str]) -> ForecastReply {
        ForecastReply {
            location: "Stockholm".to_string(),
            weather: forecast(),
            units: Units::Metric,
            timezone: Some(chrono_tz::Europe::Stockholm),
            offset: 0,
            details: details.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn introduction_when_no_task_was_given() {
        assert_eq!(
            Reply::Introduction.render(),
            "Hello! As my name implies, I'm a bot that delivers weather information. Type \"!weather help\" to see what I can do for you.",
        );
    }

    #[test]
    fn help_enumerates_every_flag() {
        let help = Reply::Help.render();
        assert!(help.starts_with("To use, provide \"!weather forecast (location)\""));
        for flag in
            ["--imperial", "--snow", "--rain", "--humidity", "--temp_min_max", "--wind", "--cloud"]
        {
            assert!(help.contains(flag), "help text is missing {flag}");
        }
        assert!(help.contains("must be between 1 and 39 (inclusive)"));
    }

    #[test]
    fn prompts_for_a_location_when_none_was_given() {
        assert_eq!(
            Reply::MissingLocation.render(),
            "Did you want me to provide you a forecast of a location? Type \"!weather forecast (location) (without the parentheses) to do so!",
        );
    }

    #[test]
    fn reports_an_unknown_location() {
        assert_eq!(
            Reply::LocationNotFound.render(),
            "Sorry, this bot cannot find the location you have provided. Please try again.",
        );
    }

    #[test]
    fn reports_upstream_failure_without_naming_the_source() {
        assert_eq!(Reply::SourcesDown.render(), "Sorry, my sources are down. Can you try again later?");
    }

    #[test]
    fn suggests_help_for_unknown_tasks() {
        assert_eq!(
            Reply::Unrecognized.render(),
            "Sorry, this bot doesn't understand your command, try typing \"!weather help\" to learn how to communicate with me!",
        );
    }

    #[test]
    fn renders_a_plain_metric_forecast() {
        let reply = Reply::Forecast(Box::new(forecast_reply(&[]))).render();
        assert_eq!(
            reply,
            "The weather in Stockholm is Scattered clouds with a temperature of 2 degrees Celsius, \
             and feels like 1 degrees Celsius. This forecast is intended from now until \
             1/30/2017, 7:00:00 PM (Local time).",
        );
    }

    #[test]
    fn renders_the_future_window_when_an_offset_was_requested() {
        let mut reply = forecast_reply(&[]);
        reply.offset = 2;
        let rendered = Reply::Forecast(Box::new(reply)).render();
        assert!(rendered.ends_with(
            "This forecast is intended from 1/30/2017, 4:00:00 PM until 1/30/2017, 7:00:00 PM (Local time)."
        ));
    }

    #[test]
    fn optional_sentences_follow_the_detail_flags() {
        let rendered = Reply::Forecast(Box::new(forecast_reply(&["--cloud", "--wind"]))).render();
        assert_eq!(
            rendered,
            "The weather in Stockholm is Scattered clouds with a temperature of 2 degrees Celsius, \
             and feels like 1 degrees Celsius. The sky's cloudiness is 21 percent. The wind speed \
             is 4 m/s NE. This forecast is intended from now until 1/30/2017, 7:00:00 PM (Local time).",
        );
    }

    #[test]
    fn humidity_sentence_and_fahrenheit_wording_for_imperial() {
        let mut reply = forecast_reply(&["--humidity"]);
        reply.units = Units::Imperial;
        reply.weather.humidity = 47;
        let rendered = Reply::Forecast(Box::new(reply)).render();
        assert!(rendered.contains("humidity is at 47 percent"));
        assert!(rendered.contains("degrees Fahrenheit"));
        assert!(!rendered.contains("Celsius"));
    }

    #[test]
    fn min_max_sentence_uses_both_bounds() {
        let rendered = Reply::Forecast(Box::new(forecast_reply(&["--temp_min_max"]))).render();
        assert!(rendered.contains(
            "The minimum temperature expected is -1 degrees Celsius, and the maximum temperature \
             expected is 4 degrees Celsius."
        ));
    }

    #[test]
    fn rain_volume_is_appended_without_a_flag() {
        let mut reply = forecast_reply(&[]);
        reply.weather.condition = "Rain".to_string();
        reply.weather.precipitation = Some(Precipitation::Rain(2.5));
        let rendered = Reply::Forecast(Box::new(reply)).render();
        assert!(rendered.contains("The rain volume is expected to be 2.5mm."));
    }

    #[test]
    fn snow_volume_is_appended_without_a_flag() {
        let mut reply = forecast_reply(&[]);
        reply.weather.condition = "Snow".to_string();
        reply.weather.precipitation = Some(Precipitation::Snow(0.4));
        let rendered = Reply::Forecast(Box::new(reply)).render();
        assert!(rendered.contains("The snow volume is expected to be 0.4mm."));
    }

    #[test]
    fn missing_timezone_degrades_to_utc() {
        let mut reply = forecast_reply(&[]);
        reply.timezone = None;
        let rendered = Reply::Forecast(Box::new(reply)).render();
        assert!(rendered.contains("from now until 1/30/2017, 6:00:00 PM (Local time)."));
    }

    #[test]
    fn rendering_is_idempotent() {
        let reply = Reply::Forecast(Box::new(forecast_reply(&["--wind", "--humidity"])));
        assert_eq!(reply.render(), reply.render());
    }

    #[test]
    fn every_variant_renders_something() {
        let variants = [
            Reply::Introduction,
            Reply::Help,
            Reply::MissingLocation,
            Reply::LocationNotFound,
            Reply::SourcesDown,
            Reply::OffsetOutOfRange,
            Reply::Forecast(Box::new(forecast_reply(&["--wind"]))),
            Reply::Unrecognized,
        ];
        for variant in variants {
            assert!(!variant.render().is_empty());
        }
    }
}
