use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::ForecastProvider;
use crate::model::{Forecast, Precipitation, Units, Wind};
use crate::text::capitalize_first;

const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Forecast provider backed by the OpenWeather 5-day/3-hour forecast API.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self { api_key, http: Client::new() }
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
        offset: u64,
    ) -> Result<Forecast> {
        debug!(latitude, longitude, offset, units = units.as_query(), "forecast fetch");

        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", units.as_query()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (5-day forecast)")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read OpenWeather forecast response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather forecast request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        let entry = parsed
            .list
            .get(offset as usize)
            .ok_or_else(|| anyhow!("OpenWeather forecast list has no entry at offset {offset}"))?;

        entry_to_forecast(entry)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: f64,
}

/// Rain/snow volumes arrive nested under a `"3h"` key and may be absent
/// even when the condition says otherwise.
#[derive(Debug, Deserialize)]
struct OwVolume {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwCondition>,
    clouds: OwClouds,
    wind: OwWind,
    rain: Option<OwVolume>,
    snow: Option<OwVolume>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn entry_to_forecast(entry: &OwForecastEntry) -> Result<Forecast> {
    let (condition, description) = entry
        .weather
        .first()
        .map(|w| (w.main.clone(), capitalize_first(&w.description)))
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

    let precipitation = match condition.as_str() {
        "Rain" => entry.rain.as_ref().and_then(|r| r.three_hour).map(Precipitation::Rain),
        "Snow" => entry.snow.as_ref().and_then(|s| s.three_hour).map(Precipitation::Snow),
        _ => None,
    };

    let forecast_time = unix_to_utc(entry.dt)
        .ok_or_else(|| anyhow!("OpenWeather forecast entry has an invalid timestamp"))?;

    Ok(Forecast {
        temperature: entry.main.temp,
        minimum_temperature: entry.main.temp_min,
        maximum_temperature: entry.main.temp_max,
        heat_index: entry.main.feels_like,
        humidity: entry.main.humidity,
        cloudiness: entry.clouds.all,
        condition,
        description,
        forecast_time,
        wind: Wind {
            speed: entry.wind.speed,
            direction_degrees: (entry.wind.deg.rem_euclid(360.0)) as u16 % 360,
        },
        precipitation,
    })
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}
