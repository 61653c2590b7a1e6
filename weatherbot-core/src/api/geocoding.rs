use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::Geocoder;
use crate::model::Place;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Nominatim asks every client to identify itself.
const USER_AGENT: &str = concat!("weatherbot/", env!("CARGO_PKG_VERSION"));

/// Geocoder backed by the public Nominatim (OpenStreetMap) search endpoint.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    http: Client,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, query: &str) -> Result<Option<Place>> {
        debug!(query, "geocoding lookup");

        let res = self
            .http
            .get(SEARCH_URL)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .context("Failed to send request to Nominatim")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read Nominatim response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Nominatim search failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let hits: Vec<NominatimPlace> =
            serde_json::from_str(&body).context("Failed to parse Nominatim JSON")?;

        match hits.into_iter().next() {
            Some(hit) => hit.into_place().map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimPlace {
    fn into_place(self) -> Result<Place> {
        let latitude = self
            .lat
            .parse()
            .with_context(|| format!("Nominatim returned a non-numeric latitude: {}", self.lat))?;
        let longitude = self
            .lon
            .parse()
            .with_context(|| format!("Nominatim returned a non-numeric longitude: {}", self.lon))?;

        Ok(Place { display_name: self.display_name, latitude, longitude })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_first_hit_into_a_place() {
        let body = r#"[
            {"display_name": "London, Greater London, England, United Kingdom", "lat": "51.5073219", "lon": "-0.1276474"},
            {"display_name": "City of London, Greater London, England, United Kingdom", "lat": "51.5156177", "lon": "-0.0919983"}
        ]"#;

        let hits: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let place = hits.into_iter().next().unwrap().into_place().unwrap();

        assert_eq!(place.display_name, "London, Greater London, England, United Kingdom");
        assert!((place.latitude - 51.5073219).abs() < 1e-9);
        assert!((place.longitude - -0.1276474).abs() < 1e-9);
    }

    #[test]
    fn an_empty_result_array_is_a_miss_not_an_error() {
        let hits: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn non_numeric_coordinates_are_an_error() {
        let hit = NominatimPlace {
            display_name: "Nowhere".to_string(),
            lat: "fifty-one".to_string(),
            lon: "-0.1".to_string(),
        };
        let err = hit.into_place().unwrap_err();
        assert!(err.to_string().contains("non-numeric latitude"));
    }
}
