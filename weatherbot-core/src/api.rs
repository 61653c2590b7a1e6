//! Upstream collaborator contracts and their HTTP implementations.
//!
//! The pipeline only ever talks to these traits; the shipped adapters live
//! in the submodules. Geocoding keeps "no match" (`Ok(None)`) distinct from
//! transport or parse failure (`Err`) all the way through.

use std::fmt::Debug;

use anyhow::Result;
use async_trait::async_trait;
use chrono_tz::Tz;

use crate::model::{Forecast, Place, Units};

pub mod geocoding;
pub mod timezone;
pub mod weather;

/// Resolve a free-form place query to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(Some(..))` on a match, `Ok(None)` when the provider knows no such
    /// place, `Err` on transport or parse failure.
    async fn lookup(&self, query: &str) -> Result<Option<Place>>;
}

/// Fetch one forecast slot for a coordinate pair.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// `offset` indexes the provider's forecast list in 3-hour steps,
    /// 0 = the current slot.
    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        units: Units,
        offset: u64,
    ) -> Result<Forecast>;
}

/// Best-effort coordinates-to-timezone lookup, used only for rendering
/// localized timestamps. A miss degrades rendering and must never fail the
/// request.
pub trait TimezoneFinder: Send + Sync + Debug {
    fn find(&self, latitude: f64, longitude: f64) -> Option<Tz>;
}

pub use geocoding::NominatimGeocoder;
pub use timezone::TzfTimezoneFinder;
pub use weather::OpenWeatherProvider;
