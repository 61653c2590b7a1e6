//! The orchestrator: one inbound message in, at most one reply out.

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{
    ForecastProvider, Geocoder, NominatimGeocoder, OpenWeatherProvider, TimezoneFinder,
    TzfTimezoneFinder,
};
use crate::command::{interpret, tokenize};
use crate::config::Config;
use crate::model::ParsedRequest;
use crate::reply::{ForecastReply, MAX_FORECAST_OFFSET, MIN_FORECAST_OFFSET, Reply};
use crate::text::normalize_whitespace;

/// Messages must start with this word to be considered at all.
pub const COMMAND_PREFIX: &str = "!weather";

/// One inbound chat message, whatever the platform.
#[async_trait]
pub trait ChatMessage: Send + Sync {
    fn text(&self) -> &str;
    /// Whether the author is itself a bot account.
    fn is_from_bot(&self) -> bool;
    /// Send `text` back to the originating channel.
    async fn reply(&self, text: &str) -> Result<()>;
}

/// Sequences the pipeline: tokenize, interpret, look up, render, reply.
/// Holds no per-request state; each message is handled independently.
#[derive(Debug)]
pub struct MessageHandler {
    geocoder: Box<dyn Geocoder>,
    weather: Box<dyn ForecastProvider>,
    timezones: Box<dyn TimezoneFinder>,
}

impl MessageHandler {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        weather: Box<dyn ForecastProvider>,
        timezones: Box<dyn TimezoneFinder>,
    ) -> Self {
        Self { geocoder, weather, timezones }
    }

    /// Wire up the real upstream adapters from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_openweather_api_key()?;

        Ok(Self::new(
            Box::new(NominatimGeocoder::new()),
            Box::new(OpenWeatherProvider::new(api_key.to_owned())),
            Box::new(TzfTimezoneFinder::new()),
        ))
    }

    /// Handle one inbound message end to end. Bot-authored messages and
    /// messages without the command prefix produce no reply at all.
    pub async fn handle(&self, message: &dyn ChatMessage) -> Result<()> {
        if message.is_from_bot() {
            return Ok(());
        }

        match self.reply_to(message.text()).await {
            Some(reply) => message.reply(&reply).await,
            None => Ok(()),
        }
    }

    /// Run the pipeline over raw message text. Returns `None` when the
    /// message is not addressed to the bot.
    pub async fn reply_to(&self, text: &str) -> Option<String> {
        let normalized = normalize_whitespace(text);
        if !normalized.starts_with(COMMAND_PREFIX) {
            return None;
        }

        let tokens = tokenize(&normalized);
        let request = interpret(&tokens);
        debug!(?request.task, "handling command");

        Some(self.classify(request).await.render())
    }

    /// Collapse a parsed request into its terminal [`Reply`], calling the
    /// upstream collaborators only when a forecast actually needs them.
    /// Upstream failures never escape: they log and become [`Reply::SourcesDown`].
    async fn classify(&self, request: ParsedRequest) -> Reply {
        match request.task.as_deref() {
            None => Reply::Introduction,
            Some("help") => Reply::Help,
            Some("forecast") => {
                let location = request.location.unwrap_or_default();
                if location.is_empty() {
                    return Reply::MissingLocation;
                }

                if let Some(offset) = request.forecast_offset {
                    if !(MIN_FORECAST_OFFSET..=MAX_FORECAST_OFFSET).contains(&offset) {
                        return Reply::OffsetOutOfRange;
                    }
                }

                let place = match self.geocoder.lookup(&location).await {
                    Ok(Some(place)) => place,
                    Ok(None) => return Reply::LocationNotFound,
                    Err(err) => {
                        warn!(error = %err, "geocoding lookup failed");
                        return Reply::SourcesDown;
                    }
                };

                let timezone = self.timezones.find(place.latitude, place.longitude);

                let offset = request.forecast_offset.unwrap_or(0);
                match self
                    .weather
                    .fetch(place.latitude, place.longitude, request.units, offset)
                    .await
                {
                    Ok(weather) => Reply::Forecast(Box::new(ForecastReply {
                        location,
                        weather,
                        units: request.units,
                        timezone,
                        offset,
                        details: request.detail_fields,
                    })),
                    Err(err) => {
                        warn!(error = %err, "weather fetch failed");
                        Reply::SourcesDown
                    }
                }
            }
            Some(_) => Reply::Unrecognized,
        }
    }
}
