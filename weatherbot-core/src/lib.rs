//! Core library for the `weatherbot` chat command.
//!
//! This crate defines:
//! - The command pipeline: tokenizer, argument interpreter, reply renderer
//! - The orchestrating message handler and the inbound-message contract
//! - Collaborator traits plus the Nominatim/OpenWeather/timezone adapters
//! - Configuration & credentials handling
//!
//! It is used by `weatherbot-cli`, but any chat-platform integration can
//! drive it by implementing [`ChatMessage`].

pub mod api;
pub mod command;
pub mod config;
pub mod handler;
pub mod model;
pub mod reply;
pub mod text;
pub mod wind;

pub use config::Config;
pub use handler::{COMMAND_PREFIX, ChatMessage, MessageHandler};
pub use model::{Forecast, ParsedRequest, Place, Precipitation, RawCommand, Units, Wind};
pub use reply::{ForecastReply, Reply};
