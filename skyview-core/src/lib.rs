//! Core library for the `skyview` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - A client for the OpenWeather one-call API with a per-unit-system
//!   last-response cache
//! - Projection of raw responses into flat, display-ready readings
//! - Best-effort IP geolocation for a default position, and reverse
//!   geocoding for place labels
//!
//! It is used by `skyview-cli`, but can also be reused by other front ends.

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod geocode;
pub mod location;
pub mod model;

pub use client::{WeatherClient, icon_url};
pub use config::Config;
pub use error::{LocationError, WeatherError};
pub use extract::{current_weather, daily_weather, extract_reading, hourly_weather, is_present};
pub use geocode::reverse_geocode;
pub use location::resolve_current_location;
pub use model::{Coordinate, OneCallResponse, Reading, UnitSystem};
