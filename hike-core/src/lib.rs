//! Core library for the `hike` CLI.
//!
//! This crate defines:
//! - Configuration handling (forecast endpoint)
//! - The HTTP client for the hike forecast service
//! - Shared domain models (form input, requests, responses)
//! - Text rendering of daily forecast cards
//!
//! It is used by `hike-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod model;
pub mod render;

pub use client::{ForecastApi, ForecastError, HttpForecastClient};
pub use config::Config;
pub use model::{DayForecast, ForecastRequest, ForecastResponse, FormInput, PeriodDetail, Preferences};
pub use render::render_summary;
