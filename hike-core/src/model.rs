use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::client::ForecastError;

/// Raw form state for one submission, every field exactly as the user typed it.
///
/// Nothing here is validated up front; bad thresholds are the backend's call.
/// The one exception is `max_precip_pct`, which must parse client-side because
/// the wire contract wants it as a 0-1 fraction, not a percentage.
#[derive(Debug, Clone)]
pub struct FormInput {
    pub location: String,
    pub min_temp: String,
    pub max_temp: String,
    pub max_wind: String,
    /// Percentage in the 0-100 range.
    pub max_precip_pct: String,
}

impl FormInput {
    /// Build the wire request for this submission.
    pub fn to_request(&self) -> Result<ForecastRequest, ForecastError> {
        Ok(ForecastRequest {
            location: self.location.clone(),
            preferences: Preferences::from_form(self)?,
        })
    }
}

/// Acceptability thresholds as the forecast service expects them.
///
/// The temperature and wind fields travel as raw strings. That is the
/// service's documented contract (the backend coerces them with its own
/// defaults for anything unparseable), so we do not tighten it here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub min_temp: String,
    pub max_temp: String,
    pub max_wind: String,
    /// Fraction in the 0-1 range.
    pub max_precip: f64,
}

impl Preferences {
    /// Convert form state, turning the 0-100 precipitation percentage
    /// into the 0-1 fraction the API wants.
    pub fn from_form(input: &FormInput) -> Result<Self, ForecastError> {
        let pct: f64 = input.max_precip_pct.trim().parse().map_err(|_| {
            ForecastError::InvalidInput(format!(
                "max precipitation must be a number (0-100), got '{}'",
                input.max_precip_pct
            ))
        })?;

        Ok(Self {
            min_temp: input.min_temp.clone(),
            max_temp: input.max_temp.clone(),
            max_wind: input.max_wind.clone(),
            max_precip: pct / 100.0,
        })
    }
}

/// Body of the outbound `POST`. Lives only for the duration of one call.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRequest {
    pub location: String,
    pub preferences: Preferences,
}

/// Successful response from the forecast service.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    /// Resolved place name; absent when the service echoes nothing back,
    /// in which case the display falls back to the submitted location.
    #[serde(default)]
    pub location_name: Option<String>,

    /// Per-day summaries keyed by ISO `YYYY-MM-DD` date. A `BTreeMap` keeps
    /// the keys in ascending lexicographic order, which for ISO dates is
    /// chronological order.
    #[serde(default)]
    pub daily_summary: BTreeMap<String, DayForecast>,
}

/// Server-computed verdict for one day plus its supporting periods.
#[derive(Debug, Clone, Deserialize)]
pub struct DayForecast {
    /// `"Good"` or `"Bad"` today, but treated as an open set: anything
    /// other than `"Good"` renders negatively.
    pub recommendation: String,
    #[serde(default)]
    pub reasons_bad: Vec<String>,
    #[serde(default)]
    pub details: Vec<PeriodDetail>,
}

impl DayForecast {
    pub fn is_good(&self) -> bool {
        self.recommendation == "Good"
    }
}

/// One sub-day time block (typically a 3-hour window) with its own
/// weather reading and pass/fail evaluation.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodDetail {
    pub time: String,
    pub temp_c: f64,
    pub description: String,
    pub wind_mps: f64,
    /// Probability of precipitation, 0-100.
    pub precip_prob: f64,
    pub is_good_period: bool,
    /// Meaningful only when `is_good_period` is false.
    #[serde(default)]
    pub reason: String,
}
