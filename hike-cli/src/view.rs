//! View controller for one forecast screen.
//!
//! Holds the output handle and the submission phase explicitly, so every
//! transition (clear, loading, result, error banner) goes through one place.
//! Each call to [`ForecastView::begin_submission`] hands out a monotonically
//! increasing token; an outcome delivered with an older token is dropped, so
//! a slow response can never overwrite the display of a newer submission.

use std::io::{self, Write};

use hike_core::{ForecastApi, ForecastError, ForecastResponse, FormInput, render_summary};

pub const LOADING_MESSAGE: &str = "Fetching forecast...";
pub const ERROR_GUIDANCE: &str = "Please check the location or backend console.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
}

/// Identifies one submission; newer tokens supersede older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionToken(u64);

pub struct ForecastView<W: Write> {
    out: W,
    phase: Phase,
    latest: u64,
}

impl<W: Write> ForecastView<W> {
    pub fn new(out: W) -> Self {
        Self { out, phase: Phase::Idle, latest: 0 }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Start a new submission: show the loading indicator and return the
    /// token the eventual outcome must present.
    pub fn begin_submission(&mut self) -> io::Result<SubmissionToken> {
        self.latest += 1;
        self.phase = Phase::Loading;
        writeln!(self.out, "{LOADING_MESSAGE}")?;
        Ok(SubmissionToken(self.latest))
    }

    /// Deliver the outcome of a submission. A stale token leaves the display
    /// untouched; the current token always leaves the loading phase first,
    /// then renders either the forecast or the error banner.
    pub fn finish(
        &mut self,
        token: SubmissionToken,
        submitted_location: &str,
        result: Result<ForecastResponse, ForecastError>,
    ) -> io::Result<()> {
        if token.0 != self.latest {
            return Ok(());
        }

        self.phase = Phase::Idle;

        match result {
            Ok(response) => {
                let name = response
                    .location_name
                    .as_deref()
                    .unwrap_or(submitted_location);
                writeln!(self.out, "\nForecast for {name}:\n")?;
                write!(self.out, "{}", render_summary(&response.daily_summary))?;
            }
            Err(err) => {
                writeln!(self.out, "Error: {err}. {ERROR_GUIDANCE}")?;
            }
        }

        self.out.flush()
    }
}

/// Run one full submission cycle: form state in, rendered outcome out.
///
/// Forecast failures are part of the screen's normal lifecycle (they end in
/// the error banner), so only I/O trouble surfaces as an `Err` here.
pub async fn submit<W: Write>(
    view: &mut ForecastView<W>,
    api: &dyn ForecastApi,
    input: &FormInput,
) -> io::Result<()> {
    let token = view.begin_submission()?;

    let result = match input.to_request() {
        Ok(request) => api.fetch(&request).await,
        Err(err) => Err(err),
    };

    view.finish(token, &input.location, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hike_core::{DayForecast, ForecastRequest};
    use std::collections::BTreeMap;

    fn response(location_name: Option<&str>, dates: &[&str]) -> ForecastResponse {
        let mut daily_summary = BTreeMap::new();
        for date in dates {
            daily_summary.insert(
                (*date).to_string(),
                DayForecast {
                    recommendation: "Good".to_string(),
                    reasons_bad: vec![],
                    details: vec![],
                },
            );
        }
        ForecastResponse {
            location_name: location_name.map(ToString::to_string),
            daily_summary,
        }
    }

    fn rendered(view: &ForecastView<Vec<u8>>) -> String {
        String::from_utf8(view.out.clone()).expect("utf8 output")
    }

    #[test]
    fn loading_is_visible_strictly_between_begin_and_finish() {
        let mut view = ForecastView::new(Vec::new());
        assert!(!view.is_loading());

        let token = view.begin_submission().expect("begin");
        assert!(view.is_loading());
        assert!(rendered(&view).contains(LOADING_MESSAGE));

        view.finish(token, "Oslo", Ok(response(None, &[]))).expect("finish");
        assert!(!view.is_loading());
    }

    #[test]
    fn api_error_banner_matches_contract_text() {
        let mut view = ForecastView::new(Vec::new());
        let token = view.begin_submission().expect("begin");

        let err = ForecastError::Api { status: 500, message: "bad location".to_string() };
        view.finish(token, "Oslo", Err(err)).expect("finish");

        assert!(rendered(&view)
            .contains("Error: bad location. Please check the location or backend console."));
    }

    #[test]
    fn transport_error_banner_includes_underlying_description() {
        let mut view = ForecastView::new(Vec::new());
        let token = view.begin_submission().expect("begin");

        let err = ForecastError::Transport("connection refused".to_string());
        view.finish(token, "Oslo", Err(err)).expect("finish");

        let out = rendered(&view);
        assert!(out.contains("connection refused"));
        assert!(out.contains(ERROR_GUIDANCE));
    }

    #[test]
    fn missing_location_name_falls_back_to_submitted_location() {
        let mut view = ForecastView::new(Vec::new());
        let token = view.begin_submission().expect("begin");

        view.finish(token, "Oslo", Ok(response(None, &["2024-05-01"]))).expect("finish");
        assert!(rendered(&view).contains("Forecast for Oslo:"));
    }

    #[test]
    fn resolved_location_name_wins_over_submitted() {
        let mut view = ForecastView::new(Vec::new());
        let token = view.begin_submission().expect("begin");

        view.finish(token, "Oslo", Ok(response(Some("Oslo, NO"), &[]))).expect("finish");
        assert!(rendered(&view).contains("Forecast for Oslo, NO:"));
    }

    #[test]
    fn stale_outcome_never_overwrites_a_newer_submission() {
        let mut view = ForecastView::new(Vec::new());

        let first = view.begin_submission().expect("begin first");
        let _second = view.begin_submission().expect("begin second");

        view.finish(first, "Oslo", Ok(response(Some("Stale, XX"), &["2024-05-01"])))
            .expect("finish stale");

        // The stale result is dropped wholesale; the second submission is
        // still in flight.
        assert!(view.is_loading());
        assert!(!rendered(&view).contains("Stale, XX"));
    }

    struct FakeApi {
        result: Result<ForecastResponse, ForecastError>,
    }

    #[async_trait]
    impl ForecastApi for FakeApi {
        async fn fetch(
            &self,
            _request: &ForecastRequest,
        ) -> Result<ForecastResponse, ForecastError> {
            match &self.result {
                Ok(response) => Ok(response.clone()),
                Err(ForecastError::Api { status, message }) => {
                    Err(ForecastError::Api { status: *status, message: message.clone() })
                }
                Err(other) => Err(ForecastError::Transport(other.to_string())),
            }
        }
    }

    fn form(location: &str, precip: &str) -> FormInput {
        FormInput {
            location: location.to_string(),
            min_temp: "5".to_string(),
            max_temp: "25".to_string(),
            max_wind: "8".to_string(),
            max_precip_pct: precip.to_string(),
        }
    }

    #[tokio::test]
    async fn submit_renders_forecast_on_success() {
        let api = FakeApi { result: Ok(response(Some("Bergen, NO"), &["2024-05-01"])) };
        let mut view = ForecastView::new(Vec::new());

        submit(&mut view, &api, &form("Bergen", "40")).await.expect("submit");

        let out = rendered(&view);
        assert!(out.contains("Forecast for Bergen, NO:"));
        assert!(out.contains("Wednesday, May 1"));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn submit_surfaces_invalid_form_input_as_banner() {
        let api = FakeApi { result: Ok(response(None, &[])) };
        let mut view = ForecastView::new(Vec::new());

        submit(&mut view, &api, &form("Bergen", "drizzle")).await.expect("submit");

        let out = rendered(&view);
        assert!(out.contains("Error: "));
        assert!(out.contains(ERROR_GUIDANCE));
        assert!(!view.is_loading());
    }
}
