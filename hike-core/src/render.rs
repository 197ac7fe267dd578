//! Turns a daily summary into text cards for the terminal.
//!
//! Pure string building, no I/O: the view layer decides where the output
//! goes, which keeps every formatting rule testable.

use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::model::{DayForecast, PeriodDetail};

pub const NO_DATA_PLACEHOLDER: &str = "No forecast data available for the upcoming days.";

/// Render one card per day, ascending by date.
pub fn render_summary(daily_summary: &BTreeMap<String, DayForecast>) -> String {
    if daily_summary.is_empty() {
        return format!("{NO_DATA_PLACEHOLDER}\n");
    }

    let mut out = String::new();
    for (date, day) in daily_summary {
        render_day(&mut out, date, day);
    }
    out
}

fn render_day(out: &mut String, date: &str, day: &DayForecast) {
    let _ = writeln!(out, "{}  [{}]", display_date(date), day.recommendation);

    if !day.is_good() && !day.reasons_bad.is_empty() {
        for reason in &day.reasons_bad {
            let _ = writeln!(out, "  - {reason}");
        }
    }

    for detail in &day.details {
        let _ = writeln!(out, "{}", render_period(detail));
    }

    out.push('\n');
}

/// `2024-05-01` becomes `Wednesday, May 1`. A key that is not an ISO date
/// is shown as-is rather than failing the whole card.
fn display_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%A, %b %-d").to_string(),
        Err(_) => date.to_string(),
    }
}

fn render_period(detail: &PeriodDetail) -> String {
    let line = format!(
        "{}: {:.1}°C, {}, Wind {:.1} m/s, Precip {:.0}%",
        detail.time, detail.temp_c, detail.description, detail.wind_mps, detail.precip_prob
    );

    if detail.is_good_period {
        format!("    {line}")
    } else {
        format!("  ! {line} ({})", detail.reason)
    }
}
