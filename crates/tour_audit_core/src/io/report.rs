//! Human and machine renderings of an [`AuditReport`].

use chrono::SecondsFormat;
use serde::Serialize;

use crate::{AuditReport, Error, Fingerprint, Rejection, Result};

/// Fingerprint characters shown in the text report.
const SHORT_FINGERPRINT: usize = 16;

#[derive(Debug, Serialize)]
struct StructuredReport<'a> {
    instance_name: Option<&'a str>,
    city_count: usize,
    tour_length: usize,
    valid: bool,
    rejection: Option<Rejection>,
    message: &'a str,
    distance: Option<f64>,
    fingerprint: Option<&'a Fingerprint>,
    timestamp: String,
}

impl<'a> From<&'a AuditReport> for StructuredReport<'a> {
    fn from(report: &'a AuditReport) -> Self {
        Self {
            instance_name: report.instance_name.as_deref(),
            city_count: report.city_count,
            tour_length: report.tour_length,
            valid: report.is_valid(),
            rejection: report.validation.rejection(),
            message: report.validation.message(),
            distance: report.distance(),
            fingerprint: report.fingerprint(),
            timestamp: report
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

/// Pretty-printed JSON object. The distance is not rounded.
pub fn render_json(report: &AuditReport) -> Result<String> {
    serde_json::to_string_pretty(&StructuredReport::from(report))
        .map_err(|e| Error::other(format!("failed to serialize report: {e}")))
}

/// Verdict block for a terminal, or a single summary line when `quiet`.
pub fn render_text(report: &AuditReport, precision: usize, quiet: bool) -> String {
    let distance = report.distance().map(|d| format!("{d:.precision$}"));
    let fingerprint = report
        .fingerprint()
        .map(|f| format!("{}...", f.short(SHORT_FINGERPRINT)));

    if quiet {
        return match (distance, fingerprint) {
            (Some(distance), Some(fingerprint)) => {
                format!("valid distance={distance} fingerprint={fingerprint}")
            }
            _ => format!("invalid: {}", report.validation.message()),
        };
    }

    let name = report.instance_name.as_deref().unwrap_or("(unnamed)");
    let mut out = format!(
        "instance:    {name} ({} cities)\ntour:        {} steps\nverdict:     {}\nreason:      {}\n",
        report.city_count,
        report.tour_length,
        if report.is_valid() { "valid" } else { "invalid" },
        report.validation.message(),
    );
    match (distance, fingerprint) {
        (Some(distance), Some(fingerprint)) => {
            out.push_str(&format!("distance:    {distance}\nfingerprint: {fingerprint}\n"));
        }
        _ => out.push_str("distance:    not computed, validation failed\n"),
    }
    out
}
