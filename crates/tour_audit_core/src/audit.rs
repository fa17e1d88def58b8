//! Append-only audit trail.
//!
//! Every run appends one line:
//!
//! ```text
//! [2026-10-16T09:12:44.051273+02:00] Instance: berlin52.tsp | Tour: route.txt | Verdict: valid | Distance: 7544.37 | Fingerprint: 4f1c... | Reason: valid Hamiltonian cycle
//! ```
//!
//! Each entry is formatted in full and written with one `write_all` on a
//! handle opened in append mode, so concurrent processes sharing a trail do
//! not interleave partial lines.

use std::{
    fmt,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;

use crate::{Error, Fingerprint, Result};

const NOT_APPLICABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
    /// The run failed before a verdict could be reached.
    Error,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Error => "error",
        };
        write!(f, "{value}")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub timestamp: DateTime<Local>,
    pub instance: PathBuf,
    pub tour: PathBuf,
    pub verdict: Verdict,
    pub distance: Option<f64>,
    pub fingerprint: Option<Fingerprint>,
    pub reason: String,
}

impl AuditEntry {
    /// Single trail line without the trailing newline.
    pub fn to_line(&self, precision: usize) -> String {
        let distance = self
            .distance
            .map(|d| format!("{d:.precision$}"))
            .unwrap_or_else(|| NOT_APPLICABLE.to_string());
        let fingerprint = self
            .fingerprint
            .as_ref()
            .map_or(NOT_APPLICABLE, Fingerprint::as_str);

        format!(
            "[{}] Instance: {} | Tour: {} | Verdict: {} | Distance: {distance} | Fingerprint: {fingerprint} | Reason: {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, false),
            escape_field(&self.instance.display().to_string()),
            escape_field(&self.tour.display().to_string()),
            self.verdict,
            escape_field(&single_line(&self.reason)),
        )
    }
}

/// Writes [`AuditEntry`] lines to a trail file chosen at construction.
#[derive(Clone, Debug)]
pub struct AuditRecorder {
    path: Option<PathBuf>,
    precision: usize,
}

impl AuditRecorder {
    pub fn new(path: impl Into<PathBuf>, precision: usize) -> Self {
        Self {
            path: Some(path.into()),
            precision,
        }
    }

    /// Recorder that accepts entries and writes nothing.
    pub fn disabled() -> Self {
        Self {
            path: None,
            precision: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Creates the trail's parent directory. Call once before [`Self::record`].
    pub fn prepare(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| Error::audit(path, e))?;
        }
        Ok(())
    }

    pub fn record(&self, entry: &AuditEntry) -> Result<()> {
        let Some(path) = &self.path else {
            log::debug!("audit: disabled, verdict={} not recorded", entry.verdict);
            return Ok(());
        };

        let mut line = entry.to_line(self.precision);
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::audit(path, e))?;
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| Error::audit(path, e))?;

        log::debug!(
            "audit: appended verdict={} trail={}",
            entry.verdict,
            path.display()
        );
        Ok(())
    }
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Keeps a field inside its column: line breaks, other control characters
/// and the `|` separator are escaped.
fn escape_field(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => out.push_str("\\|"),
            c if c.is_control() => out.extend(c.escape_default()),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use chrono::{Local, TimeZone};

    use super::{AuditEntry, AuditRecorder, Verdict};
    use crate::{Error, verify::fingerprint::fingerprint};

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("tour-audit-tests-{name}-{nanos}"))
    }

    fn entry(verdict: Verdict) -> AuditEntry {
        let valid = verdict == Verdict::Valid;
        AuditEntry {
            timestamp: Local
                .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("unambiguous local time"),
            instance: PathBuf::from("square4.tsp"),
            tour: PathBuf::from("route.txt"),
            verdict,
            distance: valid.then_some(4.0),
            fingerprint: valid.then(|| fingerprint(&["1", "2", "3", "4"])),
            reason: if valid {
                "valid Hamiltonian cycle".to_string()
            } else {
                "unknown cities: 9".to_string()
            },
        }
    }

    #[test]
    fn valid_line_carries_distance_and_fingerprint() {
        let line = entry(Verdict::Valid).to_line(2);

        assert!(line.starts_with("[2026-01-02T03:04:05.000000"));
        assert!(line.contains("] Instance: square4.tsp | Tour: route.txt | Verdict: valid"));
        assert!(line.contains("| Distance: 4.00 |"));
        assert!(line.contains(
            "| Fingerprint: d36723f04c1361f074b6596bf9738c13fb6f12ef363f9b0ba16f62a07bc57b1b |"
        ));
        assert!(line.ends_with("| Reason: valid Hamiltonian cycle"));
    }

    #[test]
    fn invalid_line_uses_sentinels() {
        let line = entry(Verdict::Invalid).to_line(2);
        assert!(line.contains("Verdict: invalid | Distance: N/A | Fingerprint: N/A"));
        assert!(line.ends_with("Reason: unknown cities: 9"));
    }

    #[test]
    fn precision_controls_distance_decimals() {
        assert!(entry(Verdict::Valid).to_line(4).contains("Distance: 4.0000 |"));
        assert!(entry(Verdict::Valid).to_line(0).contains("Distance: 4 |"));
    }

    #[test]
    fn multi_line_reasons_stay_on_one_line() {
        let mut e = entry(Verdict::Error);
        e.reason = "first\nsecond".to_string();
        assert!(e.to_line(2).ends_with("Reason: first second"));
    }

    #[test]
    fn paths_cannot_break_out_of_their_field() {
        let mut e = entry(Verdict::Invalid);
        e.tour = PathBuf::from(
            "r.txt\n[2030-01-01T00:00:00+00:00] Instance: fake.tsp | Verdict: valid | Reason: forged",
        );
        e.instance = PathBuf::from("a|b\r.tsp");

        let line = e.to_line(2);
        assert!(!line.contains('\n'));
        assert!(!line.contains('\r'));
        assert!(line.contains("Instance: a\\|b\\r.tsp | Tour: r.txt\\n[2030-01-01"));
        assert!(line.contains("fake.tsp \\| Verdict: valid \\| Reason: forged | Verdict: invalid"));
    }

    #[test]
    fn reason_separators_are_escaped() {
        let mut e = entry(Verdict::Error);
        e.reason = "bad | Verdict: valid".to_string();
        assert!(e.to_line(2).ends_with("Reason: bad \\| Verdict: valid"));
    }

    #[test]
    fn record_appends_one_line_per_entry() {
        let dir = unique_temp_dir("audit-append");
        let path = dir.join("results").join("audit_validations.txt");
        let recorder = AuditRecorder::new(&path, 2);

        recorder.prepare().expect("prepare trail dir");
        recorder.record(&entry(Verdict::Valid)).expect("record valid");
        recorder.record(&entry(Verdict::Invalid)).expect("record invalid");

        let text = fs::read_to_string(&path).expect("read trail");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Verdict: valid"));
        assert!(lines[1].contains("Verdict: invalid"));

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn record_keeps_existing_lines() {
        let dir = unique_temp_dir("audit-existing");
        fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("trail.txt");
        fs::write(&path, "earlier entry\n").expect("seed trail");

        AuditRecorder::new(&path, 2)
            .record(&entry(Verdict::Invalid))
            .expect("record");

        let text = fs::read_to_string(&path).expect("read trail");
        assert!(text.starts_with("earlier entry\n["));
        assert_eq!(text.lines().count(), 2);

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn record_failure_is_reported() {
        let dir = unique_temp_dir("audit-unwritable");
        fs::create_dir_all(&dir).expect("create temp dir");

        // A directory cannot be opened for appending.
        let err = AuditRecorder::new(&dir, 2)
            .record(&entry(Verdict::Valid))
            .expect_err("appending to a directory should fail");
        assert!(matches!(err, Error::Audit { .. }));

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn disabled_recorder_writes_nothing() {
        let recorder = AuditRecorder::disabled();
        assert!(recorder.path().is_none());
        recorder.prepare().expect("prepare");
        recorder.record(&entry(Verdict::Valid)).expect("record");
    }
}
