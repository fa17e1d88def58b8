use std::path::Path;

use chrono::{DateTime, Local};

use crate::{
    AuditEntry, AuditOptions, AuditRecorder, Error, Fingerprint, FingerprintMode, Instance,
    Result, Tour, ValidationResult, Verdict, scorer, validator,
};

/// Distance and fingerprint of a validated tour.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRecord {
    pub distance: f64,
    pub fingerprint: Fingerprint,
    pub generated_at: DateTime<Local>,
}

/// Everything known about one audited tour.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditReport {
    pub instance_name: Option<String>,
    pub city_count: usize,
    pub tour_length: usize,
    pub validation: ValidationResult,
    /// Present only when `validation` accepted the tour.
    pub score: Option<ScoreRecord>,
    pub timestamp: DateTime<Local>,
}

impl AuditReport {
    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn distance(&self) -> Option<f64> {
        self.score.as_ref().map(|s| s.distance)
    }

    pub fn fingerprint(&self) -> Option<&Fingerprint> {
        self.score.as_ref().map(|s| &s.fingerprint)
    }
}

/// Result of a run. Rejection is an expected outcome, not an error.
#[derive(Debug)]
pub enum RunOutcome {
    Accepted(AuditReport),
    Rejected(AuditReport),
    /// The instance or tour file could not be read.
    InputFailed(Error),
}

impl RunOutcome {
    pub const EXIT_ACCEPTED: i32 = 0;
    pub const EXIT_REJECTED: i32 = 1;
    pub const EXIT_INPUT_FAILED: i32 = 2;
    /// Audit trail write failure or unexpected internal error.
    pub const EXIT_INTERNAL: i32 = 3;

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Accepted(_) => Self::EXIT_ACCEPTED,
            Self::Rejected(_) => Self::EXIT_REJECTED,
            Self::InputFailed(_) => Self::EXIT_INPUT_FAILED,
        }
    }

    pub fn report(&self) -> Option<&AuditReport> {
        match self {
            Self::Accepted(report) | Self::Rejected(report) => Some(report),
            Self::InputFailed(_) => None,
        }
    }
}

/// Runs a full audit as configured on the command line.
pub fn run(options: &AuditOptions) -> Result<RunOutcome> {
    let recorder = options.recorder();
    recorder.prepare()?;
    audit_files(
        &options.instance,
        &options.tour,
        options.fingerprint_mode,
        &recorder,
    )
}

/// Loads both files, evaluates the tour and appends exactly one trail entry.
///
/// Returns `Err` only when the trail cannot be written or the evaluation hit
/// an unexpected inconsistency; the latter is still recorded first.
pub fn audit_files(
    instance_path: &Path,
    tour_path: &Path,
    mode: FingerprintMode,
    recorder: &AuditRecorder,
) -> Result<RunOutcome> {
    let timestamp = Local::now();
    let entry = |verdict: Verdict,
                 distance: Option<f64>,
                 fingerprint: Option<Fingerprint>,
                 reason: &str| AuditEntry {
        timestamp,
        instance: instance_path.to_path_buf(),
        tour: tour_path.to_path_buf(),
        verdict,
        distance,
        fingerprint,
        reason: reason.to_string(),
    };

    let loaded = Instance::from_file(instance_path)
        .and_then(|instance| Ok((instance, Tour::from_file(tour_path)?)));
    let (instance, tour) = match loaded {
        Ok(loaded) => loaded,
        Err(error) => {
            log::error!("input: {error}");
            recorder.record(&entry(Verdict::Error, None, None, &error.to_string()))?;
            return Ok(RunOutcome::InputFailed(error));
        }
    };

    let report = match evaluate(&instance, &tour, mode, timestamp) {
        Ok(report) => report,
        Err(error) => {
            log::error!("evaluate: {error}");
            recorder.record(&entry(Verdict::Error, None, None, &error.to_string()))?;
            return Err(error);
        }
    };

    let verdict = if report.is_valid() {
        Verdict::Valid
    } else {
        Verdict::Invalid
    };
    recorder.record(&entry(
        verdict,
        report.distance(),
        report.fingerprint().cloned(),
        report.validation.message(),
    ))?;

    Ok(if report.is_valid() {
        RunOutcome::Accepted(report)
    } else {
        RunOutcome::Rejected(report)
    })
}

/// Validates `tour` and, if it is a Hamiltonian cycle, scores and
/// fingerprints it. Touches no files.
pub fn evaluate(
    instance: &Instance,
    tour: &Tour,
    mode: FingerprintMode,
    timestamp: DateTime<Local>,
) -> Result<AuditReport> {
    let validation = validator::validate(tour, instance);
    log::info!(
        "validate: valid={} message={}",
        validation.is_valid(),
        validation.message()
    );

    let score = if validation.is_valid() {
        let distance = scorer::tour_length(tour, instance)?;
        let fingerprint = mode.apply(tour.ids());
        log::info!("score: distance={distance:.2} fingerprint={fingerprint} mode={mode}");
        Some(ScoreRecord {
            distance,
            fingerprint,
            generated_at: Local::now(),
        })
    } else {
        None
    };

    Ok(AuditReport {
        instance_name: instance.name.clone(),
        city_count: instance.len(),
        tour_length: tour.len(),
        validation,
        score,
        timestamp,
    })
}
