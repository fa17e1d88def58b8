//! Independent auditing of Euclidean TSP tours.
//! Parses a TSPLIB-style instance and a candidate tour, checks the tour is a
//! Hamiltonian cycle, scores and fingerprints it, and appends the verdict to
//! an audit trail.

mod audit;
mod city;
mod error;
mod io;
pub mod logging;
mod runner;
pub mod verify;

pub use verify::{fingerprint, scorer, validator};

pub use audit::{AuditEntry, AuditRecorder, Verdict};
pub use city::City;
pub use error::{Error, Result};
pub use io::instance::Instance;
pub use io::options::{AuditOptions, LogFormat, LogLevel, OutputFormat};
pub use io::report;
pub use io::tour::Tour;
pub use runner::{AuditReport, RunOutcome, ScoreRecord, audit_files, evaluate, run};
pub use verify::fingerprint::{Fingerprint, FingerprintMode};
pub use verify::validator::{Rejection, ValidationResult};
