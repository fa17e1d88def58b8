use std::{
    env,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use tour_audit_derive::{CliOptions, CliValue, KvDisplay};

use crate::{AuditRecorder, Error, FingerprintMode, Result};

pub const DEFAULT_AUDIT_LOG: &str = "results/audit_validations.txt";

/// Runtime options for one audit run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct AuditOptions {
    /// Instance file (first positional argument).
    #[kv(fmt = "path")]
    pub instance: PathBuf,
    /// Candidate tour file (second positional argument).
    #[kv(fmt = "path")]
    pub tour: PathBuf,
    /// Decimals shown for the distance, on screen and in the trail.
    #[cli(long = "precision")]
    pub precision: usize,
    /// Report format: `text` or `json`.
    #[cli(long = "format", parse_with = "OutputFormat::parse")]
    pub format: OutputFormat,
    /// One-line summary, logging off.
    #[cli(long = "quiet", flag)]
    pub quiet: bool,
    #[cli(long = "fingerprint-mode", parse_with = "FingerprintMode::parse")]
    pub fingerprint_mode: FingerprintMode,
    /// Append-only audit trail location.
    #[cli(long = "audit-log")]
    #[kv(fmt = "path")]
    pub audit_log: PathBuf,
    /// Whether to append to the audit trail at all.
    #[cli(long = "audit", flag)]
    pub audit: bool,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "format")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            instance: PathBuf::new(),
            tour: PathBuf::new(),
            precision: 2,
            format: OutputFormat::Text,
            quiet: false,
            fingerprint_mode: FingerprintMode::Ordered,
            audit_log: PathBuf::from(DEFAULT_AUDIT_LOG),
            audit: true,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl AuditOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut positionals = Vec::new();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            if arg == "--json" {
                options.format = OutputFormat::Json;
                continue;
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                positionals.push(arg);
                continue;
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);

            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        let [instance, tour] = <[String; 2]>::try_from(positionals).map_err(|found| {
            Error::invalid_input(format!(
                "Expected <instance> and <tour>, got {} positional argument(s)\n\n{}",
                found.len(),
                Self::usage()
            ))
        })?;
        options.instance = PathBuf::from(instance);
        options.tour = PathBuf::from(tour);

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tour-audit [options] <instance.tsp> <tour.txt>\n\n",
            "Options:\n",
            "  --precision <usize>\n",
            "  --format <text|json>\n",
            "  --json\n",
            "  --quiet[=<bool>]\n",
            "  --fingerprint-mode <ordered|canonical>\n",
            "  --audit-log <path>\n",
            "  --no-audit\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --help\n",
            "\n",
            "Exit status:\n",
            "  0 valid tour, 1 rejected tour, 2 unreadable input, 3 audit or internal failure\n",
            "\n",
            "Examples:\n",
            "  tour-audit berlin52.tsp route.txt\n",
            "  tour-audit --json --fingerprint-mode canonical berlin52.tsp route.txt\n",
            "  tour-audit --precision=4 --audit-log runs/audit.txt berlin52.tsp route.txt\n",
            "  tour-audit --log-level=info --log-output audit.log berlin52.tsp route.txt\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        let log_output = self.log_output.trim();
        if log_output.is_empty() || log_output == "-" {
            None
        } else {
            Some(Path::new(log_output))
        }
    }

    /// `--quiet` wins over `--log-level`.
    pub fn log_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else {
            self.log_level.to_filter()
        }
    }

    pub fn recorder(&self) -> AuditRecorder {
        if self.audit {
            AuditRecorder::new(&self.audit_log, self.precision)
        } else {
            AuditRecorder::disabled()
        }
    }
}
