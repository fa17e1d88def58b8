use std::process;

use log::info;

use tour_audit_core::{AuditOptions, Error, OutputFormat, RunOutcome, logging, report, run};

fn main() {
    let options = match AuditOptions::from_args() {
        Ok(options) => options,
        Err(Error::InvalidInput(message)) if message == AuditOptions::usage() => {
            print!("{message}");
            process::exit(0);
        }
        Err(Error::InvalidInput(message)) => {
            eprintln!("{message}");
            process::exit(RunOutcome::EXIT_INPUT_FAILED);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(RunOutcome::EXIT_INPUT_FAILED);
        }
    };

    if let Err(e) = logging::init_logger(&options) {
        eprintln!("error: {e}");
        process::exit(RunOutcome::EXIT_INTERNAL);
    }
    info!("options: {options}");

    process::exit(audit(&options));
}

fn audit(options: &AuditOptions) -> i32 {
    let outcome = match run(options) {
        Ok(outcome) => outcome,
        Err(e) if e.is_input_failure() => {
            eprintln!("error: {e}");
            return RunOutcome::EXIT_INPUT_FAILED;
        }
        Err(e) => {
            eprintln!("unexpected error: {e}");
            return RunOutcome::EXIT_INTERNAL;
        }
    };

    match &outcome {
        RunOutcome::InputFailed(e) => eprintln!("error: {e}"),
        RunOutcome::Accepted(audit) | RunOutcome::Rejected(audit) => {
            let rendered = match options.format {
                OutputFormat::Text => Ok(report::render_text(
                    audit,
                    options.precision,
                    options.quiet,
                )),
                OutputFormat::Json => report::render_json(audit),
            };
            match rendered {
                Ok(text) => println!("{}", text.trim_end()),
                Err(e) => {
                    eprintln!("unexpected error: {e}");
                    return RunOutcome::EXIT_INTERNAL;
                }
            }
        }
    }

    info!("outcome: exit={}", outcome.exit_code());
    outcome.exit_code()
}
