// src/main.rs

use std::process::ExitCode;

use mexec::cli::{self, CliArgs, ParseOutcome, USAGE};
use mexec::{logging, run};

fn main() -> ExitCode {
    let args = match cli::parse() {
        ParseOutcome::Run(args) => args,
        ParseOutcome::Display(info) => info.exit(),
        ParseOutcome::Usage(_) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run_main(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("mexec: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_main(args: &CliArgs) -> anyhow::Result<ExitCode> {
    logging::init_logging(args.log_level)?;
    let result = run(args)?;
    Ok(ExitCode::from(result.exit_code()))
}
