mod adapters;
mod cli;
mod config;
mod core;
mod error;
mod logging;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use crate::{cli::Args, config::ServiceConfig, error::AppError};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_level);

    let config = match ServiceConfig::from_args(&args) {
        Ok(c) => c,
        Err(AppError::MissingTable) => {
            println!("Error: The table name must be specified (use --table or -t)\n");
            let _ = Args::command().print_help();
            return ExitCode::from(1);
        }
        Err(e) => return fatal(e),
    };

    match adapters::http::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fatal(e),
    }
}

fn fatal(e: AppError) -> ExitCode {
    tracing::error!(code = e.code(), "{e}");
    ExitCode::from(1)
}
