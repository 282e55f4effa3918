//! plotgraph CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use plotgraph_cli::{Args, error_adapter::to_reports, exit_code};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting plotgraph");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = plotgraph_cli::run(&args) {
        let reporter = miette::GraphicalReportHandler::new();

        // Render each diagnostic independently
        for report in to_reports(&err) {
            let mut writer = String::new();
            if reporter.render_report(&mut writer, &report).is_err() {
                writer = report.to_string();
            }

            error!("{writer}");
        }

        let code = exit_code(&err);
        if code != 0 {
            process::exit(code);
        }
        return;
    }

    info!("Completed successfully");
}
