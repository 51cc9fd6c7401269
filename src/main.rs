mod app;
mod batch;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod scene;
mod state;
mod surface;
mod ui;

use std::process::ExitCode;

use clap::Parser;

use cli::Args;
use surface::WindowSurface;

const MSG_PREFIX: &str = "[PLOTTER] - ";

fn main() -> ExitCode {
    env_logger::init();

    // Missing positionals print usage and exit with status 2.
    let args = Args::parse();
    let config = args.to_config();
    let mut surface = WindowSurface::new();

    if args.batch {
        return match batch::run_batch(&args.folder, &config, &mut surface) {
            Ok(summary) => {
                if args.summary_json {
                    match serde_json::to_string_pretty(&summary) {
                        Ok(json) => println!("{json}"),
                        Err(e) => log::error!("Cannot serialise summary: {e}"),
                    }
                } else {
                    println!(
                        "{MSG_PREFIX}{} pair(s) rendered, {} failed",
                        summary.succeeded.len(),
                        summary.failed.len()
                    );
                    for failure in &summary.failed {
                        println!("{MSG_PREFIX}  {}: {}", failure.stem, failure.message);
                    }
                }
                if summary.all_succeeded() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => report_failure(&e),
        };
    }

    // Both names are present unless --batch was given.
    let (Some(first), Some(second)) = (args.motion1.as_deref(), args.motion2.as_deref()) else {
        eprintln!("{MSG_PREFIX}two motion names are required");
        return ExitCode::from(2);
    };

    match batch::run_single(&args.folder, first, second, &config, &mut surface) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    if batch::is_data_error(err) {
        log::error!("{err:#}");
        eprintln!("{MSG_PREFIX}Plot data not found");
    } else {
        eprintln!("{MSG_PREFIX}{err:#}");
    }
    ExitCode::FAILURE
}
