use clap::Parser;
use log::{error, info};
use obj_fixer::batch::driver::{BatchDriver, BatchEvent};
use obj_fixer::io::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Processing {} assets under {}",
        config.assets.len(),
        config.root.display()
    );

    let driver = BatchDriver::new(config).dry_run(cli.dry_run);
    let report = driver.run(|event| match event {
        BatchEvent::Reading(asset) => println!("Reading {asset}"),
        BatchEvent::Writing(asset) => println!("Writing {asset}"),
        BatchEvent::Done => println!("Done"),
    });

    match report {
        Ok(report) if report.is_success() => {
            info!("{} assets processed", report.succeeded());
            ExitCode::SUCCESS
        }
        Ok(report) => {
            for (asset, e) in report.failures() {
                error!("{asset}: {e}");
            }
            eprintln!(
                "Error: {} of {} assets failed",
                report.assets.len() - report.succeeded(),
                report.assets.len()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
