mod run;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt::{self, writer::BoxMakeWriter}, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};
use std::{fs::File, path::Path, path::PathBuf, process::ExitCode};

use crate::run::{execute, Command};

fn setup_tracing(log_dir: Option<&Path>, verbose: bool) -> std::io::Result<()> {
    // logs go to stderr so command output stays clean on stdout
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_level(true)
        .with_filter(if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN });

    let file_layer = match log_dir {
        Some(log_dir) => {
            std::fs::create_dir_all(log_dir)?;
            let file = File::create(log_dir.join("zone.log"))?;
            Some(
                fmt::layer()
                    .with_writer(BoxMakeWriter::new(file))
                    .with_ansi(false)
                    .with_level(true)
                    .with_filter(LevelFilter::DEBUG),
            )
        }
        None => None,
    };

    let _ = Registry::default()
        .with(file_layer)
        .with(console_layer)
        .try_init();
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about = "Zone hashing tools")]
struct Args {
    #[arg(short, long, help = "Directory for a debug log file")]
    log_dir: Option<PathBuf>,
    #[arg(short, long, help = "Print debug logs to the console")]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = setup_tracing(args.log_dir.as_deref(), args.verbose) {
        eprintln!("failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }
    tracing::debug!("running {:?}", args.command);

    match execute(args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
