use clap::{Parser, Subcommand};
use commands::init::InitError;
use std::process::ExitCode;
mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(version, about = "OpenPaaS CLI", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone OpenPaaS, install its dependencies and initialize a local instance
    Init(commands::init::InitArgs),
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        eprintln!("Failed to initialize logging: {}", err);
        return ExitCode::FAILURE;
    }
    log::debug!("Starting OpenPaaS CLI...");

    let args = Args::parse();
    log::debug!("Command line args: {:?}", args);

    match &args.command {
        Some(Commands::Init(init_args)) => match commands::init::run(init_args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                let code = err.exit_code();
                if err.is_guard() {
                    log::error!("{}", err);
                    log::error!("exit with error code {}", code);
                } else if let InitError::StepFailed { .. } = err {
                    // The child already reported on the inherited streams.
                    log::debug!("{} (exit code {})", err, code);
                } else {
                    log::error!("{}", err);
                }
                ExitCode::from(code)
            }
        },
        None => {
            log::info!("No command specified, use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}
