use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use up_ynab_sync::args::Args;
use up_ynab_sync::{commands, Config, Mode, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Values from a .env file in the working directory fill in for unset environment variables, so
    // this must happen before the arguments are parsed.
    let dotenv = dotenvy::dotenv();

    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());
    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => trace!("No .env file found"),
        Err(e) => {
            error!("Unable to load the .env file: {e}");
            return ExitCode::FAILURE;
        }
    }

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    // Validate before touching the network so that a missing credential fails fast.
    let config = Config::from_args(args.common())?;
    trace!("{config:?}");

    // This allows for testing the program without hitting the Up or YNAB APIs. When
    // UP_YNAB_SYNC_IN_TEST_MODE is set and non-zero in length, then the mode will be Mode::Test,
    // otherwise it will be Mode::Live.
    let mode = Mode::from_env();

    commands::sync(config, mode, args.dry_run()).await?.print();
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                "up_ynab_sync",
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
