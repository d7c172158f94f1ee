use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init => commands::init(home)?.print(),
        Command::Add(add_args) => commands::add(Config::load(home)?, add_args.clone())?.print(),
        Command::List => commands::list(Config::load(home)?)?.print(),
        Command::Total => commands::total(Config::load(home)?)?.print(),
        Command::Summary(summary_args) => {
            commands::summary(Config::load(home)?, summary_args.clone())?.print()
        }
        Command::Save(path_args) => commands::save(Config::load(home)?, path_args.path())?.print(),
        Command::Load(path_args) => commands::load(Config::load(home)?, path_args.path())?.print(),
        Command::Categories => commands::categories(Config::load(home)?)?.print(),
    };
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
            // RUST_LOG does not exist; use default log level for this program only.
            let level = level.to_string().to_lowercase();
            EnvFilter::new(format!(
                "expense_tracker={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
