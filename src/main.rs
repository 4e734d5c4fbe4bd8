use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hydro_track::cli::{Cli, Commands};
use hydro_track::commands::{
    run_add, run_config, run_goal, run_history, run_init, run_reset, run_settings, run_status,
};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = match &cli.command {
        Commands::Add(args) => run_add(args, &cli),
        Commands::Reset(args) => run_reset(args, &cli),
        Commands::Status(args) => run_status(args, &cli),
        Commands::Goal(args) => run_goal(args, &cli),
        Commands::Settings(args) => run_settings(args, &cli),
        Commands::History(args) => run_history(args, &cli),
        Commands::Init(args) => run_init(args, cli.color.into()),
        Commands::Config(args) => run_config(args, &cli),
    };

    std::process::exit(exit_code);
}

/// Logs go to stderr so report output on stdout stays clean. `RUST_LOG` wins
/// over the verbosity flags.
fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
