use std::io;
use std::path::PathBuf;

use busfactor::analyze::AnalyzeOptions;
use busfactor::cli::{Cli, Commands};
use busfactor::{aliases, analyze};
use clap::{CommandFactory, Parser};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Analyze {
            path,
            json,
            depth,
            top,
            summaries,
            merge_aliases,
            config,
        } => {
            let target = path.unwrap_or_else(|| PathBuf::from("."));
            let options = AnalyzeOptions {
                json,
                depth,
                top,
                merge_aliases,
                summaries,
            };
            analyze::run(
                &target,
                config.config.as_deref(),
                config.overrides(),
                &options,
            )
        }
        Commands::Aliases {
            path,
            json,
            toml,
            top,
            config,
            days_gap,
        } => {
            let target = path.unwrap_or_else(|| PathBuf::from("."));
            aliases::run(&target, config.as_deref(), days_gap, json, toml, top)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "bf", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
