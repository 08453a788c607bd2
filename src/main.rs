use anyhow::Result;
use clap::Parser;
use testrank::cli::{Cli, Commands};
use testrank::commands::ScoreConfig;
use testrank::io::InputPaths;

// Pure function: map -v repetitions to a default log filter
fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().default_filter_or(log_level(verbosity));
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Score {
            targets,
            metrics,
            git,
            coverage,
            imports,
            config,
            ai_suggestions,
            format,
            output,
            strict,
            top,
        } => testrank::commands::handle_score(ScoreConfig {
            targets,
            inputs: InputPaths {
                metrics,
                git,
                coverage,
            },
            imports,
            config,
            ai_suggestions,
            format: format.into(),
            output,
            strict,
            top,
        }),
        Commands::Init {
            force,
            preset,
            path,
        } => testrank::commands::init_config(&path, preset.into(), force),
        Commands::CheckConfig { config } => {
            testrank::commands::check_config(config.as_deref())
        }
    }
}
