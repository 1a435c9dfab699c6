use std::path::PathBuf;

use clap::{Parser, Subcommand};

use msite::app::Playground;
use msite::config::{Config, StoreBackend};
use msite::error::{AppError, AppResult};
use msite::logging;
use msite::page::Viewport;
use msite::replay;
use msite::store::open_store;

/// Marsias site orchestration, driven from the terminal.
#[derive(Parser, Debug)]
#[command(name = "msite", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to $MSITE_CONFIG_PATH or ~/.config/msite/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Where the playground writes its log
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Browse the page interactively (default)
    Play {
        /// Record store for the contact form: memory or realtime-db
        #[arg(long, value_parser = parse_store_backend)]
        store: Option<StoreBackend>,
    },
    /// Run a JSON event script headlessly and print the final state
    Replay {
        script: PathBuf,
        #[arg(long)]
        width: Option<f64>,
        #[arg(long)]
        height: Option<f64>,
    },
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    match cli.command.unwrap_or(Command::Play { store: None }) {
        Command::Play { store } => {
            let log_path = cli.log_file.unwrap_or_else(logging::default_log_path);
            logging::init_file(&log_path)?;
            if let Some(backend) = store {
                config.store.backend = backend;
            }
            let store = open_store(&config.store)?;
            let today = chrono::Local::now().date_naive();
            let mut playground = Playground::new(&config, store, today);
            playground.run().await
        }
        Command::Replay {
            script,
            width,
            height,
        } => {
            logging::init_stderr()?;
            let viewport = replay_viewport(width, height)?;
            let script = replay::load_script(&script)?;
            let report = replay::run(script, &config, viewport).await?;
            let json = serde_json::to_string_pretty(&report)
                .map_err(|err| AppError::invalid_argument(format!("unprintable report: {err}")))?;
            println!("{json}");
            Ok(())
        }
    }
}

fn parse_store_backend(value: &str) -> Result<StoreBackend, String> {
    StoreBackend::parse(value)
        .ok_or_else(|| format!("unknown store `{value}` (expected memory or realtime-db)"))
}

fn replay_viewport(width: Option<f64>, height: Option<f64>) -> AppResult<Option<Viewport>> {
    match (width, height) {
        (None, None) => Ok(None),
        (Some(width), Some(height)) => Ok(Some(Viewport::new(width, height))),
        _ => Err(AppError::invalid_argument(
            "--width and --height must be given together",
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Command, replay_viewport};
    use msite::config::StoreBackend;
    use msite::page::Viewport;

    #[test]
    fn bare_invocation_defaults_to_play() {
        let cli = Cli::try_parse_from(["msite"]).expect("no args should parse");
        assert_eq!(cli.command, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn play_accepts_store_override_and_rejects_unknown_backends() {
        let cli = Cli::try_parse_from(["msite", "play", "--store", "realtime-db"])
            .expect("known store should parse");
        assert_eq!(
            cli.command,
            Some(Command::Play {
                store: Some(StoreBackend::RealtimeDb)
            })
        );

        assert!(Cli::try_parse_from(["msite", "play", "--store", "sqlite"]).is_err());
    }

    #[test]
    fn replay_takes_script_and_global_config() {
        let cli = Cli::try_parse_from([
            "msite", "replay", "steps.json", "--width", "375", "--height", "700", "--config",
            "site.toml",
        ])
        .expect("replay should parse");
        assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
        assert_eq!(
            cli.command,
            Some(Command::Replay {
                script: PathBuf::from("steps.json"),
                width: Some(375.0),
                height: Some(700.0),
            })
        );
    }

    #[test]
    fn replay_viewport_needs_both_dimensions() {
        assert_eq!(replay_viewport(None, None).expect("no override"), None);
        assert_eq!(
            replay_viewport(Some(375.0), Some(700.0)).expect("both given"),
            Some(Viewport::new(375.0, 700.0))
        );
        assert!(replay_viewport(Some(375.0), None).is_err());
    }
}
