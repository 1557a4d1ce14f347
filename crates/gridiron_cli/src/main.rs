//! gridiron CLI
//!
//! Expand model replies into dense frames, convert between the JSON and
//! compact wire forms, rebuild match state from a play log, and run a
//! scripted match offline.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use gridiron_core::config::GameConfig;
#[cfg(feature = "cli")]
use gridiron_core::provider::ScriptedProvider;
#[cfg(feature = "cli")]
use gridiron_core::replay::{load_play_log_json, save_play_log_json};
#[cfg(feature = "cli")]
use gridiron_core::{api, MatchSession};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "gridiron")]
#[command(about = "Expand, encode and replay AI-narrated football plays", long_about = None)]
struct Cli {
    /// JSON config file (defaults, or GRIDIRON_CONFIG_PATH, when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand a raw model reply (JSON or compact) into dense frames
    Expand {
        /// File holding the reply text
        #[arg(long)]
        r#in: PathBuf,

        /// Ball position before the snap (0-100)
        #[arg(long, default_value_t = 50)]
        field_position: i32,

        /// Write the PlayResult JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Encode a waypoint-form JSON play into the compact wire form
    Encode {
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Decode a compact wire string into waypoint-form JSON
    Decode {
        #[arg(long)]
        r#in: PathBuf,
    },

    /// Rebuild match state from a play log
    Replay {
        #[arg(long = "log")]
        log_path: PathBuf,

        /// Also check every stored snapshot against the replay
        #[arg(long, default_value = "false")]
        verify: bool,
    },

    /// Run a match against canned replies
    Play {
        /// JSON array of reply strings, consumed in order
        #[arg(long)]
        replies: PathBuf,

        /// Play calls as OFFENSE/DEFENSE, one per reply
        #[arg(long = "call", required = true)]
        calls: Vec<String>,

        /// Existing log to resume from
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Where to save the play log
        #[arg(long = "log")]
        log_path: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Expand { r#in, field_position, out } => {
            let reply = read_text(&r#in)?;
            let result = api::expand_play_with_config_json(&reply, field_position, &config.engine)
                .map_err(anyhow::Error::msg)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &result)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ Frames written to {}", path.display());
                }
                None => println!("{result}"),
            }
        }

        Commands::Encode { r#in } => {
            let json = read_text(&r#in)?;
            println!("{}", api::encode_play_json(&json).map_err(anyhow::Error::msg)?);
        }

        Commands::Decode { r#in } => {
            let compact = read_text(&r#in)?;
            let json = api::decode_compact_json(compact.trim()).map_err(anyhow::Error::msg)?;
            let value: serde_json::Value = serde_json::from_str(&json)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }

        Commands::Replay { log_path, verify } => {
            let play_log = load_play_log_json(&log_path)?;
            let rules = &config.engine.rules;
            if verify {
                play_log.verify(rules).context("play log failed verification")?;
                println!("✅ {} plays verified", play_log.len());
            }
            print_state(&play_log.rebuild_state(rules));
        }

        Commands::Play { replies, calls, resume, log_path } => {
            let replies: Vec<String> = serde_json::from_str(&read_text(&replies)?)
                .context("replies file must be a JSON array of strings")?;
            let calls = calls.iter().map(|c| parse_call(c)).collect::<Result<Vec<_>>>()?;

            let provider = ScriptedProvider::new(replies);
            let mut session = match resume {
                Some(path) => MatchSession::from_log(provider, config, load_play_log_json(&path)?),
                None => MatchSession::new(provider, config),
            };

            for (offense, defense) in &calls {
                match session.play(offense, defense) {
                    Ok(outcome) => println!(
                        "{offense} vs {defense}: {} | {}",
                        outcome.result.summary,
                        outcome.state.down_and_distance()
                    ),
                    Err(err) if err.is_retryable() => {
                        log::warn!("{offense} vs {defense} failed, skipping: {err}");
                    }
                    Err(err) => {
                        log::info!("Stopping: {err}");
                        break;
                    }
                }
            }

            save_play_log_json(session.log(), &log_path)?;
            println!("📄 Play log saved to {}", log_path.display());
            print_state(session.state());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::from_env()?,
    };
    Ok(config)
}

#[cfg(feature = "cli")]
fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

#[cfg(feature = "cli")]
fn parse_call(call: &str) -> Result<(String, String)> {
    match call.split_once('/') {
        Some((offense, defense)) if !offense.trim().is_empty() && !defense.trim().is_empty() => {
            Ok((offense.trim().to_string(), defense.trim().to_string()))
        }
        _ => anyhow::bail!("play call must look like OFFENSE/DEFENSE, got {call:?}"),
    }
}

#[cfg(feature = "cli")]
fn print_state(state: &gridiron_core::MatchState) {
    println!("\n{} | {}", state.clock_text(), state.down_and_distance());
    println!("   Home {} - Away {}", state.home_score, state.away_score);
    println!("   Possession: {}", state.possession.as_str());
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("gridiron CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_expand() {
        let cli = Cli::try_parse_from([
            "gridiron",
            "expand",
            "--in",
            "reply.txt",
            "--field-position",
            "80",
        ])
        .unwrap();
        match cli.command {
            Commands::Expand { r#in, field_position, out } => {
                assert_eq!(r#in, PathBuf::from("reply.txt"));
                assert_eq!(field_position, 80);
                assert!(out.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_play_calls() {
        let cli = Cli::try_parse_from([
            "gridiron", "--config", "cfg.json", "play", "--replies", "r.json", "--call", "Dive/Base",
            "--call", "Slant/Cover 2", "--log", "out.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
        let Commands::Play { calls, resume, .. } = cli.command else { panic!("expected play") };
        assert_eq!(calls, vec!["Dive/Base", "Slant/Cover 2"]);
        assert!(resume.is_none());
    }

    #[test]
    fn test_play_requires_a_call() {
        let parsed = Cli::try_parse_from(["gridiron", "play", "--replies", "r.json", "--log", "o.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_call() {
        assert_eq!(parse_call(" Dive / Base ").unwrap(), ("Dive".into(), "Base".into()));
        assert!(parse_call("Dive").is_err());
        assert!(parse_call("/Base").is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"provider": {"useCompactEncoding": true}}"#).unwrap();
        assert!(load_config(Some(path.as_path())).unwrap().provider.use_compact_encoding);
        assert!(load_config(Some(dir.path().join("missing.json").as_path())).is_err());
    }
}
