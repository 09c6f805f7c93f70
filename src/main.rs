//! Command-line tool for inspecting and editing ADOFAI Access settings.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Resolve the settings file from `--game-root` or the host data path.
//! - Run one command against the settings store.

use adofai_access::config::serialize_settings;
use adofai_access::keys::SettingKey;
use adofai_access::{SettingsStore, paths};
use anyhow::{Result, anyhow, bail};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const USAGE: &str = "Usage: adofai-access-settings [--game-root DIR] <show|path|get KEY|set KEY VALUE|reset>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Show,
    Path,
    Get(String),
    Set(String, String),
    Reset,
}

#[derive(Debug)]
struct Args {
    game_root: Option<PathBuf>,
    command: Command,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let root = match args.game_root {
        Some(root) => root,
        None => paths::game_root(paths::host_data_path().as_deref()),
    };
    let store = SettingsStore::new(paths::settings_path(&root));
    debug!(path = %store.path().display(), "Resolved settings file");

    match args.command {
        Command::Show => {
            let settings = store.current();
            print!("{}", serialize_settings(&settings)?);
        }
        Command::Path => println!("{}", store.path().display()),
        Command::Get(key) => {
            let key = SettingKey::parse(&key)?;
            println!("{}", key.get(&store.current()));
        }
        Command::Set(key, value) => {
            let key = SettingKey::parse(&key)?;
            let saved = store.try_update(|settings| key.set(settings, &value))?;
            info!(key = key.file_name(), value = %key.get(&saved), "Updated setting");
            println!("{}", key.get(&saved));
        }
        Command::Reset => {
            store.try_reset_to_defaults()?;
        }
    }
    Ok(())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut args = args.into_iter();
    let mut game_root = None;
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--game-root" => {
                let dir = args
                    .next()
                    .ok_or_else(|| anyhow!("--game-root needs a directory\n{USAGE}"))?;
                game_root = Some(PathBuf::from(dir));
            }
            "-h" | "--help" => bail!("{USAGE}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        Some("show") | None => Command::Show,
        Some("path") => Command::Path,
        Some("reset") => Command::Reset,
        Some("get") => Command::Get(
            positional
                .next()
                .ok_or_else(|| anyhow!("get needs a key\n{USAGE}"))?,
        ),
        Some("set") => {
            let key = positional
                .next()
                .ok_or_else(|| anyhow!("set needs a key\n{USAGE}"))?;
            let value = positional
                .next()
                .ok_or_else(|| anyhow!("set needs a value\n{USAGE}"))?;
            Command::Set(key, value)
        }
        Some(other) => bail!("Unknown command: {other}\n{USAGE}"),
    };
    if let Some(extra) = positional.next() {
        bail!("Unexpected argument: {extra}\n{USAGE}");
    }

    Ok(Args { game_root, command })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        parse_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn defaults_to_show() {
        let args = parse(&[]).expect("no args");
        assert_eq!(args.command, Command::Show);
        assert!(args.game_root.is_none());
    }

    #[test]
    fn game_root_flag_is_accepted_anywhere() {
        let args = parse(&["set", "--game-root", "/games/adofai", "playMode", "2"])
            .expect("set with root");
        assert_eq!(args.game_root, Some(PathBuf::from("/games/adofai")));
        assert_eq!(
            args.command,
            Command::Set("playMode".to_string(), "2".to_string())
        );
    }

    #[test]
    fn malformed_invocations_are_rejected() {
        assert!(parse(&["get"]).is_err());
        assert!(parse(&["set", "playMode"]).is_err());
        assert!(parse(&["frobnicate"]).is_err());
        assert!(parse(&["path", "extra"]).is_err());
        assert!(parse(&["--game-root"]).is_err());
    }
}
