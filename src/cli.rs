use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Parser)]
#[command(name = "spylinq")]
#[command(version)]
#[command(about = "Terminal client for the spylinq spy / counter-spy party game")]
pub struct Args {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides the config file)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Connect to the lobby and play interactively (the default)
    Play {
        /// Join immediately under this name instead of waiting for `join`
        #[arg(long)]
        name: Option<String>,
    },
    /// Deprecated raw-request diagnostics: fire one request, print the raw body
    Debug {
        #[command(subcommand)]
        action: PanelAction,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// POST /join and print the raw response
    Join { name: String },
    /// POST /start and print the raw response
    Start { name: String },
    /// GET /player_list and print the raw response
    PlayerList,
}

impl Args {
    /// Config file layered under CLI overrides.
    pub fn resolve_config(&self) -> Result<ClientConfig, ClientError> {
        let mut config = ClientConfig::load(self.config.as_deref())?;
        if let Some(server) = &self.server {
            config.base_url = server.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn test_parse_bare_invocation() {
        let args = Args::parse_from(["spylinq"]);
        assert!(args.command.is_none());
        assert!(args.config.is_none());
        assert!(args.server.is_none());
    }

    #[test]
    fn test_parse_play_with_name() {
        let args = Args::parse_from(["spylinq", "play", "--name", "ada"]);
        match args.command {
            Some(Command::Play { name }) => assert_eq!(name.as_deref(), Some("ada")),
            _ => panic!("expected play subcommand"),
        }
    }

    #[test]
    fn test_parse_debug_join() {
        let args = Args::parse_from(["spylinq", "debug", "join", "ada"]);
        match args.command {
            Some(Command::Debug { action }) => {
                assert_eq!(
                    action,
                    PanelAction::Join {
                        name: "ada".to_string()
                    }
                );
            }
            _ => panic!("expected debug subcommand"),
        }
    }

    #[test]
    fn test_parse_debug_player_list() {
        let args = Args::parse_from(["spylinq", "debug", "player-list"]);
        match args.command {
            Some(Command::Debug { action }) => assert_eq!(action, PanelAction::PlayerList),
            _ => panic!("expected debug subcommand"),
        }
    }

    #[test]
    fn test_server_flag_is_global() {
        let args = Args::parse_from(["spylinq", "play", "--server", "http://10.0.0.5:8888"]);
        assert_eq!(args.server.as_deref(), Some("http://10.0.0.5:8888"));
    }

    #[test]
    fn test_resolve_config_defaults() {
        let args = Args::parse_from(["spylinq"]);
        let config = args.resolve_config().expect("resolve");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resolve_config_server_override() {
        let args = Args::parse_from(["spylinq", "--server", "http://10.0.0.5:8888"]);
        let config = args.resolve_config().expect("resolve");
        assert_eq!(config.base_url, "http://10.0.0.5:8888");
    }
}
