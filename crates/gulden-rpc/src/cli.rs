use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use gulden_rpc_core::NodeConfig;

/// gulden-rpc: talk to a Gulden full node over its JSON-RPC interface.
#[derive(Parser)]
#[command(version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Node host. `http://` is assumed when no scheme is given.
    #[arg(long, default_value = "127.0.0.1", env = "GULDEN_RPC_HOST")]
    pub host: String,

    /// Node RPC port. Values outside 1-65535 fall back to 9232.
    #[arg(long, default_value = "9232", env = "GULDEN_RPC_PORT")]
    pub port: u32,

    /// RPC username (omit to use the cookie file).
    #[arg(long, env = "GULDEN_RPC_USER")]
    pub user: Option<String>,

    /// RPC password (omit to use the cookie file).
    #[arg(long, env = "GULDEN_RPC_PASS")]
    pub pass: Option<String>,

    /// Path to the node's `.cookie` file.
    #[arg(long, env = "GULDEN_RPC_COOKIE")]
    pub cookie: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check that the node answers `getinfo` with these credentials.
    Ping,

    /// Check an address offline: format first, then checksum.
    Validate { address: String },

    /// Show the node's help text, for one command or all of them.
    Help { command: Option<String> },

    /// Summarize `getinfo`.
    Info,

    /// Count connected peers by direction.
    Peers,

    /// Invoke any node command and print its result as JSON.
    Call {
        method: String,
        /// Positional parameters. Each is read as JSON, or as a string when
        /// it is not valid JSON.
        params: Vec<String>,
    },
}

impl Cli {
    pub fn node_config(&self) -> NodeConfig {
        NodeConfig {
            host: self.host.clone(),
            port: self.port,
            username: self.user.clone(),
            password: self.pass.clone(),
            cookie_file: self.cookie.clone(),
        }
    }
}

/// Read a command-line parameter as JSON, falling back to a JSON string.
pub fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use serde_json::json;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_subcommand_reaches_the_node() {
        let cli = Cli::try_parse_from(["gulden-rpc", "help", "getinfo"]).expect("must parse");
        let Command::Help { command } = &cli.command else {
            panic!("expected node help subcommand");
        };
        assert_eq!(command.as_deref(), Some("getinfo"));

        let cli = Cli::try_parse_from(["gulden-rpc", "help"]).expect("must parse");
        assert!(matches!(cli.command, Command::Help { command: None }));
    }

    #[test]
    fn params_prefer_json() {
        assert_eq!(parse_param("10"), json!(10));
        assert_eq!(parse_param("true"), json!(true));
        assert_eq!(parse_param("null"), json!(null));
        assert_eq!(parse_param(r#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(parse_param(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn params_fall_back_to_strings() {
        assert_eq!(parse_param("00ab"), json!("00ab"));
        assert_eq!(
            parse_param("Ga1GEKzjGdXBs43R8JsWP7V8kQUR2nV1NH"),
            json!("Ga1GEKzjGdXBs43R8JsWP7V8kQUR2nV1NH")
        );
        assert_eq!(parse_param(""), json!(""));
    }

    #[test]
    fn call_collects_trailing_params() {
        let cli = Cli::try_parse_from([
            "gulden-rpc",
            "--user",
            "alice",
            "--pass",
            "secret",
            "call",
            "getblockhash",
            "10",
        ])
        .expect("must parse");
        let Command::Call { method, params } = &cli.command else {
            panic!("expected call subcommand");
        };
        assert_eq!(method, "getblockhash");
        assert_eq!(params, &vec!["10".to_owned()]);

        let config = cli.node_config();
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert_eq!(config.port, 9232);
    }

    #[test]
    fn out_of_range_port_is_accepted_for_later_reset() {
        let cli = Cli::try_parse_from(["gulden-rpc", "--port", "70000", "ping"])
            .expect("must parse");
        assert_eq!(cli.node_config().port, 70_000);
    }
}
