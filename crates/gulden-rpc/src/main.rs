mod cli;

use clap::Parser;
use eyre::{bail, WrapErr};

use gulden_rpc_core::address;
use gulden_rpc_core::{GuldenClient, NodeConfig};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    run(&args.node_config(), args.command).await
}

async fn run(config: &NodeConfig, command: Command) -> eyre::Result<()> {
    // Only the node commands need a client; `validate` works offline.
    let connect = || GuldenClient::new(config).context("configure node client");

    match command {
        Command::Validate { address } => validate(&address)?,
        Command::Ping => {
            let client = connect()?;
            let reachable = client
                .verify_connection()
                .await
                .wrap_err_with(|| format!("while contacting {}", client.url()))?;
            if !reachable {
                bail!("{} did not accept getinfo; check credentials", client.url());
            }
            println!("{} is reachable", client.url());
        }
        Command::Help { command } => {
            let client = connect()?;
            let text = client.help(command.as_deref()).await.context("help")?;
            println!("{text}");
        }
        Command::Info => {
            let client = connect()?;
            let info = client.control().get_info().await.context("getinfo")?;
            println!("version:     {}", info.version.unwrap_or_default());
            println!("protocol:    {}", info.protocol_version.unwrap_or_default());
            println!("blocks:      {}", info.blocks.unwrap_or_default());
            println!("connections: {}", info.connections.unwrap_or_default());
            println!("testnet:     {}", info.test_net);
            if !info.errors.is_empty() {
                println!("errors:      {}", info.errors);
            }
        }
        Command::Peers => {
            let client = connect()?;
            let peers = client
                .network()
                .get_peer_info()
                .await
                .context("getpeerinfo")?;
            println!(
                "{} peers ({} inbound, {} outbound)",
                peers.len(),
                peers.inbound_count(),
                peers.outbound_count()
            );
            for peer in peers.peers() {
                let direction = if peer.inbound { "in " } else { "out" };
                println!("  {direction} {} {}", peer.remote_address, peer.sub_version);
            }
        }
        Command::Call { method, params } => {
            let client = connect()?;
            let params = params.iter().map(|raw| cli::parse_param(raw)).collect();
            let response = client
                .execute(&method, params)
                .await
                .wrap_err_with(|| format!("while sending {method}"))?;
            if !response.is_successful() {
                bail!(
                    "{method} failed (HTTP {}): {}",
                    response.status(),
                    response.error()
                );
            }
            let pretty = serde_json::to_string_pretty(response.result())
                .context("render result")?;
            println!("{pretty}");
        }
    }

    Ok(())
}

fn validate(address: &str) -> eyre::Result<()> {
    let format_ok = address::validate_format(address);
    let valid = format_ok && address::validate(address);
    println!("format:   {}", if format_ok { "ok" } else { "invalid" });
    println!("checksum: {}", if valid { "ok" } else { "invalid" });
    if !valid {
        bail!("{address} is not a valid Gulden address");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only a username, so building a client would fail.
    fn broken_config() -> NodeConfig {
        NodeConfig {
            username: Some("alice".into()),
            ..NodeConfig::default()
        }
    }

    #[tokio::test]
    async fn validate_runs_without_a_client() {
        let command = Command::Validate {
            address: "Ga1GEKzjGdXBs43R8JsWP7V8kQUR2nV1NH".into(),
        };
        run(&broken_config(), command)
            .await
            .expect("offline validation must not build a client");
    }

    #[tokio::test]
    async fn validate_rejects_bad_checksum() {
        let command = Command::Validate {
            address: "Ga1GEKzjGdXBs43R8JsWP7V8kQUR2nV1NJ".into(),
        };
        let err = run(&broken_config(), command).await.expect_err("must fail");
        assert!(err.to_string().contains("not a valid Gulden address"));
    }

    #[tokio::test]
    async fn node_commands_report_client_configuration_errors() {
        let err = run(&broken_config(), Command::Ping)
            .await
            .expect_err("must fail");
        assert!(err.to_string().contains("configure node client"));
    }
}
