//! pact developer harness.
//!
//! Drives the wallet link from a terminal: prints the connect deep link,
//! accepts the wallet's callback URI on stdin, and exposes balance and
//! transfer commands against the configured ledger. This is a development
//! tool, not the product UI.

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

use pact_ledger::{LedgerConfig, LedgerQueryClient};
use pact_session::{
    CallbackDisposition, ConnectionSession, HandOffError, LinkLauncher, SessionConfig,
};
use pact_types::{LedgerAddress, TokenAmount};

#[derive(Parser)]
#[command(name = "pact", about = "Wallet link developer harness")]
struct Cli {
    /// Path to a TOML session configuration file.
    #[arg(long, env = "PACT_SESSION_CONFIG")]
    session_config: Option<PathBuf>,

    /// Path to a TOML ledger configuration file.
    #[arg(long, env = "PACT_LEDGER_CONFIG")]
    ledger_config: Option<PathBuf>,

    /// Ledger RPC base URL (overrides the config file).
    #[arg(long, env = "PACT_RPC_URL")]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a connect handshake: print the deep link, wait for the
    /// callback URI on stdin, then show the session result.
    Connect,
    /// Read both balances for an address.
    Balance { address: String },
    /// Request a transfer through the signing service.
    Transfer { to: String, amount: f64 },
    /// Print the derived fungible-asset metadata address.
    Metadata,
}

/// Launcher that prints the deep link for the operator to open.
struct StdoutLauncher;

impl LinkLauncher for StdoutLauncher {
    fn launch(&self, uri: &Url) -> Result<(), HandOffError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "open this link in the wallet:\n  {uri}")
            .map_err(|e| HandOffError(e.to_string()))
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

fn load_configs(cli: &Cli) -> Result<(SessionConfig, LedgerConfig), String> {
    let session = match &cli.session_config {
        Some(path) => SessionConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => SessionConfig::default(),
    };
    let mut ledger = match &cli.ledger_config {
        Some(path) => LedgerConfig::from_toml_file(path).map_err(|e| e.to_string())?,
        None => LedgerConfig::default(),
    };
    if let Some(rpc_url) = &cli.rpc_url {
        ledger.rpc_url = rpc_url.clone();
    }
    Ok((session, ledger))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();
    let cli = Cli::parse();
    let (session_config, ledger_config) = load_configs(&cli)?;
    let ledger = Arc::new(LedgerQueryClient::new(&ledger_config).map_err(|e| e.to_string())?);

    match cli.command {
        Command::Connect => {
            let session = ConnectionSession::new(
                session_config,
                Arc::new(StdoutLauncher),
                Some(ledger.clone()),
            );
            session.connect().await.map_err(|e| e.to_string())?;

            println!("paste the wallet's callback URI:");
            let stdin = std::io::stdin();
            let mut line = String::new();
            stdin
                .lock()
                .read_line(&mut line)
                .map_err(|e| e.to_string())?;

            if session.handle_callback(line.trim()).await == CallbackDisposition::NoMatch {
                return Err("callback URI does not match the app scheme".into());
            }

            let state = session.state();
            println!("session state: {state}");
            if let Some(err) = session.last_error() {
                return Err(err.to_string());
            }
            if let Some(address) = session.address() {
                println!("address: {address}");
                match ledger.refresh_balances(&address).await {
                    Ok(snapshot) => println!(
                        "native: {}  token: {}",
                        snapshot.native_balance, snapshot.token_balance
                    ),
                    Err(e) => tracing::warn!("balance refresh failed: {e}"),
                }
            }
            Ok(())
        }
        Command::Balance { address } => {
            let address = LedgerAddress::parse(&address).map_err(|e| e.to_string())?;
            let snapshot = ledger
                .refresh_balances(&address)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "native: {}  token: {}  (at {})",
                snapshot.native_balance, snapshot.token_balance, snapshot.fetched_at
            );
            Ok(())
        }
        Command::Transfer { to, amount } => {
            let to = LedgerAddress::parse(&to).map_err(|e| e.to_string())?;
            let amount = TokenAmount::from_decimal(amount).map_err(|e| e.to_string())?;
            let receipt = ledger
                .request_transfer(&to, amount)
                .await
                .map_err(|e| e.to_string())?;
            println!(
                "transfer accepted: hash={} status={}",
                receipt.tx_hash.as_deref().unwrap_or("-"),
                receipt.status.as_deref().unwrap_or("-"),
            );
            Ok(())
        }
        Command::Metadata => {
            println!("{}", ledger.token_metadata_address());
            Ok(())
        }
    }
}
