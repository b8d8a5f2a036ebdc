//! SkillDAO command-line client.
//!
//! Drives the same certification lifecycle as the browser app against a
//! JSON-RPC node (anvil, hardhat, geth with unlocked accounts):
//!
//! ```text
//! skilldao status
//! skilldao certify --skill "Rust Systems Programming" --level 3 --description "Deep ownership model"
//! skilldao endorse 1 --message "Reviewed their allocator"
//! skilldao verify 1
//! ```

mod console;
mod http;

use std::time::Duration;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use skilldao_client::config::{ClientConfig, ConfirmationPolicy};
use skilldao_client::rpc::Eip1193Provider;
use skilldao_client::{SkillDao, Verification};

use crate::console::ConsoleSurface;
use crate::http::HttpTransport;

#[derive(Parser)]
#[command(name = "skilldao", about = "SkillDAO certification client")]
struct Cli {
    /// JSON-RPC endpoint of the node.
    #[arg(long, env = "SKILLDAO_RPC_URL", default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    /// Certification contract address (default: the deployed SkillDAO contract).
    #[arg(long, env = "SKILLDAO_CONTRACT_ADDRESS")]
    contract: Option<Address>,

    /// Account to act as. Must be unlocked on the node.
    #[arg(long, env = "SKILLDAO_ACCOUNT")]
    account: Option<Address>,

    /// Milliseconds between receipt polls.
    #[arg(long, default_value_t = 1000)]
    poll_ms: u64,

    /// Receipt polls before giving up on a transaction.
    #[arg(long, default_value_t = 120)]
    max_polls: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the connected account, its balance and platform stats.
    Status,
    /// Show platform stats.
    Stats,
    /// Create a certification.
    Certify {
        #[arg(long)]
        skill: String,
        /// 1 = Beginner, 2 = Intermediate, 3 = Advanced, 4 = Expert.
        #[arg(long)]
        level: String,
        #[arg(long)]
        description: String,
    },
    /// Endorse an existing certification.
    Endorse {
        id: String,
        #[arg(long)]
        message: String,
    },
    /// Look up a certification by id or owner address.
    Verify { key: String },
}

impl Cli {
    fn config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_build_env();
        if let Some(contract) = self.contract {
            config.contract_address = contract;
        }
        config.confirmation = ConfirmationPolicy {
            poll_interval: Duration::from_millis(self.poll_ms),
            max_polls: self.max_polls,
        };
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::info!(
        "Using contract {} via {}",
        config.contract_address,
        cli.rpc_url
    );

    let transport = HttpTransport::new(&cli.rpc_url, cli.account);
    let provider = Eip1193Provider::new(transport, config.confirmation, "json-rpc");
    let surface = ConsoleSurface {
        quiet_session: matches!(cli.command, Command::Stats),
    };
    let mut dao = SkillDao::new(Some(provider), surface, &config);
    dao.connect().await?;

    match cli.command {
        Command::Status | Command::Stats => dao.refresh_stats().await,
        Command::Certify {
            skill,
            level,
            description,
        } => {
            let receipt = dao.certify(&skill, &level, &description).await?;
            println!("Transaction {}", receipt.hash);
        }
        Command::Endorse { id, message } => {
            let receipt = dao.endorse(&id, &message).await?;
            println!("Transaction {}", receipt.hash);
        }
        Command::Verify { key } => {
            if let Verification::AddressLookupUnavailable(owner) = dao.verify(&key).await? {
                tracing::debug!("Owner lookup for {owner} skipped");
            }
        }
    }
    Ok(())
}
