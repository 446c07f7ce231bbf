//! `eth-wallet` command line tool.
//!
//! # Commands
//!
//! ```text
//! offline:  new-key, from-key, address, erc20-data, erc721-data, sign
//! node:     nonce, gas-price, tip-cap, block, receipt, send
//! daemon:   watch-head (polls the chain head, reloads config on change)
//! ```
//!
//! Command results go to stdout; logs go to stderr.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy::eips::BlockNumberOrTag;
use alloy::hex;
use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use clap::{Parser, Subcommand};
use tokio::task::JoinHandle;

use eth_wallet::config::{
    apply_reloads, load_config, ConfigError, ConfigWatcher, Network, SharedConfig, WalletConfig,
};
use eth_wallet::lifecycle::{wait_for_signal, Shutdown};
use eth_wallet::observability::logging::{init_logging, DEFAULT_FILTER};
use eth_wallet::rpc::{EthClient, NodeClient};
use eth_wallet::wallet::{
    address_from_public_key_hex, erc20_transfer_data, erc721_safe_transfer_data, sign_offline,
    FeeParams, KeyMaterial, UnsignedTransaction,
};

/// How long `watch-head` waits for the reload applier after the loop ends.
const RELOAD_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "eth-wallet", version)]
#[command(about = "Ethereum key, signing and node query tool", long_about = None)]
struct Cli {
    /// Wallet config file (TOML). Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh key pair
    NewKey,
    /// Derive public key and address from a private key
    FromKey {
        /// 32-byte hex private key, optional 0x prefix
        private_key: String,
    },
    /// Derive the checksum address of a public key (33, 64 or 65 bytes)
    Address { public_key: String },
    /// Encode ERC-20 transfer(to, amount) call data
    Erc20Data { to: Address, amount: U256 },
    /// Encode ERC-721 safeTransferFrom(from, to, tokenId) call data
    Erc721Data {
        from: Address,
        to: Address,
        token_id: U256,
    },
    /// Sign a transaction offline and print the raw hex
    Sign(SignArgs),
    /// Next nonce of an address, counting pending transactions
    Nonce { address: Address },
    /// Suggested legacy gas price in wei
    GasPrice,
    /// Suggested priority fee in wei
    TipCap,
    /// Block header by number, tag or hash
    Block {
        /// Decimal or 0x-hex number, or latest / safe / finalized / pending / earliest
        #[arg(default_value = "latest", conflicts_with = "hash", value_parser = parse_block)]
        number: BlockNumberOrTag,
        #[arg(long)]
        hash: Option<B256>,
        /// Fetch the block with its transactions instead of the header
        #[arg(long, conflicts_with = "hash")]
        full: bool,
    },
    /// Transaction receipt by hash
    Receipt { hash: TxHash },
    /// Broadcast a signed raw transaction
    Send {
        /// 0x-prefixed signed transaction, as printed by `sign`
        raw_tx: String,
    },
    /// Print each new chain head until interrupted
    WatchHead {
        /// Poll interval in seconds, at least 1
        #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u64).range(1..))]
        interval: u64,
    },
}

#[derive(clap::Args)]
struct SignArgs {
    #[arg(long)]
    private_key: String,
    /// Recipient; omit to deploy a contract
    #[arg(long)]
    to: Option<Address>,
    /// Value in wei
    #[arg(long, default_value = "0")]
    value: U256,
    /// Hex call data
    #[arg(long, default_value = "0x")]
    data: Bytes,
    #[arg(long)]
    nonce: u64,
    #[arg(long, default_value_t = 21_000)]
    gas_limit: u64,
    #[arg(long, conflicts_with = "network")]
    chain_id: Option<u64>,
    /// Network name resolved through the config's chain id table
    #[arg(long)]
    network: Option<Network>,
    /// Legacy gas price in wei
    #[arg(long, conflicts_with_all = ["max_fee", "tip"])]
    gas_price: Option<u128>,
    /// EIP-1559 max fee per gas in wei
    #[arg(long, requires = "tip")]
    max_fee: Option<u128>,
    /// EIP-1559 max priority fee per gas in wei
    #[arg(long, requires = "max_fee")]
    tip: Option<u128>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(DEFAULT_FILTER)?;

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => WalletConfig::default(),
    };
    tracing::debug!(
        name = %config.name,
        eth_rpc_url = %config.eth_rpc_url,
        max_request_time = config.max_request_time,
        "Configuration loaded"
    );

    match cli.command {
        Commands::NewKey => print_json(&KeyMaterial::generate()?.export())?,
        Commands::FromKey { private_key } => {
            print_json(&KeyMaterial::from_private_key_hex(&private_key)?.export())?
        }
        Commands::Address { public_key } => {
            println!("{}", address_from_public_key_hex(&public_key)?)
        }
        Commands::Erc20Data { to, amount } => {
            println!("{}", hex::encode_prefixed(erc20_transfer_data(to, amount)))
        }
        Commands::Erc721Data { from, to, token_id } => {
            println!(
                "{}",
                hex::encode_prefixed(erc721_safe_transfer_data(from, to, token_id))
            )
        }
        Commands::Sign(args) => sign(args, &config)?,
        Commands::WatchHead { interval } => {
            let client = NodeClient::dial(SharedConfig::new(config)).await?;
            watch_head(client, cli.config.as_deref(), Duration::from_secs(interval)).await?;
        }
        command => {
            let client = NodeClient::dial(SharedConfig::new(config)).await?;
            let result = query(&client, command).await;
            client.close();
            result?;
        }
    }

    Ok(())
}

fn sign(args: SignArgs, config: &WalletConfig) -> Result<(), Box<dyn Error>> {
    let chain_id = match (args.chain_id, args.network) {
        (Some(id), _) => id,
        (None, Some(network)) => config.chain_id.get(network),
        (None, None) => return Err("one of --chain-id or --network is required".into()),
    };

    let fees = match (args.gas_price, args.max_fee, args.tip) {
        (Some(gas_price), _, _) => FeeParams::Legacy { gas_price },
        (None, Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) => FeeParams::Eip1559 {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        },
        _ => return Err("either --gas-price or both --max-fee and --tip are required".into()),
    };

    let tx = UnsignedTransaction {
        chain_id,
        nonce: args.nonce,
        gas_limit: args.gas_limit,
        fees,
        to: args.to,
        value: args.value,
        data: args.data,
    };

    let signed = sign_offline(&tx, &args.private_key, chain_id)?;
    tracing::info!(tx_hash = %signed.hash, chain_id, "Transaction signed");
    println!("{}", signed.raw_hex());
    Ok(())
}

async fn query(client: &NodeClient, command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Nonce { address } => println!("{}", client.address_nonce(address).await?),
        Commands::GasPrice => println!("{}", client.suggest_gas_price().await?),
        Commands::TipCap => println!("{}", client.suggest_gas_tip_cap().await?),
        Commands::Block { hash: Some(hash), .. } => {
            print_json(&client.block_header_by_hash(hash).await?)?
        }
        Commands::Block {
            number, full: true, ..
        } => print_json(&client.block_by_number(number).await?)?,
        Commands::Block { number, .. } => {
            print_json(&client.block_header_by_number(number).await?)?
        }
        Commands::Receipt { hash } => print_json(&client.tx_receipt_by_hash(hash).await?)?,
        Commands::Send { raw_tx } => println!("{}", client.send_raw_transaction(&raw_tx).await?),
        _ => return Err("command does not query the node".into()),
    }
    Ok(())
}

/// Poll the latest header until a shutdown signal or a fatal config reload.
async fn watch_head(
    client: NodeClient,
    config_path: Option<&Path>,
    interval: Duration,
) -> Result<(), Box<dyn Error>> {
    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();

    if interval.is_zero() {
        return Err("poll interval must be at least 1 second".into());
    }

    // The watcher handle must outlive the loop for events to keep flowing.
    let mut watcher_guard = None;
    let mut reload_task = None;
    if let Some(path) = config_path {
        let (watcher, updates) = ConfigWatcher::new(path);
        watcher_guard = Some(watcher.run()?);

        let shared = client.config().clone();
        let on_error = shutdown.clone();
        reload_task = Some(tokio::spawn(async move {
            let result = apply_reloads(shared, updates).await;
            if result.is_err() {
                on_error.trigger();
            }
            result
        }));
    }

    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_signal().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signals");
        }
        on_signal.trigger();
    });

    tracing::info!(interval_secs = interval.as_secs(), "Watching chain head");

    let mut ticker = tokio::time::interval(interval);
    let mut last_hash = None;
    loop {
        tokio::select! {
            _ = stop.recv() => break,
            _ = ticker.tick() => {
                match client.block_header_by_number(BlockNumberOrTag::Latest).await {
                    Ok(header) if last_hash != Some(header.hash) => {
                        last_hash = Some(header.hash);
                        println!(
                            "{} {} base_fee={}",
                            header.inner.number,
                            header.hash,
                            header
                                .inner
                                .base_fee_per_gas
                                .map_or_else(|| "none".to_string(), |fee| fee.to_string())
                        );
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "Failed to fetch chain head"),
                }
            }
        }
    }

    client.close();

    // Dropping the watcher closes the update channel, so a healthy applier
    // returns Ok and a failed one has already returned its error.
    drop(watcher_guard);
    if let Some(task) = reload_task {
        join_reloads(task, RELOAD_JOIN_TIMEOUT).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for the reload applier and surface its error, if any.
///
/// An applier still running after `grace` is aborted and treated as clean.
async fn join_reloads(
    mut task: JoinHandle<Result<(), ConfigError>>,
    grace: Duration,
) -> Result<(), Box<dyn Error>> {
    match tokio::time::timeout(grace, &mut task).await {
        Ok(joined) => joined??,
        Err(_) => {
            tracing::warn!("Config reload applier did not stop, aborting");
            task.abort();
        }
    }
    Ok(())
}

/// Block argument: plain decimal height, or anything `BlockNumberOrTag` parses.
fn parse_block(raw: &str) -> Result<BlockNumberOrTag, String> {
    let raw = raw.trim();
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<u64>()
            .map(BlockNumberOrTag::Number)
            .map_err(|e| e.to_string());
    }
    raw.parse::<BlockNumberOrTag>().map_err(|e| e.to_string())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
