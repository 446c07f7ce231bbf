//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config
//! file. `eth_rpc_url` is required; every other field has a default, so a
//! minimal file only needs the RPC URL. An empty or truncated file is a parse
//! error rather than a silent fall back to localhost.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WalletConfig {
    /// Deployment name, logged at startup.
    #[serde(default = "default_name")]
    pub name: String,

    /// JSON-RPC endpoint (http, https, ws, wss or an IPC path). Required.
    pub eth_rpc_url: String,

    /// Per-call RPC timeout in seconds.
    #[serde(default = "default_max_request_time")]
    pub max_request_time: u64,

    /// Chain ids keyed by network name.
    #[serde(default)]
    pub chain_id: ChainIdTable,
}

fn default_name() -> String {
    "eth-wallet".to_string()
}

fn default_max_request_time() -> u64 {
    10
}

impl WalletConfig {
    /// Timeout applied to every RPC call made under this snapshot.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.max_request_time)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            eth_rpc_url: "http://localhost:8545".to_string(),
            max_request_time: default_max_request_time(),
            chain_id: ChainIdTable::default(),
        }
    }
}

/// Chain id per supported network.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainIdTable {
    pub scroll: u64,
    pub polygon: u64,
    pub polygon_sepolia: u64,
    pub ethereum: u64,
    pub ethereum_sepolia: u64,
    pub base: u64,
    pub base_sepolia: u64,
    pub manta: u64,
    pub manta_sepolia: u64,
    pub mantle: u64,
    pub mantle_sepolia: u64,
    pub zk_fair: u64,
    pub zk_fair_sepolia: u64,
    pub okx: u64,
    pub okx_sepolia: u64,
    pub op: u64,
    pub op_test: u64,
    pub linea: u64,
    pub arb: u64,
}

impl ChainIdTable {
    /// Look up the configured chain id for a network.
    pub fn get(&self, network: Network) -> u64 {
        match network {
            Network::Scroll => self.scroll,
            Network::Polygon => self.polygon,
            Network::PolygonSepolia => self.polygon_sepolia,
            Network::Ethereum => self.ethereum,
            Network::EthereumSepolia => self.ethereum_sepolia,
            Network::Base => self.base,
            Network::BaseSepolia => self.base_sepolia,
            Network::Manta => self.manta,
            Network::MantaSepolia => self.manta_sepolia,
            Network::Mantle => self.mantle,
            Network::MantleSepolia => self.mantle_sepolia,
            Network::ZkFair => self.zk_fair,
            Network::ZkFairSepolia => self.zk_fair_sepolia,
            Network::Okx => self.okx,
            Network::OkxSepolia => self.okx_sepolia,
            Network::Op => self.op,
            Network::OpTest => self.op_test,
            Network::Linea => self.linea,
            Network::Arb => self.arb,
        }
    }

    /// Reverse lookup: the first network configured with `chain_id`.
    pub fn network_of(&self, chain_id: u64) -> Option<Network> {
        Network::ALL.iter().copied().find(|n| self.get(*n) == chain_id)
    }
}

impl Default for ChainIdTable {
    fn default() -> Self {
        Self {
            scroll: 534_352,
            polygon: 137,
            polygon_sepolia: 80_002,
            ethereum: 1,
            ethereum_sepolia: 11_155_111,
            base: 8453,
            base_sepolia: 84_532,
            manta: 169,
            manta_sepolia: 3_441_006,
            mantle: 5000,
            mantle_sepolia: 5003,
            zk_fair: 42_766,
            zk_fair_sepolia: 43_851,
            okx: 196,
            okx_sepolia: 195,
            op: 10,
            op_test: 11_155_420,
            linea: 59_144,
            arb: 42_161,
        }
    }
}

/// Networks with an entry in [`ChainIdTable`].
///
/// Names match the keys of the `[chain_id]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Scroll,
    Polygon,
    PolygonSepolia,
    Ethereum,
    EthereumSepolia,
    Base,
    BaseSepolia,
    Manta,
    MantaSepolia,
    Mantle,
    MantleSepolia,
    ZkFair,
    ZkFairSepolia,
    Okx,
    OkxSepolia,
    Op,
    OpTest,
    Linea,
    Arb,
}

impl Network {
    pub const ALL: [Network; 19] = [
        Network::Scroll,
        Network::Polygon,
        Network::PolygonSepolia,
        Network::Ethereum,
        Network::EthereumSepolia,
        Network::Base,
        Network::BaseSepolia,
        Network::Manta,
        Network::MantaSepolia,
        Network::Mantle,
        Network::MantleSepolia,
        Network::ZkFair,
        Network::ZkFairSepolia,
        Network::Okx,
        Network::OkxSepolia,
        Network::Op,
        Network::OpTest,
        Network::Linea,
        Network::Arb,
    ];

    /// Config key for this network.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Scroll => "scroll",
            Network::Polygon => "polygon",
            Network::PolygonSepolia => "polygon_sepolia",
            Network::Ethereum => "ethereum",
            Network::EthereumSepolia => "ethereum_sepolia",
            Network::Base => "base",
            Network::BaseSepolia => "base_sepolia",
            Network::Manta => "manta",
            Network::MantaSepolia => "manta_sepolia",
            Network::Mantle => "mantle",
            Network::MantleSepolia => "mantle_sepolia",
            Network::ZkFair => "zk_fair",
            Network::ZkFairSepolia => "zk_fair_sepolia",
            Network::Okx => "okx",
            Network::OkxSepolia => "okx_sepolia",
            Network::Op => "op",
            Network::OpTest => "op_test",
            Network::Linea => "linea",
            Network::Arb => "arb",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a network name is not in the chain id table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network '{0}'")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == wanted)
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.max_request_time, 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.chain_id.ethereum, 1);
        assert_eq!(config.chain_id.ethereum_sepolia, 11_155_111);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: WalletConfig = toml::from_str(
            r#"
            eth_rpc_url = "https://rpc.example.org"

            [chain_id]
            ethereum = 1337
            "#,
        )
        .unwrap();

        assert_eq!(config.eth_rpc_url, "https://rpc.example.org");
        assert_eq!(config.name, "eth-wallet");
        assert_eq!(config.chain_id.ethereum, 1337);
        assert_eq!(config.chain_id.arb, 42_161);
        assert_eq!(config.max_request_time, 10);
    }

    #[test]
    fn test_rpc_url_is_required() {
        for content in ["", "max_request_time = 3\n", "[chain_id]\nethereum = 1\n"] {
            let err = toml::from_str::<WalletConfig>(content).unwrap_err();
            assert!(err.to_string().contains("eth_rpc_url"), "{content:?}: {err}");
        }
    }

    #[test]
    fn test_network_lookup() {
        let table = ChainIdTable::default();
        assert_eq!(table.get(Network::Base), 8453);
        assert_eq!(table.get(Network::OpTest), 11_155_420);
        assert_eq!(table.network_of(59_144), Some(Network::Linea));
        assert_eq!(table.network_of(999_999_999), None);
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("ethereum".parse::<Network>().unwrap(), Network::Ethereum);
        assert_eq!("Base-Sepolia".parse::<Network>().unwrap(), Network::BaseSepolia);
        assert_eq!("zk_fair".parse::<Network>().unwrap(), Network::ZkFair);
        assert!("solana".parse::<Network>().is_err());

        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }
}
