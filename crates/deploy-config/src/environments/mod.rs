//! Known deployment environments and their built-in records.

mod optimism_goerli;

pub use optimism_goerli::OPTIMISM_GOERLI;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::DeployConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid network: {0}. Must be: optimism, optimism-goerli, or devnet")]
pub struct UnknownNetwork(pub String);

/// Supported deployment networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    /// OP Mainnet - production
    Optimism,
    /// Optimism Goerli - public testnet
    OptimismGoerli,
    /// Local devnet L2
    Devnet,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Optimism, Network::OptimismGoerli, Network::Devnet];

    /// Get network as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Optimism => "optimism",
            Network::OptimismGoerli => "optimism-goerli",
            Network::Devnet => "devnet",
        }
    }

    /// L2 chain id
    pub fn chain_id(&self) -> u64 {
        match self {
            Network::Optimism => 10,
            Network::OptimismGoerli => 420,
            Network::Devnet => 901,
        }
    }

    /// Get default RPC URL for this network
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Optimism => "https://mainnet.optimism.io",
            Network::OptimismGoerli => "https://goerli.optimism.io",
            Network::Devnet => "http://localhost:9545",
        }
    }

    /// Record compiled into this crate, if the environment has one.
    pub fn builtin_config(&self) -> Option<&'static DeployConfig> {
        match self {
            Network::OptimismGoerli => Some(&OPTIMISM_GOERLI),
            Network::Optimism | Network::Devnet => None,
        }
    }
}

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "optimism" | "mainnet" => Ok(Network::Optimism),
            "optimism-goerli" => Ok(Network::OptimismGoerli),
            "devnet" => Ok(Network::Devnet),
            _ => Err(UnknownNetwork(s.to_string())),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
