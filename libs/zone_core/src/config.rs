//! Per-network consensus parameters.
//!
//! Each network type selects one immutable [`NetworkParameterSet`] from a
//! process-wide table built on first use. Unknown network tags are reported,
//! never mapped onto a default network.

use std::{fmt::Display, str::FromStr};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use zone_crypto::{hashing::{FastHash, Hashable}, types::HashDigest};

pub const CRYPTONOTE_NAME: &str = "zone";

const MAINNET_GENESIS_TX: &str = "013c01ff0001ffffffffffff03029b2e4c0281c0b02e7c53291a94d1d0cbff8883f8024f5142ee494ffbbd08807121017767aafcde9be00dcfd098715ebcf7f410daebc582fda69d24a28a9d0bc890d1";
const STAGENET_GENESIS_TX: &str = "013c01ff0001ffffffffffff0302df5d56da0c7d643ddd1ce61901c7bdc5fb1738bfe39fbe69c28a3a7032729c0f2101168d0c4ca86fb55a4cf6a36d31431be1c53a3bd7411bb24e8832410289fa6f3b";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid network type tag: {0}")]
    UnknownNetworkType(u8),

    #[error("invalid network name: {0}")]
    UnknownNetworkName(String),

    #[error("genesis transaction is not valid hex: {0}")]
    InvalidGenesisTx(#[from] hex::FromHexError),
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    Mainnet = 0,
    Testnet = 1,
    Stagenet = 2,
    /// Private test chain.
    Fakechain = 3,
}

impl NetworkType {
    pub const ALL: [NetworkType; 4] = [
        NetworkType::Mainnet,
        NetworkType::Testnet,
        NetworkType::Stagenet,
        NetworkType::Fakechain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NetworkType::Mainnet => "mainnet",
            NetworkType::Testnet => "testnet",
            NetworkType::Stagenet => "stagenet",
            NetworkType::Fakechain => "fakechain",
        }
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = ConfigError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        NetworkType::ALL
            .get(tag as usize)
            .copied()
            .ok_or(ConfigError::UnknownNetworkType(tag))
    }
}

impl FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkType::Mainnet),
            "testnet" | "test" => Ok(NetworkType::Testnet),
            "stagenet" | "stage" => Ok(NetworkType::Stagenet),
            "fakechain" | "fake" | "private" => Ok(NetworkType::Fakechain),
            _ => Err(ConfigError::UnknownNetworkName(s.to_string())),
        }
    }
}

impl Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Base58 address prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressPrefixes {
    pub standard: u64,
    pub integrated: u64,
    pub subaddress: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkPorts {
    pub p2p: u16,
    pub rpc: u16,
    pub zmq_rpc: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkParameterSet {
    pub network: NetworkType,
    pub address_prefixes: AddressPrefixes,
    pub ports: NetworkPorts,
    pub network_id: Uuid,
    /// Hex-encoded coinbase transaction of the genesis block.
    pub genesis_tx: &'static str,
    pub genesis_nonce: u32,
}

impl NetworkParameterSet {
    pub fn genesis_tx_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        Ok(hex::decode(self.genesis_tx)?)
    }

    /// Fast hash of the genesis transaction blob.
    pub fn genesis_tx_hash(&self) -> Result<HashDigest, ConfigError> {
        Ok(self.genesis_tx_bytes()?.hash(&mut FastHash::new()))
    }
}

const fn network_id(last: u8) -> Uuid {
    Uuid::from_bytes([
        0x12, 0x30, 0xF1, 0x71, 0x61, 0x04, 0x41, 0x61, 0x17, 0x31, 0x00, 0x82, 0x16, 0xA1, 0xA1, last,
    ])
}

static NETWORK_PARAMETERS: Lazy<[NetworkParameterSet; 4]> = Lazy::new(|| {
    tracing::debug!("building network parameter table");
    [
        NetworkParameterSet {
            network: NetworkType::Mainnet,
            address_prefixes: AddressPrefixes { standard: 18, integrated: 19, subaddress: 42 },
            ports: NetworkPorts { p2p: 18080, rpc: 18081, zmq_rpc: 18082 },
            network_id: network_id(0x10),
            genesis_tx: MAINNET_GENESIS_TX,
            genesis_nonce: 10000,
        },
        NetworkParameterSet {
            network: NetworkType::Testnet,
            address_prefixes: AddressPrefixes { standard: 53, integrated: 54, subaddress: 63 },
            ports: NetworkPorts { p2p: 28080, rpc: 28081, zmq_rpc: 28082 },
            network_id: network_id(0x11),
            genesis_tx: MAINNET_GENESIS_TX,
            genesis_nonce: 10001,
        },
        NetworkParameterSet {
            network: NetworkType::Stagenet,
            address_prefixes: AddressPrefixes { standard: 24, integrated: 25, subaddress: 36 },
            ports: NetworkPorts { p2p: 38080, rpc: 38081, zmq_rpc: 38082 },
            network_id: network_id(0x12),
            genesis_tx: STAGENET_GENESIS_TX,
            genesis_nonce: 10002,
        },
        NetworkParameterSet {
            network: NetworkType::Fakechain,
            address_prefixes: AddressPrefixes { standard: 60, integrated: 61, subaddress: 62 },
            ports: NetworkPorts { p2p: 48080, rpc: 48081, zmq_rpc: 48082 },
            network_id: network_id(0x13),
            genesis_tx: MAINNET_GENESIS_TX,
            genesis_nonce: 10003,
        },
    ]
});

/// Parameters of `network`.
pub fn get_config(network: NetworkType) -> &'static NetworkParameterSet {
    &NETWORK_PARAMETERS[network as usize]
}

/// Parameters for a raw network tag, as carried on the wire or in config files.
pub fn get_config_by_tag(tag: u8) -> Result<&'static NetworkParameterSet, ConfigError> {
    Ok(get_config(NetworkType::try_from(tag)?))
}
