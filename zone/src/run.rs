use clap::{Args, Subcommand, ValueEnum};
use hex::FromHex;
use thiserror::Error;
use zone_core::{
    config::{get_config, ConfigError, NetworkType},
    protocol::pow::{mine_parallel, MiningError, MiningJob},
};
use zone_crypto::{
    error::CryptoError,
    extra::{hash_extra, ExtraHash},
    hashing::{FastHash, Hashable},
    pow::{MemoryHardPow, PowFunction, ScratchpadConfig, Sha256Pow},
    proofs::{generate_tree_branch, HashDirection},
    tree::tree_hash,
    types::HashDigest,
};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("input is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Mining(#[from] MiningError),
    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no nonce satisfies difficulty {0}")]
    NoNonce(u64),
}

/// Message given as text, or as hex with `--hex`.
#[derive(Args, Debug)]
pub struct Input {
    input: String,
    #[arg(long = "hex", help = "Treat the input as hex encoded bytes")]
    is_hex: bool,
}

impl Input {
    fn bytes(&self) -> Result<Vec<u8>, RunError> {
        if self.is_hex {
            Ok(hex::decode(self.input.trim())?)
        } else {
            Ok(self.input.as_bytes().to_vec())
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sha256,
    MemoryHard,
}

#[derive(Args, Debug)]
pub struct PowOptions {
    #[arg(long, value_enum, default_value_t = Backend::Sha256)]
    backend: Backend,
    #[arg(long, help = "Scratchpad size in bytes for the memory-hard backend")]
    memory_size: Option<usize>,
    #[arg(long, help = "Scratchpad walk length for the memory-hard backend")]
    iterations: Option<usize>,
}

impl PowOptions {
    fn memory_hard(&self) -> Result<MemoryHardPow, CryptoError> {
        let defaults = ScratchpadConfig::default();
        MemoryHardPow::new(ScratchpadConfig {
            memory_size: self.memory_size.unwrap_or(defaults.memory_size),
            iterations: self.iterations.unwrap_or(defaults.iterations),
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fast hash of a message.
    Hash(Input),
    /// Tree hash root of hex encoded 32 byte leaves.
    TreeHash {
        #[arg(required = true, num_args = 1..)]
        leaves: Vec<String>,
        #[arg(long, help = "Also print the branch of the leaf at this index")]
        branch: Option<usize>,
    },
    /// Hash a message with one of the extra hash algorithms.
    Extra {
        #[arg(help = "blake, groestl, jh or skein")]
        algorithm: ExtraHash,
        #[command(flatten)]
        input: Input,
    },
    /// Proof-of-work hash of a message.
    Pow {
        #[command(flatten)]
        input: Input,
        #[command(flatten)]
        options: PowOptions,
    },
    /// Search for a nonce meeting a difficulty.
    Mine {
        #[arg(help = "Hex encoded hashing blob")]
        blob: String,
        #[arg(long, default_value_t = 39, help = "Byte offset of the 4 byte nonce in the blob")]
        nonce_offset: usize,
        #[arg(long, default_value_t = 1000)]
        difficulty: u64,
        #[arg(long, default_value_t = 1, help = "Worker threads, at most 256")]
        threads: usize,
        #[command(flatten)]
        options: PowOptions,
    },
    /// Print the parameters of a network as JSON.
    Params {
        #[arg(default_value = "mainnet")]
        network: NetworkType,
    },
}

pub fn execute(command: Command) -> Result<String, RunError> {
    match command {
        Command::Hash(input) => Ok(hex::encode(input.bytes()?.hash(&mut FastHash::new()))),
        Command::TreeHash { leaves, branch } => {
            let leaves = leaves
                .iter()
                .map(|leaf| <HashDigest as FromHex>::from_hex(leaf.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            let root = tree_hash(&leaves)?;
            let mut output = hex::encode(root);
            if let Some(index) = branch {
                let branch = generate_tree_branch(&leaves, index, &mut FastHash::new())?;
                for (hash, direction) in branch.hashes.iter().zip(&branch.directions) {
                    let side = match direction {
                        HashDirection::Left => "left",
                        HashDirection::Right => "right",
                    };
                    output.push_str(&format!("\n{side} {}", hex::encode(hash)));
                }
            }
            Ok(output)
        }
        Command::Extra { algorithm, input } => Ok(hex::encode(hash_extra(algorithm, input.bytes()?))),
        Command::Pow { input, options } => {
            let data = input.bytes()?;
            let digest = match options.backend {
                Backend::Sha256 => Sha256Pow.pow_hash_once(data),
                Backend::MemoryHard => options.memory_hard()?.pow_hash_once(data),
            };
            Ok(hex::encode(digest))
        }
        Command::Mine { blob, nonce_offset, difficulty, threads, options } => {
            let job = MiningJob::new(hex::decode(blob.trim())?, nonce_offset, difficulty)?;
            match options.backend {
                Backend::Sha256 => mine_job(&job, &Sha256Pow, threads),
                Backend::MemoryHard => mine_job(&job, &options.memory_hard()?, threads),
            }
        }
        Command::Params { network } => Ok(serde_json::to_string_pretty(get_config(network))?),
    }
}

fn mine_job<F: PowFunction + Sync>(job: &MiningJob, pow: &F, threads: usize) -> Result<String, RunError> {
    let block = mine_parallel(job, pow, threads)?.ok_or(RunError::NoNonce(job.difficulty()))?;
    tracing::info!("worker needed {} attempts", block.attempts);
    Ok(format!("{} {}", block.nonce, hex::encode(block.hash)))
}
