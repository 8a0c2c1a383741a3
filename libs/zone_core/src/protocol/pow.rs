use std::{sync::atomic::{AtomicBool, Ordering}, thread};

use thiserror::Error;
use tracing::instrument;
use zone_crypto::{pow::{PowFunction, ScratchpadGuard}, types::HashDigest};

use super::difficulty::{check_hash, expected_attempts};

/// Width of the little-endian nonce inside the hashing blob.
pub const NONCE_SIZE: usize = 4;
/// Upper bound on mining workers. Each one holds its own scratchpad.
pub const MAX_MINING_THREADS: usize = 256;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiningError {
    #[error("a {NONCE_SIZE} byte nonce at offset {offset} does not fit in a {len} byte blob")]
    NonceOutOfBounds { offset: usize, len: usize },

    #[error("invalid mining thread count: {0} (expected 1 to {MAX_MINING_THREADS})")]
    InvalidThreadCount(usize),

    #[error("failed to spawn mining worker: {0}")]
    SpawnFailed(String),
}

/// A block hashing blob with a nonce slot and the difficulty to meet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningJob {
    blob: Vec<u8>,
    nonce_offset: usize,
    difficulty: u64,
}

impl MiningJob {
    pub fn new(blob: Vec<u8>, nonce_offset: usize, difficulty: u64) -> Result<Self, MiningError> {
        if nonce_offset.checked_add(NONCE_SIZE).is_none_or(|end| end > blob.len()) {
            return Err(MiningError::NonceOutOfBounds { offset: nonce_offset, len: blob.len() });
        }
        Ok(MiningJob { blob, nonce_offset, difficulty })
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn nonce_offset(&self) -> usize {
        self.nonce_offset
    }

    pub fn difficulty(&self) -> u64 {
        self.difficulty
    }

    fn write_nonce(&self, blob: &mut [u8], nonce: u32) {
        blob[self.nonce_offset..self.nonce_offset + NONCE_SIZE].copy_from_slice(&nonce.to_le_bytes());
    }

    /// The hashing blob with `nonce` in place.
    pub fn blob_with_nonce(&self, nonce: u32) -> Vec<u8> {
        let mut blob = self.blob.clone();
        self.write_nonce(&mut blob, nonce);
        blob
    }

    /// Recompute the proof of work for `nonce` and check it.
    pub fn verify(&self, pow: &impl PowFunction, nonce: u32) -> bool {
        let hash = pow.pow_hash_once(self.blob_with_nonce(nonce));
        check_hash(&hash, self.difficulty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinedBlock {
    pub nonce: u32,
    pub hash: HashDigest,
    /// Hashes computed by the worker that found the nonce.
    pub attempts: u64,
}

/// Search nonces `start, start + stride, ...` with one scratchpad.
///
/// Stops when a hash meets the job's difficulty, when `stop` is raised, or
/// when the nonce space is exhausted.
#[instrument(skip_all, name = "mine", fields(start = start, stride = stride))]
pub fn mine<F: PowFunction>(job: &MiningJob, pow: &F, start: u32, stride: u32, stop: &AtomicBool) -> Option<MinedBlock> {
    let stride = stride.max(1);
    let mut guard = ScratchpadGuard::acquire(pow);
    let mut blob = job.blob.clone();
    let mut nonce = start;

    loop {
        if stop.load(Ordering::Relaxed) {
            tracing::trace!("mining aborted after {} attempts", guard.hashes());
            return None;
        }
        job.write_nonce(&mut blob, nonce);
        let hash = guard.hash(&blob);
        if check_hash(&hash, job.difficulty) {
            tracing::info!("found nonce {} after {} attempts", nonce, guard.hashes());
            return Some(MinedBlock { nonce, hash, attempts: guard.hashes() });
        }
        nonce = match nonce.checked_add(stride) {
            Some(next) => next,
            None => {
                tracing::warn!("nonce space exhausted after {} attempts", guard.hashes());
                return None;
            }
        };
    }
}

/// Mine on `threads` workers, each holding its own scratchpad.
///
/// Worker `i` searches nonces `i, i + threads, ...`. The first result wins
/// and the remaining workers are stopped.
#[instrument(skip_all, name = "mine_parallel", fields(threads = threads))]
pub fn mine_parallel<F: PowFunction + Sync>(job: &MiningJob, pow: &F, threads: usize) -> Result<Option<MinedBlock>, MiningError> {
    if threads == 0 || threads > MAX_MINING_THREADS {
        return Err(MiningError::InvalidThreadCount(threads));
    }
    let stride = threads as u32;
    tracing::debug!(
        "mining with {} on {} threads, expecting ~{} attempts",
        pow.name(),
        threads,
        expected_attempts(job.difficulty)
    );

    let stop = AtomicBool::new(false);
    let (sender, receiver) = flume::unbounded();

    thread::scope(|scope| {
        for worker in 0..stride {
            let sender = sender.clone();
            let stop = &stop;
            let spawned = thread::Builder::new()
                .name(format!("miner-{worker}"))
                .spawn_scoped(scope, move || {
                    if let Some(block) = mine(job, pow, worker, stride, stop) {
                        stop.store(true, Ordering::Relaxed);
                        let _ = sender.send(block);
                    }
                });
            if let Err(e) = spawned {
                tracing::error!("could not spawn worker {}: {}", worker, e);
                // workers already running exit at their next check
                stop.store(true, Ordering::Relaxed);
                return Err(MiningError::SpawnFailed(e.to_string()));
            }
        }
        drop(sender);
        // an error means every worker exhausted its nonces
        let found = receiver.recv().ok();
        stop.store(true, Ordering::Relaxed);
        Ok(found)
    })
}
