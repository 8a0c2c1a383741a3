use serde::{Deserialize, Serialize};

use crate::{error::CryptoError, hashing::HashFunction, tree::{carried_leaves, combine, first_level, next_level}, types::HashDigest};


/// Side of the sibling relative to the running hash.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub enum HashDirection {
    Left,
    Right,
}


#[derive(Debug, Clone, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct TreeBranch {
    pub hashes: Vec<HashDigest>,
    pub directions: Vec<HashDirection>,
    pub root: HashDigest,
}

impl TreeBranch {
    pub fn depth(&self) -> usize {
        self.hashes.len()
    }
}

fn sibling_of(position: usize) -> (usize, HashDirection) {
    if position % 2 == 0 {
        (position + 1, HashDirection::Right)
    } else {
        (position - 1, HashDirection::Left)
    }
}

/// Generate the branch from the leaf at `index` up to the tree hash root.
///
/// A carried leaf has no sibling in the first round, so its branch is one
/// step shorter than the branch of a paired leaf.
pub fn generate_tree_branch(leaves: &[HashDigest], index: usize, hash_function: &mut impl HashFunction) -> Result<TreeBranch, CryptoError> {
    if index >= leaves.len() {
        return Err(CryptoError::LeafIndexOutOfRange { index, count: leaves.len() });
    }

    let mut hashes = Vec::new();
    let mut directions = Vec::new();

    let carried = carried_leaves(leaves.len());
    let mut position = if index < carried {
        index
    } else {
        let offset = index - carried;
        let (sibling, direction) = sibling_of(offset);
        hashes.push(leaves[carried + sibling]);
        directions.push(direction);
        carried + offset / 2
    };

    let mut level = first_level(leaves, hash_function);
    while level.len() > 1 {
        let (sibling, direction) = sibling_of(position);
        hashes.push(level[sibling]);
        directions.push(direction);
        level = next_level(&level, hash_function);
        position /= 2;
    }

    Ok(TreeBranch {
        hashes,
        directions,
        root: level[0],
    })
}


/// Verify that `leaf` folds through `branch` into `root`.
pub fn verify_tree_branch(leaf: HashDigest, branch: &TreeBranch, root: HashDigest, hash_function: &mut impl HashFunction) -> bool {
    if branch.hashes.len() != branch.directions.len() {
        return false;
    }
    let mut current_hash = leaf;

    for (hash, direction) in branch.hashes.iter().zip(branch.directions.iter()) {
        current_hash = match direction {
            HashDirection::Left => combine(hash_function, hash, &current_hash),
            HashDirection::Right => combine(hash_function, &current_hash, hash),
        };
    }

    current_hash == root
}
