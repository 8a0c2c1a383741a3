//! Tree hashing of ordered leaf digests.
//!
//! A single leaf is its own root. Otherwise the leaves are reduced to a power
//! of two count first: with `width` the largest power of two below the leaf
//! count, the leading `2 * width - count` leaves are carried over unchanged
//! and the remaining leaves are combined in pairs. The resulting `width`
//! digests are then combined pairwise, left to right, until one remains.
//!
//! Combining is `H(left || right)` with the fast hash, so the order of the
//! leaves changes the root.

use crate::{error::CryptoError, hashing::{FastHash, HashFunction}, types::HashDigest};

/// Root of `leaves` using the fast hash.
pub fn tree_hash(leaves: &[HashDigest]) -> Result<HashDigest, CryptoError> {
    tree_hash_with(leaves, &mut FastHash::new())
}

/// Root of `leaves` using the given hash function to combine nodes.
pub fn tree_hash_with(leaves: &[HashDigest], hash_function: &mut impl HashFunction) -> Result<HashDigest, CryptoError> {
    if leaves.is_empty() {
        return Err(CryptoError::EmptyTree);
    }

    let mut level = first_level(leaves, hash_function);
    while level.len() > 1 {
        level = next_level(&level, hash_function);
    }
    Ok(level[0])
}

/// Largest power of two that is `<= count`. `count` must be non-zero.
pub(crate) fn tree_width(count: usize) -> usize {
    1 << (usize::BITS - 1 - count.leading_zeros())
}

/// Number of leading leaves that skip the first round of combining.
pub(crate) fn carried_leaves(count: usize) -> usize {
    2 * tree_width(count) - count
}

pub(crate) fn combine(hash_function: &mut impl HashFunction, left: &HashDigest, right: &HashDigest) -> HashDigest {
    hash_function.update(left);
    hash_function.update(right);
    hash_function.digest()
}

/// Reduces any non-empty leaf list to a power of two count.
pub(crate) fn first_level(leaves: &[HashDigest], hash_function: &mut impl HashFunction) -> Vec<HashDigest> {
    let carried = carried_leaves(leaves.len());
    let mut level = Vec::with_capacity(tree_width(leaves.len()));
    level.extend_from_slice(&leaves[..carried]);
    for pair in leaves[carried..].chunks_exact(2) {
        level.push(combine(hash_function, &pair[0], &pair[1]));
    }
    level
}

/// Combines a power of two level into the level above it.
pub(crate) fn next_level(level: &[HashDigest], hash_function: &mut impl HashFunction) -> Vec<HashDigest> {
    level
        .chunks_exact(2)
        .map(|pair| combine(hash_function, &pair[0], &pair[1]))
        .collect()
}

/// Collects leaves in any number of batches and computes their root.
#[derive(Debug, Clone, Default)]
pub struct TreeHasher {
    leaves: Vec<HashDigest>,
}

impl TreeHasher {
    pub fn new() -> Self {
        TreeHasher { leaves: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TreeHasher { leaves: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, leaf: HashDigest) {
        self.leaves.push(leaf);
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaves(&self) -> &[HashDigest] {
        &self.leaves
    }

    pub fn root(&self) -> Result<HashDigest, CryptoError> {
        tree_hash(&self.leaves)
    }
}

impl Extend<HashDigest> for TreeHasher {
    fn extend<I: IntoIterator<Item = HashDigest>>(&mut self, iter: I) {
        self.leaves.extend(iter);
    }
}

impl FromIterator<HashDigest> for TreeHasher {
    fn from_iter<I: IntoIterator<Item = HashDigest>>(iter: I) -> Self {
        TreeHasher { leaves: iter.into_iter().collect() }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sponge::hash_bytes;

    fn leaf(i: u8) -> HashDigest {
        hash_bytes([i])
    }

    fn leaves(n: u8) -> Vec<HashDigest> {
        (0..n).map(leaf).collect()
    }

    fn h(left: &HashDigest, right: &HashDigest) -> HashDigest {
        let mut data = Vec::with_capacity(64);
        data.extend_from_slice(left);
        data.extend_from_slice(right);
        hash_bytes(data)
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(tree_hash(&[]), Err(CryptoError::EmptyTree));
        assert_eq!(TreeHasher::new().root(), Err(CryptoError::EmptyTree));
    }

    #[test]
    fn test_single_leaf_is_root() {
        let l = leaf(42);
        assert_eq!(tree_hash(&[l]).unwrap(), l);
        let raw = [7u8; 32];
        assert_eq!(tree_hash(&[raw]).unwrap(), raw);
    }

    #[test]
    fn test_two_leaves() {
        let (a, b) = (leaf(1), leaf(2));
        assert_eq!(tree_hash(&[a, b]).unwrap(), h(&a, &b));
    }

    #[test]
    fn test_order_matters() {
        let (a, b) = (leaf(1), leaf(2));
        assert_ne!(tree_hash(&[a, b]).unwrap(), tree_hash(&[b, a]).unwrap());
    }

    #[test]
    fn test_power_of_two() {
        let l = leaves(4);
        let expected = h(&h(&l[0], &l[1]), &h(&l[2], &l[3]));
        assert_eq!(tree_hash(&l).unwrap(), expected);

        let l = leaves(8);
        let expected = h(
            &h(&h(&l[0], &l[1]), &h(&l[2], &l[3])),
            &h(&h(&l[4], &l[5]), &h(&l[6], &l[7])),
        );
        assert_eq!(tree_hash(&l).unwrap(), expected);
    }

    #[test]
    fn test_three_leaves() {
        let l = leaves(3);
        // l[0] is carried, l[1] and l[2] are paired
        let expected = h(&l[0], &h(&l[1], &l[2]));
        assert_eq!(tree_hash(&l).unwrap(), expected);
    }

    #[test]
    fn test_five_leaves() {
        let l = leaves(5);
        let expected = h(&h(&l[0], &l[1]), &h(&l[2], &h(&l[3], &l[4])));
        assert_eq!(tree_hash(&l).unwrap(), expected);
    }

    #[test]
    fn test_six_leaves() {
        let l = leaves(6);
        let expected = h(&h(&l[0], &l[1]), &h(&h(&l[2], &l[3]), &h(&l[4], &l[5])));
        assert_eq!(tree_hash(&l).unwrap(), expected);
        assert_eq!(
            hex::encode(expected),
            "339caf14b48992a6c4f2f7fcdb491952fb108febcab38667df0828be8f3651a7"
        );
    }

    #[test]
    fn test_seven_leaves() {
        let l = leaves(7);
        let expected = h(
            &h(&l[0], &h(&l[1], &l[2])),
            &h(&h(&l[3], &l[4]), &h(&l[5], &l[6])),
        );
        assert_eq!(tree_hash(&l).unwrap(), expected);
    }

    #[test]
    fn test_fixed_leaf_values() {
        let a = [0x11u8; 32];
        let b = [0x22u8; 32];
        let c = [0x33u8; 32];
        let mut bc = [0u8; 64];
        bc[..32].copy_from_slice(&b);
        bc[32..].copy_from_slice(&c);
        let mut root_input = [0u8; 64];
        root_input[..32].copy_from_slice(&a);
        root_input[32..].copy_from_slice(&hash_bytes(bc));
        let root = tree_hash(&[a, b, c]).unwrap();
        assert_eq!(root, hash_bytes(root_input));
        assert_eq!(
            hex::encode(root),
            "fc12578c6e225c30902a5337d80963747766159c68aab14498fae124d083faef"
        );
    }

    #[test]
    fn test_width_and_carry() {
        assert_eq!(tree_width(1), 1);
        assert_eq!(tree_width(2), 2);
        assert_eq!(tree_width(3), 2);
        assert_eq!(tree_width(6), 4);
        assert_eq!(tree_width(8), 8);
        assert_eq!(tree_width(9), 8);
        assert_eq!(carried_leaves(3), 1);
        assert_eq!(carried_leaves(5), 3);
        assert_eq!(carried_leaves(6), 2);
        assert_eq!(carried_leaves(8), 8);
    }

    #[test]
    fn test_batching_does_not_matter() {
        let l = leaves(11);
        let expected = tree_hash(&l).unwrap();

        let mut one_by_one = TreeHasher::new();
        for item in &l {
            one_by_one.push(*item);
        }
        assert_eq!(one_by_one.root().unwrap(), expected);

        let mut batched = TreeHasher::with_capacity(l.len());
        for batch in l.chunks(4) {
            batched.extend(batch.iter().copied());
        }
        assert_eq!(batched.len(), 11);
        assert_eq!(batched.root().unwrap(), expected);

        let collected: TreeHasher = l.iter().copied().collect();
        assert_eq!(collected.root().unwrap(), expected);
    }

    #[test]
    fn test_custom_hash_function_matches_default() {
        let l = leaves(9);
        let mut hasher = FastHash::new();
        assert_eq!(tree_hash_with(&l, &mut hasher).unwrap(), tree_hash(&l).unwrap());
    }
}
