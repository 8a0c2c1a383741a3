use zone_crypto::types::HashDigest;

/// Whether `hash` meets `difficulty`.
///
/// The hash is read as a little-endian 256-bit integer; it passes when
/// `hash * difficulty` still fits in 256 bits. Difficulties 0 and 1 accept
/// every hash.
pub fn check_hash(hash: &HashDigest, difficulty: u64) -> bool {
    let mut carry: u128 = 0;
    for word in hash.chunks_exact(8) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(word);
        let product = u64::from_le_bytes(bytes) as u128 * difficulty as u128 + carry;
        carry = product >> 64;
    }
    carry == 0
}

/// Expected number of hashes needed to meet `difficulty`.
pub fn expected_attempts(difficulty: u64) -> u64 {
    difficulty.max(1)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_trivial_difficulty() {
        let max = [0xffu8; 32];
        assert!(check_hash(&max, 0));
        assert!(check_hash(&max, 1));
        assert!(!check_hash(&max, 2));
    }

    #[test]
    fn test_zero_hash_meets_any_difficulty() {
        assert!(check_hash(&[0u8; 32], u64::MAX));
    }

    #[test]
    fn test_boundary_at_difficulty_two() {
        // 2^255 - 1 passes, 2^255 does not
        let mut below = [0xffu8; 32];
        below[31] = 0x7f;
        assert!(check_hash(&below, 2));

        let mut at = [0u8; 32];
        at[31] = 0x80;
        assert!(!check_hash(&at, 2));
    }

    #[test]
    fn test_carry_through_low_words() {
        // low 192 bits set, top word clear: the carries are absorbed by the top word
        let mut hash = [0xffu8; 32];
        hash[24..].fill(0);
        assert!(check_hash(&hash, 2));
        assert!(check_hash(&hash, 1 << 32));
    }

    #[test]
    fn test_expected_attempts() {
        assert_eq!(expected_attempts(0), 1);
        assert_eq!(expected_attempts(1000), 1000);
    }
}
