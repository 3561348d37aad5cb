//! Stable hashing utilities for keys and buckets.
//!
//! Goals:
//! - Use a stable, explicit hash (not std::DefaultHasher) so that bucket mapping
//!   stays identical across toolchains/platforms and across implementations
//!   reading the same snapshot.
//! - 32-bit wraparound arithmetic is part of the contract.

pub const DJB2_SEED: u32 = 5381;

/// DJB2 over raw key bytes: h = (h << 5) + h + b, u32 wraparound.
#[inline]
pub fn djb2_32(key: &[u8]) -> u32 {
    key.iter().fold(DJB2_SEED, |h, &b| {
        (h << 5).wrapping_add(h).wrapping_add(b as u32)
    })
}

/// Compute bucket index from a 32-bit hash value.
#[inline]
pub fn bucket_index(hash: u32, capacity: usize) -> usize {
    debug_assert!(capacity > 0, "capacity must be > 0");
    (hash as u64 % capacity as u64) as usize
}

/// Stable mapping key -> home bucket in `[0, capacity)`.
#[inline]
pub fn bucket_of_key_default(key: &[u8], capacity: usize) -> usize {
    bucket_index(djb2_32(key), capacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn djb2_known_values() {
        assert_eq!(djb2_32(b""), 5381);
        // 5381 * 33 + 'a'(97)
        assert_eq!(djb2_32(b"a"), 177_670);
        assert_eq!(djb2_32(b"ab"), 177_670u32.wrapping_mul(33).wrapping_add(98));
    }

    #[test]
    fn djb2_wraps_instead_of_overflowing() {
        let long = vec![b'z'; 64];
        let mut h: u32 = DJB2_SEED;
        for &b in &long {
            h = h.wrapping_mul(33).wrapping_add(b as u32);
        }
        assert_eq!(djb2_32(&long), h);
    }

    #[test]
    fn bucket_in_range_and_deterministic() {
        for cap in [1usize, 5, 10, 97, 1024] {
            for key in ["a", "b", "alpha", "k:1", "ключ"] {
                let b1 = bucket_of_key_default(key.as_bytes(), cap);
                let b2 = bucket_of_key_default(key.as_bytes(), cap);
                assert!(b1 < cap);
                assert_eq!(b1, b2);
            }
        }
    }
}
