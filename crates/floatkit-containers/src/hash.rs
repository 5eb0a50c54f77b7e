//! Key hashing.
//!
//! Keys are hashed with 32-bit MurmurHash3 (x86 variant) and reduced to a
//! bucket by masking with `bucket_count - 1`, so bucket counts must be
//! powers of two.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// MurmurHash3 x86_32 of `bytes` under `seed`.
#[must_use]
pub fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    let mut h = seed;
    let mut chunks = bytes.chunks_exact(4);

    for chunk in &mut chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        h ^= scramble(k);
        h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let k = tail
            .iter()
            .enumerate()
            .fold(0u32, |k, (i, &b)| k | u32::from(b) << (8 * i));
        h ^= scramble(k);
    }

    // Only the low 32 bits of the length take part, as in the reference.
    h ^= bytes.len() as u32;
    fmix32(h)
}

#[inline]
fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Bucket for `key` in a directory of `bucket_count` buckets.
///
/// `bucket_count` must be a non-zero power of two.
#[inline]
#[must_use]
pub fn bucket_index(key: &str, seed: u32, bucket_count: usize) -> usize {
    debug_assert!(bucket_count.is_power_of_two());
    murmur3_32(key.as_bytes(), seed) as usize & (bucket_count - 1)
}
