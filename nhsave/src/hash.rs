//! The game's Murmur3-style content hash.
//!
//! This deliberately reproduces the vendor's non-canonical variant: the
//! scramble reorders the reference rotate, and ranges whose size is not a
//! multiple of four read a whole trailing word past the counted bytes. Both
//! must stay byte-exact or resealed files fail the game's own verifier, so
//! neither is "fixed" here. Callers hashing a non-word-aligned size must
//! supply a buffer with enough valid bytes past the range for that tail read.

fn scramble(k: u32) -> u32 {
    let k = k.wrapping_mul(0x16A88000) | (k.wrapping_mul(0xCC9E2D51) >> 17);
    k.wrapping_mul(0x1B873593)
}

/// Hashes `size` bytes of `data` starting at `offset` with an explicit seed.
pub fn compute_seeded(data: &[u8], offset: usize, size: usize, seed: u32) -> u32 {
    let mut checksum = seed;
    let mut cursor = offset;
    if size > 3 {
        for _ in 0..size / 4 {
            let val = u32::from_le_bytes(data[cursor..cursor + 4].try_into().unwrap());
            checksum ^= scramble(val);
            checksum = (checksum >> 19) | (checksum << 13);
            checksum = checksum.wrapping_mul(5).wrapping_add(0xE6546B64);
            cursor += 4;
        }
    }

    let remainder = size % 4;
    if remainder != 0 {
        let tail = cursor + size - remainder;
        let mut val = u32::from_le_bytes(data[tail..tail + 4].try_into().unwrap());
        val >>= 8 * (4 - remainder);
        checksum ^= scramble(val);
    }

    checksum ^= size as u32;
    checksum ^= checksum >> 16;
    checksum = checksum.wrapping_mul(0x85EBCA6B);
    checksum ^= checksum >> 13;
    checksum = checksum.wrapping_mul(0xC2B2AE35);
    checksum ^= checksum >> 16;
    checksum
}

/// Hashes `size` bytes of `data` starting at `offset` (seed 0).
pub fn compute(data: &[u8], offset: usize, size: usize) -> u32 {
    compute_seeded(data, offset, size, 0)
}

/// Recomputes the hash over `[read_offset, read_offset + read_size)` and
/// stores it little-endian at `hash_offset`, returning the new value.
pub fn update(data: &mut [u8], hash_offset: usize, read_offset: usize, read_size: usize) -> u32 {
    let hash = compute(data, read_offset, read_size);
    data[hash_offset..hash_offset + 4].copy_from_slice(&hash.to_le_bytes());
    hash
}

/// Whether the hash stored at `hash_offset` matches the covered range.
/// Returns a bool rather than an error so callers pick their own policy for
/// stale hashes.
pub fn verify(data: &[u8], hash_offset: usize, read_offset: usize, read_size: usize) -> bool {
    let stored = u32::from_le_bytes(data[hash_offset..hash_offset + 4].try_into().unwrap());
    stored == compute(data, read_offset, read_size)
}
