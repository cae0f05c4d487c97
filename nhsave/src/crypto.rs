use crate::{Aes128Ctr, Error, SaveHeader, XorShift128, BLOCK_SIZE, POOL_WORDS};

/// Ciphertext plus the header that must be stored alongside it; the header
/// embeds the entropy pool the payload's key and counter derive from.
pub struct EncryptedSave {
    pub data: Vec<u8>,
    pub header: Vec<u8>,
}

/// Extracts a 16-byte parameter from the entropy pool.
///
/// The pool word selected by `pool[index]` seeds a fresh generator, the word
/// selected by `pool[index + 1]` decides how many 64-bit draws to discard,
/// and the top byte of each following 32-bit draw becomes one output byte.
/// Purely a function of the pool contents, so re-deriving from a stored
/// header always reproduces the writer's parameters.
fn get_param(pool: &[u32; POOL_WORDS], index: usize) -> [u8; BLOCK_SIZE] {
    let mut rng = XorShift128::new(pool[(pool[index] & 0x7F) as usize]);
    let prms = pool[(pool[index + 1] & 0x7F) as usize] & 0x7F;

    let roll_count = (prms & 0xF) + 1;
    for _ in 0..roll_count {
        rng.next_u64();
    }

    let mut param = [0; BLOCK_SIZE];
    for byte in &mut param {
        *byte = (rng.next_u32() >> 24) as u8;
    }
    param
}

/// (key, counter) pair for a pool. Key comes from index 0, counter from 2.
pub(crate) fn derive_params(pool: &[u32; POOL_WORDS]) -> ([u8; BLOCK_SIZE], [u8; BLOCK_SIZE]) {
    (get_param(pool, 0), get_param(pool, 2))
}

/// Decrypts `data` in place using the entropy pool embedded in `header`.
///
/// Fails if `header` is shorter than a full 0x300-byte header.
pub fn decrypt(header: &[u8], data: &mut [u8]) -> Result<(), Error> {
    let header = SaveHeader::parse(header)?;
    let (key, counter) = derive_params(&header.pool);

    let mut cipher = Aes128Ctr::new(&key, &counter)?;
    cipher.apply_keystream(data);
    Ok(())
}

/// Encrypts `data` with parameters drawn from `seed`, returning the
/// ciphertext together with the generated header.
pub fn encrypt(data: &[u8], seed: u32, version_info: &[u8]) -> Result<EncryptedSave, Error> {
    let header = SaveHeader::generate(seed, version_info);
    let (key, counter) = derive_params(&header.pool);

    let mut cipher = Aes128Ctr::new(&key, &counter)?;
    let mut enc_data = vec![0; data.len()];
    cipher.transform(data, &mut enc_data)?;

    Ok(EncryptedSave {
        data: enc_data,
        header: header.to_bytes(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn derived_params_are_deterministic() {
        let mut rng = XorShift128::new(1);
        let mut pool = [0; POOL_WORDS];
        for word in &mut pool {
            *word = rng.next_u32();
        }

        let (key, counter) = derive_params(&pool);
        assert_eq!(
            key,
            [
                0x5A, 0xCA, 0x99, 0xFB, 0x71, 0xDF, 0x97, 0x31, 0x6B, 0x3E, 0x7F, 0x9F, 0xB1,
                0x0C, 0x3F, 0x6C
            ]
        );
        assert_eq!(
            counter,
            [
                0x50, 0x5C, 0x6A, 0x33, 0xA3, 0x46, 0xEB, 0x97, 0x64, 0x54, 0x14, 0x73, 0xDF,
                0x89, 0xCC, 0xA7
            ]
        );
        assert_eq!(derive_params(&pool), (key, counter));
    }
}
