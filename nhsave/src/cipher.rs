use aes::cipher::{BlockEncrypt, KeyInit};

use crate::{Error, BLOCK_SIZE};

/// AES-128 counter-mode keystream engine.
///
/// Encryption and decryption are the same XOR transform. Each instance owns
/// its counter and keystream cursor, so one instance serves exactly one
/// encryption or decryption job; construct a fresh one per message.
pub struct Aes128Ctr {
    cipher: aes::Aes128,
    counter: [u8; BLOCK_SIZE],
    keystream: [u8; BLOCK_SIZE],
    cursor: usize,
}

impl Aes128Ctr {
    pub fn new(key: &[u8], counter: &[u8]) -> Result<Self, Error> {
        let key: [u8; BLOCK_SIZE] = key.try_into().map_err(|_| Error::KeySize(key.len()))?;
        let counter: [u8; BLOCK_SIZE] = counter
            .try_into()
            .map_err(|_| Error::CounterSize(counter.len()))?;
        Ok(Self {
            cipher: aes::Aes128::new(&key.into()),
            counter,
            keystream: [0; BLOCK_SIZE],
            // empty until the first block is generated
            cursor: BLOCK_SIZE,
        })
    }

    /// XORs `input` against the keystream into `output`, returning the number
    /// of bytes transformed. The buffers must be the same length.
    pub fn transform(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, Error> {
        if input.len() != output.len() {
            return Err(Error::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        for (out, byte) in output.iter_mut().zip(input) {
            *out = byte ^ self.next_keystream_byte();
        }
        Ok(input.len())
    }

    /// In-place variant of [`transform`](Self::transform).
    pub fn apply_keystream(&mut self, data: &mut [u8]) {
        for byte in data {
            *byte ^= self.next_keystream_byte();
        }
    }

    fn next_keystream_byte(&mut self) -> u8 {
        if self.cursor == BLOCK_SIZE {
            self.encrypt_counter_then_increment();
        }
        let byte = self.keystream[self.cursor];
        self.cursor += 1;
        byte
    }

    fn encrypt_counter_then_increment(&mut self) {
        self.keystream.copy_from_slice(&self.counter);
        self.cipher
            .encrypt_block(aes::Block::from_mut_slice(&mut self.keystream));
        self.cursor = 0;
        self.increment_counter();
    }

    /// Big-endian multi-byte increment: carry from the last byte toward the
    /// first, stopping at the first byte that does not wrap to zero.
    fn increment_counter(&mut self) {
        for byte in self.counter.iter_mut().rev() {
            *byte = byte.wrapping_add(1);
            if *byte != 0 {
                break;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ctr(counter: [u8; BLOCK_SIZE]) -> Aes128Ctr {
        Aes128Ctr::new(&[0; BLOCK_SIZE], &counter).unwrap()
    }

    #[test]
    fn counter_increment_carries() {
        let mut engine = ctr([0; BLOCK_SIZE]);
        engine.counter[BLOCK_SIZE - 1] = 0xFF;
        engine.increment_counter();
        let mut expect = [0; BLOCK_SIZE];
        expect[BLOCK_SIZE - 2] = 0x01;
        assert_eq!(engine.counter, expect);
    }

    #[test]
    fn counter_increment_wraps_to_zero() {
        let mut engine = ctr([0xFF; BLOCK_SIZE]);
        engine.increment_counter();
        assert_eq!(engine.counter, [0; BLOCK_SIZE]);
    }

    #[test]
    fn counter_increment_simple() {
        let mut engine = ctr([0; BLOCK_SIZE]);
        engine.increment_counter();
        let mut expect = [0; BLOCK_SIZE];
        expect[BLOCK_SIZE - 1] = 0x01;
        assert_eq!(engine.counter, expect);
    }

    #[test]
    fn rejects_bad_sizes() {
        assert!(matches!(
            Aes128Ctr::new(&[0; 15], &[0; 16]),
            Err(Error::KeySize(15))
        ));
        assert!(matches!(
            Aes128Ctr::new(&[0; 16], &[0; 17]),
            Err(Error::CounterSize(17))
        ));
    }

    #[test]
    fn split_transform_matches_single_call() {
        let data: Vec<u8> = (0..100u8).collect();
        let key = [0x11; BLOCK_SIZE];
        let counter = [0x22; BLOCK_SIZE];

        let mut whole = data.clone();
        Aes128Ctr::new(&key, &counter)
            .unwrap()
            .apply_keystream(&mut whole);

        // same engine carried across calls of uneven, non-block-aligned sizes
        let mut split = data.clone();
        let mut engine = Aes128Ctr::new(&key, &counter).unwrap();
        let (a, b) = split.split_at_mut(7);
        engine.apply_keystream(a);
        engine.apply_keystream(b);

        assert_eq!(whole, split);
    }
}
