use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::Error;

const ENCRYPTION_CONSTANT: u32 = 0x80E32B11;
const SHIFT_BASE: u8 = 3;

/// A single obfuscated 32-bit field as stored on disk: 8 bytes of
/// `[encrypted: u32][adjust: u16][shift: u8][checksum: u8]`, little-endian.
///
/// Only `value` is meaningful; `shift` and `adjust` are obfuscation
/// parameters chosen by the original writer and are preserved verbatim on
/// re-encode, since changing them changes the on-disk bytes even for an
/// unchanged logical value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncryptedInt32 {
    pub original_encrypted: u32,
    pub adjust: u16,
    pub shift: u8,
    pub checksum: u8,
    /// Decrypted logical value. Mutate this and [`write`](Self::write) the
    /// record back to edit the field.
    pub value: u32,
}

impl EncryptedInt32 {
    /// On-disk size of one record.
    pub const SIZE: usize = 8;

    pub fn new(encrypted: u32, adjust: u16, shift: u8, checksum: u8) -> Self {
        Self {
            original_encrypted: encrypted,
            adjust,
            shift,
            checksum,
            value: Self::decrypt(encrypted, shift, adjust),
        }
    }

    /// Undoes the scramble: shift the encrypted value up, fold the high word
    /// back into the low word, then remove the additive mask.
    pub fn decrypt(encrypted: u32, shift: u8, adjust: u16) -> u32 {
        let distance = (32 - SHIFT_BASE as i32 - shift as i32) & 0x3F;
        let mut val = (encrypted as u64).wrapping_shl(distance as u32);
        val = val.wrapping_add(val >> 32);
        ENCRYPTION_CONSTANT
            .wrapping_sub(adjust as u32)
            .wrapping_add(val as u32)
    }

    /// Applies the additive mask, shifts up by `shift + SHIFT_BASE`, and
    /// folds the high word into the low word.
    ///
    /// Round-trips with [`decrypt`](Self::decrypt) for shifts up to 29; past
    /// that the shift pushes bits beyond what a single fold can recover.
    pub fn encrypt(value: u32, shift: u8, adjust: u16) -> u32 {
        let masked = value.wrapping_add((adjust as u32).wrapping_sub(ENCRYPTION_CONSTANT));
        let val = (masked as u64).wrapping_shl(shift as u32 + SHIFT_BASE as u32);
        ((val >> 32) as u32).wrapping_add(val as u32)
    }

    /// Self-check byte over the stored (encrypted) value.
    pub fn calculate_checksum(encrypted: u32) -> u8 {
        let byte_sum = encrypted
            .wrapping_add(encrypted >> 16)
            .wrapping_add(encrypted >> 24)
            .wrapping_add(encrypted >> 8);
        byte_sum.wrapping_sub(0x2D) as u8
    }

    /// Parses the record at `offset` without validating its checksum.
    pub fn read(data: &[u8], offset: usize) -> Result<Self, Error> {
        let mut reader = data
            .get(offset..offset + Self::SIZE)
            .ok_or(Error::RecordBounds {
                offset,
                len: data.len(),
            })?;
        let encrypted = reader.read_u32::<LE>()?;
        let adjust = reader.read_u16::<LE>()?;
        let shift = reader.read_u8()?;
        let checksum = reader.read_u8()?;
        Ok(Self::new(encrypted, adjust, shift, checksum))
    }

    /// Parses the record at `offset`, failing if the stored checksum does not
    /// match the recomputed one. A mismatch means corrupted data or a
    /// misidentified field offset; callers must not paper over it with a
    /// default value.
    pub fn read_verify(data: &[u8], offset: usize) -> Result<Self, Error> {
        let record = Self::read(data, offset)?;
        let computed = Self::calculate_checksum(record.original_encrypted);
        if record.checksum != computed {
            return Err(Error::ChecksumMismatch {
                offset,
                stored: record.checksum,
                computed,
            });
        }
        Ok(record)
    }

    /// Re-encrypts `value` with the record's own shift/adjust, recomputes the
    /// checksum, and serializes all four fields at `offset`.
    pub fn write(&self, data: &mut [u8], offset: usize) -> Result<(), Error> {
        let len = data.len();
        let mut writer = data
            .get_mut(offset..offset + Self::SIZE)
            .ok_or(Error::RecordBounds { offset, len })?;
        let encrypted = Self::encrypt(self.value, self.shift, self.adjust);
        writer.write_u32::<LE>(encrypted)?;
        writer.write_u16::<LE>(self.adjust)?;
        writer.write_u8(self.shift)?;
        writer.write_u8(Self::calculate_checksum(encrypted))?;
        Ok(())
    }
}

impl std::fmt::Display for EncryptedInt32 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.value.fmt(f)
    }
}
