use crate::ext::{ReadExt, WriteExt};
use crate::{Error, XorShift128, HEADER_SIZE, POOL_WORDS, VERSION_INFO_SIZE};

/// The 0x300-byte blob stored alongside an encrypted save: 0x100 bytes of
/// version/metadata followed by the 128-word entropy pool as little-endian
/// words. The pool is the sole input to key/counter derivation, which is why
/// re-reading a header recovers the exact parameters the writer used.
pub struct SaveHeader {
    pub version_info: [u8; VERSION_INFO_SIZE],
    pub pool: [u32; POOL_WORDS],
}

impl SaveHeader {
    /// Parses a header from the leading [`HEADER_SIZE`] bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, Error> {
        if data.len() < HEADER_SIZE {
            return Err(Error::HeaderTooShort(data.len()));
        }
        Self::read(&mut &data[..HEADER_SIZE])
    }

    pub fn read<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
        let mut version_info = [0; VERSION_INFO_SIZE];
        reader.read_exact(&mut version_info)?;
        let pool = reader.read_words()?;
        Ok(Self { version_info, pool })
    }

    pub fn write<W: std::io::Write>(&self, writer: &mut W) -> Result<(), Error> {
        writer.write_all(&self.version_info)?;
        writer.write_words(&self.pool)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        // writing to a Vec cannot fail
        self.write(&mut buf).unwrap();
        buf
    }

    /// Builds a fresh header: 128 pool words drawn from `seed`, version block
    /// copied from `version_info` (zero-padded or truncated to 0x100 bytes).
    pub fn generate(seed: u32, version_info: &[u8]) -> Self {
        let mut rng = XorShift128::new(seed);
        let mut pool = [0; POOL_WORDS];
        for word in &mut pool {
            *word = rng.next_u32();
        }

        let mut version = [0; VERSION_INFO_SIZE];
        let len = version_info.len().min(VERSION_INFO_SIZE);
        version[..len].copy_from_slice(&version_info[..len]);

        Self {
            version_info: version,
            pool,
        }
    }
}
