mod cipher;
mod crypto;
mod error;
mod ext;
pub mod hash;
mod header;
mod rand;
mod record;
mod regions;

pub use {cipher::*, crypto::*, error::*, header::*, rand::*, record::*, regions::*};

/// AES block size in bytes; keys and counters are exactly one block.
pub const BLOCK_SIZE: usize = 0x10;

/// Number of 32-bit words in a header's entropy pool.
pub const POOL_WORDS: usize = 0x80;

/// Bytes of version/metadata preceding the entropy pool in a header.
pub const VERSION_INFO_SIZE: usize = 0x100;

/// Total header size: version info followed by the raw entropy pool.
pub const HEADER_SIZE: usize = VERSION_INFO_SIZE + POOL_WORDS * 4;

#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Debug,
    strum::Display,
    strum::FromRepr,
    strum::EnumIter,
    strum::EnumString,
)]
/// Game revision a save file was written by. Revisions differ in file sizes
/// and in which byte ranges are covered by integrity hashes.
pub enum Revision {
    #[strum(serialize = "1.0.0")]
    V1_0_0,
    #[strum(serialize = "1.4.0")]
    V1_4_0,
}

// strum shouldn't need to be installed by users
impl Revision {
    pub fn iter() -> RevisionIter {
        <Revision as strum::IntoEnumIterator>::iter()
    }

    /// Hash-region registry for files written by this revision.
    pub fn hash_info(self) -> &'static FileHashInfo {
        regions::hash_info(self)
    }
}
