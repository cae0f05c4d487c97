use crate::{BLOCK_SIZE, HEADER_SIZE};

#[derive(thiserror::Error)]
pub enum Error {
    // dependency errors
    #[error("enum conversion: {0}")]
    Strum(#[from] strum::ParseError),

    // std errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // crate errors
    #[error(
        "key size must be same as block size (actual: {0}, expected: {expect})",
        expect = BLOCK_SIZE
    )]
    KeySize(usize),

    #[error(
        "counter size must be same as block size (actual: {0}, expected: {expect})",
        expect = BLOCK_SIZE
    )]
    CounterSize(usize),

    #[error("output buffer is {output} bytes but input is {input}")]
    LengthMismatch { input: usize, output: usize },

    #[error(
        "header is {0:#x} bytes, expected at least {expect:#x}",
        expect = HEADER_SIZE
    )]
    HeaderTooShort(usize),

    #[error("record at {offset:#x} extends past end of buffer ({len:#x} bytes)")]
    RecordBounds { offset: usize, len: usize },

    #[error(
        "checksum mismatch at {offset:#x}: stored {stored:#04x}, computed {computed:#04x}"
    )]
    ChecksumMismatch {
        offset: usize,
        stored: u8,
        computed: u8,
    },

    #[error("no hash layout registered for \"{0}\"")]
    UnknownFile(String),

    #[error("\"{name}\" is {actual:#x} bytes, expected {expected:#x}")]
    FileSize {
        name: String,
        actual: usize,
        expected: usize,
    },
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
