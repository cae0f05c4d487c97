use once_cell::sync::Lazy;

use crate::{hash, Error, Revision};

/// A 4-byte hash slot followed immediately by the byte range it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashRegion {
    pub hash_offset: u32,
    pub size: u32,
}

impl HashRegion {
    pub const fn new(hash_offset: u32, size: u32) -> Self {
        Self { hash_offset, size }
    }

    /// First byte covered by the hash.
    pub const fn begin_offset(&self) -> u32 {
        self.hash_offset + 4
    }

    /// One past the last byte covered by the hash.
    pub const fn end_offset(&self) -> u32 {
        self.begin_offset() + self.size
    }

    pub fn update(&self, data: &mut [u8]) -> u32 {
        hash::update(
            data,
            self.hash_offset as usize,
            self.begin_offset() as usize,
            self.size as usize,
        )
    }

    pub fn verify(&self, data: &[u8]) -> bool {
        hash::verify(
            data,
            self.hash_offset as usize,
            self.begin_offset() as usize,
            self.size as usize,
        )
    }
}

impl std::fmt::Display for HashRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:#X}: ({:#X}-{:#X})",
            self.hash_offset,
            self.begin_offset(),
            self.end_offset()
        )
    }
}

/// The ordered hash regions of one known file layout, keyed by the exact
/// file size that layout produces.
pub struct FileHashDetails {
    pub file_name: &'static str,
    pub file_size: u32,
    pub regions: &'static [HashRegion],
}

impl FileHashDetails {
    /// Errors unless `data` is exactly this layout's size.
    fn check_size(&self, data: &[u8]) -> Result<(), Error> {
        if data.len() != self.file_size as usize {
            return Err(Error::FileSize {
                name: self.file_name.to_string(),
                actual: data.len(),
                expected: self.file_size as usize,
            });
        }
        Ok(())
    }

    /// Recomputes and rewrites every declared region hash, in declaration
    /// order. Call after editing any covered bytes, before re-encrypting.
    pub fn update_all(&self, data: &mut [u8]) -> Result<(), Error> {
        self.check_size(data)?;
        for region in self.regions {
            region.update(data);
        }
        Ok(())
    }

    /// Regions whose stored hash no longer matches their contents.
    pub fn find_invalid(&self, data: &[u8]) -> Result<Vec<HashRegion>, Error> {
        self.check_size(data)?;
        Ok(self
            .regions
            .iter()
            .filter(|region| !region.verify(data))
            .copied()
            .collect())
    }
}

/// Read-only registry of the hash layouts one game revision writes.
///
/// Layouts are keyed by file size; registering a second layout with the same
/// size replaces the first. Name lookup is first-match over the registered
/// order, mirroring the game's own resolution.
pub struct FileHashInfo {
    list: Vec<&'static FileHashDetails>,
}

impl FileHashInfo {
    fn new(sets: impl IntoIterator<Item = &'static FileHashDetails>) -> Self {
        let mut list: Vec<&'static FileHashDetails> = Vec::new();
        for set in sets {
            match list.iter_mut().find(|d| d.file_size == set.file_size) {
                Some(slot) => *slot = set,
                None => list.push(set),
            }
        }
        Self { list }
    }

    /// First registered layout with this exact file name, if any.
    pub fn get_file(&self, name: &str) -> Option<&'static FileHashDetails> {
        self.list.iter().find(|d| d.file_name == name).copied()
    }

    /// Layout keyed by exact file size, if any.
    pub fn get_size(&self, size: u32) -> Option<&'static FileHashDetails> {
        self.list.iter().find(|d| d.file_size == size).copied()
    }

    pub fn files(&self) -> impl Iterator<Item = &'static FileHashDetails> + '_ {
        self.list.iter().copied()
    }
}

pub(crate) fn hash_info(revision: Revision) -> &'static FileHashInfo {
    static REGISTRY: Lazy<Vec<FileHashInfo>> = Lazy::new(|| {
        Revision::iter()
            .map(|rev| FileHashInfo::new(catalog(rev).iter().copied()))
            .collect()
    });
    &REGISTRY[revision as usize]
}

fn catalog(revision: Revision) -> &'static [&'static FileHashDetails] {
    static CATALOG_1_0_0: [&FileHashDetails; 5] = [
        &MAIN_1_0_0,
        &PERSONAL_1_0_0,
        &PHOTO_STUDIO_ISLAND_1_0_0,
        &POSTBOX_1_0_0,
        &PROFILE_1_0_0,
    ];
    static CATALOG_1_4_0: [&FileHashDetails; 5] = [
        &MAIN_1_4_0,
        &PERSONAL_1_0_0,
        &PHOTO_STUDIO_ISLAND_1_0_0,
        &POSTBOX_1_0_0,
        &PROFILE_1_0_0,
    ];
    match revision {
        Revision::V1_0_0 => &CATALOG_1_0_0,
        Revision::V1_4_0 => &CATALOG_1_4_0,
    }
}

// Layout tables. main.dat is a (header, villagers, 8 x player pair, remainder)
// sequence; the single-region files cover everything after the 0x100 preamble.
// Regions are contiguous, each hash slot sitting directly after the previous
// range.
static MAIN_1_0_0: FileHashDetails = FileHashDetails {
    file_name: "main.dat",
    file_size: 0xB2_BE04,
    regions: &[
        HashRegion::new(0x000100, 0x1D6D48),
        HashRegion::new(0x1D6E4C, 0x323378),
        HashRegion::new(0x4FA1C8, 0x035AC4),
        HashRegion::new(0x52FC90, 0x03607C),
        HashRegion::new(0x565D10, 0x035AC4),
        HashRegion::new(0x59B7D8, 0x03607C),
        HashRegion::new(0x5D1858, 0x035AC4),
        HashRegion::new(0x607320, 0x03607C),
        HashRegion::new(0x63D3A0, 0x035AC4),
        HashRegion::new(0x672E68, 0x03607C),
        HashRegion::new(0x6A8EE8, 0x035AC4),
        HashRegion::new(0x6DE9B0, 0x03607C),
        HashRegion::new(0x714A30, 0x035AC4),
        HashRegion::new(0x74A4F8, 0x03607C),
        HashRegion::new(0x780578, 0x035AC4),
        HashRegion::new(0x7B6040, 0x03607C),
        HashRegion::new(0x7EC0C0, 0x035AC4),
        HashRegion::new(0x821B88, 0x03607C),
        HashRegion::new(0x857C08, 0x2D41F8),
    ],
};

static MAIN_1_4_0: FileHashDetails = FileHashDetails {
    file_name: "main.dat",
    file_size: 0xB2_FD84,
    regions: &[
        HashRegion::new(0x000100, 0x1D6D48),
        HashRegion::new(0x1D6E4C, 0x325EF8),
        HashRegion::new(0x4FCD48, 0x035AC4),
        HashRegion::new(0x532810, 0x03607C),
        HashRegion::new(0x568890, 0x035AC4),
        HashRegion::new(0x59E358, 0x03607C),
        HashRegion::new(0x5D43D8, 0x035AC4),
        HashRegion::new(0x609EA0, 0x03607C),
        HashRegion::new(0x63FF20, 0x035AC4),
        HashRegion::new(0x6759E8, 0x03607C),
        HashRegion::new(0x6ABA68, 0x035AC4),
        HashRegion::new(0x6E1530, 0x03607C),
        HashRegion::new(0x7175B0, 0x035AC4),
        HashRegion::new(0x74D078, 0x03607C),
        HashRegion::new(0x7830F8, 0x035AC4),
        HashRegion::new(0x7B8BC0, 0x03607C),
        HashRegion::new(0x7EEC40, 0x035AC4),
        HashRegion::new(0x824708, 0x03607C),
        HashRegion::new(0x85A788, 0x2D55F8),
    ],
};

static PERSONAL_1_0_0: FileHashDetails = FileHashDetails {
    file_name: "personal.dat",
    file_size: 0x6BC50,
    regions: &[
        HashRegion::new(0x00100, 0x35AC4),
        HashRegion::new(0x35BC8, 0x3607C),
    ],
};

static PHOTO_STUDIO_ISLAND_1_0_0: FileHashDetails = FileHashDetails {
    file_name: "photo_studio_island.dat",
    file_size: 0x263B8,
    regions: &[HashRegion::new(0x00100, 0x262B4)],
};

static POSTBOX_1_0_0: FileHashDetails = FileHashDetails {
    file_name: "postbox.dat",
    file_size: 0xB44580,
    regions: &[HashRegion::new(0x000100, 0xB4447C)],
};

static PROFILE_1_0_0: FileHashDetails = FileHashDetails {
    file_name: "profile.dat",
    file_size: 0x69508,
    regions: &[HashRegion::new(0x00100, 0x69404)],
};
