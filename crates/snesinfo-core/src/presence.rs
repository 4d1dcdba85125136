//! Copier header detection.
//!
//! Dumps made with old backup units carry a 512 byte prefix in front of the
//! actual cartridge data. Nothing inside the file says so; the only reliable
//! signal is the total length, since real cartridge images are always whole
//! kilobytes.

use crate::error::DecodeError;

/// Size of the optional copier header in bytes.
pub const COPIER_HEADER_LEN: usize = 0x200;

/// Cartridge images are sized in multiples of this many bytes.
pub const SIZE_GRANULE: u64 = 1024;

/// Whether a copier header precedes the cartridge image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPresence {
    /// A 512 byte copier header is prepended.
    Headered,
    /// The buffer is the bare cartridge image.
    Headerless,
}

impl HeaderPresence {
    /// Classifies an image from its total length alone.
    pub fn classify(length: u64) -> Result<Self, DecodeError> {
        match length % SIZE_GRANULE {
            0 => Ok(Self::Headerless),
            512 => Ok(Self::Headered),
            _ => Err(DecodeError::UnrecognizedSize { length }),
        }
    }

    /// Number of bytes every in-image position is shifted by.
    pub fn adjustment(self) -> usize {
        match self {
            Self::Headered => COPIER_HEADER_LEN,
            Self::Headerless => 0,
        }
    }
}
