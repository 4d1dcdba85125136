//! Internal cartridge header decoding.
//!
//! The header occupies the last bytes of the first ROM bank of whichever
//! mapping mode the board uses. Offsets below are relative to the candidate
//! base returned by the scorer (`0x7f00` / `0xff00`, plus `0x200` when a copier
//! header is present), so the title starts at `0xc0` and the reset vector sits
//! at `0xfc`.
//!
//! | offset | field |
//! |---|---|
//! | `0xb2..0xc7` | extended title (only when `0xb2..0xb6` is printable) |
//! | `0xc0..0xd5` | title |
//! | `0xd5` | mode byte (mapping, speed) |
//! | `0xd6` | cartridge type |
//! | `0xd7` / `0xd8` | ROM / RAM size exponent (KiB) |
//! | `0xd9` | destination code |
//! | `0xda` / `0xdb` | licensee / version |
//! | `0xdc..0xde` | checksum complement, little endian |
//! | `0xde..0xe0` | checksum, little endian |
//! | `0xe0..0xe4` | reserved word, big endian |

use crate::{error::DecodeError, scorer::MappingMode};

pub mod cart_type;
pub mod layout;
pub mod region;
pub mod title;

pub use cart_type::CartType;
pub use layout::Layout;
pub use region::Region;
pub use title::{TITLE_LEN, TITLE_WINDOW, extract_extended, extract_title};

pub const EXTENDED_TITLE: usize = 0xb2;
pub const TITLE: usize = 0xc0;
pub const MODE: usize = 0xd5;
pub const CART_TYPE: usize = 0xd6;
pub const ROM_SIZE: usize = 0xd7;
pub const RAM_SIZE: usize = 0xd8;
pub const DESTINATION: usize = 0xd9;
pub const LICENSEE: usize = 0xda;
pub const VERSION: usize = 0xdb;
pub const CHECKSUM_COMPLEMENT: usize = 0xdc;
pub const CHECKSUM: usize = 0xde;
pub const RESERVED: usize = 0xe0;

/// Bytes past the header offset that must be present to decode every field.
pub const HEADER_SPAN: usize = RESERVED + 4;

/// Decoded internal header of one image.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RomHeader {
    /// Identifier supplied by the caller, passed through untouched.
    pub filename: String,
    /// Absolute offset of the header window in the buffer.
    pub offset: usize,
    /// Mode that won the location scoring, `None` when the scores tied.
    pub mapping: Option<MappingMode>,
    pub name: String,
    pub layout: Layout,
    pub cart_type: CartType,
    /// ROM size in KiB.
    pub rom_size: u32,
    /// RAM size in KiB.
    pub ram_size: u32,
    pub region: Region,
    /// Raw destination byte `region` was derived from.
    pub destination_code: u8,
    pub licensee_code: u8,
    pub version_number: u8,
    pub checksum: u16,
    pub checksum_complement: u16,
    pub unknown1: u32,
    pub extended: Option<String>,
}

impl RomHeader {
    /// Decodes the header located at `offset` in `bytes`.
    ///
    /// `mapping` is recorded as given; it does not influence decoding.
    pub fn decode_at(
        filename: &str,
        bytes: &[u8],
        offset: usize,
        mapping: Option<MappingMode>,
    ) -> Result<Self, DecodeError> {
        let header = offset
            .checked_add(HEADER_SPAN)
            .and_then(|end| bytes.get(offset..end))
            .ok_or_else(|| DecodeError::Truncated {
                offset,
                required: offset.saturating_add(HEADER_SPAN),
                actual: bytes.len(),
            })?;

        let title_window = &header[TITLE..TITLE + TITLE_WINDOW];
        let extended_window = &header[EXTENDED_TITLE..EXTENDED_TITLE + TITLE_LEN];
        let destination_code = header[DESTINATION];

        Ok(Self {
            filename: filename.to_owned(),
            offset,
            mapping,
            name: extract_title(title_window),
            layout: Layout::from_mode_byte(header[MODE]),
            cart_type: CartType::from_type_byte(header[CART_TYPE]),
            rom_size: size_in_kib(header[ROM_SIZE]),
            ram_size: size_in_kib(header[RAM_SIZE]),
            region: Region::from_destination(destination_code),
            destination_code,
            licensee_code: header[LICENSEE],
            version_number: header[VERSION],
            checksum: u16::from_le_bytes([header[CHECKSUM], header[CHECKSUM + 1]]),
            checksum_complement: u16::from_le_bytes([
                header[CHECKSUM_COMPLEMENT],
                header[CHECKSUM_COMPLEMENT + 1],
            ]),
            unknown1: u32::from_be_bytes([
                header[RESERVED],
                header[RESERVED + 1],
                header[RESERVED + 2],
                header[RESERVED + 3],
            ]),
            extended: extract_extended(extended_window, &title_window[..TITLE_LEN]),
        })
    }
}

/// `2^exponent` KiB. Exponents that do not fit in 32 bits yield zero, which is
/// what truncating the floating point power to `u32` produced in existing
/// tooling.
pub fn size_in_kib(exponent: u8) -> u32 {
    1u32.checked_shl(u32::from(exponent)).unwrap_or(0)
}

/// Inverse of [`size_in_kib`] for exact powers of two.
pub fn size_exponent(kib: u32) -> Option<u8> {
    kib.is_power_of_two().then(|| kib.trailing_zeros() as u8)
}
