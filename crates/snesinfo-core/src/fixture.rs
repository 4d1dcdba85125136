//! Synthetic image construction.
//!
//! Writes a [`RomHeader`] back into raw bytes so tests can build images whose
//! decoded form is known in advance. Only what the decoder can observe is
//! written. Some values decode lossily and will not survive a round trip
//! unchanged: titles ending in a space, extended titles shorter than the
//! marker or long enough to run into the title, and flag sets with no type
//! byte.

use crate::{
    error::DecodeError,
    header::{
        CART_TYPE, CHECKSUM, CHECKSUM_COMPLEMENT, DESTINATION, EXTENDED_TITLE, LICENSEE, MODE,
        RAM_SIZE, RESERVED, ROM_SIZE, RomHeader, TITLE, TITLE_LEN, VERSION, size_exponent,
    },
    scorer::CANDIDATE_WINDOW,
};

/// Reset vector written into every synthetic image.
pub const RESET_VECTOR: u16 = 0x8000;

const RESET_VECTOR_AT: usize = 0xfc;
const UNMAPPED: u8 = 0xff;

/// Writes every decodable field of `header` at `header.offset` in `image`.
pub fn encode_header(header: &RomHeader, image: &mut [u8]) -> Result<(), DecodeError> {
    let offset = header.offset;
    let len = image.len();
    let window = offset
        .checked_add(CANDIDATE_WINDOW)
        .and_then(|end| image.get_mut(offset..end))
        .ok_or_else(|| DecodeError::Truncated {
            offset,
            required: offset.saturating_add(CANDIDATE_WINDOW),
            actual: len,
        })?;

    let title = &mut window[TITLE..TITLE + TITLE_LEN];
    title.fill(b' ');
    let name = header.name.as_bytes();
    let name = &name[..name.len().min(TITLE_LEN)];
    title[..name.len()].copy_from_slice(name);

    let extended = &mut window[EXTENDED_TITLE..TITLE];
    extended.fill(0);
    if let Some(text) = &header.extended {
        let text = text.as_bytes();
        let text = &text[..text.len().min(extended.len())];
        extended[..text.len()].copy_from_slice(text);
    }

    window[MODE] = header.layout.to_mode_byte();
    window[CART_TYPE] = header.cart_type.to_type_byte().unwrap_or(UNMAPPED);
    window[ROM_SIZE] = size_exponent(header.rom_size).unwrap_or(UNMAPPED);
    window[RAM_SIZE] = size_exponent(header.ram_size).unwrap_or(UNMAPPED);
    window[DESTINATION] = header.destination_code;
    window[LICENSEE] = header.licensee_code;
    window[VERSION] = header.version_number;
    window[CHECKSUM_COMPLEMENT..CHECKSUM_COMPLEMENT + 2]
        .copy_from_slice(&header.checksum_complement.to_le_bytes());
    window[CHECKSUM..CHECKSUM + 2].copy_from_slice(&header.checksum.to_le_bytes());
    window[RESERVED..RESERVED + 4].copy_from_slice(&header.unknown1.to_be_bytes());
    window[RESET_VECTOR_AT..RESET_VECTOR_AT + 2].copy_from_slice(&RESET_VECTOR.to_le_bytes());

    Ok(())
}

/// Allocates a zeroed image of `len` bytes and encodes `header` into it.
pub fn build_image(header: &RomHeader, len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut image = vec![0u8; len];
    encode_header(header, &mut image)?;
    Ok(image)
}
