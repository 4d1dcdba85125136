//! Super Famicom / SNES cartridge header identification.
//!
//! Images come with or without a 512 byte copier header, and keep their
//! internal header at one of two mapping-dependent locations. [`decode_header`]
//! works out both from the bytes alone:
//!
//! 1. [`presence`] classifies the copier header from the image length.
//! 2. [`scorer`] rates both candidate locations and picks one.
//! 3. [`header`] decodes the fields at the chosen offset.
//!
//! Every call is a pure function of its inputs.

use tracing::debug;

pub mod error;
pub mod fixture;
pub mod header;
pub mod presence;
pub mod scorer;

pub use error::DecodeError;
pub use header::{CartType, Layout, Region, RomHeader};
pub use presence::HeaderPresence;
pub use scorer::{Location, MappingMode, Scores};

/// Locates and decodes the internal header of one image.
///
/// `declared_size` is the image length as measured by the caller and drives
/// the copier header classification and the size heuristics. Field reads are
/// bounds checked against `bytes`.
pub fn decode_header(
    filename: &str,
    bytes: &[u8],
    declared_size: u64,
) -> Result<RomHeader, DecodeError> {
    if declared_size != bytes.len() as u64 {
        debug!(
            declared_size,
            actual = bytes.len(),
            "declared size differs from buffer length"
        );
    }
    let location = scorer::locate(bytes, declared_size)?;
    RomHeader::decode_at(filename, bytes, location.offset, location.mode)
}

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    use super::*;

    #[ctor]
    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_file(true)
            .with_line_number(true)
            .with_max_level(Level::DEBUG)
            .pretty()
            .finish();
        tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
    }

    #[test]
    fn zeroed_lorom_scenario() {
        let mut bytes = vec![0u8; 32_768];
        bytes[0x7fd5] = 0x00;
        bytes[0x7ffd] = 0x80;

        let header = decode_header("zero.sfc", &bytes, 32_768).expect("decodes");
        assert_eq!(header.offset, 0x7f00);
        assert_eq!(header.mapping, Some(MappingMode::LoRom));
        assert_eq!(header.layout, Layout::LOROM);
        assert_eq!(header.cart_type, CartType::ROM);
        assert_eq!(header.rom_size, 1);
        assert_eq!(header.region, Region::Ntsc);
    }

    #[test]
    fn headered_scenario_shifts_offset() {
        let mut bytes = vec![0u8; 33_280];
        bytes[0x7ffd + 0x200] = 0x80;

        let header = decode_header("zero.smc", &bytes, 33_280).expect("decodes");
        assert_eq!(header.offset, 0x8100);
    }

    #[test]
    fn unrecognized_size_fails_before_decoding() {
        let bytes = vec![0u8; 32_769];
        assert_eq!(
            decode_header("odd.sfc", &bytes, 32_769),
            Err(DecodeError::UnrecognizedSize { length: 32_769 })
        );
    }

    #[test]
    fn small_image_is_truncated() {
        // LoROM wins on zeroes, but its header lies past the end of 1 KiB.
        let bytes = vec![0u8; 1024];
        assert_eq!(
            decode_header("tiny.sfc", &bytes, 1024),
            Err(DecodeError::Truncated {
                offset: 0x7f00,
                required: 0x7fe4,
                actual: 1024,
            })
        );
    }
}
