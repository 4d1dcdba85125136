use bitflags::bitflags;

bitflags! {
    /// Hardware present on the cartridge board.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CartType: u8 {
        const ROM     = 0b0000_0001;
        const RAM     = 0b0000_0010;
        const BATTERY = 0b0000_0100;
        const SA1     = 0b0000_1000;
        const SUPERFX = 0b0001_0000;
    }
}

/// Known cartridge type bytes. The first entry for a combination is the
/// canonical encoding.
const CART_TYPES: &[(u8, CartType)] = &[
    (0x00, CartType::ROM),
    (0x01, CartType::ROM.union(CartType::RAM)),
    (0x02, CartType::ROM.union(CartType::RAM).union(CartType::BATTERY)),
    (0x13, CartType::ROM.union(CartType::SUPERFX)),
    (0x14, CartType::ROM.union(CartType::SUPERFX)),
    (0x15, CartType::ROM.union(CartType::RAM).union(CartType::SUPERFX)),
    (
        0x1a,
        CartType::ROM
            .union(CartType::RAM)
            .union(CartType::BATTERY)
            .union(CartType::SUPERFX),
    ),
    (0x34, CartType::ROM.union(CartType::RAM).union(CartType::SA1)),
    (
        0x35,
        CartType::ROM
            .union(CartType::RAM)
            .union(CartType::BATTERY)
            .union(CartType::SA1),
    ),
];

impl CartType {
    /// Unknown bytes decode to an empty set rather than an error.
    pub fn from_type_byte(byte: u8) -> Self {
        CART_TYPES
            .iter()
            .find(|(code, _)| *code == byte)
            .map_or(Self::empty(), |&(_, flags)| flags)
    }

    /// Byte that decodes to exactly this set, if any.
    pub fn to_type_byte(self) -> Option<u8> {
        CART_TYPES
            .iter()
            .find(|(_, flags)| *flags == self)
            .map(|&(code, _)| code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_backed_ram() {
        assert_eq!(
            CartType::from_type_byte(0x02),
            CartType::ROM | CartType::RAM | CartType::BATTERY
        );
    }

    #[test]
    fn unmapped_byte_has_no_flags() {
        assert!(CartType::from_type_byte(0x99).is_empty());
        assert!(CartType::from_type_byte(0x03).is_empty());
    }

    #[test]
    fn both_superfx_rom_bytes_decode_alike() {
        assert_eq!(
            CartType::from_type_byte(0x13),
            CartType::from_type_byte(0x14)
        );
        assert_eq!(
            (CartType::ROM | CartType::SUPERFX).to_type_byte(),
            Some(0x13)
        );
    }

    #[test]
    fn coprocessor_variants() {
        assert_eq!(
            CartType::from_type_byte(0x1a),
            CartType::ROM | CartType::RAM | CartType::BATTERY | CartType::SUPERFX
        );
        assert_eq!(
            CartType::from_type_byte(0x34),
            CartType::ROM | CartType::RAM | CartType::SA1
        );
        assert_eq!(
            CartType::from_type_byte(0x35),
            CartType::ROM | CartType::RAM | CartType::BATTERY | CartType::SA1
        );
    }

    #[test]
    fn sets_without_a_byte_cannot_be_encoded() {
        assert_eq!(CartType::empty().to_type_byte(), None);
        assert_eq!((CartType::RAM | CartType::SA1).to_type_byte(), None);
    }
}
