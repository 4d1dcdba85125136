use bitflags::bitflags;

bitflags! {
    /// Mapping flags decoded from the mode byte.
    ///
    /// Bit values follow the numeric output of existing tooling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Layout: u8 {
        const LOROM = 0b0000_0001;
        const HIROM = 0b0000_0010;
        const FAST  = 0b0000_0100;
    }
}

const MODE_HIROM_BIT: u8 = 0x01;
const MODE_FAST_BIT: u8 = 0x10;

impl Layout {
    /// LoROM and HiROM are mutually exclusive; FAST is independent.
    pub fn from_mode_byte(mode: u8) -> Self {
        let mut layout = if mode & MODE_HIROM_BIT != 0 {
            Self::HIROM
        } else {
            Self::LOROM
        };
        if mode & MODE_FAST_BIT != 0 {
            layout |= Self::FAST;
        }
        layout
    }

    /// Canonical mode byte that decodes back to this layout.
    pub fn to_mode_byte(self) -> u8 {
        let mut mode = 0x20;
        if self.contains(Self::HIROM) {
            mode |= MODE_HIROM_BIT;
        }
        if self.contains(Self::FAST) {
            mode |= MODE_FAST_BIT;
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_common_mode_bytes() {
        assert_eq!(Layout::from_mode_byte(0x20), Layout::LOROM);
        assert_eq!(Layout::from_mode_byte(0x21), Layout::HIROM);
        assert_eq!(Layout::from_mode_byte(0x30), Layout::LOROM | Layout::FAST);
        assert_eq!(Layout::from_mode_byte(0x31), Layout::HIROM | Layout::FAST);
        assert_eq!(Layout::from_mode_byte(0x23), Layout::HIROM);
    }

    #[test]
    fn lorom_and_hirom_never_coexist() {
        for mode in 0..=u8::MAX {
            let layout = Layout::from_mode_byte(mode);
            assert!(layout.contains(Layout::LOROM) ^ layout.contains(Layout::HIROM));
        }
    }
}
