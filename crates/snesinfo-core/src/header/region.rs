use strum::Display;

/// Video standard implied by the destination code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Region {
    #[strum(serialize = "invalid")]
    Invalid,
    #[strum(serialize = "NTSC")]
    Ntsc,
    #[strum(serialize = "PAL")]
    Pal,
}

impl Region {
    pub fn from_destination(code: u8) -> Self {
        match code {
            0x00 | 0x01 | 0x0d => Self::Ntsc,
            0x02..=0x0c => Self::Pal,
            _ => Self::Invalid,
        }
    }

    /// Numeric code used by query output (0 invalid, 1 NTSC, 2 PAL).
    pub fn code(self) -> u8 {
        match self {
            Self::Invalid => 0,
            Self::Ntsc => 1,
            Self::Pal => 2,
        }
    }
}
