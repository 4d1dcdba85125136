//! Header location heuristics.
//!
//! A cartridge image carries its internal header at one of two places,
//! depending on how the board maps ROM into the address space. Neither the
//! file nor the header says which one applies, so both candidates are scored
//! against a fixed rubric and the more plausible one wins.
//!
//! The rubric is kept as data ([`LOROM_RUBRIC`], [`HIROM_RUBRIC`]) so every
//! row can be audited and tested on its own. Weights, thresholds and even the
//! rows that can never fire are kept exactly as existing tooling applies them;
//! changing any of them shifts which offset known ROM sets resolve to.

use std::cmp::Ordering;

use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, trace, warn};

use crate::{error::DecodeError, presence::HeaderPresence};

/// Base offset used when both candidates score the same.
///
/// Existing tooling never picks a mode on a tie and falls back to offset zero
/// (plus the copier header adjustment). Kept for output compatibility.
pub const TIE_BASE_OFFSET: usize = 0;

/// Width of the window each candidate is scored over.
pub const CANDIDATE_WINDOW: usize = 0x100;

const MIB: u64 = 1024 * 1024;

/// Memory mapping convention, which decides where the header lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MappingMode {
    #[strum(serialize = "LoROM")]
    LoRom,
    #[strum(serialize = "HiROM")]
    HiRom,
}

impl MappingMode {
    /// Start of the candidate window in a bare image.
    pub const fn base_offset(self) -> usize {
        match self {
            Self::LoRom => 0x7f00,
            Self::HiRom => 0xff00,
        }
    }

    /// Rubric rows applied to this candidate.
    pub fn rubric(self) -> &'static [Rule] {
        match self {
            Self::LoRom => LOROM_RUBRIC,
            Self::HiRom => HIROM_RUBRIC,
        }
    }
}

/// Read-only view over the bytes a candidate is scored on.
///
/// Offsets are relative to the candidate base. Positions past the end of the
/// buffer read as zero so that small images can still be scored.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    bytes: &'a [u8],
    base: usize,
    image_len: u64,
}

impl<'a> Candidate<'a> {
    pub fn new(
        bytes: &'a [u8],
        mode: MappingMode,
        presence: HeaderPresence,
        image_len: u64,
    ) -> Self {
        Self {
            bytes,
            base: mode.base_offset() + presence.adjustment(),
            image_len,
        }
    }

    /// Absolute offset of the window in the buffer.
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn byte(&self, rel: u8) -> u8 {
        self.bytes
            .get(self.base + usize::from(rel))
            .copied()
            .unwrap_or(0)
    }
}

/// Byte pattern tested by a rubric row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `B[at] & mask == value`.
    Masked { at: u8, mask: u8, value: u8 },
    /// `B[at] & mask < limit`.
    MaskedBelow { at: u8, mask: u8, limit: u8 },
    /// Every listed byte is strictly greater than its threshold.
    AllAbove(&'static [(u8, u8)]),
    /// Every listed pair adds up to `0xff` in 8-bit arithmetic.
    Complements(&'static [(u8, u8)]),
    /// Like [`Condition::Complements`], and every byte in `nonzero` is set.
    ComplementsNonZero {
        pairs: &'static [(u8, u8)],
        nonzero: &'static [u8],
    },
    /// Total image length, copier header included, is at most this many bytes.
    ImageAtMost(u64),
    /// Total image length, copier header included, exceeds this many bytes.
    ImageAbove(u64),
    /// `1 << (B[at] - 7) > limit`, with a wrapping byte subtraction and a
    /// signed 64-bit shift that yields zero once the shift reaches 64.
    RomSizeExponentAbove { at: u8, limit: i64 },
    /// Some byte in `B[at..at + len]` is outside printable ASCII (32..=126).
    NotPrintable { at: u8, len: u8 },
}

impl Condition {
    pub fn holds(&self, candidate: &Candidate<'_>) -> bool {
        match *self {
            Self::Masked { at, mask, value } => candidate.byte(at) & mask == value,
            Self::MaskedBelow { at, mask, limit } => candidate.byte(at) & mask < limit,
            Self::AllAbove(bounds) => bounds
                .iter()
                .all(|&(at, threshold)| candidate.byte(at) > threshold),
            Self::Complements(pairs) => complements(candidate, pairs),
            Self::ComplementsNonZero { pairs, nonzero } => {
                complements(candidate, pairs) && nonzero.iter().all(|&at| candidate.byte(at) != 0)
            }
            Self::ImageAtMost(limit) => candidate.image_len <= limit,
            Self::ImageAbove(limit) => candidate.image_len > limit,
            Self::RomSizeExponentAbove { at, limit } => {
                let shift = u32::from(candidate.byte(at).wrapping_sub(7));
                1i64.checked_shl(shift).unwrap_or(0) > limit
            }
            Self::NotPrintable { at, len } => {
                (0..len).any(|i| !is_printable(candidate.byte(at.wrapping_add(i))))
            }
        }
    }
}

fn complements(candidate: &Candidate<'_>, pairs: &[(u8, u8)]) -> bool {
    pairs
        .iter()
        .all(|&(a, b)| candidate.byte(a).wrapping_add(candidate.byte(b)) == 0xff)
}

fn is_printable(byte: u8) -> bool {
    (32..=126).contains(&byte)
}

/// One weighted row of a rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub label: &'static str,
    pub condition: Condition,
    pub weight: i32,
}

impl Rule {
    /// Weight contributed by this row for the candidate (zero when it does not fire).
    pub fn score(&self, candidate: &Candidate<'_>) -> i32 {
        if self.condition.holds(candidate) {
            trace!(
                rule = self.label,
                weight = self.weight,
                base = candidate.base(),
                "rubric rule fired"
            );
            self.weight
        } else {
            0
        }
    }
}

const fn rule(label: &'static str, condition: Condition, weight: i32) -> Rule {
    Rule {
        label,
        condition,
        weight,
    }
}

const MODE_BYTE: u8 = 0xd5;
const ROM_SIZE_BYTE: u8 = 0xd7;
const LICENSEE_BYTE: u8 = 0xda;
const RESET_VECTOR_HIGH: u8 = 0xfd;
const RESET_VECTOR_LOW: u8 = 0xfc;

pub const LOROM_RUBRIC: &[Rule] = &[
    rule(
        "mapping bit clear",
        Condition::Masked {
            at: MODE_BYTE,
            mask: 0x01,
            value: 0x00,
        },
        3,
    ),
    rule(
        "SA-1 mode byte",
        Condition::Masked {
            at: MODE_BYTE,
            mask: 0xff,
            value: 0x23,
        },
        2,
    ),
    rule(
        "checksum complements",
        Condition::Complements(&[(0xdc, 0xde), (0xdd, 0xdf)]),
        2,
    ),
    rule(
        "checksum present",
        Condition::ComplementsNonZero {
            pairs: &[(0xdc, 0xde), (0xdd, 0xdf)],
            nonzero: &[0xde, 0xdf],
        },
        1,
    ),
    rule(
        "extended licensee marker",
        Condition::Masked {
            at: LICENSEE_BYTE,
            mask: 0xff,
            value: 0x33,
        },
        2,
    ),
    rule(
        "low ROM type nibble",
        Condition::MaskedBelow {
            at: MODE_BYTE,
            mask: 0x0f,
            limit: 4,
        },
        2,
    ),
    rule(
        "reset vector outside ROM",
        Condition::Masked {
            at: RESET_VECTOR_HIGH,
            mask: 0x80,
            value: 0x00,
        },
        -6,
    ),
    rule(
        "reset vector too high",
        Condition::AllAbove(&[(RESET_VECTOR_LOW, 0xb0), (RESET_VECTOR_HIGH, 0xb0)]),
        -2,
    ),
    rule("image fits LoROM", Condition::ImageAtMost(16 * MIB), 2),
    rule(
        "declared ROM size implausible",
        Condition::RomSizeExponentAbove {
            at: ROM_SIZE_BYTE,
            limit: 48,
        },
        -1,
    ),
    rule(
        "maker block not ASCII",
        Condition::NotPrintable { at: 0xb0, len: 6 },
        -1,
    ),
    rule(
        "title not ASCII",
        Condition::NotPrintable { at: 0xc0, len: 22 },
        -1,
    ),
];

pub const HIROM_RUBRIC: &[Rule] = &[
    rule(
        "mapping bit set",
        Condition::Masked {
            at: MODE_BYTE,
            mask: 0x01,
            value: 0x01,
        },
        2,
    ),
    rule(
        "SA-1 mode byte",
        Condition::Masked {
            at: MODE_BYTE,
            mask: 0xff,
            value: 0x23,
        },
        -2,
    ),
    rule(
        "space before mode byte",
        Condition::Masked {
            at: 0xd4,
            mask: 0xff,
            value: 0x20,
        },
        2,
    ),
    rule(
        "checksum complements",
        Condition::Complements(&[(0xdd, 0xdf), (0xdc, 0xde)]),
        2,
    ),
    rule(
        "checksum present",
        Condition::ComplementsNonZero {
            pairs: &[(0xdd, 0xdf), (0xdc, 0xde)],
            nonzero: &[0xde, 0xdf],
        },
        1,
    ),
    rule(
        "extended licensee marker",
        Condition::Masked {
            at: LICENSEE_BYTE,
            mask: 0xff,
            value: 0x33,
        },
        2,
    ),
    rule(
        "low ROM type nibble",
        Condition::MaskedBelow {
            at: MODE_BYTE,
            mask: 0x0f,
            limit: 4,
        },
        2,
    ),
    rule(
        "reset vector outside ROM",
        Condition::Masked {
            at: RESET_VECTOR_HIGH,
            mask: 0x80,
            value: 0x00,
        },
        -6,
    ),
    // A byte is never above 0xff, so this row cannot fire.
    rule(
        "reset vector too high",
        Condition::AllAbove(&[(RESET_VECTOR_HIGH, 0xff), (RESET_VECTOR_LOW, 0xb0)]),
        -2,
    ),
    rule("image large enough for HiROM", Condition::ImageAbove(3 * MIB), 4),
    rule(
        "declared ROM size implausible",
        Condition::RomSizeExponentAbove {
            at: ROM_SIZE_BYTE,
            limit: 48,
        },
        -1,
    ),
    rule(
        "maker block not ASCII",
        Condition::NotPrintable { at: 0xb0, len: 6 },
        -1,
    ),
    rule(
        "title not ASCII",
        Condition::NotPrintable { at: 0xc0, len: 22 },
        -1,
    ),
];

/// Plausibility of each candidate location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scores {
    pub lorom: i32,
    pub hirom: i32,
}

impl Scores {
    pub fn get(&self, mode: MappingMode) -> i32 {
        match mode {
            MappingMode::LoRom => self.lorom,
            MappingMode::HiRom => self.hirom,
        }
    }

    /// Strictly higher scoring mode, `None` on a tie.
    pub fn winner(&self) -> Option<MappingMode> {
        match self.lorom.cmp(&self.hirom) {
            Ordering::Greater => Some(MappingMode::LoRom),
            Ordering::Less => Some(MappingMode::HiRom),
            Ordering::Equal => None,
        }
    }

    /// Base offset of the winner before the copier header adjustment.
    pub fn base_offset(&self) -> usize {
        self.winner()
            .map_or(TIE_BASE_OFFSET, MappingMode::base_offset)
    }
}

/// Sums a rubric over one candidate.
pub fn score(candidate: &Candidate<'_>, rubric: &[Rule]) -> i32 {
    rubric.iter().map(|rule| rule.score(candidate)).sum()
}

pub fn score_candidates(bytes: &[u8], image_len: u64, presence: HeaderPresence) -> Scores {
    let mut scores = Scores { lorom: 0, hirom: 0 };
    for mode in MappingMode::iter() {
        let candidate = Candidate::new(bytes, mode, presence, image_len);
        let value = score(&candidate, mode.rubric());
        match mode {
            MappingMode::LoRom => scores.lorom = value,
            MappingMode::HiRom => scores.hirom = value,
        }
    }
    scores
}

/// Outcome of classifying and scoring one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub presence: HeaderPresence,
    pub scores: Scores,
    /// Winning mode, `None` when the scores tie.
    pub mode: Option<MappingMode>,
    /// Absolute header offset in the buffer.
    pub offset: usize,
}

/// Classifies the image and picks the header offset.
pub fn locate(bytes: &[u8], image_len: u64) -> Result<Location, DecodeError> {
    let presence = HeaderPresence::classify(image_len)?;
    let scores = score_candidates(bytes, image_len, presence);
    let mode = scores.winner();
    let offset = scores.base_offset() + presence.adjustment();

    debug!(
        ?presence,
        lorom = scores.lorom,
        hirom = scores.hirom,
        offset = format_args!("{offset:#x}"),
        "scored header candidates"
    );
    if mode.is_none() {
        warn!(
            score = scores.lorom,
            offset = format_args!("{offset:#x}"),
            "candidate scores tie, falling back to the tie offset"
        );
    }

    Ok(Location {
        presence,
        scores,
        mode,
        offset,
    })
}
