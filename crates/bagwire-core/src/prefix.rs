//! Atom Prefix Byte
//!
//! The first byte of every atom classifies it structurally. Three bit-disjoint
//! fields cover the whole byte:
//!
//! ```text
//! ┌───────────┬────────────────┬─────────────┐
//! │ AtomType  │ Level          │ HeaderType  │
//! │ bits 7-6  │ bits 5-2       │ bits 1-0    │
//! └───────────┴────────────────┴─────────────┘
//! ```
//!
//! [`BagOptions`] is a fourth window over the same low two bits, read on
//! bag-boundary atoms where no header sub-type applies.
//!
//! Every field decodes *totally*: any of the 256 byte values yields some
//! variant for each field (decoding is a plain bit-window read, never an
//! error). The only validated construction is [`Level::new`], which rejects
//! integers the 4-bit window cannot hold.

use crate::error::{Error, Result};

/// A contiguous bit window within the prefix byte. All field accessors are
/// the same mask-and-shift read/write; each field supplies its window.
#[derive(Debug, Clone, Copy)]
struct BitField {
    mask: u8,
    shift: u8,
}

impl BitField {
    const fn read(self, byte: u8) -> u8 {
        (byte & self.mask) >> self.shift
    }

    const fn write(self, value: u8) -> u8 {
        (value << self.shift) & self.mask
    }

    /// True iff the window's bits in `byte` equal `encoded` exactly.
    const fn matches(self, encoded: u8, byte: u8) -> bool {
        byte & self.mask == encoded
    }
}

const ATOM_TYPE_FIELD: BitField = BitField { mask: 0xC0, shift: 6 };
const LEVEL_FIELD: BitField = BitField { mask: 0x3C, shift: 2 };
const HEADER_TYPE_FIELD: BitField = BitField { mask: 0x03, shift: 0 };
const BAG_OPTIONS_FIELD: BitField = BitField { mask: 0x03, shift: 0 };

/// Structural role of an atom, from the top two bits of its prefix byte.
///
/// All four 2-bit patterns are defined; there is no invalid atom type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AtomType {
    /// Names a bag or field within the current bag.
    Header = 0,
    /// Opens a nested bag; subsequent atoms belong to the child.
    BagOpen = 1,
    /// Closes the current bag, returning to its parent.
    BagClose = 2,
    /// Carries an opaque data payload.
    Data = 3,
}

impl AtomType {
    pub const ALL: [AtomType; 4] = [
        AtomType::Header,
        AtomType::BagOpen,
        AtomType::BagClose,
        AtomType::Data,
    ];

    pub fn from_byte(byte: u8) -> AtomType {
        match ATOM_TYPE_FIELD.read(byte) {
            0 => AtomType::Header,
            1 => AtomType::BagOpen,
            2 => AtomType::BagClose,
            _ => AtomType::Data,
        }
    }

    /// This variant's bits, positioned in its window, all other bits zero.
    pub fn byte_value(self) -> u8 {
        ATOM_TYPE_FIELD.write(self as u8)
    }

    /// True iff `byte`'s atom-type bits are exactly this variant.
    pub fn matches(self, byte: u8) -> bool {
        ATOM_TYPE_FIELD.matches(self.byte_value(), byte)
    }
}

/// Number of distinct levels representable in the prefix byte.
pub const LEVELS: u8 = 16;

/// Nesting/importance tier of a bag, from the middle four bits of the prefix
/// byte. Lower levels are more important and survive truncation longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u8);

impl Level {
    /// Build a level, rejecting integers outside `[0, LEVELS)`.
    pub fn new(level: u8) -> Result<Level> {
        if Level::is_valid(level) {
            Ok(Level(level))
        } else {
            Err(Error::InvalidLevel(level))
        }
    }

    pub fn is_valid(level: u8) -> bool {
        level < LEVELS
    }

    /// Decode a level from a prefix byte. Total: any byte yields a level.
    pub fn from_byte(byte: u8) -> Level {
        Level(LEVEL_FIELD.read(byte))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn byte_value(self) -> u8 {
        LEVEL_FIELD.write(self.0)
    }

    pub fn matches(self, byte: u8) -> bool {
        LEVEL_FIELD.matches(self.byte_value(), byte)
    }
}

/// Flavor of a header atom, from the bottom two bits of the prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HeaderType {
    /// Field addressed by numeric index.
    Indexed = 0,
    /// Field addressed by arbitrary key bytes.
    Keyed = 1,
    /// Field value carried inline in the header atom itself.
    Inline = 2,
    /// Defined fallback for patterns this version does not assign.
    Unknown = 3,
}

impl HeaderType {
    pub const ALL: [HeaderType; 4] = [
        HeaderType::Indexed,
        HeaderType::Keyed,
        HeaderType::Inline,
        HeaderType::Unknown,
    ];

    pub fn from_byte(byte: u8) -> HeaderType {
        match HEADER_TYPE_FIELD.read(byte) {
            0 => HeaderType::Indexed,
            1 => HeaderType::Keyed,
            2 => HeaderType::Inline,
            _ => HeaderType::Unknown,
        }
    }

    pub fn byte_value(self) -> u8 {
        HEADER_TYPE_FIELD.write(self as u8)
    }

    pub fn matches(self, byte: u8) -> bool {
        HEADER_TYPE_FIELD.matches(self.byte_value(), byte)
    }
}

/// Per-bag option flags, read from the low two bits of bag-boundary atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BagOptions {
    /// The bag exceeded its size budget and was truncated.
    pub overflowed: bool,
    /// Children of this bag merge by set-union rather than replacement.
    pub merge_children: bool,
}

const OVERFLOWED_BIT: u8 = 0x01;
const MERGE_CHILDREN_BIT: u8 = 0x02;

impl BagOptions {
    pub fn from_byte(byte: u8) -> BagOptions {
        let bits = BAG_OPTIONS_FIELD.read(byte);
        BagOptions {
            overflowed: bits & OVERFLOWED_BIT != 0,
            merge_children: bits & MERGE_CHILDREN_BIT != 0,
        }
    }

    pub fn byte_value(self) -> u8 {
        let mut bits = 0;
        if self.overflowed {
            bits |= OVERFLOWED_BIT;
        }
        if self.merge_children {
            bits |= MERGE_CHILDREN_BIT;
        }
        BAG_OPTIONS_FIELD.write(bits)
    }

    pub fn matches(self, byte: u8) -> bool {
        BAG_OPTIONS_FIELD.matches(self.byte_value(), byte)
    }
}

/// Every field of one prefix byte, decoded at once.
///
/// Which fields are meaningful depends on `atom_type`: `header_type` applies
/// to [`AtomType::Header`] atoms, `bag_options` to bag boundaries. Decoding
/// reads all windows regardless; interpreting them is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomPrefix {
    pub atom_type: AtomType,
    pub level: Level,
    pub header_type: HeaderType,
    pub bag_options: BagOptions,
}

/// Decode all prefix fields of `byte`. Total over the byte domain.
pub fn classify(byte: u8) -> AtomPrefix {
    AtomPrefix {
        atom_type: AtomType::from_byte(byte),
        level: Level::from_byte(byte),
        header_type: HeaderType::from_byte(byte),
        bag_options: BagOptions::from_byte(byte),
    }
}
