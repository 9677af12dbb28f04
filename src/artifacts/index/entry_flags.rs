use bitflags::bitflags;

/// Declared name length value meaning "too long to record, scan for the terminator"
pub const NAME_LENGTH_UNKNOWN: u16 = 0x0FFF;

bitflags! {
    /// 16-bit flags word stored after the object ID of every index entry
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EntryFlags: u16 {
        const ASSUME_VALID = 0x8000;
        const EXTENDED = 0x4000;
        const STAGE = 0x3000;
        const NAME_LENGTH = NAME_LENGTH_UNKNOWN;
    }
}

impl EntryFlags {
    /// Keep every bit, including the length field, exactly as stored
    pub fn from_raw(raw: u16) -> Self {
        Self::from_bits_retain(raw)
    }

    /// Name length recorded in the low 12 bits
    ///
    /// Only meaningful below `NAME_LENGTH_UNKNOWN`; longer paths saturate at that value.
    pub fn declared_name_len(&self) -> u16 {
        self.bits() & NAME_LENGTH_UNKNOWN
    }

    /// Merge stage: 0 for a normal entry, 1-3 during a conflicted merge
    pub fn stage(&self) -> u8 {
        ((self.bits() & Self::STAGE.bits()) >> 12) as u8
    }
}

bitflags! {
    /// Second flags word, present in version 3 entries that set `EntryFlags::EXTENDED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ExtendedFlags: u16 {
        const SKIP_WORKTREE = 0x4000;
        const INTENT_TO_ADD = 0x2000;
    }
}

impl ExtendedFlags {
    pub fn from_raw(raw: u16) -> Self {
        Self::from_bits_retain(raw)
    }
}
