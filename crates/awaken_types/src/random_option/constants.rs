//! Bit layout constants of the packed random-option id

/// Maximum number of option slots in one packed id
pub const MAX_RANDOM_OPTION: usize = 3;

/// Bit 61: options are sealed and must not be decoded
pub const SAFE_FLAG: u64 = 0x2000_0000_0000_0000;

/// Mask of one 18-bit option slot
pub const OPTION_MASK: u64 = 0x3_FFFF;

/// Bit offset of the first option slot (bits 0..8 are reserved)
pub const FIRST_SLOT_SHIFT: u32 = 8;

/// Width of one option slot in bits
pub const SLOT_BITS: u32 = 18;

/// Width of the adjustment field inside a slot
pub const ADJ_BITS: u32 = 10;

/// Mask of the adjustment field inside a slot
pub const ADJ_MASK: u32 = 0x3FF;

/// Baseline the adjustment is measured against (`adj = 512 - adj_raw`)
pub const MAX_AWAKE_VALUE: i32 = 512;
