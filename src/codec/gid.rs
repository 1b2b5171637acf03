//! Tile identifier flag handling.
//!
//! The four high bits of every 32-bit tile record carry orientation flags;
//! the low 28 bits are the global tile identifier (0 = no tile).

use bitflags::bitflags;

bitflags! {
    /// Orientation flags stored in the high bits of a tile record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TileFlags: u32 {
        const FLIPPED_HORIZONTALLY = 0x8000_0000;
        const FLIPPED_VERTICALLY = 0x4000_0000;
        const FLIPPED_DIAGONALLY = 0x2000_0000;
        /// Hexagonal 120 degree rotation
        const ROTATED_HEXAGONAL_120 = 0x1000_0000;
    }
}

/// Bits left for the identifier once all flags are cleared
pub const GID_MASK: u32 = !TileFlags::all().bits();

/// Strip the orientation flags, leaving the bare tile identifier.
pub const fn clear(raw: u32) -> u32 {
    raw & GID_MASK
}

/// Orientation flags set on a raw tile record.
pub const fn flags(raw: u32) -> TileFlags {
    TileFlags::from_bits_truncate(raw)
}

/// Split a raw record into its identifier and flags.
pub const fn split(raw: u32) -> (u32, TileFlags) {
    (clear(raw), flags(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_horizontal_flip() {
        assert_eq!(clear(0x8000_0005), 0x0000_0005);
    }

    #[test]
    fn test_clear_is_idempotent_under_mask() {
        for x in [0u32, 1, 5, 0x0FFF_FFFF, 0x1234_5678, 0xF000_0000, u32::MAX] {
            assert_eq!(clear(x), clear(x) & 0x0FFF_FFFF);
            assert_eq!(clear(x | 0xF000_0000), clear(x));
        }
    }

    #[test]
    fn test_flags() {
        let (gid, f) = split(0xA000_0010);
        assert_eq!(gid, 0x10);
        assert!(f.contains(TileFlags::FLIPPED_HORIZONTALLY));
        assert!(f.contains(TileFlags::FLIPPED_DIAGONALLY));
        assert!(!f.contains(TileFlags::FLIPPED_VERTICALLY));
        assert!(flags(0x0FFF_FFFF).is_empty());
        assert_eq!(flags(0xF000_0000), TileFlags::all());
    }
}
