use crate::error::InvalidBitWidth;

/// The width of a fixed-size integer field or of a length prefix.
///
/// Only the four widths the wire format supports can be constructed, so an out-of-range width
/// can never reach an encode or decode call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BitWidth {
    /// 1 byte
    U8,
    /// 2 bytes, little-endian
    U16,
    /// 4 bytes, little-endian
    U32,
    /// 8 bytes, little-endian
    U64,
}

impl BitWidth {
    /// All supported widths, narrowest first.
    pub const ALL: [BitWidth; 4] = [Self::U8, Self::U16, Self::U32, Self::U64];

    /// Converts a bit count to a `BitWidth`.
    ///
    /// # Panics
    /// Panics if `bits` is not 8, 16, 32 or 64. Use `BitWidth::try_from` when the width comes
    /// from untrusted input.
    #[track_caller]
    pub fn from_bits(bits: u8) -> Self {
        match Self::try_from(bits) {
            Ok(width) => width,
            Err(e) => panic!("{e}"),
        }
    }

    /// Number of bits: 8, 16, 32 or 64.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::U32 => 32,
            Self::U64 => 64,
        }
    }

    /// Number of bytes the field occupies on the wire.
    #[inline(always)]
    pub const fn byte_len(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// The largest value representable in this width, `2^bits - 1`. For a length prefix this
    /// is also the longest payload that can be encoded.
    #[inline(always)]
    pub const fn max_value(self) -> u64 {
        u64::MAX >> (64 - self.bits())
    }

    /// Discards the bits of `value` that do not fit in this width (`value mod 2^bits`).
    #[inline(always)]
    pub const fn narrow(self, value: u64) -> u64 {
        value & self.max_value()
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = InvalidBitWidth;

    fn try_from(bits: u8) -> Result<Self, InvalidBitWidth> {
        match bits {
            8 => Ok(Self::U8),
            16 => Ok(Self::U16),
            32 => Ok(Self::U32),
            64 => Ok(Self::U64),
            _ => Err(InvalidBitWidth(bits)),
        }
    }
}

impl From<BitWidth> for u8 {
    fn from(width: BitWidth) -> u8 {
        width.bits() as u8
    }
}
