//! Frame header fields consumed by the pixel pipeline.

use serde::{Deserialize, Serialize};

/// Magic number of a big-endian DPX file (`SDPX`).
pub const DPX_MAGIC_BE: [u8; 4] = *b"SDPX";
/// Magic number of a little-endian DPX file (`XPDS`).
pub const DPX_MAGIC_LE: [u8; 4] = *b"XPDS";

/// Byte order of the 32-bit words in a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    /// Words are stored most significant byte first (`SDPX`).
    #[default]
    Big,
    /// Words are stored least significant byte first (`XPDS`).
    Little,
}

impl ByteOrder {
    /// Detects the byte order from a DPX magic number.
    #[must_use]
    pub fn from_magic(magic: [u8; 4]) -> Option<Self> {
        match magic {
            DPX_MAGIC_BE => Some(Self::Big),
            DPX_MAGIC_LE => Some(Self::Little),
            _ => None,
        }
    }

    /// Returns a 4-byte word in packing order (most significant byte first).
    #[inline]
    #[must_use]
    pub const fn normalize(self, word: [u8; 4]) -> [u8; 4] {
        match self {
            Self::Big => word,
            Self::Little => [word[3], word[2], word[1], word[0]],
        }
    }
}

/// Header fields of a single frame, as reported by the container reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    /// Container magic number, as found at the start of the file.
    pub magic: [u8; 4],
    /// Byte order of the pixel words.
    pub byte_order: ByteOrder,
    /// Byte offset of the first pixel word.
    pub data_offset: u32,
    /// Number of image rows.
    pub rows: u32,
    /// Pixels per row.
    pub width: u32,
    /// Bits per component.
    pub bit_depth: u8,
    /// Packing mode code (1 = filled to 32-bit words, method A).
    pub packing: u16,
    /// Code value of the reference low level.
    pub ref_low: u32,
    /// Code value of the reference high level.
    pub ref_high: u32,
}

impl FrameDescriptor {
    /// Number of pixels in the frame, or `None` if it overflows `usize`.
    #[must_use]
    pub fn pixel_count(&self) -> Option<usize> {
        usize::try_from(self.rows)
            .ok()?
            .checked_mul(usize::try_from(self.width).ok()?)
    }

    /// Payload size in bytes (one 32-bit word per pixel).
    #[must_use]
    pub fn payload_len(&self) -> Option<usize> {
        self.pixel_count()?.checked_mul(4)
    }
}
