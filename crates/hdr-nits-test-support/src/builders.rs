//! Synthetic frame and DPX file builders for testing.

use std::io;
use std::path::Path;

use hdr_nits_core::{ByteOrder, FrameDescriptor, DPX_MAGIC_BE, DPX_MAGIC_LE};

/// Offset of the pixel payload in files written by [`DpxFileBuilder`].
const DATA_OFFSET: u32 = 2048;

/// Packs three 10-bit codes into a filled method-A word, in packing order.
///
/// Codes above 1023 are truncated to their low 10 bits.
#[must_use]
pub fn pack_word(codes: [u16; 3]) -> [u8; 4] {
    let [c0, c1, c2] = codes.map(|c| u32::from(c & 0x3FF));
    ((c0 << 22) | (c1 << 12) | (c2 << 2)).to_be_bytes()
}

/// A frame held in memory: identifier, header fields and payload.
#[derive(Debug, Clone)]
pub struct SyntheticFrame {
    /// Frame identifier.
    pub id: String,
    /// Header fields.
    pub descriptor: FrameDescriptor,
    /// Pixel payload, in the descriptor's byte order.
    pub pixels: Vec<u8>,
}

impl SyntheticFrame {
    /// Replaces the descriptor's bit depth.
    #[must_use]
    pub fn with_bit_depth(mut self, bit_depth: u8) -> Self {
        self.descriptor.bit_depth = bit_depth;
        self
    }

    /// Replaces the descriptor's packing mode.
    #[must_use]
    pub fn with_packing(mut self, packing: u16) -> Self {
        self.descriptor.packing = packing;
        self
    }

    /// Replaces the descriptor's reference range.
    #[must_use]
    pub fn with_reference_range(mut self, low: u32, high: u32) -> Self {
        self.descriptor.ref_low = low;
        self.descriptor.ref_high = high;
        self
    }

    /// Re-encodes the frame as little-endian (`XPDS`).
    #[must_use]
    pub fn little_endian(mut self) -> Self {
        if self.descriptor.byte_order == ByteOrder::Big {
            for word in self.pixels.chunks_exact_mut(4) {
                word.reverse();
            }
        }
        self.descriptor.magic = DPX_MAGIC_LE;
        self.descriptor.byte_order = ByteOrder::Little;
        self
    }
}

/// Builder for creating synthetic test frames.
///
/// All frames use the supported encoding: big-endian, 10-bit, filled
/// method A, reference range 0-1023.
pub struct SyntheticFrameBuilder;

impl SyntheticFrameBuilder {
    /// Descriptor for a supported frame of the given size.
    #[must_use]
    pub const fn descriptor(rows: u32, width: u32) -> FrameDescriptor {
        FrameDescriptor {
            magic: DPX_MAGIC_BE,
            byte_order: ByteOrder::Big,
            data_offset: DATA_OFFSET,
            rows,
            width,
            bit_depth: 10,
            packing: 1,
            ref_low: 0,
            ref_high: 1023,
        }
    }

    /// Creates a frame from per-pixel component triples, row-major.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != rows * width`.
    #[must_use]
    pub fn from_components(id: &str, rows: u32, width: u32, pixels: &[[u16; 3]]) -> SyntheticFrame {
        assert_eq!(
            pixels.len() as u64,
            u64::from(rows) * u64::from(width),
            "pixel count does not match {width}x{rows}"
        );
        SyntheticFrame {
            id: id.to_owned(),
            descriptor: Self::descriptor(rows, width),
            pixels: pixels.iter().flat_map(|&c| pack_word(c)).collect(),
        }
    }

    /// Creates a frame where every component of every pixel has `code`.
    #[must_use]
    pub fn uniform(id: &str, rows: u32, width: u32, code: u16) -> SyntheticFrame {
        let count = usize::try_from(u64::from(rows) * u64::from(width)).unwrap_or(0);
        Self::from_components(id, rows, width, &vec![[code; 3]; count])
    }

    /// Creates a black frame with a single pixel at `code`.
    #[must_use]
    pub fn spot(id: &str, rows: u32, width: u32, code: u16) -> SyntheticFrame {
        let count = usize::try_from(u64::from(rows) * u64::from(width)).unwrap_or(0);
        let mut pixels = vec![[0u16; 3]; count];
        if let Some(first) = pixels.first_mut() {
            *first = [0, code, 0];
        }
        Self::from_components(id, rows, width, &pixels)
    }

    /// Creates a frame with no pixels.
    #[must_use]
    pub fn empty(id: &str) -> SyntheticFrame {
        Self::from_components(id, 0, 0, &[])
    }
}

/// Writes synthetic frames as DPX files.
///
/// Only the header fields the reader decodes are filled in; everything else
/// is zero.
pub struct DpxFileBuilder;

impl DpxFileBuilder {
    /// Encodes a frame as DPX file bytes (header at 0, payload at 2048).
    #[must_use]
    pub fn to_bytes(frame: &SyntheticFrame) -> Vec<u8> {
        let d = &frame.descriptor;
        let little = d.byte_order == ByteOrder::Little;
        let u32_bytes = |v: u32| if little { v.to_le_bytes() } else { v.to_be_bytes() };
        let u16_bytes = |v: u16| if little { v.to_le_bytes() } else { v.to_be_bytes() };

        let mut bytes = vec![0u8; DATA_OFFSET as usize];
        bytes[0..4].copy_from_slice(&d.magic);
        bytes[4..8].copy_from_slice(&u32_bytes(DATA_OFFSET));
        bytes[768..770].copy_from_slice(&u16_bytes(0)); // orientation
        bytes[770..772].copy_from_slice(&u16_bytes(1)); // element count
        bytes[772..776].copy_from_slice(&u32_bytes(d.width));
        bytes[776..780].copy_from_slice(&u32_bytes(d.rows));
        bytes[784..788].copy_from_slice(&u32_bytes(d.ref_low));
        bytes[792..796].copy_from_slice(&u32_bytes(d.ref_high));
        bytes[800] = 50; // descriptor: RGB
        bytes[801] = 13; // transfer: user defined (PQ)
        bytes[803] = d.bit_depth;
        bytes[804..806].copy_from_slice(&u16_bytes(d.packing));
        bytes[808..812].copy_from_slice(&u32_bytes(DATA_OFFSET));
        bytes.extend_from_slice(&frame.pixels);
        bytes
    }

    /// Writes a frame to `dir/<frame id>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(dir: &Path, frame: &SyntheticFrame) -> io::Result<()> {
        std::fs::write(dir.join(&frame.id), Self::to_bytes(frame))
    }

    /// Writes every frame into `dir`.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn write_all(dir: &Path, frames: &[SyntheticFrame]) -> io::Result<()> {
        frames.iter().try_for_each(|frame| Self::write(dir, frame))
    }
}
