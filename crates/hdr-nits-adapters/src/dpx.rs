//! DPX (SMPTE 268M) header and payload reader.
//!
//! Only the fields the pixel pipeline needs are decoded: the generic file
//! header's image offset, the image header's dimensions, and the first image
//! element's reference range, bit size, packing and data offset.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use hdr_nits_core::{ByteOrder, FrameDescriptor, FrameError};
use tracing::debug;

/// Size of the generic file header plus the image header.
pub const DPX_HEADER_LEN: usize = 2048;

mod offsets {
    pub const MAGIC: usize = 0;
    pub const IMAGE_OFFSET: usize = 4;
    pub const PIXELS_PER_LINE: usize = 772;
    pub const LINES_PER_ELEMENT: usize = 776;
    pub const REF_LOW_DATA: usize = 784;
    pub const REF_HIGH_DATA: usize = 792;
    pub const BIT_SIZE: usize = 803;
    pub const PACKING: usize = 804;
    pub const ELEMENT_DATA_OFFSET: usize = 808;
}

/// Element data offset values meaning "not set".
const UNDEFINED_OFFSETS: [u32; 2] = [0, u32::MAX];

/// Reads the frame descriptor from a DPX file's header.
///
/// # Errors
///
/// Returns [`FrameError::Io`] if the file cannot be opened or read and
/// [`FrameError::MalformedContainer`] if the header is short or the magic
/// number is not a DPX magic.
pub fn read_descriptor(path: &Path) -> Result<FrameDescriptor, FrameError> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut header = [0u8; DPX_HEADER_LEN];
    reader.read_exact(&mut header).map_err(|e| truncated(e, "header"))?;

    let descriptor = parse_header(&header)?;
    debug!(
        "{}: {:?}-endian, {}x{}, {}-bit, packing {}, range {}-{}, data at {}",
        path.display(),
        descriptor.byte_order,
        descriptor.width,
        descriptor.rows,
        descriptor.bit_depth,
        descriptor.packing,
        descriptor.ref_low,
        descriptor.ref_high,
        descriptor.data_offset
    );
    Ok(descriptor)
}

/// Decodes the descriptor fields from the first [`DPX_HEADER_LEN`] bytes.
///
/// # Errors
///
/// Returns [`FrameError::MalformedContainer`] if `header` is too short or
/// does not start with a DPX magic number.
pub fn parse_header(header: &[u8]) -> Result<FrameDescriptor, FrameError> {
    if header.len() < DPX_HEADER_LEN {
        return Err(FrameError::malformed(format!(
            "header truncated: {} of {DPX_HEADER_LEN} bytes",
            header.len()
        )));
    }

    let m = offsets::MAGIC;
    let magic = [header[m], header[m + 1], header[m + 2], header[m + 3]];
    let byte_order = ByteOrder::from_magic(magic).ok_or_else(|| {
        FrameError::malformed(format!("not a DPX file (magic {magic:02X?})"))
    })?;
    let fields = Fields { header, byte_order };

    let image_offset = fields.u32_at(offsets::IMAGE_OFFSET);
    let element_offset = fields.u32_at(offsets::ELEMENT_DATA_OFFSET);
    let data_offset = if UNDEFINED_OFFSETS.contains(&element_offset) {
        image_offset
    } else {
        element_offset
    };

    Ok(FrameDescriptor {
        magic,
        byte_order,
        data_offset,
        rows: fields.u32_at(offsets::LINES_PER_ELEMENT),
        width: fields.u32_at(offsets::PIXELS_PER_LINE),
        bit_depth: header[offsets::BIT_SIZE],
        packing: fields.u16_at(offsets::PACKING),
        ref_low: fields.u32_at(offsets::REF_LOW_DATA),
        ref_high: fields.u32_at(offsets::REF_HIGH_DATA),
    })
}

/// Reads exactly `rows * width * 4` bytes starting at the data offset.
///
/// # Errors
///
/// Returns [`FrameError::MalformedContainer`] if the file ends before the
/// payload does, and [`FrameError::Io`] for other read failures.
pub fn read_pixels(path: &Path, descriptor: &FrameDescriptor) -> Result<Vec<u8>, FrameError> {
    let len = descriptor.payload_len().ok_or_else(|| {
        FrameError::malformed(format!(
            "frame size {}x{} overflows",
            descriptor.width, descriptor.rows
        ))
    })?;

    let mut file = File::open(path)?;
    let offset = u64::from(descriptor.data_offset);
    let available = file.metadata()?.len().saturating_sub(offset);
    if u64::try_from(len).map_or(true, |len| len > available) {
        return Err(FrameError::malformed(format!(
            "pixel data truncated: {}x{} frame needs {len} bytes, {available} available",
            descriptor.width, descriptor.rows
        )));
    }
    file.seek(SeekFrom::Start(offset))?;

    let mut pixels = vec![0u8; len];
    file.read_exact(&mut pixels)
        .map_err(|e| truncated(e, "pixel data"))?;
    Ok(pixels)
}

/// Maps an early end of file to a malformed-container error.
fn truncated(err: io::Error, what: &str) -> FrameError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        FrameError::malformed(format!("{what} truncated"))
    } else {
        FrameError::Io(err)
    }
}

/// Endian-aware field access over a header buffer.
struct Fields<'a> {
    header: &'a [u8],
    byte_order: ByteOrder,
}

impl Fields<'_> {
    fn u16_at(&self, offset: usize) -> u16 {
        let bytes = [self.header[offset], self.header[offset + 1]];
        match self.byte_order {
            ByteOrder::Big => u16::from_be_bytes(bytes),
            ByteOrder::Little => u16::from_le_bytes(bytes),
        }
    }

    fn u32_at(&self, offset: usize) -> u32 {
        let bytes = [
            self.header[offset],
            self.header[offset + 1],
            self.header[offset + 2],
            self.header[offset + 3],
        ];
        match self.byte_order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        }
    }
}
