//! Per-frame peak and mean luminance.

use crate::domain::{FrameDescriptor, FrameError, FrameStats};

use super::pq_table::LuminanceTable;
use super::remap::remap;
use super::unpack::max_component;

/// Computes peak and mean luminance over every pixel of a frame.
///
/// `pixels` is the payload starting at the frame's data offset. Per pixel,
/// the largest of the three component codes is remapped to the legal range
/// and looked up once.
///
/// # Errors
///
/// Returns [`FrameError::DegenerateFrame`] if the frame has no pixels and
/// [`FrameError::MalformedContainer`] if `pixels` is shorter than
/// `rows * width` words.
pub fn aggregate(descriptor: &FrameDescriptor, pixels: &[u8]) -> Result<FrameStats, FrameError> {
    if descriptor.rows == 0 || descriptor.width == 0 {
        return Err(FrameError::DegenerateFrame {
            rows: descriptor.rows,
            width: descriptor.width,
        });
    }

    let (pixel_count, expected_len) = descriptor
        .pixel_count()
        .zip(descriptor.payload_len())
        .ok_or_else(|| {
            FrameError::malformed(format!(
                "frame size {}x{} overflows",
                descriptor.width, descriptor.rows
            ))
        })?;

    if pixels.len() < expected_len {
        return Err(FrameError::malformed(format!(
            "pixel data truncated: expected {expected_len} bytes, got {}",
            pixels.len()
        )));
    }

    let table = LuminanceTable::global();
    let order = descriptor.byte_order;
    let mut peak = 0.0_f64;
    let mut sum = 0.0_f64;

    for chunk in pixels[..expected_len].chunks_exact(4) {
        let word = order.normalize([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let nits = table.lookup(remap(max_component(word)));
        peak = peak.max(nits);
        sum += nits;
    }

    #[allow(clippy::cast_precision_loss)]
    let mean = sum / pixel_count as f64;

    Ok(FrameStats {
        peak_nits: peak,
        mean_nits: mean,
    })
}
