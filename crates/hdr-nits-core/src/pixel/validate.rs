//! Frame encoding validation.
//!
//! Only one encoding is supported: a DPX file whose first image element is
//! 10-bit, filled method-A packed, with the full 0-1023 reference range.

use crate::domain::{ByteOrder, FrameDescriptor, FrameError};

use super::remap::FULL_RANGE_MAX;

/// Bits per component of the supported encoding.
pub const SUPPORTED_BIT_DEPTH: u8 = 10;

/// DPX packing code for "filled to 32-bit words, method A".
pub const SUPPORTED_PACKING: u16 = 1;

/// Returns true if the frame matches the supported encoding.
#[must_use]
pub fn is_supported(descriptor: &FrameDescriptor) -> bool {
    validate(descriptor).is_ok()
}

/// Checks a frame against the supported encoding.
///
/// # Errors
///
/// Returns [`FrameError::MalformedContainer`] if the magic number is not a
/// DPX magic (or disagrees with the recorded byte order), and
/// [`FrameError::UnsupportedEncoding`] naming the first field that differs
/// from the supported profile.
pub fn validate(descriptor: &FrameDescriptor) -> Result<(), FrameError> {
    match ByteOrder::from_magic(descriptor.magic) {
        Some(order) if order == descriptor.byte_order => {}
        Some(_) => {
            return Err(FrameError::malformed(
                "byte order does not match the magic number",
            ))
        }
        None => {
            return Err(FrameError::malformed(format!(
                "not a DPX file (magic {:02X?})",
                descriptor.magic
            )))
        }
    }

    if descriptor.bit_depth != SUPPORTED_BIT_DEPTH {
        return Err(FrameError::unsupported(format!(
            "bit depth is {}",
            descriptor.bit_depth
        )));
    }

    if descriptor.packing != SUPPORTED_PACKING {
        return Err(FrameError::unsupported(format!(
            "packing mode is {}",
            descriptor.packing
        )));
    }

    if descriptor.ref_low != 0 || descriptor.ref_high != u32::from(FULL_RANGE_MAX) {
        return Err(FrameError::unsupported(format!(
            "reference range is {}-{}",
            descriptor.ref_low, descriptor.ref_high
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DPX_MAGIC_BE, DPX_MAGIC_LE};

    fn supported() -> FrameDescriptor {
        FrameDescriptor {
            magic: DPX_MAGIC_BE,
            byte_order: ByteOrder::Big,
            data_offset: 2048,
            rows: 2,
            width: 2,
            bit_depth: 10,
            packing: 1,
            ref_low: 0,
            ref_high: 1023,
        }
    }

    #[test]
    fn test_accepts_supported_profile() {
        assert!(is_supported(&supported()));
        assert!(validate(&supported()).is_ok());
    }

    #[test]
    fn test_accepts_little_endian() {
        let descriptor = FrameDescriptor {
            magic: DPX_MAGIC_LE,
            byte_order: ByteOrder::Little,
            ..supported()
        };
        assert!(is_supported(&descriptor));
    }

    #[test]
    fn test_rejects_bit_depth() {
        let descriptor = FrameDescriptor {
            bit_depth: 12,
            ..supported()
        };
        let err = validate(&descriptor).err();
        assert!(
            matches!(err, Some(FrameError::UnsupportedEncoding { ref reason }) if reason.contains("bit depth"))
        );
    }

    #[test]
    fn test_rejects_packing() {
        let descriptor = FrameDescriptor {
            packing: 0,
            ..supported()
        };
        let err = validate(&descriptor).err();
        assert!(
            matches!(err, Some(FrameError::UnsupportedEncoding { ref reason }) if reason.contains("packing"))
        );
    }

    #[test]
    fn test_rejects_legal_reference_range() {
        let descriptor = FrameDescriptor {
            ref_low: 64,
            ref_high: 940,
            ..supported()
        };
        assert!(!is_supported(&descriptor));

        let low_only = FrameDescriptor {
            ref_low: 4,
            ..supported()
        };
        assert!(!is_supported(&low_only));

        let high_only = FrameDescriptor {
            ref_high: 1019,
            ..supported()
        };
        let err = validate(&high_only).err();
        assert!(
            matches!(err, Some(FrameError::UnsupportedEncoding { ref reason }) if reason.contains("0-1019"))
        );
    }

    #[test]
    fn test_rejects_foreign_magic() {
        let descriptor = FrameDescriptor {
            magic: *b"II*\0",
            ..supported()
        };
        assert!(matches!(
            validate(&descriptor),
            Err(FrameError::MalformedContainer { .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_byte_order() {
        let descriptor = FrameDescriptor {
            byte_order: ByteOrder::Little,
            ..supported()
        };
        assert!(!is_supported(&descriptor));
    }
}
