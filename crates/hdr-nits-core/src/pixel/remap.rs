//! Full-range to legal-range code remapping.

use crate::domain::LegalCode;

/// Highest full-range 10-bit code.
pub const FULL_RANGE_MAX: u16 = 1023;

const LEGAL_SPAN: u32 = (LegalCode::MAX.get() - LegalCode::MIN.get()) as u32;

/// Maps a full-range code (`0..=1023`) onto the legal range (`64..=940`).
///
/// Computes `round(64 + 876 * code / 1023)` in integer arithmetic. The
/// numerator `876 * code` is even and the divisor odd, so the exact quotient
/// is never a half and adding `1023 / 2` before the division rounds to nearest.
///
/// # Panics
///
/// Panics if `code` exceeds 1023.
#[inline]
#[must_use]
pub fn remap(code: u16) -> LegalCode {
    assert!(code <= FULL_RANGE_MAX, "code {code} exceeds 10 bits");

    let full = u32::from(FULL_RANGE_MAX);
    let scaled = (LEGAL_SPAN * u32::from(code) + full / 2) / full;
    #[allow(clippy::cast_possible_truncation)] // scaled <= 876
    let legal = LegalCode::MIN.get() + scaled as u16;

    match LegalCode::new(legal) {
        Some(code) => code,
        None => unreachable!("remapped code {legal} outside the legal range"),
    }
}
