//! Legal-range code values.

use std::fmt;

use super::FrameError;

/// A 10-bit code in the legal (video) range `64..=940`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegalCode(u16);

impl LegalCode {
    /// Lowest legal code (reference black).
    pub const MIN: Self = Self(64);
    /// Highest legal code (nominal peak).
    pub const MAX: Self = Self(940);

    /// Number of codes in the legal range.
    pub const COUNT: usize = (Self::MAX.0 - Self::MIN.0 + 1) as usize;

    /// Creates a legal code, returning `None` outside `64..=940`.
    #[must_use]
    pub const fn new(code: u16) -> Option<Self> {
        if code >= Self::MIN.0 && code <= Self::MAX.0 {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Returns the raw code value.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Zero-based position of this code in the legal range.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - Self::MIN.0) as usize
    }
}

impl TryFrom<u16> for LegalCode {
    type Error = FrameError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::new(code).ok_or(FrameError::CodeOutOfRange(code))
    }
}

impl fmt::Display for LegalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
