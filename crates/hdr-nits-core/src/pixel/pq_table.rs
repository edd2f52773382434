//! Legal-range PQ code to luminance lookup (SMPTE ST 2084).

#![allow(clippy::excessive_precision)]

use std::sync::LazyLock;

use crate::domain::{FrameError, LegalCode};

/// Luminance of PQ code value 1.0, in nits.
pub const PQ_PEAK_NITS: f64 = 10_000.0;

const PQ_M1: f64 = 2610.0 / 16384.0; // 0.1593017578125
const PQ_M2: f64 = 2523.0 / 4096.0 * 128.0; // 78.84375
const PQ_C1: f64 = 3424.0 / 4096.0; // 0.8359375
const PQ_C2: f64 = 2413.0 / 4096.0 * 32.0; // 18.8515625
const PQ_C3: f64 = 2392.0 / 4096.0 * 32.0; // 18.6875

/// PQ EOTF: PQ encoded `[0,1]` → linear `[0,1]` (normalized to 10000 nits).
#[must_use]
pub fn pq_eotf(encoded: f64) -> f64 {
    if encoded <= 0.0 {
        return 0.0;
    }
    let e = encoded.min(1.0);
    let e_inv_m2 = e.powf(1.0 / PQ_M2);
    let numerator = (e_inv_m2 - PQ_C1).max(0.0);
    let denominator = PQ_C2 - PQ_C3 * e_inv_m2;
    (numerator / denominator).powf(1.0 / PQ_M1)
}

static TABLE: LazyLock<LuminanceTable> = LazyLock::new(LuminanceTable::build);

/// Immutable map from legal-range PQ code to nits.
///
/// Code 64 is black (0 nits) and code 940 is the PQ peak (10000 nits);
/// codes in between are spread linearly over the PQ signal range.
pub struct LuminanceTable {
    nits: Box<[f64; LegalCode::COUNT]>,
}

impl LuminanceTable {
    /// Returns the process-wide table, building it on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &TABLE
    }

    fn build() -> Self {
        let span = f64::from(LegalCode::MAX.get() - LegalCode::MIN.get());
        let mut nits = Box::new([0.0; LegalCode::COUNT]);
        for (i, entry) in nits.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)] // i < 877
            let signal = i as f64 / span;
            *entry = pq_eotf(signal) * PQ_PEAK_NITS;
        }
        tracing::debug!("Built PQ luminance table ({} entries)", LegalCode::COUNT);
        Self { nits }
    }

    /// Luminance of a legal-range code, in nits.
    #[inline]
    #[must_use]
    pub fn lookup(&self, code: LegalCode) -> f64 {
        self.nits[code.index()]
    }

    /// Luminance of a raw code, rejecting codes outside `64..=940`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::CodeOutOfRange`] for codes outside the legal range.
    pub fn try_lookup(&self, code: u16) -> Result<f64, FrameError> {
        LegalCode::try_from(code).map(|code| self.lookup(code))
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        LegalCode::COUNT
    }

    /// Always false; the table covers the whole legal range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}
