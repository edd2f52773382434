//! 10-bit method-A word unpacking.
//!
//! A filled method-A word holds three 10-bit components followed by two
//! padding bits, most significant bit first:
//!
//! ```text
//! b0       b1       b2       b3
//! 76543210 76543210 76543210 76543210
//! AAAAAAAA AABBBBBB BBBBCCCC CCCCCC--
//! ```

/// Three 10-bit component codes from one pixel word.
pub type ComponentTriple = [u16; 3];

const TEN_BITS: u16 = 0x3FF;

/// Splits a word, given in packing order, into its three component codes.
#[inline]
#[must_use]
pub const fn unpack(word: [u8; 4]) -> ComponentTriple {
    let [b0, b1, b2, b3] = word;
    let (b0, b1, b2, b3) = (b0 as u16, b1 as u16, b2 as u16, b3 as u16);

    [
        ((b0 << 2) | (b1 >> 6)) & TEN_BITS,
        ((b1 << 4) | (b2 >> 4)) & TEN_BITS,
        ((b2 << 6) | (b3 >> 2)) & TEN_BITS,
    ]
}

/// Largest of the three component codes in a word.
#[inline]
#[must_use]
pub fn max_component(word: [u8; 4]) -> u16 {
    let [c0, c1, c2] = unpack(word);
    c0.max(c1).max(c2)
}
