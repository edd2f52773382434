//! Pixel pipeline: unpack, remap, linearize, aggregate.
//!
//! Each stage is a plain function over plain values so the hot loop in
//! [`aggregate`] stays free of allocation and dynamic dispatch.

mod aggregate;
mod pq_table;
mod remap;
mod unpack;
mod validate;

pub use aggregate::aggregate;
pub use pq_table::{pq_eotf, LuminanceTable, PQ_PEAK_NITS};
pub use remap::{remap, FULL_RANGE_MAX};
pub use unpack::{max_component, unpack, ComponentTriple};
pub use validate::{is_supported, validate, SUPPORTED_BIT_DEPTH, SUPPORTED_PACKING};
