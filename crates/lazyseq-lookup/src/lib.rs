#![forbid(unsafe_code)]
//! lazyseq-lookup: One-pass keyed grouping with shared, frozen buckets.
//!
//! A [`Lookup`] drains a sequence once, grouping elements under their key
//! in first-seen key order. Buckets freeze into shared arrays when the
//! build finishes, so handing a bucket back out as a `Sequence` is just
//! an `Arc` clone.

pub mod lookup;

pub use lookup::{Group, Lookup};
