//! Query operator catalogue for `lazyseq` sequences.
//!
//! The engine crate keeps only the operators it can fuse. Everything
//! else lives here, grouped by flavor and surfaced through the
//! [`SequenceExt`] extension trait:
//!
//! - combination and expansion (`flat_map`, `zip`, `enumerate`)
//! - predicate and tail windows (`take_while`, `skip_last`, `chunks`)
//! - hash-based set operators (`distinct`, `union`, `intersect`, `except`)
//! - stable ordering (`order_by`, `order_with`, `reverse`)
//! - keyed grouping and the hash-join family
//! - terminal folds, selection grids, and collectors
//!
//! Deferred operators here follow the same discipline as the engine:
//! building a pipeline performs no traversal, and each traversal starts
//! from scratch.

#![forbid(unsafe_code)]

mod combine;
mod fold;
mod keyed;
mod ordering;
mod set_ops;
mod windows;

pub mod ext;

pub use ext::SequenceExt;
