#![forbid(unsafe_code)]
//! lazyseq-core: Lazy sequences, cursors, and fused operator pipelines.
//!
//! A [`Sequence`] describes how to produce elements without producing
//! them; a [`Cursor`] is one traversal of that description. Operator
//! entry points fuse into the current producer where a rule exists
//! (transform over transform, predicate over predicate, windows over
//! arrays), so stacked pipelines do not stack cursor layers.
//!
//! Sequences share and cross threads freely; cursors are single-use and
//! move to at most one thread at a time.

pub mod cursor;
pub mod error;
mod fastpath;
mod node;
pub mod sequence;
pub mod source;
pub mod types;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use sequence::Sequence;
pub use source::IterableSource;
pub use types::{BoxIter, Element};
