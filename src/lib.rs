//! Lazy, composable sequence queries with fused operator pipelines.
//!
//! A [`Sequence`] is an immutable recipe for producing elements; nothing
//! runs until a [`Cursor`] over it first advances, and every traversal
//! starts from scratch. Chained operators build fused pipeline nodes
//! instead of towers of adaptors, so `filter` followed by `map` over an
//! array stays a single node with a single pass:
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let evens = Sequence::from_vec(vec![1, 2, 3, 4, 5, 6])
//!     .filter(|n| n % 2 == 0)
//!     .map(|n| n * 10);
//!
//! assert_eq!(evens.producer_kind(), "array-filter-map");
//! assert_eq!(evens.to_vec(), vec![20, 40, 60]);
//! ```
//!
//! The [`SequenceExt`] trait layers the wider query catalogue on top:
//! grouping, joins, set operators, ordering, folds and selection grids.
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let owners = Sequence::from_vec(vec![(1, "ann"), (2, "bo")]);
//! let pets = Sequence::from_vec(vec![(1, "rex"), (1, "tab"), (9, "moo")]);
//!
//! let named: Vec<(&str, &str)> = owners
//!     .join(pets, |o| o.0, |p| p.0, |o, p| (o.1, p.1))
//!     .to_vec();
//! assert_eq!(named, vec![("ann", "rex"), ("ann", "tab")]);
//! ```
//!
//! Sequences are cheap to clone and `Send + Sync`; cursors are
//! single-use and never shared between threads.

#![forbid(unsafe_code)]

pub use lazyseq_core::{BoxIter, Cursor, Element, Error, IterableSource, Result, Sequence};
pub use lazyseq_lookup::{Group, Lookup};
pub use lazyseq_query::SequenceExt;

/// Everything a query pipeline typically needs in scope.
pub mod prelude {
    pub use lazyseq_core::{Cursor, Element, Error, Result, Sequence};
    pub use lazyseq_lookup::{Group, Lookup};
    pub use lazyseq_query::SequenceExt;
}
