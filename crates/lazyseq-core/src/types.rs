//! Element bounds and the closure shapes operator nodes are built from.
//!
//! Nodes erase their upstream element types into these closures, so a
//! node struct only mentions the element type it produces.

use std::sync::Arc;

/// Marker bound for sequence elements.
///
/// Elements flow through shared producers and may cross threads, so they
/// must be cloneable and thread-safe. The blanket impl covers every type
/// that satisfies the bounds; there is nothing to implement by hand.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Element for T {}

/// Boxed iterator driving one traversal.
pub type BoxIter<T> = Box<dyn Iterator<Item = T> + Send>;

/// Shared element transform.
pub(crate) type SelectorFn<S, T> = Arc<dyn Fn(S) -> T + Send + Sync>;

/// Shared element predicate.
pub(crate) type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Projection from a backing-array index to a produced element.
pub(crate) type IndexFn<T> = Arc<dyn Fn(usize) -> T + Send + Sync>;

/// Filtered projection: `None` when the element at the index is rejected.
pub(crate) type ScanFn<T> = Arc<dyn Fn(usize) -> Option<T> + Send + Sync>;

/// Single-traversal pull handle over an opened upstream.
pub(crate) type PullFn<T> = Box<dyn FnMut() -> Option<T> + Send>;

/// Factory for fresh pull handles; one call per traversal.
pub(crate) type OpenFn<T> = Arc<dyn Fn() -> PullFn<T> + Send + Sync>;

/// Factory for pull handles that first discard `n` upstream elements
/// without running the node's transform on them.
pub(crate) type OpenFromFn<T> = Arc<dyn Fn(usize) -> PullFn<T> + Send + Sync>;

/// Dedicated drain for the final element of a traversal.
pub(crate) type LastFn<T> = Arc<dyn Fn() -> Option<T> + Send + Sync>;
