//! Producer kinds a sequence can wrap.

use std::sync::Arc;

use crate::node::NodeKind;
use crate::types::BoxIter;

/// A restartable element producer backed by caller-owned state.
///
/// Implementors hand out a fresh iterator per call, so one source can feed
/// any number of independent cursors.
pub trait IterableSource<T>: Send + Sync {
    /// Open a fresh traversal.
    fn open(&self) -> BoxIter<T>;

    /// Element count when it is known without a traversal.
    fn known_len(&self) -> Option<usize> {
        None
    }
}

/// The closed set of producers behind a sequence.
///
/// Construction normalizes away degenerate cases: an empty vector becomes
/// `Empty`, never `Array`, so an `Array` producer always holds at least
/// one element.
#[derive(Clone)]
pub(crate) enum Source<T> {
    /// The canonical empty producer.
    Empty,
    /// Shared in-memory elements, indexable without traversal.
    Array(Arc<[T]>),
    /// Caller-provided restartable producer.
    Iterable(Arc<dyn IterableSource<T>>),
    /// Closure building a fresh iterator per traversal.
    Generator(Arc<dyn Fn() -> BoxIter<T> + Send + Sync>),
    /// Fused operator pipeline.
    Node(NodeKind<T>),
}
