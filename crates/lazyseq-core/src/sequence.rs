//! The lazy sequence handle and its operator entry points.
//!
//! A [`Sequence`] is an immutable description of how to produce elements;
//! nothing runs until a cursor advances. Each operator entry point
//! inspects the current producer shape and either fuses into it or stacks
//! a fresh node on top, so `map`/`filter`/`skip`/`take` pipelines keep a
//! single cursor layer wherever a fusion rule exists.

use std::sync::Arc;

use crate::cursor::{Cursor, Drive};
use crate::error::{Error, Result};
use crate::fastpath;
use crate::node::{
    ArrayFilterNode, ArrayMapNode, ArrayWindowNode, ConcatNode, IterFilterNode, IterMapNode,
    IterWindowNode, NodeKind, MAX_CHAIN,
};
use crate::source::{IterableSource, Source};
use crate::types::{BoxIter, Element, PredicateFn, SelectorFn};

/// An immutable, shareable recipe for producing elements.
///
/// Cloning a sequence shares its producer; every cursor opened from any
/// clone traverses independently from the start.
#[derive(Clone)]
pub struct Sequence<T> {
    pub(crate) source: Source<T>,
}

impl<T: Element> Sequence<T> {
    /// A sequence with no elements.
    pub fn empty() -> Self {
        Sequence {
            source: Source::Empty,
        }
    }

    /// A single-element sequence.
    pub fn once(item: T) -> Self {
        Sequence {
            source: Source::Array(Arc::from(vec![item])),
        }
    }

    /// Share an owned vector as the backing array.
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            return Sequence::empty();
        }
        Sequence {
            source: Source::Array(items.into()),
        }
    }

    /// Copy a slice into a shared backing array.
    pub fn from_slice(items: &[T]) -> Self {
        Sequence::from_vec(items.to_vec())
    }

    /// Adopt an already shared backing array without copying.
    pub fn from_shared(items: Arc<[T]>) -> Self {
        if items.is_empty() {
            return Sequence::empty();
        }
        Sequence {
            source: Source::Array(items),
        }
    }

    /// Defer to a caller-owned restartable source.
    pub fn from_source(source: impl IterableSource<T> + 'static) -> Self {
        Sequence {
            source: Source::Iterable(Arc::new(source)),
        }
    }

    /// Build elements from a fresh iterator per traversal.
    ///
    /// The closure runs once for every cursor opened, so the iterator it
    /// returns may own mutable traversal state.
    pub fn from_fn<I, F>(f: F) -> Self
    where
        I: Iterator<Item = T> + Send + 'static,
        F: Fn() -> I + Send + Sync + 'static,
    {
        Sequence {
            source: Source::Generator(Arc::new(move || Box::new(f()) as BoxIter<T>)),
        }
    }

    /// Open an independent traversal; the sequence stays usable.
    pub fn cursor(&self) -> Cursor<T> {
        let drive = match &self.source {
            Source::Empty => Drive::Empty,
            Source::Array(items) => Drive::Array {
                items: items.clone(),
                pos: 0,
            },
            Source::Iterable(source) => Drive::Iter(source.open()),
            Source::Generator(open) => Drive::Iter(open()),
            Source::Node(node) => Drive::Iter(node.open()),
        };
        Cursor::new(drive)
    }

    /// Claim the sequence for one final traversal.
    ///
    /// Behaviorally the same cursor as [`Sequence::cursor`]; taking the
    /// sequence by value just makes "this handle is done after the drain"
    /// explicit at the call site.
    pub fn into_cursor(self) -> Cursor<T> {
        let drive = match self.source {
            Source::Empty => Drive::Empty,
            Source::Array(items) => Drive::Array { items, pos: 0 },
            Source::Iterable(source) => Drive::Iter(source.open()),
            Source::Generator(open) => Drive::Iter(open()),
            Source::Node(node) => Drive::Iter(node.open()),
        };
        Cursor::new(drive)
    }

    /// Stable name of the current producer shape, mainly for diagnostics.
    pub fn producer_kind(&self) -> &'static str {
        match &self.source {
            Source::Empty => "empty",
            Source::Array(_) => "array",
            Source::Iterable(_) => "iterable",
            Source::Generator(_) => "generator",
            Source::Node(node) => node.name(),
        }
    }

    /// Transform every element.
    ///
    /// Fuses with map-like producers by composing the transforms into one
    /// node; other producers get wrapped in a fresh transform node.
    pub fn map<R, F>(self, f: F) -> Sequence<R>
    where
        R: Element,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let f: SelectorFn<T, R> = Arc::new(f);
        let source = match self.source {
            Source::Empty => Source::Empty,
            Source::Array(items) => {
                Source::Node(NodeKind::ArrayMap(Arc::new(ArrayMapNode::over(items, f))))
            }
            Source::Node(NodeKind::ArrayMap(node)) => {
                Source::Node(NodeKind::ArrayMap(Arc::new(node.composed(f))))
            }
            Source::Node(NodeKind::ArrayFilter(node)) => {
                Source::Node(NodeKind::ArrayFilterMap(Arc::new(node.mapped(f))))
            }
            Source::Node(NodeKind::ArrayFilterMap(node)) => {
                Source::Node(NodeKind::ArrayFilterMap(Arc::new(node.composed(f))))
            }
            Source::Node(NodeKind::ArrayWindow(node)) => {
                Source::Node(NodeKind::ArrayMapWindow(Arc::new(node.mapped(f))))
            }
            Source::Node(NodeKind::ArrayMapWindow(node)) => {
                Source::Node(NodeKind::ArrayMapWindow(Arc::new(node.composed(f))))
            }
            Source::Node(NodeKind::IterMap(node)) => {
                Source::Node(NodeKind::IterMap(Arc::new(node.composed(f))))
            }
            Source::Node(NodeKind::IterFilter(node)) => {
                Source::Node(NodeKind::IterFilterMap(Arc::new(node.mapped(f))))
            }
            Source::Node(NodeKind::IterFilterMap(node)) => {
                Source::Node(NodeKind::IterFilterMap(Arc::new(node.composed(f))))
            }
            other => Source::Node(NodeKind::IterMap(Arc::new(IterMapNode::over(
                Sequence { source: other },
                f,
            )))),
        };
        Sequence { source }
    }

    /// Keep the elements the predicate admits.
    ///
    /// Consecutive filters fuse into one conjoined predicate; anything
    /// else gets wrapped. A filter never fuses into a map-like producer,
    /// which keeps predicates running in written order.
    pub fn filter<F>(self, pred: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let pred: PredicateFn<T> = Arc::new(pred);
        let source = match self.source {
            Source::Empty => Source::Empty,
            Source::Array(items) => Source::Node(NodeKind::ArrayFilter(Arc::new(
                ArrayFilterNode::over(items, pred),
            ))),
            Source::Node(NodeKind::ArrayFilter(node)) => {
                Source::Node(NodeKind::ArrayFilter(Arc::new(node.and_pred(pred))))
            }
            Source::Node(NodeKind::IterFilter(node)) => {
                Source::Node(NodeKind::IterFilter(Arc::new(node.and_pred(pred))))
            }
            other => Source::Node(NodeKind::IterFilter(Arc::new(IterFilterNode {
                source: Sequence { source: other },
                pred,
            }))),
        };
        Sequence { source }
    }

    /// Drop the first `count` elements.
    ///
    /// Window-bearing producers adjust their bounds in place; a window
    /// that moves past the end collapses to the empty producer.
    pub fn skip(self, count: usize) -> Sequence<T> {
        if count == 0 {
            return self;
        }
        let source = match self.source {
            Source::Empty => Source::Empty,
            Source::Array(items) => {
                if count >= items.len() {
                    Source::Empty
                } else {
                    Source::Node(NodeKind::ArrayWindow(Arc::new(ArrayWindowNode {
                        items,
                        lo: count,
                        hi: usize::MAX,
                    })))
                }
            }
            Source::Node(NodeKind::ArrayMap(node)) => match node.windowed(count, usize::MAX) {
                Some(window) => Source::Node(NodeKind::ArrayMapWindow(Arc::new(window))),
                None => Source::Empty,
            },
            Source::Node(NodeKind::ArrayWindow(node)) => match node.skipped(count) {
                Some(window) => Source::Node(NodeKind::ArrayWindow(Arc::new(window))),
                None => Source::Empty,
            },
            Source::Node(NodeKind::ArrayMapWindow(node)) => match node.skipped(count) {
                Some(window) => Source::Node(NodeKind::ArrayMapWindow(Arc::new(window))),
                None => Source::Empty,
            },
            Source::Node(NodeKind::IterWindow(node)) => match node.skipped(count) {
                Some(window) => Source::Node(NodeKind::IterWindow(Arc::new(window))),
                None => Source::Empty,
            },
            other => Source::Node(NodeKind::IterWindow(Arc::new(IterWindowNode {
                source: Sequence { source: other },
                skip: count,
                take: None,
            }))),
        };
        Sequence { source }
    }

    /// Keep at most the first `count` elements.
    pub fn take(self, count: usize) -> Sequence<T> {
        if count == 0 {
            return Sequence::empty();
        }
        let source = match self.source {
            Source::Empty => Source::Empty,
            Source::Array(items) => {
                if count >= items.len() {
                    Source::Array(items)
                } else {
                    Source::Node(NodeKind::ArrayWindow(Arc::new(ArrayWindowNode {
                        items,
                        lo: 0,
                        hi: count - 1,
                    })))
                }
            }
            Source::Node(NodeKind::ArrayMap(node)) => {
                if count >= node.len {
                    Source::Node(NodeKind::ArrayMap(node))
                } else {
                    match node.windowed(0, count - 1) {
                        Some(window) => Source::Node(NodeKind::ArrayMapWindow(Arc::new(window))),
                        None => Source::Empty,
                    }
                }
            }
            Source::Node(NodeKind::ArrayWindow(node)) => {
                Source::Node(NodeKind::ArrayWindow(Arc::new(node.taken(count))))
            }
            Source::Node(NodeKind::ArrayMapWindow(node)) => {
                Source::Node(NodeKind::ArrayMapWindow(Arc::new(node.taken(count))))
            }
            Source::Node(NodeKind::IterWindow(node)) => {
                Source::Node(NodeKind::IterWindow(Arc::new(node.taken(count))))
            }
            other => Source::Node(NodeKind::IterWindow(Arc::new(IterWindowNode {
                source: Sequence { source: other },
                skip: 0,
                take: Some(count),
            }))),
        };
        Sequence { source }
    }

    /// Chain `other` after this sequence.
    ///
    /// Appending to an existing chain extends it in place while this
    /// handle is the only owner, so folding many appends stays linear.
    pub fn concat(self, other: Sequence<T>) -> Sequence<T> {
        if matches!(self.source, Source::Empty) {
            return other;
        }
        if matches!(other.source, Source::Empty) {
            return self;
        }
        let source = match self.source {
            Source::Node(NodeKind::Concat(mut node)) if node.children.len() < MAX_CHAIN => {
                Arc::make_mut(&mut node).children.push(other);
                Source::Node(NodeKind::Concat(node))
            }
            first => {
                #[cfg(feature = "tracing")]
                if matches!(first, Source::Node(NodeKind::Concat(_))) {
                    tracing::trace!(
                        limit = MAX_CHAIN,
                        "concat chain at capacity, nesting a fresh pair"
                    );
                }
                let first = Sequence { source: first };
                Source::Node(NodeKind::Concat(Arc::new(ConcatNode::pair(first, other))))
            }
        };
        Sequence { source }
    }

    /// Length without a traversal, where the producer makes it free.
    ///
    /// Unlike [`Sequence::count`] this never runs pipeline closures; it
    /// answers `None` instead.
    pub fn known_len(&self) -> Option<usize> {
        fastpath::known_len(self)
    }

    /// Number of elements. Runs the pipeline wherever the producer cannot
    /// answer arithmetically, so transform side effects still happen.
    pub fn count(&self) -> usize {
        fastpath::count(self)
    }

    /// True when a traversal would find no elements. Pulls at most one.
    pub fn is_empty(&self) -> bool {
        match fastpath::known_len(self) {
            Some(len) => len == 0,
            None => fastpath::try_first(self).is_none(),
        }
    }

    pub fn try_first(&self) -> Option<T> {
        fastpath::try_first(self)
    }

    pub fn first(&self) -> Result<T> {
        self.try_first().ok_or(Error::NoElements)
    }

    pub fn try_last(&self) -> Option<T> {
        fastpath::try_last(self)
    }

    pub fn last(&self) -> Result<T> {
        self.try_last().ok_or(Error::NoElements)
    }

    pub fn try_element_at(&self, index: usize) -> Option<T> {
        fastpath::try_element_at(self, index)
    }

    pub fn element_at(&self, index: usize) -> Result<T> {
        self.try_element_at(index)
            .ok_or(Error::IndexOutOfRange(index))
    }

    /// Whether any produced element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        fastpath::contains(self, value)
    }

    /// Materialize one traversal into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        fastpath::to_vec(self)
    }
}

impl<T: Element> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::empty()
    }
}

impl<T: Element> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Sequence::from_vec(items)
    }
}

impl<T: Element> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::from_vec(iter.into_iter().collect())
    }
}

impl<T: Element> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.into_cursor()
    }
}

impl<T: Element> IntoIterator for &Sequence<T> {
    type Item = T;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Cursor<T> {
        self.cursor()
    }
}

impl<T: Element> std::fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sequence({})", self.producer_kind())
    }
}
