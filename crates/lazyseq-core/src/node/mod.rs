//! The closed set of fused operator shapes.
//!
//! A node is an immutable pipeline stage. The sequence entry points match
//! on this enum exhaustively, so every operator-over-shape combination has
//! a decided rule: fuse into the node, or wrap it in a fresh one. Keeping
//! the set closed is what lets fusion dispatch without downcasting.

mod array;
mod concat;
mod iter;

pub(crate) use array::{
    ArrayFilterMapNode, ArrayFilterNode, ArrayMapNode, ArrayMapWindowNode, ArrayWindowNode,
};
pub(crate) use concat::{ConcatNode, MAX_CHAIN};
pub(crate) use iter::{IterFilterMapNode, IterFilterNode, IterMapNode, IterWindowNode};

use std::sync::Arc;

use crate::types::{BoxIter, Element};

#[derive(Clone)]
pub(crate) enum NodeKind<T> {
    ArrayMap(Arc<ArrayMapNode<T>>),
    ArrayFilter(Arc<ArrayFilterNode<T>>),
    ArrayFilterMap(Arc<ArrayFilterMapNode<T>>),
    ArrayWindow(Arc<ArrayWindowNode<T>>),
    ArrayMapWindow(Arc<ArrayMapWindowNode<T>>),
    IterMap(Arc<IterMapNode<T>>),
    IterFilter(Arc<IterFilterNode<T>>),
    IterFilterMap(Arc<IterFilterMapNode<T>>),
    IterWindow(Arc<IterWindowNode<T>>),
    Concat(Arc<ConcatNode<T>>),
}

impl<T: Element> NodeKind<T> {
    /// Stable shape name for diagnostics and tests.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            NodeKind::ArrayMap(_) => "array-map",
            NodeKind::ArrayFilter(_) => "array-filter",
            NodeKind::ArrayFilterMap(_) => "array-filter-map",
            NodeKind::ArrayWindow(_) => "array-window",
            NodeKind::ArrayMapWindow(_) => "array-map-window",
            NodeKind::IterMap(_) => "iter-map",
            NodeKind::IterFilter(_) => "iter-filter",
            NodeKind::IterFilterMap(_) => "iter-filter-map",
            NodeKind::IterWindow(_) => "iter-window",
            NodeKind::Concat(_) => "concat",
        }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        match self {
            NodeKind::ArrayMap(node) => node.open(),
            NodeKind::ArrayFilter(node) => node.open(),
            NodeKind::ArrayFilterMap(node) => node.open(),
            NodeKind::ArrayWindow(node) => node.open(),
            NodeKind::ArrayMapWindow(node) => node.open(),
            NodeKind::IterMap(node) => node.open(),
            NodeKind::IterFilter(node) => node.open(),
            NodeKind::IterFilterMap(node) => node.open(),
            NodeKind::IterWindow(node) => node.open(),
            NodeKind::Concat(node) => node.open(),
        }
    }

    /// Length without a traversal, where the shape makes it free.
    pub(crate) fn known_len(&self) -> Option<usize> {
        match self {
            NodeKind::ArrayMap(node) => Some(node.len),
            NodeKind::ArrayWindow(node) => Some(node.window_len()),
            NodeKind::ArrayMapWindow(node) => Some(node.window_len()),
            _ => None,
        }
    }

    pub(crate) fn count(&self) -> usize {
        match self {
            NodeKind::ArrayMap(node) => node.count(),
            NodeKind::ArrayFilter(node) => node.count(),
            NodeKind::ArrayFilterMap(node) => node.count(),
            NodeKind::ArrayWindow(node) => node.count(),
            NodeKind::ArrayMapWindow(node) => node.count(),
            NodeKind::IterMap(node) => node.count(),
            NodeKind::IterFilter(node) => node.count(),
            NodeKind::IterFilterMap(node) => node.count(),
            NodeKind::IterWindow(node) => node.count(),
            NodeKind::Concat(node) => node.count(),
        }
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        match self {
            NodeKind::ArrayMap(node) => node.try_first(),
            NodeKind::ArrayFilter(node) => node.try_first(),
            NodeKind::ArrayFilterMap(node) => node.try_first(),
            NodeKind::ArrayWindow(node) => node.try_first(),
            NodeKind::ArrayMapWindow(node) => node.try_first(),
            NodeKind::IterMap(node) => node.try_first(),
            NodeKind::IterFilter(node) => node.try_first(),
            NodeKind::IterFilterMap(node) => node.try_first(),
            NodeKind::IterWindow(node) => node.try_first(),
            NodeKind::Concat(node) => node.try_first(),
        }
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        match self {
            NodeKind::ArrayMap(node) => node.try_last(),
            NodeKind::ArrayFilter(node) => node.try_last(),
            NodeKind::ArrayFilterMap(node) => node.try_last(),
            NodeKind::ArrayWindow(node) => node.try_last(),
            NodeKind::ArrayMapWindow(node) => node.try_last(),
            NodeKind::IterMap(node) => node.try_last(),
            NodeKind::IterFilter(node) => node.try_last(),
            NodeKind::IterFilterMap(node) => node.try_last(),
            NodeKind::IterWindow(node) => node.try_last(),
            NodeKind::Concat(node) => node.try_last(),
        }
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        match self {
            NodeKind::ArrayMap(node) => node.try_element_at(index),
            NodeKind::ArrayFilter(node) => node.try_element_at(index),
            NodeKind::ArrayFilterMap(node) => node.try_element_at(index),
            NodeKind::ArrayWindow(node) => node.try_element_at(index),
            NodeKind::ArrayMapWindow(node) => node.try_element_at(index),
            NodeKind::IterMap(node) => node.try_element_at(index),
            NodeKind::IterFilter(node) => node.try_element_at(index),
            NodeKind::IterFilterMap(node) => node.try_element_at(index),
            NodeKind::IterWindow(node) => node.try_element_at(index),
            NodeKind::Concat(node) => node.try_element_at(index),
        }
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        match self {
            NodeKind::ArrayMap(node) => node.to_vec(),
            NodeKind::ArrayFilter(node) => node.to_vec(),
            NodeKind::ArrayFilterMap(node) => node.to_vec(),
            NodeKind::ArrayWindow(node) => node.to_vec(),
            NodeKind::ArrayMapWindow(node) => node.to_vec(),
            NodeKind::IterMap(node) => node.to_vec(),
            NodeKind::IterFilter(node) => node.to_vec(),
            NodeKind::IterFilterMap(node) => node.to_vec(),
            NodeKind::IterWindow(node) => node.to_vec(),
            NodeKind::Concat(node) => node.to_vec(),
        }
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self {
            NodeKind::ArrayMap(node) => node.contains(value),
            NodeKind::ArrayFilter(node) => node.contains(value),
            NodeKind::ArrayFilterMap(node) => node.contains(value),
            NodeKind::ArrayWindow(node) => node.contains(value),
            NodeKind::ArrayMapWindow(node) => node.contains(value),
            NodeKind::IterMap(node) => node.contains(value),
            NodeKind::IterFilter(node) => node.contains(value),
            NodeKind::IterFilterMap(node) => node.contains(value),
            NodeKind::IterWindow(node) => node.contains(value),
            NodeKind::Concat(node) => node.contains(value),
        }
    }
}
