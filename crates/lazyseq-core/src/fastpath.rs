//! Traversal-free (or traversal-light) query dispatch per producer shape.
//!
//! Every function here routes a query to whatever the current producer can
//! answer cheapest, falling back to an honest drain where it cannot. Side
//! effects stay identical to a full traversal: a shape only short-cuts a
//! query when its closures would not have run differently.

use crate::sequence::Sequence;
use crate::source::Source;
use crate::types::Element;

/// Length without a traversal. `None` when only a drain can tell.
pub(crate) fn known_len<T: Element>(seq: &Sequence<T>) -> Option<usize> {
    match &seq.source {
        Source::Empty => Some(0),
        Source::Array(items) => Some(items.len()),
        Source::Iterable(source) => source.known_len(),
        Source::Generator(_) => None,
        Source::Node(node) => node.known_len(),
    }
}

pub(crate) fn count<T: Element>(seq: &Sequence<T>) -> usize {
    match &seq.source {
        Source::Empty => 0,
        Source::Array(items) => items.len(),
        Source::Iterable(source) => match source.known_len() {
            Some(len) => len,
            None => source.open().count(),
        },
        Source::Generator(open) => open().count(),
        Source::Node(node) => node.count(),
    }
}

pub(crate) fn try_first<T: Element>(seq: &Sequence<T>) -> Option<T> {
    match &seq.source {
        Source::Empty => None,
        Source::Array(items) => items.first().cloned(),
        Source::Iterable(source) => source.open().next(),
        Source::Generator(open) => open().next(),
        Source::Node(node) => node.try_first(),
    }
}

pub(crate) fn try_last<T: Element>(seq: &Sequence<T>) -> Option<T> {
    match &seq.source {
        Source::Empty => None,
        Source::Array(items) => items.last().cloned(),
        Source::Iterable(source) => source.open().last(),
        Source::Generator(open) => open().last(),
        Source::Node(node) => node.try_last(),
    }
}

pub(crate) fn try_element_at<T: Element>(seq: &Sequence<T>, index: usize) -> Option<T> {
    match &seq.source {
        Source::Empty => None,
        Source::Array(items) => items.get(index).cloned(),
        Source::Iterable(source) => source.open().nth(index),
        Source::Generator(open) => open().nth(index),
        Source::Node(node) => node.try_element_at(index),
    }
}

pub(crate) fn to_vec<T: Element>(seq: &Sequence<T>) -> Vec<T> {
    match &seq.source {
        Source::Empty => Vec::new(),
        Source::Array(items) => items.to_vec(),
        Source::Iterable(source) => source.open().collect(),
        Source::Generator(open) => open().collect(),
        Source::Node(node) => node.to_vec(),
    }
}

pub(crate) fn contains<T>(seq: &Sequence<T>, value: &T) -> bool
where
    T: Element + PartialEq,
{
    match &seq.source {
        Source::Empty => false,
        Source::Array(items) => items.iter().any(|item| item == value),
        Source::Iterable(source) => source.open().any(|item| item == *value),
        Source::Generator(open) => open().any(|item| item == *value),
        Source::Node(node) => node.contains(value),
    }
}
