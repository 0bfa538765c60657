//! Ordering operators: materialize one traversal, sort, replay.
//!
//! Exposed lazily so pipelines stay composable; the materialization and
//! sort run once per traversal, at the first advance of the downstream
//! cursor. All sorts are stable.

use std::cmp::Ordering;
use std::sync::Arc;

use lazyseq_core::{Element, Sequence};

fn replay_sorted<T, S>(seq: Sequence<T>, arrange: S) -> Sequence<T>
where
    T: Element,
    S: Fn(&mut Vec<T>) + Send + Sync + 'static,
{
    let arrange = Arc::new(arrange);
    Sequence::from_fn(move || {
        let seq = seq.clone();
        let arrange = arrange.clone();
        let mut sorted: Option<std::vec::IntoIter<T>> = None;
        std::iter::from_fn(move || {
            sorted
                .get_or_insert_with(|| {
                    let mut items = seq.to_vec();
                    arrange(&mut items);
                    items.into_iter()
                })
                .next()
        })
    })
}

pub(crate) fn order<T>(seq: Sequence<T>) -> Sequence<T>
where
    T: Element + Ord,
{
    replay_sorted(seq, |items| items.sort())
}

pub(crate) fn order_by<T, K, F>(seq: Sequence<T>, key: F) -> Sequence<T>
where
    T: Element,
    K: Ord,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    replay_sorted(seq, move |items| items.sort_by_key(|item| key(item)))
}

pub(crate) fn order_by_desc<T, K, F>(seq: Sequence<T>, key: F) -> Sequence<T>
where
    T: Element,
    K: Ord,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    // Comparator reversal, not a post-sort reverse, so equal keys keep
    // their encounter order.
    replay_sorted(seq, move |items| {
        items.sort_by(|a, b| key(b).cmp(&key(a)))
    })
}

pub(crate) fn order_with<T, F>(seq: Sequence<T>, cmp: F) -> Sequence<T>
where
    T: Element,
    F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
{
    replay_sorted(seq, move |items| items.sort_by(|a, b| cmp(a, b)))
}

pub(crate) fn reverse<T: Element>(seq: Sequence<T>) -> Sequence<T> {
    replay_sorted(seq, |items| items.reverse())
}
