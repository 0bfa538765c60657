//! Hash-based set-flavored operators.
//!
//! All of these keep first-encounter order and defer their hash-set
//! builds: nothing is hashed until the downstream cursor first advances,
//! and an untouched traversal never drains the other side at all.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use lazyseq_core::{Element, Sequence};

pub(crate) fn distinct<T>(seq: Sequence<T>) -> Sequence<T>
where
    T: Element + Hash + Eq,
{
    distinct_by(seq, |item| item.clone())
}

pub(crate) fn distinct_by<T, K, F>(seq: Sequence<T>, key: F) -> Sequence<T>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let key = Arc::new(key);
    Sequence::from_fn(move || {
        let mut cur = seq.cursor();
        let key = key.clone();
        let mut seen = HashSet::new();
        std::iter::from_fn(move || loop {
            let item = cur.next()?;
            if seen.insert(key(&item)) {
                return Some(item);
            }
        })
    })
}

pub(crate) fn union<T>(first: Sequence<T>, second: Sequence<T>) -> Sequence<T>
where
    T: Element + Hash + Eq,
{
    distinct(first.concat(second))
}

pub(crate) fn union_by<T, K, F>(first: Sequence<T>, second: Sequence<T>, key: F) -> Sequence<T>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    distinct_by(first.concat(second), key)
}

pub(crate) fn intersect<T>(first: Sequence<T>, second: Sequence<T>) -> Sequence<T>
where
    T: Element + Hash + Eq,
{
    intersect_by(first, second, |item| item.clone())
}

/// Elements of `first` whose key also occurs in `second`, each key once.
pub(crate) fn intersect_by<T, K, F>(first: Sequence<T>, second: Sequence<T>, key: F) -> Sequence<T>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let key = Arc::new(key);
    Sequence::from_fn(move || {
        let mut cur = first.cursor();
        let second = second.clone();
        let key = key.clone();
        let mut allowed: Option<HashSet<K>> = None;
        std::iter::from_fn(move || loop {
            let item = cur.next()?;
            let allowed = allowed.get_or_insert_with(|| {
                let mut set = HashSet::new();
                for other in second.cursor() {
                    set.insert(key(&other));
                }
                set
            });
            // Removing makes each matching key yield exactly once.
            if allowed.remove(&key(&item)) {
                return Some(item);
            }
        })
    })
}

pub(crate) fn except<T>(first: Sequence<T>, second: Sequence<T>) -> Sequence<T>
where
    T: Element + Hash + Eq,
{
    except_by(first, second, |item| item.clone())
}

/// Elements of `first` whose key never occurs in `second`, each key once.
pub(crate) fn except_by<T, K, F>(first: Sequence<T>, second: Sequence<T>, key: F) -> Sequence<T>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let key = Arc::new(key);
    Sequence::from_fn(move || {
        let mut cur = first.cursor();
        let second = second.clone();
        let key = key.clone();
        let mut banned: Option<HashSet<K>> = None;
        std::iter::from_fn(move || loop {
            let item = cur.next()?;
            let banned = banned.get_or_insert_with(|| {
                let mut set = HashSet::new();
                for other in second.cursor() {
                    set.insert(key(&other));
                }
                set
            });
            // A fresh insert means the key is in neither `second` nor the
            // elements already yielded.
            if banned.insert(key(&item)) {
                return Some(item);
            }
        })
    })
}
