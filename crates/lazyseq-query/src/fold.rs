//! Terminal drains: quantifiers, folds, selection grids, collectors.
//!
//! Everything here borrows the sequence and consumes exactly one cursor.
//! Closures run on the calling thread, so they carry no thread bounds.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use lazyseq_core::{Element, Error, Result, Sequence};

pub(crate) fn any<T, P>(seq: &Sequence<T>, pred: P) -> bool
where
    T: Element,
    P: Fn(&T) -> bool,
{
    for item in seq.cursor() {
        if pred(&item) {
            return true;
        }
    }
    false
}

pub(crate) fn all<T, P>(seq: &Sequence<T>, pred: P) -> bool
where
    T: Element,
    P: Fn(&T) -> bool,
{
    for item in seq.cursor() {
        if !pred(&item) {
            return false;
        }
    }
    true
}

pub(crate) fn fold<T, A, F>(seq: &Sequence<T>, seed: A, f: F) -> A
where
    T: Element,
    F: Fn(A, T) -> A,
{
    let mut acc = seed;
    for item in seq.cursor() {
        acc = f(acc, item);
    }
    acc
}

pub(crate) fn reduce<T, F>(seq: &Sequence<T>, f: F) -> Result<T>
where
    T: Element,
    F: Fn(T, T) -> T,
{
    let mut cur = seq.cursor();
    let mut acc = cur.next().ok_or(Error::NoElements)?;
    for item in cur {
        acc = f(acc, item);
    }
    Ok(acc)
}

// Ties keep the earliest element throughout the min/max family.

pub(crate) fn min<T>(seq: &Sequence<T>) -> Result<T>
where
    T: Element + Ord,
{
    reduce(seq, |best, item| if item < best { item } else { best })
}

pub(crate) fn max<T>(seq: &Sequence<T>) -> Result<T>
where
    T: Element + Ord,
{
    reduce(seq, |best, item| if item > best { item } else { best })
}

pub(crate) fn min_by_key<T, K, F>(seq: &Sequence<T>, key: F) -> Result<T>
where
    T: Element,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut cur = seq.cursor();
    let mut best = cur.next().ok_or(Error::NoElements)?;
    let mut best_key = key(&best);
    for item in cur {
        let k = key(&item);
        if k < best_key {
            best = item;
            best_key = k;
        }
    }
    Ok(best)
}

pub(crate) fn max_by_key<T, K, F>(seq: &Sequence<T>, key: F) -> Result<T>
where
    T: Element,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut cur = seq.cursor();
    let mut best = cur.next().ok_or(Error::NoElements)?;
    let mut best_key = key(&best);
    for item in cur {
        let k = key(&item);
        if k > best_key {
            best = item;
            best_key = k;
        }
    }
    Ok(best)
}

pub(crate) fn min_by<T, F>(seq: &Sequence<T>, cmp: F) -> Result<T>
where
    T: Element,
    F: Fn(&T, &T) -> Ordering,
{
    reduce(seq, |best, item| {
        if cmp(&item, &best) == Ordering::Less {
            item
        } else {
            best
        }
    })
}

pub(crate) fn max_by<T, F>(seq: &Sequence<T>, cmp: F) -> Result<T>
where
    T: Element,
    F: Fn(&T, &T) -> Ordering,
{
    reduce(seq, |best, item| {
        if cmp(&item, &best) == Ordering::Greater {
            item
        } else {
            best
        }
    })
}

/// Numeric total of a projection; an empty sequence sums to zero.
pub(crate) fn sum_by<T, N, F>(seq: &Sequence<T>, f: F) -> N
where
    T: Element,
    N: std::iter::Sum,
    F: Fn(T) -> N,
{
    seq.cursor().map(f).sum()
}

pub(crate) fn average_by<T, F>(seq: &Sequence<T>, f: F) -> Result<f64>
where
    T: Element,
    F: Fn(T) -> f64,
{
    let mut total = 0.0;
    let mut n = 0usize;
    for item in seq.cursor() {
        total += f(item);
        n += 1;
    }
    if n == 0 {
        return Err(Error::NoElements);
    }
    Ok(total / n as f64)
}

pub(crate) fn single<T: Element>(seq: &Sequence<T>) -> Result<T> {
    let mut cur = seq.cursor();
    let first = cur.next().ok_or(Error::NoElements)?;
    if cur.next().is_some() {
        return Err(Error::MoreThanOneElement);
    }
    Ok(first)
}

pub(crate) fn try_single<T: Element>(seq: &Sequence<T>) -> Result<Option<T>> {
    let mut cur = seq.cursor();
    let Some(first) = cur.next() else {
        return Ok(None);
    };
    if cur.next().is_some() {
        return Err(Error::MoreThanOneElement);
    }
    Ok(Some(first))
}

pub(crate) fn first_where<T, P>(seq: &Sequence<T>, pred: P) -> Result<T>
where
    T: Element,
    P: Fn(&T) -> bool,
{
    try_first_where(seq, pred).ok_or(Error::NoMatch)
}

pub(crate) fn try_first_where<T, P>(seq: &Sequence<T>, pred: P) -> Option<T>
where
    T: Element,
    P: Fn(&T) -> bool,
{
    seq.cursor().find(|item| pred(item))
}

pub(crate) fn last_where<T, P>(seq: &Sequence<T>, pred: P) -> Result<T>
where
    T: Element,
    P: Fn(&T) -> bool,
{
    try_last_where(seq, pred).ok_or(Error::NoMatch)
}

pub(crate) fn try_last_where<T, P>(seq: &Sequence<T>, pred: P) -> Option<T>
where
    T: Element,
    P: Fn(&T) -> bool,
{
    let mut found = None;
    for item in seq.cursor() {
        if pred(&item) {
            found = Some(item);
        }
    }
    found
}

pub(crate) fn single_where<T, P>(seq: &Sequence<T>, pred: P) -> Result<T>
where
    T: Element,
    P: Fn(&T) -> bool,
{
    match try_single_where(seq, pred)? {
        Some(item) => Ok(item),
        None => Err(Error::NoMatch),
    }
}

pub(crate) fn try_single_where<T, P>(seq: &Sequence<T>, pred: P) -> Result<Option<T>>
where
    T: Element,
    P: Fn(&T) -> bool,
{
    let mut found = None;
    for item in seq.cursor() {
        if pred(&item) {
            if found.is_some() {
                return Err(Error::MoreThanOneMatch);
            }
            found = Some(item);
        }
    }
    Ok(found)
}

/// Key-indexed map of the elements; a later duplicate key wins.
pub(crate) fn to_map<T, K, F>(seq: &Sequence<T>, key: F) -> HashMap<K, T>
where
    T: Element,
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut map = HashMap::new();
    for item in seq.cursor() {
        map.insert(key(&item), item);
    }
    map
}

pub(crate) fn to_set<T>(seq: &Sequence<T>) -> HashSet<T>
where
    T: Element + Hash + Eq,
{
    seq.cursor().collect()
}
