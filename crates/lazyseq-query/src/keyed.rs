//! Keyed operators: lookups, grouping, and the hash-join family.
//!
//! Joins stream one side and build a one-pass [`Lookup`] over the other.
//! The build is deferred twice over: it waits for the first advance of
//! the downstream cursor, and it never happens at all when the streamed
//! side turns out to be empty.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use lazyseq_core::{Cursor, Element, Sequence};
use lazyseq_lookup::{Group, Lookup};

pub(crate) fn to_lookup<T, K, F>(seq: &Sequence<T>, key: F) -> Lookup<K, T>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K,
{
    Lookup::build(seq, key, |item| item)
}

pub(crate) fn to_lookup_map<T, K, E, KF, EF>(seq: &Sequence<T>, key: KF, elem: EF) -> Lookup<K, E>
where
    T: Element,
    K: Hash + Eq + Element,
    E: Element,
    KF: Fn(&T) -> K,
    EF: Fn(T) -> E,
{
    Lookup::build(seq, key, elem)
}

pub(crate) fn group_by<T, K, F>(seq: Sequence<T>, key: F) -> Sequence<Group<K, T>>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let key = Arc::new(key);
    Sequence::from_fn(move || {
        let seq = seq.clone();
        let key = key.clone();
        let mut groups: Option<std::vec::IntoIter<Group<K, T>>> = None;
        std::iter::from_fn(move || {
            groups
                .get_or_insert_with(|| {
                    Lookup::build(&seq, |item| key(item), |item| item)
                        .into_groups()
                        .into_iter()
                })
                .next()
        })
    })
}

pub(crate) fn group_by_map<T, K, E, KF, EF>(
    seq: Sequence<T>,
    key: KF,
    elem: EF,
) -> Sequence<Group<K, E>>
where
    T: Element,
    K: Hash + Eq + Element,
    E: Element,
    KF: Fn(&T) -> K + Send + Sync + 'static,
    EF: Fn(T) -> E + Send + Sync + 'static,
{
    let key = Arc::new(key);
    let elem = Arc::new(elem);
    Sequence::from_fn(move || {
        let seq = seq.clone();
        let key = key.clone();
        let elem = elem.clone();
        let mut groups: Option<std::vec::IntoIter<Group<K, E>>> = None;
        std::iter::from_fn(move || {
            groups
                .get_or_insert_with(|| {
                    Lookup::build(&seq, |item| key(item), |item| elem(item))
                        .into_groups()
                        .into_iter()
                })
                .next()
        })
    })
}

/// Probe-side state for the hash joins: the streamed side is an open
/// cursor, the built side is a frozen lookup, and at most one bucket is
/// in flight at a time.
enum ProbeState<S, B, K> {
    Fresh,
    Running {
        stream: Cursor<S>,
        lookup: Lookup<K, B>,
        /// Streamed element, its bucket, and whether anything matched yet.
        pending: Option<(S, Cursor<B>, bool)>,
    },
    Done,
}

pub(crate) fn join<T, I, K, R, OK, IK, RF>(
    outer: Sequence<T>,
    inner: Sequence<I>,
    outer_key: OK,
    inner_key: IK,
    result: RF,
) -> Sequence<R>
where
    T: Element,
    I: Element,
    K: Hash + Eq + Element,
    R: Element,
    OK: Fn(&T) -> K + Send + Sync + 'static,
    IK: Fn(&I) -> K + Send + Sync + 'static,
    RF: Fn(T, I) -> R + Send + Sync + 'static,
{
    let outer_key = Arc::new(outer_key);
    let inner_key = Arc::new(inner_key);
    let result = Arc::new(result);
    Sequence::from_fn(move || {
        let outer = outer.clone();
        let inner = inner.clone();
        let outer_key = outer_key.clone();
        let inner_key = inner_key.clone();
        let result = result.clone();
        let mut state = ProbeState::Fresh;
        std::iter::from_fn(move || loop {
            match &mut state {
                ProbeState::Fresh => {
                    let mut stream = outer.cursor();
                    match stream.next() {
                        None => state = ProbeState::Done,
                        Some(first) => {
                            let lookup = Lookup::from_sequence(&inner, |item| inner_key(item));
                            let bucket = lookup.get(&outer_key(&first)).into_cursor();
                            state = ProbeState::Running {
                                stream,
                                lookup,
                                pending: Some((first, bucket, false)),
                            };
                        }
                    }
                }
                ProbeState::Running {
                    stream,
                    lookup,
                    pending,
                } => {
                    if let Some((outer_item, bucket, _)) = pending.as_mut() {
                        if let Some(inner_item) = bucket.next() {
                            return Some(result(outer_item.clone(), inner_item));
                        }
                        *pending = None;
                    }
                    match stream.next() {
                        Some(item) => {
                            let bucket = lookup.get(&outer_key(&item)).into_cursor();
                            *pending = Some((item, bucket, false));
                        }
                        None => state = ProbeState::Done,
                    }
                }
                ProbeState::Done => return None,
            }
        })
    })
}

pub(crate) fn left_join<T, I, K, R, OK, IK, RF>(
    outer: Sequence<T>,
    inner: Sequence<I>,
    outer_key: OK,
    inner_key: IK,
    result: RF,
) -> Sequence<R>
where
    T: Element,
    I: Element,
    K: Hash + Eq + Element,
    R: Element,
    OK: Fn(&T) -> K + Send + Sync + 'static,
    IK: Fn(&I) -> K + Send + Sync + 'static,
    RF: Fn(T, Option<I>) -> R + Send + Sync + 'static,
{
    let outer_key = Arc::new(outer_key);
    let inner_key = Arc::new(inner_key);
    let result = Arc::new(result);
    Sequence::from_fn(move || {
        let outer = outer.clone();
        let inner = inner.clone();
        let outer_key = outer_key.clone();
        let inner_key = inner_key.clone();
        let result = result.clone();
        let mut state = ProbeState::Fresh;
        std::iter::from_fn(move || loop {
            match &mut state {
                ProbeState::Fresh => {
                    let mut stream = outer.cursor();
                    match stream.next() {
                        None => state = ProbeState::Done,
                        Some(first) => {
                            let lookup = Lookup::from_sequence(&inner, |item| inner_key(item));
                            let bucket = lookup.get(&outer_key(&first)).into_cursor();
                            state = ProbeState::Running {
                                stream,
                                lookup,
                                pending: Some((first, bucket, false)),
                            };
                        }
                    }
                }
                ProbeState::Running {
                    stream,
                    lookup,
                    pending,
                } => {
                    if let Some((outer_item, bucket, matched)) = pending.as_mut() {
                        match bucket.next() {
                            Some(inner_item) => {
                                *matched = true;
                                return Some(result(outer_item.clone(), Some(inner_item)));
                            }
                            None => {
                                let unmatched = !*matched;
                                let item = outer_item.clone();
                                *pending = None;
                                if unmatched {
                                    return Some(result(item, None));
                                }
                            }
                        }
                    }
                    match stream.next() {
                        Some(item) => {
                            let bucket = lookup.get(&outer_key(&item)).into_cursor();
                            *pending = Some((item, bucket, false));
                        }
                        None => state = ProbeState::Done,
                    }
                }
                ProbeState::Done => return None,
            }
        })
    })
}

pub(crate) fn right_join<T, I, K, R, OK, IK, RF>(
    outer: Sequence<T>,
    inner: Sequence<I>,
    outer_key: OK,
    inner_key: IK,
    result: RF,
) -> Sequence<R>
where
    T: Element,
    I: Element,
    K: Hash + Eq + Element,
    R: Element,
    OK: Fn(&T) -> K + Send + Sync + 'static,
    IK: Fn(&I) -> K + Send + Sync + 'static,
    RF: Fn(Option<T>, I) -> R + Send + Sync + 'static,
{
    let outer_key = Arc::new(outer_key);
    let inner_key = Arc::new(inner_key);
    let result = Arc::new(result);
    Sequence::from_fn(move || {
        let outer = outer.clone();
        let inner = inner.clone();
        let outer_key = outer_key.clone();
        let inner_key = inner_key.clone();
        let result = result.clone();
        let mut state = ProbeState::Fresh;
        std::iter::from_fn(move || loop {
            match &mut state {
                ProbeState::Fresh => {
                    let mut stream = inner.cursor();
                    match stream.next() {
                        None => state = ProbeState::Done,
                        Some(first) => {
                            let lookup = Lookup::from_sequence(&outer, |item| outer_key(item));
                            let bucket = lookup.get(&inner_key(&first)).into_cursor();
                            state = ProbeState::Running {
                                stream,
                                lookup,
                                pending: Some((first, bucket, false)),
                            };
                        }
                    }
                }
                ProbeState::Running {
                    stream,
                    lookup,
                    pending,
                } => {
                    if let Some((inner_item, bucket, matched)) = pending.as_mut() {
                        match bucket.next() {
                            Some(outer_item) => {
                                *matched = true;
                                return Some(result(Some(outer_item), inner_item.clone()));
                            }
                            None => {
                                let unmatched = !*matched;
                                let item = inner_item.clone();
                                *pending = None;
                                if unmatched {
                                    return Some(result(None, item));
                                }
                            }
                        }
                    }
                    match stream.next() {
                        Some(item) => {
                            let bucket = lookup.get(&inner_key(&item)).into_cursor();
                            *pending = Some((item, bucket, false));
                        }
                        None => state = ProbeState::Done,
                    }
                }
                ProbeState::Done => return None,
            }
        })
    })
}

/// Stream state for `group_join`; no bucket cursor is needed because the
/// whole bucket goes out at once.
enum GroupProbeState<S, B, K> {
    Fresh,
    Running {
        stream: Cursor<S>,
        lookup: Lookup<K, B>,
    },
    Done,
}

pub(crate) fn group_join<T, I, K, R, OK, IK, RF>(
    outer: Sequence<T>,
    inner: Sequence<I>,
    outer_key: OK,
    inner_key: IK,
    result: RF,
) -> Sequence<R>
where
    T: Element,
    I: Element,
    K: Hash + Eq + Element,
    R: Element,
    OK: Fn(&T) -> K + Send + Sync + 'static,
    IK: Fn(&I) -> K + Send + Sync + 'static,
    RF: Fn(T, Sequence<I>) -> R + Send + Sync + 'static,
{
    let outer_key = Arc::new(outer_key);
    let inner_key = Arc::new(inner_key);
    let result = Arc::new(result);
    Sequence::from_fn(move || {
        let outer = outer.clone();
        let inner = inner.clone();
        let outer_key = outer_key.clone();
        let inner_key = inner_key.clone();
        let result = result.clone();
        let mut state = GroupProbeState::Fresh;
        std::iter::from_fn(move || loop {
            match &mut state {
                GroupProbeState::Fresh => {
                    let mut stream = outer.cursor();
                    match stream.next() {
                        None => state = GroupProbeState::Done,
                        Some(first) => {
                            let lookup = Lookup::from_sequence(&inner, |item| inner_key(item));
                            let group = lookup.get(&outer_key(&first));
                            state = GroupProbeState::Running { stream, lookup };
                            return Some(result(first, group));
                        }
                    }
                }
                GroupProbeState::Running { stream, lookup } => match stream.next() {
                    Some(item) => {
                        let group = lookup.get(&outer_key(&item));
                        return Some(result(item, group));
                    }
                    None => state = GroupProbeState::Done,
                },
                GroupProbeState::Done => return None,
            }
        })
    })
}

pub(crate) fn count_by<T, K, F>(seq: Sequence<T>, key: F) -> Sequence<(K, usize)>
where
    T: Element,
    K: Hash + Eq + Element,
    F: Fn(&T) -> K + Send + Sync + 'static,
{
    let key = Arc::new(key);
    Sequence::from_fn(move || {
        let seq = seq.clone();
        let key = key.clone();
        let mut tallied: Option<std::vec::IntoIter<(K, usize)>> = None;
        std::iter::from_fn(move || {
            tallied
                .get_or_insert_with(|| {
                    let mut order: Vec<(K, usize)> = Vec::new();
                    let mut index: HashMap<K, usize> = HashMap::new();
                    for item in seq.cursor() {
                        let k = key(&item);
                        match index.entry(k.clone()) {
                            Entry::Occupied(slot) => order[*slot.get()].1 += 1,
                            Entry::Vacant(slot) => {
                                slot.insert(order.len());
                                order.push((k, 1));
                            }
                        }
                    }
                    order.into_iter()
                })
                .next()
        })
    })
}

pub(crate) fn aggregate_by<T, K, A, KF, F>(
    seq: Sequence<T>,
    key: KF,
    seed: A,
    f: F,
) -> Sequence<(K, A)>
where
    T: Element,
    K: Hash + Eq + Element,
    A: Element,
    KF: Fn(&T) -> K + Send + Sync + 'static,
    F: Fn(A, T) -> A + Send + Sync + 'static,
{
    let key = Arc::new(key);
    let f = Arc::new(f);
    Sequence::from_fn(move || {
        let seq = seq.clone();
        let key = key.clone();
        let f = f.clone();
        let seed = seed.clone();
        let mut folded: Option<std::vec::IntoIter<(K, A)>> = None;
        std::iter::from_fn(move || {
            folded
                .get_or_insert_with(|| {
                    let mut order: Vec<(K, A)> = Vec::new();
                    let mut index: HashMap<K, usize> = HashMap::new();
                    for item in seq.cursor() {
                        let k = key(&item);
                        match index.entry(k.clone()) {
                            Entry::Occupied(slot) => {
                                let at = *slot.get();
                                let acc = std::mem::replace(&mut order[at].1, seed.clone());
                                order[at].1 = f(acc, item);
                            }
                            Entry::Vacant(slot) => {
                                slot.insert(order.len());
                                order.push((k, f(seed.clone(), item)));
                            }
                        }
                    }
                    order.into_iter()
                })
                .next()
        })
    })
}
