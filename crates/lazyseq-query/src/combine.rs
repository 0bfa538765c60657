//! Element-wise combination and expansion operators.

use std::sync::Arc;

use lazyseq_core::{Cursor, Element, Sequence};

pub(crate) fn flat_map<T, R, F>(seq: Sequence<T>, f: F) -> Sequence<R>
where
    T: Element,
    R: Element,
    F: Fn(T) -> Sequence<R> + Send + Sync + 'static,
{
    let f = Arc::new(f);
    Sequence::from_fn(move || {
        let mut outer = seq.cursor();
        let f = f.clone();
        let mut inner: Option<Cursor<R>> = None;
        std::iter::from_fn(move || loop {
            if let Some(cur) = inner.as_mut() {
                if let Some(item) = cur.next() {
                    return Some(item);
                }
                inner = None;
            }
            let next_outer = outer.next()?;
            inner = Some(f(next_outer).into_cursor());
        })
    })
}

pub(crate) fn enumerate<T: Element>(seq: Sequence<T>) -> Sequence<(usize, T)> {
    Sequence::from_fn(move || seq.cursor().enumerate())
}

/// Pairs until either side runs out.
pub(crate) fn zip<T, U>(first: Sequence<T>, second: Sequence<U>) -> Sequence<(T, U)>
where
    T: Element,
    U: Element,
{
    Sequence::from_fn(move || first.cursor().zip(second.cursor()))
}

pub(crate) fn zip_with<T, U, R, F>(first: Sequence<T>, second: Sequence<U>, f: F) -> Sequence<R>
where
    T: Element,
    U: Element,
    R: Element,
    F: Fn(T, U) -> R + Send + Sync + 'static,
{
    let f = Arc::new(f);
    Sequence::from_fn(move || {
        let f = f.clone();
        first
            .cursor()
            .zip(second.cursor())
            .map(move |(a, b)| f(a, b))
    })
}
