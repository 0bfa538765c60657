//! Predicate- and count-bounded restriction operators.

use std::collections::VecDeque;
use std::sync::Arc;

use lazyseq_core::{Element, Error, Result, Sequence};

pub(crate) fn take_while<T, P>(seq: Sequence<T>, pred: P) -> Sequence<T>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let pred = Arc::new(pred);
    Sequence::from_fn(move || {
        let mut cur = seq.cursor();
        let pred = pred.clone();
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            match cur.next() {
                Some(item) if pred(&item) => Some(item),
                _ => {
                    // First rejection ends the traversal for good.
                    done = true;
                    cur.close();
                    None
                }
            }
        })
    })
}

pub(crate) fn skip_while<T, P>(seq: Sequence<T>, pred: P) -> Sequence<T>
where
    T: Element,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let pred = Arc::new(pred);
    Sequence::from_fn(move || {
        let mut cur = seq.cursor();
        let pred = pred.clone();
        let mut skipping = true;
        std::iter::from_fn(move || loop {
            let item = cur.next()?;
            if skipping {
                if pred(&item) {
                    continue;
                }
                skipping = false;
            }
            return Some(item);
        })
    })
}

/// Keep only the final `count` elements, buffering at most that many.
pub(crate) fn take_last<T: Element>(seq: Sequence<T>, count: usize) -> Sequence<T> {
    if count == 0 {
        return Sequence::empty();
    }
    Sequence::from_fn(move || {
        let seq = seq.clone();
        let mut tail: Option<std::collections::vec_deque::IntoIter<T>> = None;
        std::iter::from_fn(move || {
            tail.get_or_insert_with(|| {
                let mut buf = VecDeque::new();
                for item in seq.cursor() {
                    if buf.len() == count {
                        buf.pop_front();
                    }
                    buf.push_back(item);
                }
                buf.into_iter()
            })
            .next()
        })
    })
}

/// Drop the final `count` elements, lagging the upstream by a buffer.
pub(crate) fn skip_last<T: Element>(seq: Sequence<T>, count: usize) -> Sequence<T> {
    if count == 0 {
        return seq;
    }
    Sequence::from_fn(move || {
        let mut cur = seq.cursor();
        let mut buf = VecDeque::new();
        std::iter::from_fn(move || loop {
            let item = cur.next()?;
            buf.push_back(item);
            if buf.len() > count {
                return buf.pop_front();
            }
        })
    })
}

/// Runs of up to `size` elements; the final run may be shorter.
///
/// The size is validated up front, before anything is deferred.
pub(crate) fn chunks<T: Element>(seq: Sequence<T>, size: usize) -> Result<Sequence<Sequence<T>>> {
    if size == 0 {
        return Err(Error::InvalidArgument("chunk size must be positive"));
    }
    Ok(Sequence::from_fn(move || {
        let mut cur = seq.cursor();
        let mut done = false;
        std::iter::from_fn(move || {
            if done {
                return None;
            }
            let mut chunk = Vec::new();
            while chunk.len() < size {
                match cur.next() {
                    Some(item) => chunk.push(item),
                    None => {
                        done = true;
                        break;
                    }
                }
            }
            if chunk.is_empty() {
                None
            } else {
                Some(Sequence::from_vec(chunk))
            }
        })
    }))
}
