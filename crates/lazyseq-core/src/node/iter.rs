//! Operator nodes over arbitrary upstream sequences.
//!
//! These shapes cover every producer the array nodes cannot: generators,
//! caller-provided sources, and pipelines whose upstream is itself a node.
//! Where the upstream element type differs from the produced one it is
//! erased into pull-closure factories, so fusing another operator wraps a
//! closure rather than another cursor.

use std::sync::Arc;

use crate::sequence::Sequence;
use crate::types::{BoxIter, Element, LastFn, OpenFn, OpenFromFn, PredicateFn, PullFn, SelectorFn};

/// Transform over an arbitrary upstream.
///
/// Positional queries advance the upstream raw and run the transform only
/// on the element they land on, so `open_from` skips without transforming
/// and `last` drains raw before one final transform call.
pub(crate) struct IterMapNode<T> {
    open_from: OpenFromFn<T>,
    last: LastFn<T>,
}

impl<T: Element> IterMapNode<T> {
    pub(crate) fn over<S: Element>(source: Sequence<S>, f: SelectorFn<S, T>) -> Self {
        let last_source = source.clone();
        let last_f = f.clone();
        let open_from: OpenFromFn<T> = Arc::new(move |skip| {
            let mut cur = source.cursor();
            let f = f.clone();
            let mut to_skip = skip;
            let pull: PullFn<T> = Box::new(move || {
                while to_skip > 0 {
                    cur.next()?;
                    to_skip -= 1;
                }
                cur.next().map(|item| f(item))
            });
            pull
        });
        let last: LastFn<T> = Arc::new(move || {
            let mut tail = None;
            for item in last_source.cursor() {
                tail = Some(item);
            }
            tail.map(|item| last_f(item))
        });
        IterMapNode { open_from, last }
    }

    /// Compose a further transform into both channels.
    pub(crate) fn composed<R: Element>(&self, g: SelectorFn<T, R>) -> IterMapNode<R> {
        let inner_open = self.open_from.clone();
        let open_g = g.clone();
        let open_from: OpenFromFn<R> = Arc::new(move |skip| {
            let mut pull = inner_open(skip);
            let g = open_g.clone();
            let composed: PullFn<R> = Box::new(move || pull().map(|item| g(item)));
            composed
        });
        let inner_last = self.last.clone();
        let last: LastFn<R> = Arc::new(move || inner_last().map(|item| g(item)));
        IterMapNode { open_from, last }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let mut pull = (self.open_from)(0);
        Box::new(std::iter::from_fn(move || pull()))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        let mut pull = (self.open_from)(0);
        pull()
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        (self.last)()
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        let mut pull = (self.open_from)(index);
        pull()
    }

    /// Counting drains through the transform, exactly like a traversal.
    pub(crate) fn count(&self) -> usize {
        let mut pull = (self.open_from)(0);
        let mut n = 0usize;
        while pull().is_some() {
            n += 1;
        }
        n
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.open().collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.open().any(|item| item == *value)
    }
}

/// Predicate over an arbitrary upstream of the same element type.
pub(crate) struct IterFilterNode<T> {
    pub(crate) source: Sequence<T>,
    pub(crate) pred: PredicateFn<T>,
}

impl<T: Element> IterFilterNode<T> {
    /// Conjoin a further predicate; the earlier one still runs first.
    pub(crate) fn and_pred(&self, pred: PredicateFn<T>) -> IterFilterNode<T> {
        let first = self.pred.clone();
        let combined: PredicateFn<T> = Arc::new(move |item| first(item) && pred(item));
        IterFilterNode {
            source: self.source.clone(),
            pred: combined,
        }
    }

    /// Stack a transform on the surviving elements.
    pub(crate) fn mapped<R: Element>(&self, g: SelectorFn<T, R>) -> IterFilterMapNode<R> {
        IterFilterMapNode::over(self.source.clone(), self.pred.clone(), g)
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let mut cur = self.source.cursor();
        let pred = self.pred.clone();
        Box::new(std::iter::from_fn(move || loop {
            let item = cur.next()?;
            if pred(&item) {
                return Some(item);
            }
        }))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        self.open().next()
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        self.open().last()
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        self.open().nth(index)
    }

    pub(crate) fn count(&self) -> usize {
        self.open().count()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.open().collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.open().any(|item| item == *value)
    }
}

/// Predicate plus transform over an arbitrary upstream.
///
/// Positional queries drain through both closures; skipping raw here would
/// step over elements the predicate never admitted.
pub(crate) struct IterFilterMapNode<T> {
    opener: OpenFn<T>,
}

impl<T: Element> IterFilterMapNode<T> {
    pub(crate) fn over<S: Element>(
        source: Sequence<S>,
        pred: PredicateFn<S>,
        f: SelectorFn<S, T>,
    ) -> Self {
        let opener: OpenFn<T> = Arc::new(move || {
            let mut cur = source.cursor();
            let pred = pred.clone();
            let f = f.clone();
            let pull: PullFn<T> = Box::new(move || loop {
                let item = cur.next()?;
                if pred(&item) {
                    return Some(f(item));
                }
            });
            pull
        });
        IterFilterMapNode { opener }
    }

    pub(crate) fn composed<R: Element>(&self, g: SelectorFn<T, R>) -> IterFilterMapNode<R> {
        let inner = self.opener.clone();
        let opener: OpenFn<R> = Arc::new(move || {
            let mut pull = inner();
            let g = g.clone();
            let composed: PullFn<R> = Box::new(move || pull().map(|item| g(item)));
            composed
        });
        IterFilterMapNode { opener }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let mut pull = (self.opener)();
        Box::new(std::iter::from_fn(move || pull()))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        self.open().next()
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        self.open().last()
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        self.open().nth(index)
    }

    pub(crate) fn count(&self) -> usize {
        self.open().count()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.open().collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.open().any(|item| item == *value)
    }
}

/// Skip/take window over an arbitrary upstream.
pub(crate) struct IterWindowNode<T> {
    pub(crate) source: Sequence<T>,
    pub(crate) skip: usize,
    /// `None` is unbounded; `Some(n)` keeps at most `n` elements, never 0.
    pub(crate) take: Option<usize>,
}

impl<T: Element> IterWindowNode<T> {
    /// Narrow from the front; `None` when the cap empties out.
    pub(crate) fn skipped(&self, n: usize) -> Option<IterWindowNode<T>> {
        match self.take {
            Some(limit) if n >= limit => None,
            Some(limit) => Some(IterWindowNode {
                source: self.source.clone(),
                skip: self.skip.saturating_add(n),
                take: Some(limit - n),
            }),
            None => Some(IterWindowNode {
                source: self.source.clone(),
                skip: self.skip.saturating_add(n),
                take: None,
            }),
        }
    }

    /// Cap the window length at `n` (at least 1).
    pub(crate) fn taken(&self, n: usize) -> IterWindowNode<T> {
        IterWindowNode {
            source: self.source.clone(),
            skip: self.skip,
            take: Some(self.take.map_or(n, |limit| limit.min(n))),
        }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let mut cur = self.source.cursor();
        let mut to_skip = self.skip;
        let mut remaining = self.take;
        Box::new(std::iter::from_fn(move || {
            while to_skip > 0 {
                cur.next()?;
                to_skip -= 1;
            }
            if remaining == Some(0) {
                return None;
            }
            let item = cur.next()?;
            if let Some(left) = remaining.as_mut() {
                *left -= 1;
                if *left == 0 {
                    // Cap reached; stop driving the upstream right away.
                    cur.close();
                }
            }
            Some(item)
        }))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        crate::fastpath::try_element_at(&self.source, self.skip)
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        self.open().last()
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        self.open().nth(index)
    }

    pub(crate) fn count(&self) -> usize {
        match self.take {
            None => crate::fastpath::count(&self.source).saturating_sub(self.skip),
            Some(limit) => {
                // Drive the upstream only as far as the window can reach.
                let cap = self.skip.saturating_add(limit);
                let mut cur = self.source.cursor();
                let mut seen = 0usize;
                while seen < cap && cur.next().is_some() {
                    seen += 1;
                }
                seen.saturating_sub(self.skip)
            }
        }
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.open().collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.open().any(|item| item == *value)
    }
}
