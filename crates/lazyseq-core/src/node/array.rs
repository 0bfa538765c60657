//! Operator nodes over array-backed producers.
//!
//! Each node captures its upstream as an index projection, so stacking a
//! further operator composes closures instead of adding a cursor layer.
//! Windows are inclusive index ranges into the backing array; the high
//! bound may exceed the array and is clamped when iterating.

use std::sync::Arc;

use crate::types::{BoxIter, Element, IndexFn, PredicateFn, ScanFn, SelectorFn};

/// Whole-array transform; exactly one element per source index.
pub(crate) struct ArrayMapNode<T> {
    pub(crate) len: usize,
    pub(crate) proj: IndexFn<T>,
}

impl<T: Element> ArrayMapNode<T> {
    pub(crate) fn over<S: Element>(items: Arc<[S]>, f: SelectorFn<S, T>) -> Self {
        let len = items.len();
        let proj: IndexFn<T> = Arc::new(move |i| f(items[i].clone()));
        ArrayMapNode { len, proj }
    }

    /// Stack a further transform by composing projections.
    pub(crate) fn composed<R: Element>(&self, g: SelectorFn<T, R>) -> ArrayMapNode<R> {
        let inner = self.proj.clone();
        let proj: IndexFn<R> = Arc::new(move |i| g(inner(i)));
        ArrayMapNode {
            len: self.len,
            proj,
        }
    }

    /// Clamp to an inclusive index window; `None` when it starts past the end.
    pub(crate) fn windowed(&self, lo: usize, hi: usize) -> Option<ArrayMapWindowNode<T>> {
        if lo >= self.len {
            return None;
        }
        Some(ArrayMapWindowNode {
            len: self.len,
            lo,
            hi,
            proj: self.proj.clone(),
        })
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let proj = self.proj.clone();
        Box::new((0..self.len).map(move |i| proj(i)))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            Some((self.proj)(0))
        }
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        self.len.checked_sub(1).map(|i| (self.proj)(i))
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        if index < self.len {
            Some((self.proj)(index))
        } else {
            None
        }
    }

    /// Counting runs the transform for every element, exactly like a full
    /// traversal would.
    pub(crate) fn count(&self) -> usize {
        for i in 0..self.len {
            (self.proj)(i);
        }
        self.len
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        (0..self.len).map(|i| (self.proj)(i)).collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        (0..self.len).any(|i| (self.proj)(i) == *value)
    }
}

/// Predicate scan over a backing array, upstream element type erased.
pub(crate) struct ArrayFilterNode<T> {
    pub(crate) len: usize,
    pub(crate) scan: ScanFn<T>,
}

impl<T: Element> ArrayFilterNode<T> {
    pub(crate) fn over(items: Arc<[T]>, pred: PredicateFn<T>) -> Self {
        debug_assert!(!items.is_empty());
        let len = items.len();
        let scan: ScanFn<T> = Arc::new(move |i| {
            let item = items[i].clone();
            if pred(&item) {
                Some(item)
            } else {
                None
            }
        });
        ArrayFilterNode { len, scan }
    }

    /// Conjoin a further predicate; the earlier one still runs first.
    pub(crate) fn and_pred(&self, pred: PredicateFn<T>) -> ArrayFilterNode<T> {
        let inner = self.scan.clone();
        let scan: ScanFn<T> = Arc::new(move |i| inner(i).filter(|item| pred(item)));
        ArrayFilterNode {
            len: self.len,
            scan,
        }
    }

    /// Stack a transform on the surviving elements.
    pub(crate) fn mapped<R: Element>(&self, g: SelectorFn<T, R>) -> ArrayFilterMapNode<R> {
        let inner = self.scan.clone();
        let scan: ScanFn<R> = Arc::new(move |i| inner(i).map(|item| g(item)));
        ArrayFilterMapNode {
            len: self.len,
            scan,
        }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let scan = self.scan.clone();
        Box::new((0..self.len).filter_map(move |i| scan(i)))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        (0..self.len).find_map(|i| (self.scan)(i))
    }

    // The predicate runs over the whole array in order, so forward scans
    // keep side effects identical to a full traversal.
    pub(crate) fn try_last(&self) -> Option<T> {
        let mut last = None;
        for i in 0..self.len {
            if let Some(item) = (self.scan)(i) {
                last = Some(item);
            }
        }
        last
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        let mut remaining = index;
        for i in 0..self.len {
            if let Some(item) = (self.scan)(i) {
                if remaining == 0 {
                    return Some(item);
                }
                remaining -= 1;
            }
        }
        None
    }

    pub(crate) fn count(&self) -> usize {
        (0..self.len).filter(|&i| (self.scan)(i).is_some()).count()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        (0..self.len).filter_map(|i| (self.scan)(i)).collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        (0..self.len).any(|i| (self.scan)(i).as_ref() == Some(value))
    }
}

/// Predicate plus transform over a backing array.
///
/// Further filters do not fuse into this shape; only further transforms
/// compose. That keeps the predicate ahead of every transform, matching
/// the order the pipeline was written in.
pub(crate) struct ArrayFilterMapNode<T> {
    pub(crate) len: usize,
    pub(crate) scan: ScanFn<T>,
}

impl<T: Element> ArrayFilterMapNode<T> {
    pub(crate) fn composed<R: Element>(&self, g: SelectorFn<T, R>) -> ArrayFilterMapNode<R> {
        let inner = self.scan.clone();
        let scan: ScanFn<R> = Arc::new(move |i| inner(i).map(|item| g(item)));
        ArrayFilterMapNode {
            len: self.len,
            scan,
        }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let scan = self.scan.clone();
        Box::new((0..self.len).filter_map(move |i| scan(i)))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        (0..self.len).find_map(|i| (self.scan)(i))
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        let mut last = None;
        for i in 0..self.len {
            if let Some(item) = (self.scan)(i) {
                last = Some(item);
            }
        }
        last
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        let mut remaining = index;
        for i in 0..self.len {
            if let Some(item) = (self.scan)(i) {
                if remaining == 0 {
                    return Some(item);
                }
                remaining -= 1;
            }
        }
        None
    }

    pub(crate) fn count(&self) -> usize {
        (0..self.len).filter(|&i| (self.scan)(i).is_some()).count()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        (0..self.len).filter_map(|i| (self.scan)(i)).collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        (0..self.len).any(|i| (self.scan)(i).as_ref() == Some(value))
    }
}

/// Inclusive index window over the backing array, elements untouched.
pub(crate) struct ArrayWindowNode<T> {
    pub(crate) items: Arc<[T]>,
    // invariant: lo < items.len() && lo <= hi
    pub(crate) lo: usize,
    pub(crate) hi: usize,
}

impl<T: Element> ArrayWindowNode<T> {
    fn end(&self) -> usize {
        self.hi.min(self.items.len() - 1)
    }

    pub(crate) fn window_len(&self) -> usize {
        self.end() - self.lo + 1
    }

    /// Narrow from the front; `None` when the window empties out.
    pub(crate) fn skipped(&self, n: usize) -> Option<ArrayWindowNode<T>> {
        let lo = self.lo.saturating_add(n);
        if lo >= self.items.len() || lo > self.hi {
            return None;
        }
        Some(ArrayWindowNode {
            items: self.items.clone(),
            lo,
            hi: self.hi,
        })
    }

    /// Cap the window length at `n` (at least 1).
    pub(crate) fn taken(&self, n: usize) -> ArrayWindowNode<T> {
        ArrayWindowNode {
            items: self.items.clone(),
            lo: self.lo,
            hi: self.lo.saturating_add(n - 1).min(self.hi),
        }
    }

    /// Stack a transform; the window carries over unchanged.
    pub(crate) fn mapped<R: Element>(&self, g: SelectorFn<T, R>) -> ArrayMapWindowNode<R> {
        let items = self.items.clone();
        let proj: IndexFn<R> = Arc::new(move |i| g(items[i].clone()));
        ArrayMapWindowNode {
            len: self.items.len(),
            lo: self.lo,
            hi: self.hi,
            proj,
        }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let items = self.items.clone();
        Box::new((self.lo..=self.end()).map(move |i| items[i].clone()))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        self.items.get(self.lo).cloned()
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        self.items.get(self.end()).cloned()
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        let at = self.lo.checked_add(index)?;
        if at > self.end() {
            return None;
        }
        self.items.get(at).cloned()
    }

    /// Pure window arithmetic; nothing runs.
    pub(crate) fn count(&self) -> usize {
        self.window_len()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        self.items[self.lo..=self.end()].to_vec()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items[self.lo..=self.end()].iter().any(|x| x == value)
    }
}

/// Transform over an inclusive index window of the backing array.
pub(crate) struct ArrayMapWindowNode<T> {
    /// Backing array length; the projection is defined for indices below it.
    pub(crate) len: usize,
    // invariant: lo < len && lo <= hi
    pub(crate) lo: usize,
    pub(crate) hi: usize,
    pub(crate) proj: IndexFn<T>,
}

impl<T: Element> ArrayMapWindowNode<T> {
    fn end(&self) -> usize {
        self.hi.min(self.len - 1)
    }

    pub(crate) fn window_len(&self) -> usize {
        self.end() - self.lo + 1
    }

    pub(crate) fn composed<R: Element>(&self, g: SelectorFn<T, R>) -> ArrayMapWindowNode<R> {
        let inner = self.proj.clone();
        let proj: IndexFn<R> = Arc::new(move |i| g(inner(i)));
        ArrayMapWindowNode {
            len: self.len,
            lo: self.lo,
            hi: self.hi,
            proj,
        }
    }

    pub(crate) fn skipped(&self, n: usize) -> Option<ArrayMapWindowNode<T>> {
        let lo = self.lo.saturating_add(n);
        if lo >= self.len || lo > self.hi {
            return None;
        }
        Some(ArrayMapWindowNode {
            len: self.len,
            lo,
            hi: self.hi,
            proj: self.proj.clone(),
        })
    }

    pub(crate) fn taken(&self, n: usize) -> ArrayMapWindowNode<T> {
        ArrayMapWindowNode {
            len: self.len,
            lo: self.lo,
            hi: self.lo.saturating_add(n - 1).min(self.hi),
            proj: self.proj.clone(),
        }
    }

    pub(crate) fn open(&self) -> BoxIter<T> {
        let proj = self.proj.clone();
        Box::new((self.lo..=self.end()).map(move |i| proj(i)))
    }

    pub(crate) fn try_first(&self) -> Option<T> {
        Some((self.proj)(self.lo))
    }

    pub(crate) fn try_last(&self) -> Option<T> {
        Some((self.proj)(self.end()))
    }

    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        let at = self.lo.checked_add(index)?;
        if at > self.end() {
            return None;
        }
        Some((self.proj)(at))
    }

    /// Pure window arithmetic; the transform does not run.
    pub(crate) fn count(&self) -> usize {
        self.window_len()
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        (self.lo..=self.end()).map(|i| (self.proj)(i)).collect()
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        (self.lo..=self.end()).any(|i| (self.proj)(i) == *value)
    }
}
