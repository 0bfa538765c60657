//! Flat concatenation over an ordered run of child sequences.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::fastpath;
use crate::sequence::Sequence;
use crate::types::{BoxIter, Element};

/// Longest child run before a further append nests a fresh node instead.
pub(crate) const MAX_CHAIN: usize = u32::MAX as usize;

/// Ordered children of one concatenation.
///
/// Children sit in a flat run so appending in a loop extends one node
/// instead of deepening a spine of pairs. Most chains are short; the
/// inline capacity keeps those off the heap.
#[derive(Clone)]
pub(crate) struct ConcatNode<T> {
    pub(crate) children: SmallVec<[Sequence<T>; 4]>,
}

impl<T: Element> ConcatNode<T> {
    pub(crate) fn pair(first: Sequence<T>, second: Sequence<T>) -> Self {
        let mut children = SmallVec::new();
        children.push(first);
        children.push(second);
        ConcatNode { children }
    }

    /// Drive the children in order, one open cursor at a time.
    pub(crate) fn open(&self) -> BoxIter<T> {
        let children = self.children.clone();
        let mut next_child = 0usize;
        let mut inner: Option<Cursor<T>> = None;
        Box::new(std::iter::from_fn(move || loop {
            if let Some(cur) = inner.as_mut() {
                match cur.next() {
                    Some(item) => return Some(item),
                    None => inner = None,
                }
            }
            match children.get(next_child) {
                Some(child) => {
                    inner = Some(child.cursor());
                    next_child += 1;
                }
                None => return None,
            }
        }))
    }

    /// First element of the leftmost non-empty child; later children are
    /// not touched.
    pub(crate) fn try_first(&self) -> Option<T> {
        self.children.iter().find_map(|child| fastpath::try_first(child))
    }

    /// Last element of the rightmost non-empty child; earlier children are
    /// not touched.
    pub(crate) fn try_last(&self) -> Option<T> {
        self.children
            .iter()
            .rev()
            .find_map(|child| fastpath::try_last(child))
    }

    /// Walk children, skipping whole ones by known length where possible.
    pub(crate) fn try_element_at(&self, index: usize) -> Option<T> {
        let mut index = index;
        for child in &self.children {
            if let Some(len) = fastpath::known_len(child) {
                if index < len {
                    return fastpath::try_element_at(child, index);
                }
                index -= len;
            } else {
                for item in child.cursor() {
                    if index == 0 {
                        return Some(item);
                    }
                    index -= 1;
                }
            }
        }
        None
    }

    pub(crate) fn count(&self) -> usize {
        self.children
            .iter()
            .map(|child| fastpath::count(child))
            .fold(0usize, |acc, n| acc.saturating_add(n))
    }

    pub(crate) fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::new();
        for child in &self.children {
            out.extend(fastpath::to_vec(child));
        }
        out
    }

    pub(crate) fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.children
            .iter()
            .any(|child| fastpath::contains(child, value))
    }
}
