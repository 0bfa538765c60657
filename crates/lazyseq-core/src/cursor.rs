//! Single-use cursors over sequence producers.
//!
//! A cursor starts positioned before the first element. [`Cursor::advance`]
//! moves it forward and reports whether an element is available, and
//! [`Cursor::current`] reads the element it rests on. A cursor closes
//! itself on exhaustion, and dropping one releases its upstream state.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::BoxIter;

/// What actually feeds a cursor.
pub(crate) enum Drive<T> {
    Empty,
    Array { items: Arc<[T]>, pos: usize },
    Iter(BoxIter<T>),
}

/// Pull-based reader over one traversal of a sequence.
///
/// Cursors are single-use: a fresh one comes from the sequence, not from
/// rewinding. They move between threads but cannot be shared.
pub struct Cursor<T> {
    drive: Drive<T>,
    slot: Option<T>,
    closed: bool,
}

impl<T: Clone> Cursor<T> {
    pub(crate) fn new(drive: Drive<T>) -> Self {
        Cursor {
            drive,
            slot: None,
            closed: false,
        }
    }

    /// Move to the next element.
    ///
    /// Returns `false` once the sequence is exhausted; at that point the
    /// cursor has closed itself and every later call returns `false`.
    pub fn advance(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let next = match &mut self.drive {
            Drive::Empty => None,
            Drive::Array { items, pos } => {
                let item = items.get(*pos).cloned();
                if item.is_some() {
                    *pos += 1;
                }
                item
            }
            Drive::Iter(iter) => iter.next(),
        };
        match next {
            Some(item) => {
                self.slot = Some(item);
                true
            }
            None => {
                self.close();
                false
            }
        }
    }

    /// The element the cursor currently rests on.
    ///
    /// Fails with [`Error::InvalidState`] before the first advance, after
    /// exhaustion, and after [`Cursor::close`].
    pub fn current(&self) -> Result<&T> {
        self.slot.as_ref().ok_or(Error::InvalidState)
    }

    /// Release upstream state. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.slot = None;
        self.drive = Drive::Empty;
    }

    /// Whether the cursor has closed, explicitly or through exhaustion.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Iterator view over the remaining elements.
///
/// `next` advances and hands the element out by value, leaving the slot
/// empty until the following advance.
impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.advance() {
            self.slot.take()
        } else {
            None
        }
    }
}
