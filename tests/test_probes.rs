//! Shared side-effect probes for the integration suites.
//!
//! Laziness and fusion claims are only testable by watching closures run,
//! so most suites thread one of these counters through a pipeline and
//! assert on how often it fired.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazyseq::prelude::*;

/// Shareable counter usable from inside pipeline closures.
#[derive(Clone)]
pub struct Probe(Arc<AtomicUsize>);

impl Probe {
    pub fn new() -> Self {
        Probe(Arc::new(AtomicUsize::new(0)))
    }

    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn reading(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Array-backed sequence whose identity transform counts its runs.
pub fn counted_map(items: Vec<i32>) -> (Sequence<i32>, Probe) {
    let probe = Probe::new();
    let tap = probe.clone();
    let seq = Sequence::from_vec(items).map(move |n| {
        tap.hit();
        n
    });
    (seq, probe)
}

/// Generator-backed sequence counting every element pulled out of it.
pub fn counted_pulls(items: Vec<i32>) -> (Sequence<i32>, Probe) {
    let probe = Probe::new();
    let tap = probe.clone();
    let seq = Sequence::from_fn(move || {
        let tap = tap.clone();
        items.clone().into_iter().map(move |n| {
            tap.hit();
            n
        })
    });
    (seq, probe)
}
