//! Operator fusion rules: which chains collapse into one node, which wrap.

mod test_probes;

use lazyseq::prelude::*;
use test_probes::Probe;

#[test]
fn test_filter_then_map_fuses_over_arrays() {
    let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5])
        .filter(|n| n % 2 == 0)
        .map(|n| n * 10);
    assert_eq!(seq.producer_kind(), "array-filter-map");
    assert_eq!(seq.to_vec(), vec![20, 40]);
}

#[test]
fn test_map_map_composes_into_one_node() {
    let f_probe = Probe::new();
    let g_probe = Probe::new();
    let f_tap = f_probe.clone();
    let g_tap = g_probe.clone();
    let seq = Sequence::from_vec(vec![1, 2, 3])
        .map(move |n| {
            f_tap.hit();
            n + 1
        })
        .map(move |n| {
            g_tap.hit();
            n * 10
        });
    assert_eq!(seq.producer_kind(), "array-map");
    assert_eq!(seq.to_vec(), vec![20, 30, 40]);
    // One invocation per element per stage, same as the composed closure.
    assert_eq!(f_probe.reading(), 3);
    assert_eq!(g_probe.reading(), 3);

    let composed = Sequence::from_vec(vec![1, 2, 3]).map(|n| (n + 1) * 10);
    assert_eq!(composed.to_vec(), seq.to_vec());
}

#[test]
fn test_map_then_filter_wraps_instead_of_fusing() {
    let seq = Sequence::from_vec(vec![1, 2, 3, 4]).map(|n| n * 3).filter(|n| n % 2 == 0);
    assert_eq!(seq.producer_kind(), "iter-filter");
    assert_eq!(seq.to_vec(), vec![6, 12]);
}

#[test]
fn test_filter_filter_conjoins_left_first() {
    let left = Probe::new();
    let right = Probe::new();
    let left_tap = left.clone();
    let right_tap = right.clone();
    let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5, 6])
        .filter(move |n| {
            left_tap.hit();
            *n > 2
        })
        .filter(move |n| {
            right_tap.hit();
            n % 2 == 0
        });
    assert_eq!(seq.producer_kind(), "array-filter");
    assert_eq!(seq.to_vec(), vec![4, 6]);
    // Short-circuit: the second predicate only sees the survivors.
    assert_eq!(left.reading(), 6);
    assert_eq!(right.reading(), 4);
}

#[test]
fn test_iter_side_fusion_kinds() {
    let gen = || Sequence::from_fn(|| (1..=6));

    let mapped = gen().map(|n| n + 1);
    assert_eq!(mapped.producer_kind(), "iter-map");
    let remapped = mapped.map(|n| n * 2);
    assert_eq!(remapped.producer_kind(), "iter-map");
    assert_eq!(remapped.to_vec(), vec![4, 6, 8, 10, 12, 14]);

    let filtered = gen().filter(|n| n % 2 == 0);
    assert_eq!(filtered.producer_kind(), "iter-filter");
    let refiltered = filtered.filter(|n| *n > 2);
    assert_eq!(refiltered.producer_kind(), "iter-filter");
    assert_eq!(refiltered.to_vec(), vec![4, 6]);

    let filter_mapped = gen().filter(|n| n % 2 == 0).map(|n| n * 10);
    assert_eq!(filter_mapped.producer_kind(), "iter-filter-map");
    let composed = filter_mapped.map(|n| n + 1);
    assert_eq!(composed.producer_kind(), "iter-filter-map");
    assert_eq!(composed.to_vec(), vec![21, 41, 61]);
}

#[test]
fn test_window_then_map_fuses_over_arrays() {
    let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5]).skip(1).map(|n| n * 10);
    assert_eq!(seq.producer_kind(), "array-map-window");
    assert_eq!(seq.to_vec(), vec![20, 30, 40, 50]);

    let narrowed = seq.take(2);
    assert_eq!(narrowed.producer_kind(), "array-map-window");
    assert_eq!(narrowed.to_vec(), vec![20, 30]);
}

#[test]
fn test_map_then_window_fuses_over_arrays() {
    let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5]).map(|n| n * 10).skip(3);
    assert_eq!(seq.producer_kind(), "array-map-window");
    assert_eq!(seq.to_vec(), vec![40, 50]);
}

#[test]
fn test_filter_after_filter_map_wraps() {
    let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5, 6])
        .filter(|n| n % 2 == 0)
        .map(|n| n * 10)
        .filter(|n| *n > 20);
    assert_eq!(seq.producer_kind(), "iter-filter");
    assert_eq!(seq.to_vec(), vec![40, 60]);
}

#[test]
fn test_operators_on_empty_build_nothing() {
    let probe = Probe::new();
    let tap = probe.clone();
    let seq = Sequence::<i32>::empty()
        .map(move |n: i32| {
            tap.hit();
            n
        })
        .filter(|n| *n > 0)
        .skip(1)
        .take(5);
    assert_eq!(seq.producer_kind(), "empty");
    assert_eq!(seq.to_vec(), Vec::<i32>::new());
    assert_eq!(probe.reading(), 0);
}

#[test]
fn test_fused_pipeline_traverses_upstream_once() {
    let pulls = Probe::new();
    let tap = pulls.clone();
    let seq = Sequence::from_fn(move || {
        let tap = tap.clone();
        (1..=4).map(move |n| {
            tap.hit();
            n
        })
    })
    .filter(|n| n % 2 == 0)
    .map(|n| n * 100)
    .map(|n| n + 1);
    assert_eq!(seq.producer_kind(), "iter-filter-map");
    assert_eq!(seq.to_vec(), vec![201, 401]);
    assert_eq!(pulls.reading(), 4);
}
