//! Concatenation chains: order, delegation, flat appends.

mod test_probes;

use lazyseq::prelude::*;
use test_probes::{counted_map, counted_pulls};

#[test]
fn test_concat_runs_children_in_order() {
    let seq = Sequence::from_vec(vec![1, 2])
        .concat(Sequence::once(3))
        .concat(Sequence::from_fn(|| (4..=5)));
    assert_eq!(seq.producer_kind(), "concat");
    assert_eq!(seq.to_vec(), vec![1, 2, 3, 4, 5]);
    assert_eq!(seq.count(), 5);
}

#[test]
fn test_concat_collapses_empty_sides() {
    let right = Sequence::<i32>::empty().concat(Sequence::from_vec(vec![1, 2]));
    assert_eq!(right.producer_kind(), "array");

    let left = Sequence::from_vec(vec![1, 2]).concat(Sequence::empty());
    assert_eq!(left.producer_kind(), "array");

    let both = Sequence::<i32>::empty().concat(Sequence::empty());
    assert_eq!(both.producer_kind(), "empty");
}

#[test]
fn test_concat_first_touches_only_the_first_child() {
    let (first, first_probe) = counted_map(vec![1, 2]);
    let (second, second_probe) = counted_map(vec![3, 4]);
    let seq = first.concat(second);
    assert_eq!(seq.try_first(), Some(1));
    assert_eq!(first_probe.reading(), 1);
    assert_eq!(second_probe.reading(), 0);
}

#[test]
fn test_concat_last_touches_only_the_last_child() {
    let (first, first_probe) = counted_map(vec![1, 2]);
    let (second, second_probe) = counted_map(vec![3, 4]);
    let seq = first.concat(second);
    assert_eq!(seq.try_last(), Some(4));
    assert_eq!(first_probe.reading(), 0);
    assert_eq!(second_probe.reading(), 1);
}

#[test]
fn test_concat_last_skips_trailing_empty_children() {
    let seq = Sequence::from_vec(vec![1, 2])
        .concat(Sequence::from_fn(|| std::iter::empty::<i32>()));
    assert_eq!(seq.try_last(), Some(2));
    assert_eq!(seq.try_first(), Some(1));
}

#[test]
fn test_concat_element_at_skips_whole_children_by_length() {
    let (second, second_probe) = counted_map(vec![30, 40, 50]);
    let seq = Sequence::from_vec(vec![10, 20]).concat(second);

    assert_eq!(seq.try_element_at(1), Some(20));
    assert_eq!(second_probe.reading(), 0);

    assert_eq!(seq.try_element_at(3), Some(40));
    // Landed inside the second child with one transform run.
    assert_eq!(second_probe.reading(), 1);

    assert_eq!(seq.try_element_at(9), None);
}

#[test]
fn test_concat_element_at_walks_unsized_children() {
    let (first, pulls) = counted_pulls(vec![10, 20, 30]);
    let seq = first.concat(Sequence::from_vec(vec![40]));
    assert_eq!(seq.try_element_at(3), Some(40));
    // The generator child has no known length, so it was walked through.
    assert_eq!(pulls.reading(), 3);
}

#[test]
fn test_concat_count_delegates_per_child() {
    let (transformed, probe) = counted_map(vec![1, 2, 3]);
    let seq = Sequence::from_vec(vec![4, 5]).concat(transformed);
    assert_eq!(seq.count(), 5);
    // The array child answered by length; the mapped child ran its
    // transform per element, as a traversal would.
    assert_eq!(probe.reading(), 3);
}

#[test]
fn test_concat_contains_stops_at_the_first_match() {
    let (second, second_probe) = counted_map(vec![3, 4]);
    let seq = Sequence::from_vec(vec![1, 2]).concat(second);
    assert!(seq.contains(&2));
    assert_eq!(second_probe.reading(), 0);
    assert!(seq.contains(&4));
    assert!(!seq.contains(&9));
}

#[test]
fn test_deep_append_chain_stays_usable() {
    let mut seq = Sequence::once(0);
    for i in 1..=1000 {
        seq = seq.concat(Sequence::once(i));
    }
    assert_eq!(seq.producer_kind(), "concat");
    assert_eq!(seq.count(), 1001);
    assert_eq!(seq.try_first(), Some(0));
    assert_eq!(seq.try_last(), Some(1000));
    assert_eq!(seq.try_element_at(500), Some(500));
    let drained = seq.to_vec();
    assert_eq!(drained.len(), 1001);
    assert_eq!(drained[731], 731);
}

#[test]
fn test_appending_to_a_shared_chain_leaves_the_clone_alone() {
    let base = Sequence::from_vec(vec![1]).concat(Sequence::from_vec(vec![2]));
    let kept = base.clone();
    let extended = base.concat(Sequence::from_vec(vec![3]));
    assert_eq!(kept.to_vec(), vec![1, 2]);
    assert_eq!(extended.to_vec(), vec![1, 2, 3]);
}

#[test]
fn test_operators_over_concat_wrap_lazily() {
    let seq = Sequence::from_vec(vec![1, 2]).concat(Sequence::from_vec(vec![3, 4]));

    let mapped = seq.clone().map(|n| n * 10);
    assert_eq!(mapped.producer_kind(), "iter-map");
    assert_eq!(mapped.to_vec(), vec![10, 20, 30, 40]);

    let windowed = seq.skip(1).take(2);
    assert_eq!(windowed.producer_kind(), "iter-window");
    assert_eq!(windowed.to_vec(), vec![2, 3]);
}
