//! Skip/take window composition and edge behavior.

mod test_probes;

use lazyseq::prelude::*;
use test_probes::{counted_map, counted_pulls, Probe};

#[test]
fn test_skip_take_over_array() {
    let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5]).skip(2).take(2);
    assert_eq!(seq.producer_kind(), "array-window");
    assert_eq!(seq.to_vec(), vec![3, 4]);
}

#[test]
fn test_skip_skip_adds_up() {
    let array = Sequence::from_vec(vec![1, 2, 3, 4, 5, 6]).skip(1).skip(2);
    assert_eq!(array.producer_kind(), "array-window");
    assert_eq!(array.to_vec(), Sequence::from_vec(vec![1, 2, 3, 4, 5, 6]).skip(3).to_vec());

    let lazy = Sequence::from_fn(|| (1..=6)).skip(1).skip(2);
    assert_eq!(lazy.producer_kind(), "iter-window");
    assert_eq!(lazy.to_vec(), vec![4, 5, 6]);
}

#[test]
fn test_take_take_keeps_the_smaller_cap() {
    let wider = Sequence::from_vec(vec![1, 2, 3, 4, 5]).take(4).take(2);
    assert_eq!(wider.to_vec(), vec![1, 2]);
    let narrower = Sequence::from_vec(vec![1, 2, 3, 4, 5]).take(2).take(5);
    assert_eq!(narrower.to_vec(), vec![1, 2]);

    let lazy = Sequence::from_fn(|| (1..=5)).take(4).take(2);
    assert_eq!(lazy.producer_kind(), "iter-window");
    assert_eq!(lazy.to_vec(), vec![1, 2]);
}

#[test]
fn test_windows_past_the_end_are_empty() {
    let array = Sequence::from_vec(vec![1, 2, 3]);
    assert_eq!(array.clone().skip(10).producer_kind(), "empty");
    assert_eq!(array.clone().skip(10).to_vec(), Vec::<i32>::new());
    assert_eq!(array.clone().skip(3).producer_kind(), "empty");
    assert_eq!(array.clone().take(10).to_vec(), vec![1, 2, 3]);

    let lazy = Sequence::from_fn(|| (1..=3)).skip(10);
    assert_eq!(lazy.to_vec(), Vec::<i32>::new());
    assert_eq!(lazy.count(), 0);
}

#[test]
fn test_window_bounds_saturate_instead_of_overflowing() {
    let skipped = Sequence::from_fn(|| (1..=3)).skip(usize::MAX - 1).skip(10);
    assert_eq!(skipped.to_vec(), Vec::<i32>::new());

    let capped = Sequence::from_vec(vec![1, 2, 3]).skip(1).take(usize::MAX);
    assert_eq!(capped.to_vec(), vec![2, 3]);

    let both = Sequence::from_fn(|| (1..=5)).take(usize::MAX).skip(2);
    assert_eq!(both.to_vec(), vec![3, 4, 5]);
}

#[test]
fn test_skip_zero_and_take_zero() {
    let seq = Sequence::from_vec(vec![1, 2, 3]);
    assert_eq!(seq.clone().skip(0).producer_kind(), "array");
    assert_eq!(seq.clone().skip(0).to_vec(), vec![1, 2, 3]);
    assert_eq!(seq.clone().take(0).producer_kind(), "empty");
    assert_eq!(seq.take(0).to_vec(), Vec::<i32>::new());
}

#[test]
fn test_take_covering_the_whole_array_keeps_the_array() {
    let seq = Sequence::from_vec(vec![1, 2, 3]).take(10);
    assert_eq!(seq.producer_kind(), "array");

    let (mapped, probe) = counted_map(vec![1, 2, 3]);
    let kept = mapped.take(3);
    assert_eq!(kept.producer_kind(), "array-map");
    assert_eq!(kept.to_vec(), vec![1, 2, 3]);
    assert_eq!(probe.reading(), 3);
}

#[test]
fn test_array_window_count_is_pure_arithmetic() {
    let (seq, probe) = counted_map(vec![1, 2, 3, 4, 5]);
    let window = seq.skip(1).take(3);
    assert_eq!(window.producer_kind(), "array-map-window");
    assert_eq!(window.count(), 3);
    assert_eq!(window.known_len(), Some(3));
    // The count came from index math alone.
    assert_eq!(probe.reading(), 0);
}

#[test]
fn test_array_window_positional_queries_transform_one_element() {
    let (seq, probe) = counted_map(vec![10, 20, 30, 40]);
    let window = seq.skip(1);
    assert_eq!(window.try_last(), Some(40));
    assert_eq!(probe.reading(), 1);
    assert_eq!(window.try_first(), Some(20));
    assert_eq!(probe.reading(), 2);
    assert_eq!(window.try_element_at(1), Some(30));
    assert_eq!(probe.reading(), 3);
}

#[test]
fn test_iter_take_stops_pulling_at_the_cap() {
    let (seq, probe) = counted_pulls(vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(seq.take(3).to_vec(), vec![1, 2, 3]);
    assert_eq!(probe.reading(), 3);
}

#[test]
fn test_iter_window_count_drives_only_to_the_cap() {
    let (seq, probe) = counted_pulls(vec![1, 2, 3, 4, 5]);
    assert_eq!(seq.skip(1).take(2).count(), 2);
    // skip + cap = three upstream pulls, no further.
    assert_eq!(probe.reading(), 3);
}

#[test]
fn test_iter_window_first_skips_raw() {
    let probe = Probe::new();
    let tap = probe.clone();
    let seq = Sequence::from_fn(|| (1..=5))
        .map(move |n| {
            tap.hit();
            n * 10
        })
        .skip(2);
    assert_eq!(seq.producer_kind(), "iter-window");
    assert_eq!(seq.try_first(), Some(30));
    // Positionals pass through the window to the transform node, which
    // advances raw and transforms only the landing element.
    assert_eq!(probe.reading(), 1);
}

#[test]
fn test_window_grid_matches_iterator_arithmetic() {
    let data: Vec<i32> = (1..=8).collect();
    for &s in &[0usize, 1, 3, 7, 8, 12] {
        for &t in &[0usize, 1, 2, 6, 9] {
            let expected: Vec<i32> = data.iter().copied().skip(s).take(t).collect();
            let array = Sequence::from_vec(data.clone()).skip(s).take(t);
            assert_eq!(array.to_vec(), expected, "array skip {s} take {t}");
            assert_eq!(array.count(), expected.len(), "array count skip {s} take {t}");

            let data_for_gen = data.clone();
            let lazy = Sequence::from_fn(move || data_for_gen.clone().into_iter())
                .skip(s)
                .take(t);
            assert_eq!(lazy.to_vec(), expected, "lazy skip {s} take {t}");
            assert_eq!(lazy.count(), expected.len(), "lazy count skip {s} take {t}");
        }
    }
}
