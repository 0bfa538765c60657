//! Lookup construction, grouping, and the hash-join family.

mod test_probes;

use lazyseq::prelude::*;
use test_probes::counted_pulls;

fn orders() -> Sequence<(u32, &'static str)> {
    Sequence::from_vec(vec![
        (7, "keyboard"),
        (3, "mouse"),
        (7, "monitor"),
        (5, "cable"),
        (3, "dock"),
    ])
}

fn customers() -> Sequence<(u32, &'static str)> {
    Sequence::from_vec(vec![(3, "noor"), (5, "tasha"), (9, "felix")])
}

#[test]
fn test_lookup_preserves_first_seen_key_and_arrival_order() {
    let lookup = orders().to_lookup(|&(customer, _)| customer);
    let keys: Vec<u32> = lookup.keys().copied().collect();
    assert_eq!(keys, vec![7, 3, 5]);
    assert_eq!(
        lookup.get(&3).to_vec(),
        vec![(3, "mouse"), (3, "dock")]
    );
    assert_eq!(lookup.len(), 3);
    assert!(lookup.contains_key(&5));
    assert!(!lookup.contains_key(&8));
    assert!(lookup.get(&8).is_empty());
}

#[test]
fn test_lookup_buckets_are_traversal_free_sequences() {
    let lookup = orders().to_lookup_map(|&(customer, _)| customer, |(_, item)| item);
    let bucket = lookup.get(&7);
    assert_eq!(bucket.producer_kind(), "array");
    assert_eq!(bucket.to_vec(), vec!["keyboard", "monitor"]);
    assert_eq!(bucket.to_vec(), vec!["keyboard", "monitor"]);
}

#[test]
fn test_group_by_defers_the_drain() {
    let (source, pulls) = counted_pulls(vec![1, 2, 3, 4, 5]);
    let groups = source.group_by(|n| n % 2);
    assert_eq!(pulls.reading(), 0);

    let summary: Vec<(i32, Vec<i32>)> = groups
        .cursor()
        .map(|g| (*g.key(), g.elements().to_vec()))
        .collect();
    assert_eq!(pulls.reading(), 5);
    assert_eq!(summary, vec![(1, vec![1, 3, 5]), (0, vec![2, 4])]);
}

#[test]
fn test_group_by_map_projects_elements() {
    let words = Sequence::from_vec(vec!["apple", "plum", "avocado", "pear"]);
    let groups: Vec<(u8, Vec<usize>)> = words
        .group_by_map(|w| w.as_bytes()[0], |w| w.len())
        .cursor()
        .map(|g| (*g.key(), g.elements().to_vec()))
        .collect();
    assert_eq!(groups, vec![(b'a', vec![5, 7]), (b'p', vec![4, 4])]);
}

#[test]
fn test_join_emits_outer_then_bucket_order() {
    let matched: Vec<(&str, &str)> = orders()
        .join(
            customers(),
            |&(customer, _)| customer,
            |&(customer, _)| customer,
            |(_, item), (_, name)| (name, item),
        )
        .to_vec();
    assert_eq!(
        matched,
        vec![("noor", "mouse"), ("tasha", "cable"), ("noor", "dock")]
    );
}

#[test]
fn test_join_crosses_duplicate_keys() {
    let left = Sequence::from_vec(vec![("a", 1), ("a", 2)]);
    let right = Sequence::from_vec(vec![("a", 10), ("a", 20)]);
    let pairs: Vec<(i32, i32)> = left
        .join(right, |l| l.0, |r| r.0, |l, r| (l.1, r.1))
        .to_vec();
    assert_eq!(pairs, vec![(1, 10), (1, 20), (2, 10), (2, 20)]);
}

#[test]
fn test_left_join_emits_placeholders_for_unmatched() {
    let rows: Vec<(&str, Option<&str>)> = customers()
        .left_join(
            orders(),
            |&(customer, _)| customer,
            |&(customer, _)| customer,
            |(_, name), order| (name, order.map(|(_, item)| item)),
        )
        .to_vec();
    assert_eq!(
        rows,
        vec![
            ("noor", Some("mouse")),
            ("noor", Some("dock")),
            ("tasha", Some("cable")),
            ("felix", None),
        ]
    );
}

#[test]
fn test_right_join_streams_the_inner_side() {
    let rows: Vec<(Option<&str>, &str)> = customers()
        .right_join(
            orders(),
            |&(customer, _)| customer,
            |&(customer, _)| customer,
            |customer, (_, item)| (customer.map(|(_, name)| name), item),
        )
        .to_vec();
    assert_eq!(
        rows,
        vec![
            (None, "keyboard"),
            (Some("noor"), "mouse"),
            (None, "monitor"),
            (Some("tasha"), "cable"),
            (Some("noor"), "dock"),
        ]
    );
}

#[test]
fn test_group_join_emits_one_row_per_outer() {
    let rows: Vec<(&str, Vec<&str>)> = customers()
        .group_join(
            orders(),
            |&(customer, _)| customer,
            |&(customer, _)| customer,
            |(_, name), bucket| (name, bucket.cursor().map(|(_, item)| item).collect()),
        )
        .to_vec();
    assert_eq!(
        rows,
        vec![
            ("noor", vec!["mouse", "dock"]),
            ("tasha", vec!["cable"]),
            ("felix", vec![]),
        ]
    );
}

#[test]
fn test_join_with_empty_outer_never_drains_the_inner() {
    let (inner, pulls) = counted_pulls(vec![1, 2, 3]);
    let joined: Vec<(i32, i32)> = Sequence::<i32>::empty()
        .join(inner, |n| *n, |n| *n, |a, b| (a, b))
        .to_vec();
    assert_eq!(joined, Vec::<(i32, i32)>::new());
    assert_eq!(pulls.reading(), 0);
}

#[test]
fn test_join_builds_the_lookup_at_first_advance() {
    let (inner, inner_pulls) = counted_pulls(vec![1, 2, 3]);
    let (outer, outer_pulls) = counted_pulls(vec![2, 3]);
    let joined = outer.join(inner, |n| *n, |n| *n, |a, b| (a, b));
    assert_eq!(inner_pulls.reading(), 0);
    assert_eq!(outer_pulls.reading(), 0);

    let mut cur = joined.cursor();
    assert_eq!(cur.next(), Some((2, 2)));
    // One outer pull, and the whole inner side hashed.
    assert_eq!(outer_pulls.reading(), 1);
    assert_eq!(inner_pulls.reading(), 3);
}

#[test]
fn test_count_by_tallies_in_first_seen_order() {
    let words = Sequence::from_vec(vec!["bee", "ant", "bat", "cow", "asp", "bug"]);
    let tallies: Vec<(u8, usize)> = words.count_by(|w| w.as_bytes()[0]).to_vec();
    assert_eq!(tallies, vec![(b'b', 3), (b'a', 2), (b'c', 1)]);
}

#[test]
fn test_aggregate_by_folds_per_key() {
    let totals: Vec<(u32, i64)> = Sequence::from_vec(vec![
        (7u32, 25i64),
        (3, 10),
        (7, 5),
        (3, 1),
    ])
    .aggregate_by(|&(k, _)| k, 0i64, |acc, (_, amount)| acc + amount)
    .to_vec();
    assert_eq!(totals, vec![(7, 30), (3, 11)]);
}
