//! The operator catalogue as an extension trait over [`Sequence`].
//!
//! Importing [`SequenceExt`] turns a sequence into a full query surface:
//! projection, restriction, set-flavored, ordering, keyed, and terminal
//! operators, all delegating to the engine's fusable core where one
//! exists and to deferred generic producers otherwise.
//!
//! Deferred operators consume `self` (sequences are cheap to clone when
//! a copy is still needed) and hold their closures as `Send + Sync`
//! trait objects so the result stays shareable across threads. Terminal
//! operators borrow `self` and run on the calling thread.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use lazyseq_core::{Element, Result, Sequence};
use lazyseq_lookup::{Group, Lookup};

use crate::{combine, fold, keyed, ordering, set_ops, windows};

/// Query operators over [`Sequence`].
///
/// Everything lazy stays lazy: a method returning a `Sequence` performs
/// no traversal until a cursor over the result first advances.
pub trait SequenceExt<T: Element>: Sized {
    // ---- projection and expansion ------------------------------------

    /// Map each element to a sequence and flatten, in order.
    fn flat_map<R, F>(self, f: F) -> Sequence<R>
    where
        R: Element,
        F: Fn(T) -> Sequence<R> + Send + Sync + 'static;

    /// Pair each element with its zero-based position.
    fn enumerate(self) -> Sequence<(usize, T)>;

    /// Pair elements positionally until either side runs out.
    fn zip<U: Element>(self, other: Sequence<U>) -> Sequence<(T, U)>;

    /// Combine elements positionally until either side runs out.
    fn zip_with<U, R, F>(self, other: Sequence<U>, f: F) -> Sequence<R>
    where
        U: Element,
        R: Element,
        F: Fn(T, U) -> R + Send + Sync + 'static;

    // ---- restriction -------------------------------------------------

    /// Elements up to, not including, the first that fails `pred`.
    fn take_while<P>(self, pred: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;

    /// Elements from the first that fails `pred`, inclusive, onward.
    fn skip_while<P>(self, pred: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static;

    /// The final `count` elements, buffering at most that many.
    fn take_last(self, count: usize) -> Sequence<T>;

    /// Everything except the final `count` elements.
    fn skip_last(self, count: usize) -> Sequence<T>;

    /// Runs of up to `size` elements; the final run may be shorter.
    ///
    /// Fails with [`InvalidArgument`](lazyseq_core::Error::InvalidArgument)
    /// immediately when `size` is zero.
    fn chunks(self, size: usize) -> Result<Sequence<Sequence<T>>>;

    // ---- set-flavored ------------------------------------------------

    /// First occurrence of each element, in encounter order.
    fn distinct(self) -> Sequence<T>
    where
        T: Hash + Eq;

    /// First element carrying each key, in encounter order.
    fn distinct_by<K, F>(self, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Set union: this sequence, then the other, each element once.
    fn union(self, other: Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq;

    fn union_by<K, F>(self, other: Sequence<T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Elements also present in `other`, each once, in this order.
    fn intersect(self, other: Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq;

    fn intersect_by<K, F>(self, other: Sequence<T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Elements absent from `other`, each once, in this order.
    fn except(self, other: Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq;

    fn except_by<K, F>(self, other: Sequence<T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static;

    // ---- ordering ----------------------------------------------------

    /// Ascending stable sort, replayed lazily per traversal.
    fn order(self) -> Sequence<T>
    where
        T: Ord;

    /// Ascending stable sort by a key of each element.
    fn order_by<K, F>(self, key: F) -> Sequence<T>
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Descending stable sort by a key; equal keys keep encounter order.
    fn order_by_desc<K, F>(self, key: F) -> Sequence<T>
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Stable sort under an arbitrary comparator.
    fn order_with<F>(self, cmp: F) -> Sequence<T>
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static;

    /// Elements in reverse encounter order.
    fn reverse(self) -> Sequence<T>;

    // ---- keyed -------------------------------------------------------

    /// Drain into a frozen multimap keyed by `key`.
    fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K;

    /// Drain into a frozen multimap, projecting each stored element.
    fn to_lookup_map<K, E, KF, EF>(&self, key: KF, elem: EF) -> Lookup<K, E>
    where
        K: Hash + Eq + Element,
        E: Element,
        KF: Fn(&T) -> K,
        EF: Fn(T) -> E;

    /// Group elements by key; groups appear in first-seen key order.
    fn group_by<K, F>(self, key: F) -> Sequence<Group<K, T>>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static;

    fn group_by_map<K, E, KF, EF>(self, key: KF, elem: EF) -> Sequence<Group<K, E>>
    where
        K: Hash + Eq + Element,
        E: Element,
        KF: Fn(&T) -> K + Send + Sync + 'static,
        EF: Fn(T) -> E + Send + Sync + 'static;

    /// Equi-join: stream this side, hash the other, emit one result per
    /// matching pair in outer-then-bucket order.
    fn join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(T, I) -> R + Send + Sync + 'static;

    /// Like [`join`](SequenceExt::join), but an unmatched outer element
    /// still emits once, with `None` on the inner side.
    fn left_join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(T, Option<I>) -> R + Send + Sync + 'static;

    /// Mirror of [`left_join`](SequenceExt::left_join): streams the inner
    /// side and hashes this one, so results follow inner order.
    fn right_join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(Option<T>, I) -> R + Send + Sync + 'static;

    /// One result per outer element, paired with the whole (possibly
    /// empty) sequence of its matches.
    fn group_join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(T, Sequence<I>) -> R + Send + Sync + 'static;

    /// Occurrences per key, in first-seen key order.
    fn count_by<K, F>(self, key: F) -> Sequence<(K, usize)>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static;

    /// Fold each key's elements with `f` from `seed`, in first-seen key
    /// order.
    fn aggregate_by<K, A, KF, F>(self, key: KF, seed: A, f: F) -> Sequence<(K, A)>
    where
        K: Hash + Eq + Element,
        A: Element,
        KF: Fn(&T) -> K + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;

    // ---- quantifiers and folds ---------------------------------------

    /// True if any element satisfies `pred`; stops at the first hit.
    fn any<P>(&self, pred: P) -> bool
    where
        P: Fn(&T) -> bool;

    /// True if every element satisfies `pred`; stops at the first miss.
    fn all<P>(&self, pred: P) -> bool
    where
        P: Fn(&T) -> bool;

    fn fold<A, F>(&self, seed: A, f: F) -> A
    where
        F: Fn(A, T) -> A;

    /// Fold without a seed; fails with `NoElements` when empty.
    fn reduce<F>(&self, f: F) -> Result<T>
    where
        F: Fn(T, T) -> T;

    fn min(&self) -> Result<T>
    where
        T: Ord;

    fn max(&self) -> Result<T>
    where
        T: Ord;

    fn min_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: Ord,
        F: Fn(&T) -> K;

    fn max_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: Ord,
        F: Fn(&T) -> K;

    fn min_by<F>(&self, cmp: F) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering;

    fn max_by<F>(&self, cmp: F) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering;

    /// Total of a numeric projection; an empty sequence sums to zero.
    fn sum_by<N, F>(&self, f: F) -> N
    where
        N: std::iter::Sum,
        F: Fn(T) -> N;

    /// Mean of a numeric projection; fails with `NoElements` when empty.
    fn average_by<F>(&self, f: F) -> Result<f64>
    where
        F: Fn(T) -> f64;

    // ---- selection grids ---------------------------------------------

    /// The only element; `NoElements` when empty, `MoreThanOneElement`
    /// past one.
    fn single(&self) -> Result<T>;

    /// The only element, or `None` when empty; still fails past one.
    fn try_single(&self) -> Result<Option<T>>;

    /// First element satisfying `pred`; `NoMatch` when none does.
    fn first_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool;

    fn try_first_where<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool;

    /// Last element satisfying `pred`; `NoMatch` when none does.
    fn last_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool;

    fn try_last_where<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool;

    /// The only element satisfying `pred`; `NoMatch` when none does,
    /// `MoreThanOneMatch` past one.
    fn single_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool;

    fn try_single_where<P>(&self, pred: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool;

    // ---- collectors --------------------------------------------------

    /// Key-indexed map of the elements; a later duplicate key wins.
    fn to_map<K, F>(&self, key: F) -> HashMap<K, T>
    where
        K: Hash + Eq,
        F: Fn(&T) -> K;

    fn to_set(&self) -> HashSet<T>
    where
        T: Hash + Eq;
}

impl<T: Element> SequenceExt<T> for Sequence<T> {
    fn flat_map<R, F>(self, f: F) -> Sequence<R>
    where
        R: Element,
        F: Fn(T) -> Sequence<R> + Send + Sync + 'static,
    {
        combine::flat_map(self, f)
    }

    fn enumerate(self) -> Sequence<(usize, T)> {
        combine::enumerate(self)
    }

    fn zip<U: Element>(self, other: Sequence<U>) -> Sequence<(T, U)> {
        combine::zip(self, other)
    }

    fn zip_with<U, R, F>(self, other: Sequence<U>, f: F) -> Sequence<R>
    where
        U: Element,
        R: Element,
        F: Fn(T, U) -> R + Send + Sync + 'static,
    {
        combine::zip_with(self, other, f)
    }

    fn take_while<P>(self, pred: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        windows::take_while(self, pred)
    }

    fn skip_while<P>(self, pred: P) -> Sequence<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        windows::skip_while(self, pred)
    }

    fn take_last(self, count: usize) -> Sequence<T> {
        windows::take_last(self, count)
    }

    fn skip_last(self, count: usize) -> Sequence<T> {
        windows::skip_last(self, count)
    }

    fn chunks(self, size: usize) -> Result<Sequence<Sequence<T>>> {
        windows::chunks(self, size)
    }

    fn distinct(self) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        set_ops::distinct(self)
    }

    fn distinct_by<K, F>(self, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        set_ops::distinct_by(self, key)
    }

    fn union(self, other: Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        set_ops::union(self, other)
    }

    fn union_by<K, F>(self, other: Sequence<T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        set_ops::union_by(self, other, key)
    }

    fn intersect(self, other: Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        set_ops::intersect(self, other)
    }

    fn intersect_by<K, F>(self, other: Sequence<T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        set_ops::intersect_by(self, other, key)
    }

    fn except(self, other: Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        set_ops::except(self, other)
    }

    fn except_by<K, F>(self, other: Sequence<T>, key: F) -> Sequence<T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        set_ops::except_by(self, other, key)
    }

    fn order(self) -> Sequence<T>
    where
        T: Ord,
    {
        ordering::order(self)
    }

    fn order_by<K, F>(self, key: F) -> Sequence<T>
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        ordering::order_by(self, key)
    }

    fn order_by_desc<K, F>(self, key: F) -> Sequence<T>
    where
        K: Ord,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        ordering::order_by_desc(self, key)
    }

    fn order_with<F>(self, cmp: F) -> Sequence<T>
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        ordering::order_with(self, cmp)
    }

    fn reverse(self) -> Sequence<T> {
        ordering::reverse(self)
    }

    fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K,
    {
        keyed::to_lookup(self, key)
    }

    fn to_lookup_map<K, E, KF, EF>(&self, key: KF, elem: EF) -> Lookup<K, E>
    where
        K: Hash + Eq + Element,
        E: Element,
        KF: Fn(&T) -> K,
        EF: Fn(T) -> E,
    {
        keyed::to_lookup_map(self, key, elem)
    }

    fn group_by<K, F>(self, key: F) -> Sequence<Group<K, T>>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        keyed::group_by(self, key)
    }

    fn group_by_map<K, E, KF, EF>(self, key: KF, elem: EF) -> Sequence<Group<K, E>>
    where
        K: Hash + Eq + Element,
        E: Element,
        KF: Fn(&T) -> K + Send + Sync + 'static,
        EF: Fn(T) -> E + Send + Sync + 'static,
    {
        keyed::group_by_map(self, key, elem)
    }

    fn join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(T, I) -> R + Send + Sync + 'static,
    {
        keyed::join(self, inner, outer_key, inner_key, result)
    }

    fn left_join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(T, Option<I>) -> R + Send + Sync + 'static,
    {
        keyed::left_join(self, inner, outer_key, inner_key, result)
    }

    fn right_join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(Option<T>, I) -> R + Send + Sync + 'static,
    {
        keyed::right_join(self, inner, outer_key, inner_key, result)
    }

    fn group_join<I, K, R, OK, IK, RF>(
        self,
        inner: Sequence<I>,
        outer_key: OK,
        inner_key: IK,
        result: RF,
    ) -> Sequence<R>
    where
        I: Element,
        K: Hash + Eq + Element,
        R: Element,
        OK: Fn(&T) -> K + Send + Sync + 'static,
        IK: Fn(&I) -> K + Send + Sync + 'static,
        RF: Fn(T, Sequence<I>) -> R + Send + Sync + 'static,
    {
        keyed::group_join(self, inner, outer_key, inner_key, result)
    }

    fn count_by<K, F>(self, key: F) -> Sequence<(K, usize)>
    where
        K: Hash + Eq + Element,
        F: Fn(&T) -> K + Send + Sync + 'static,
    {
        keyed::count_by(self, key)
    }

    fn aggregate_by<K, A, KF, F>(self, key: KF, seed: A, f: F) -> Sequence<(K, A)>
    where
        K: Hash + Eq + Element,
        A: Element,
        KF: Fn(&T) -> K + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        keyed::aggregate_by(self, key, seed, f)
    }

    fn any<P>(&self, pred: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        fold::any(self, pred)
    }

    fn all<P>(&self, pred: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        fold::all(self, pred)
    }

    fn fold<A, F>(&self, seed: A, f: F) -> A
    where
        F: Fn(A, T) -> A,
    {
        fold::fold(self, seed, f)
    }

    fn reduce<F>(&self, f: F) -> Result<T>
    where
        F: Fn(T, T) -> T,
    {
        fold::reduce(self, f)
    }

    fn min(&self) -> Result<T>
    where
        T: Ord,
    {
        fold::min(self)
    }

    fn max(&self) -> Result<T>
    where
        T: Ord,
    {
        fold::max(self)
    }

    fn min_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        fold::min_by_key(self, key)
    }

    fn max_by_key<K, F>(&self, key: F) -> Result<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        fold::max_by_key(self, key)
    }

    fn min_by<F>(&self, cmp: F) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        fold::min_by(self, cmp)
    }

    fn max_by<F>(&self, cmp: F) -> Result<T>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        fold::max_by(self, cmp)
    }

    fn sum_by<N, F>(&self, f: F) -> N
    where
        N: std::iter::Sum,
        F: Fn(T) -> N,
    {
        fold::sum_by(self, f)
    }

    fn average_by<F>(&self, f: F) -> Result<f64>
    where
        F: Fn(T) -> f64,
    {
        fold::average_by(self, f)
    }

    fn single(&self) -> Result<T> {
        fold::single(self)
    }

    fn try_single(&self) -> Result<Option<T>> {
        fold::try_single(self)
    }

    fn first_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        fold::first_where(self, pred)
    }

    fn try_first_where<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        fold::try_first_where(self, pred)
    }

    fn last_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        fold::last_where(self, pred)
    }

    fn try_last_where<P>(&self, pred: P) -> Option<T>
    where
        P: Fn(&T) -> bool,
    {
        fold::try_last_where(self, pred)
    }

    fn single_where<P>(&self, pred: P) -> Result<T>
    where
        P: Fn(&T) -> bool,
    {
        fold::single_where(self, pred)
    }

    fn try_single_where<P>(&self, pred: P) -> Result<Option<T>>
    where
        P: Fn(&T) -> bool,
    {
        fold::try_single_where(self, pred)
    }

    fn to_map<K, F>(&self, key: F) -> HashMap<K, T>
    where
        K: Hash + Eq,
        F: Fn(&T) -> K,
    {
        fold::to_map(self, key)
    }

    fn to_set(&self) -> HashSet<T>
    where
        T: Hash + Eq,
    {
        fold::to_set(self)
    }
}
