//! Keyed grouping over one drain of a sequence.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use lazyseq_core::{Element, Sequence};

/// One key's elements, in arrival order.
#[derive(Clone)]
pub struct Group<K, E> {
    key: K,
    elements: Sequence<E>,
}

impl<K, E> Group<K, E> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn elements(&self) -> &Sequence<E> {
        &self.elements
    }

    pub fn into_elements(self) -> Sequence<E> {
        self.elements
    }
}

/// Frozen key-to-bucket index built in one pass.
///
/// Keys keep first-seen order and each bucket keeps arrival order. Once
/// built, a lookup never changes; [`Lookup::get`] hands buckets out as
/// array-backed sequences without copying.
pub struct Lookup<K, E> {
    entries: Vec<(K, Arc<[E]>)>,
    index: HashMap<K, usize>,
}

impl<K, E> Lookup<K, E>
where
    K: Hash + Eq + Element,
    E: Element,
{
    /// Drain `source`, grouping the value of `elem` under the value of
    /// `key` for each element.
    pub fn build<T, KF, EF>(source: &Sequence<T>, key: KF, elem: EF) -> Self
    where
        T: Element,
        KF: Fn(&T) -> K,
        EF: Fn(T) -> E,
    {
        let mut buckets: Vec<(K, Vec<E>)> = Vec::new();
        let mut index: HashMap<K, usize> = HashMap::new();
        for item in source.cursor() {
            let k = key(&item);
            match index.entry(k.clone()) {
                Entry::Occupied(slot) => buckets[*slot.get()].1.push(elem(item)),
                Entry::Vacant(slot) => {
                    slot.insert(buckets.len());
                    buckets.push((k, vec![elem(item)]));
                }
            }
        }
        let entries: Vec<(K, Arc<[E]>)> = buckets
            .into_iter()
            .map(|(k, items)| (k, Arc::from(items)))
            .collect();
        #[cfg(feature = "tracing")]
        tracing::trace!(keys = entries.len(), "lookup frozen");
        Lookup { entries, index }
    }

    /// Group a sequence by a key of each element, keeping the elements.
    pub fn from_sequence<KF>(source: &Sequence<E>, key: KF) -> Self
    where
        KF: Fn(&E) -> K,
    {
        Lookup::build(source, key, |item| item)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// The bucket for `key`, or an empty sequence when the key is absent.
    /// Either way the call is traversal-free.
    pub fn get(&self, key: &K) -> Sequence<E> {
        match self.index.get(key) {
            Some(&slot) => Sequence::from_shared(self.entries[slot].1.clone()),
            None => Sequence::empty(),
        }
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Groups in first-seen key order.
    pub fn groups(&self) -> impl Iterator<Item = Group<K, E>> + '_ {
        self.entries.iter().map(|(k, items)| Group {
            key: k.clone(),
            elements: Sequence::from_shared(items.clone()),
        })
    }

    /// Tear down into the groups, in first-seen key order.
    pub fn into_groups(self) -> Vec<Group<K, E>> {
        self.entries
            .into_iter()
            .map(|(k, items)| Group {
                key: k,
                elements: Sequence::from_shared(items),
            })
            .collect()
    }
}
