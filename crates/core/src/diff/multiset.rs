use indexmap::IndexMap;
use indexmap::map::Iter;
use std::collections::HashSet;
use std::hash::Hash;

/// Counted collection that remembers the order in which keys first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multiset<T: Eq + Hash> {
    values: IndexMap<T, usize>,
}

impl<T: Eq + Hash> Default for Multiset<T> {
    fn default() -> Self {
        Self {
            values: IndexMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> Multiset<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &T) -> usize {
        self.values.get(key).copied().unwrap_or(0)
    }

    pub fn add(&mut self, key: T) {
        *self.values.entry(key).or_insert(0) += 1;
    }

    /// Per-key maximum of the two counts.
    pub fn max(a: &Self, b: &Self) -> Self {
        let mut values = a.values.clone();
        for (key, &count) in &b.values {
            let entry = values.entry(key.clone()).or_insert(0);
            *entry = (*entry).max(count);
        }
        Self { values }
    }

    /// Keys of `self` with the counts of `other` taken away, never below zero.
    pub fn sub(&self, other: &Self) -> Self {
        let values = self
            .values
            .iter()
            .filter_map(|(key, &count)| {
                let left = count.saturating_sub(other.get(key));
                (left > 0).then(|| (key.clone(), left))
            })
            .collect();
        Self { values }
    }

    pub fn remove_keys(&self, keys: &HashSet<T>) -> Self {
        let values = self
            .values
            .iter()
            .filter(|(key, _)| !keys.contains(*key))
            .map(|(key, &count)| (key.clone(), count))
            .collect();
        Self { values }
    }

    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.values.keys()
    }

    pub fn iter(&self) -> Iter<'_, T, usize> {
        self.values.iter()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.values.values().sum()
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for Multiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for Multiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a Multiset<T> {
    type Item = (&'a T, &'a usize);
    type IntoIter = Iter<'a, T, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
