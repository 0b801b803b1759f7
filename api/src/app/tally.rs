//! Frequency counting with stable tie order
//!
//! Counts keep first-seen order so that equal counts rank by whichever key
//! appeared first.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct Tally<K> {
    order: Vec<K>,
    counts: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        self.add_n(key, 1);
    }

    pub fn add_n(&mut self, key: K, n: usize) {
        match self.counts.get_mut(&key) {
            Some(count) => *count += n,
            None => {
                self.order.push(key.clone());
                self.counts.insert(key, n);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Keys by descending count, ties in first-seen order, at most `limit`
    pub fn most_common(&self, limit: usize) -> Vec<(K, usize)> {
        let mut ranked: Vec<(K, usize)> = self
            .order
            .iter()
            .map(|k| (k.clone(), self.counts.get(k).copied().unwrap_or(0)))
            .collect();
        // sort_by is stable, so first-seen order survives among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

impl<K: Eq + Hash + Clone> FromIterator<K> for Tally<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for key in iter {
            tally.add(key);
        }
        tally
    }
}
