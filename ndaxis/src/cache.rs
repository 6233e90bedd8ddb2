/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A capacity-bounded map with a pluggable eviction policy.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::hash::Hash;
use std::num::NonZeroUsize;

/// An eviction policy tracks the keys of a [`BoundedCache`] and picks
/// which one to drop when the cache is full.
pub trait EvictionPolicy<K> {
    /// A new key was inserted.
    fn on_insert(&mut self, key: &K);

    /// An existing key was read or overwritten.
    fn on_access(&mut self, key: &K);

    /// A key was removed by the caller.
    fn on_remove(&mut self, key: &K);

    /// Chooses, and stops tracking, the key to evict.
    fn victim(&mut self) -> Option<K>;
}

/// Evicts the oldest insertion. Reads and overwrites do not refresh a
/// key's position.
#[derive(Debug, Clone)]
pub struct InsertionOrder<K> {
    order: VecDeque<K>,
}

impl<K: Clone + PartialEq> EvictionPolicy<K> for InsertionOrder<K> {
    fn on_insert(&mut self, key: &K) {
        self.order.push_back(key.clone());
    }

    fn on_access(&mut self, _key: &K) {}

    fn on_remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    fn victim(&mut self) -> Option<K> {
        self.order.pop_front()
    }
}

/// Evict the oldest insertion.
pub fn insertion_order<K>() -> InsertionOrder<K> {
    InsertionOrder {
        order: VecDeque::new(),
    }
}

/// Evicts the key least recently inserted, read, or overwritten.
#[derive(Debug, Clone)]
pub struct LeastRecentlyUsed<K> {
    order: VecDeque<K>,
}

impl<K: Clone + PartialEq> EvictionPolicy<K> for LeastRecentlyUsed<K> {
    fn on_insert(&mut self, key: &K) {
        self.order.push_back(key.clone());
    }

    fn on_access(&mut self, key: &K) {
        if let Some(index) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(index) {
                self.order.push_back(k);
            }
        }
    }

    fn on_remove(&mut self, key: &K) {
        self.order.retain(|k| k != key);
    }

    fn victim(&mut self) -> Option<K> {
        self.order.pop_front()
    }
}

/// Evict the least recently used key.
pub fn least_recently_used<K>() -> LeastRecentlyUsed<K> {
    LeastRecentlyUsed {
        order: VecDeque::new(),
    }
}

/// A map holding at most `capacity` entries. Inserting a new key into
/// a full cache first evicts the key chosen by the policy `P`.
#[derive(Debug, Clone)]
pub struct BoundedCache<K, V, P = InsertionOrder<K>> {
    capacity: NonZeroUsize,
    entries: HashMap<K, V>,
    policy: P,
}

impl<K: Hash + Eq + Clone, V> BoundedCache<K, V> {
    /// A cache that evicts in insertion order.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_policy(capacity, insertion_order())
    }
}

impl<K: Hash + Eq, V, P: EvictionPolicy<K>> BoundedCache<K, V, P> {
    pub fn with_policy(capacity: NonZeroUsize, policy: P) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            policy,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites `key`. Returns the entry evicted to make
    /// room, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = value;
            self.policy.on_access(&key);
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.capacity.get() {
            if let Some(victim) = self.policy.victim() {
                tracing::trace!("cache of capacity {} evicting an entry", self.capacity);
                evicted = self.entries.remove_entry(&victim);
            }
        }
        self.policy.on_insert(&key);
        self.entries.insert(key, value);
        evicted
    }

    /// Reads `key`, counting as an access for the policy.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.policy.on_access(key);
        }
        self.entries.get(key)
    }

    /// Reads `key` without informing the policy.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.policy.on_remove(key);
        Some(value)
    }
}
