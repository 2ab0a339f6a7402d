//! Evaluation result caching for consumers that re-evaluate on every edit.
//!
//! The cache is keyed by calculator identifier, output index and a
//! fingerprint of the snapshot. Only `Pure` outputs are stored; random and
//! clock-dependent outputs are recomputed on every call. The cache lives on
//! the consumer side, so evaluation itself stays stateless.

use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};

use serde::Serialize;
use tracing::trace;

use crate::definition::CalculatorDefinition;
use crate::output::{Evaluation, OutputValue};
use crate::snapshot::Snapshot;
use crate::value::Value;

/// Default number of cached output values
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    calculator: &'static str,
    output: usize,
    fingerprint: u64,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: Snapshot,
    value: OutputValue,
}

/// Hit/miss counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded memo of pure output values with first-in-first-out eviction.
#[derive(Debug)]
pub struct EvaluationCache {
    capacity: usize,
    entries: HashMap<CacheKey, CacheEntry>,
    order: VecDeque<CacheKey>,
    hits: usize,
    misses: usize,
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EvaluationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Evaluate every output of `definition`, reusing cached pure values.
    pub fn evaluate(&mut self, definition: &CalculatorDefinition, snapshot: &Snapshot) -> Vec<Evaluation> {
        let fingerprint = fingerprint(snapshot);
        definition
            .outputs
            .iter()
            .enumerate()
            .map(|(index, output)| {
                if !output.formula.volatility.is_cacheable() {
                    return output.evaluate(snapshot);
                }
                let key = CacheKey {
                    calculator: definition.id,
                    output: index,
                    fingerprint,
                };
                let cached = self
                    .entries
                    .get(&key)
                    .filter(|entry| entry.snapshot == *snapshot)
                    .map(|entry| entry.value.clone());
                let value = match cached {
                    Some(value) => {
                        self.hits += 1;
                        value
                    }
                    None => {
                        self.misses += 1;
                        let value = output.calculate(snapshot);
                        self.insert(key, snapshot, value.clone());
                        value
                    }
                };
                output.evaluation_for(value)
            })
            .collect()
    }

    fn insert(&mut self, key: CacheKey, snapshot: &Snapshot, value: OutputValue) {
        if self.capacity == 0 {
            return;
        }
        let entry = CacheEntry {
            snapshot: snapshot.clone(),
            value,
        };
        if self.entries.insert(key.clone(), entry).is_some() {
            return;
        }
        self.order.push_back(key);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                trace!(calculator = oldest.calculator, output = oldest.output, "evicting cached output");
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Stable hash of every entry in a snapshot.
pub fn fingerprint(snapshot: &Snapshot) -> u64 {
    let mut hasher = DefaultHasher::new();
    for (id, value) in snapshot.iter() {
        id.hash(&mut hasher);
        hash_value(value, &mut hasher);
    }
    hasher.finish()
}

fn hash_value(value: &Value, hasher: &mut DefaultHasher) {
    match value {
        Value::Number(n) => {
            0u8.hash(hasher);
            n.map(f64::to_bits).hash(hasher);
        }
        Value::Text(s) => {
            1u8.hash(hasher);
            s.hash(hasher);
        }
        Value::Choice(s) => {
            2u8.hash(hasher);
            s.hash(hasher);
        }
        Value::Flag(b) => {
            3u8.hash(hasher);
            b.hash(hasher);
        }
        Value::Date(d) => {
            4u8.hash(hasher);
            d.hash(hasher);
        }
        Value::Time(t) => {
            5u8.hash(hasher);
            t.hash(hasher);
        }
    }
}
