//! Separate-chaining hash table with a position-weighted string hash.
//!
//! The hash sums character codes weighted by `position + 1` modulo the bucket
//! count, so transposing two characters changes the bucket, which is handy for
//! demonstrating why order matters in string hashing.

use algolens_core::{HashEntry, StepKind, StepRecord, StepTrace};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StructureError, StructureResult};

/// Default number of buckets.
pub const DEFAULT_BUCKETS: usize = 10;

/// Instrumented hash table with a fixed bucket count and chained collisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashTable {
    buckets: Vec<Vec<HashEntry>>,
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKETS)
    }
}

impl HashTable {
    /// Creates a table with `buckets` empty chains (at least one).
    pub fn new(buckets: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); buckets.max(1)],
        }
    }

    /// Render-ready snapshot: one chain per bucket.
    pub fn buckets(&self) -> &[Vec<HashEntry>] {
        &self.buckets
    }

    /// Empties every chain, keeping the bucket count.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Position-weighted character-sum hash of `key`.
    pub fn hash(&self, key: &str) -> usize {
        let m = self.buckets.len();
        key.chars()
            .enumerate()
            .fold(0usize, |acc, (i, c)| (acc + c as usize * (i + 1)) % m)
    }

    fn hash_preamble(&self, key: &str, trace: &mut StepTrace) -> usize {
        let index = self.hash(key);
        trace.push(StepRecord::new(
            StepKind::HashCalculate {
                key: key.to_string(),
                bucket: index,
            },
            format!("Hashing key \"{key}\"... Result index: {index}."),
            2,
        ));
        trace.push(StepRecord::new(
            StepKind::BucketLookup { bucket: index },
            format!("Accessing bucket at index {index}."),
            3,
        ));
        index
    }

    /// Inserts or updates `key`. Empty keys abort before any mutation.
    pub fn insert(&mut self, key: &str, value: i64) -> StructureResult<StepTrace> {
        if key.is_empty() {
            return Err(StructureError::EmptyKey);
        }
        debug!(key, value, "hash table insert");
        let mut trace = StepTrace::new();
        let index = self.hash_preamble(key, &mut trace);

        let mut visited: Vec<String> = Vec::new();
        for i in 0..self.buckets[index].len() {
            let entry_key = self.buckets[index][i].key.clone();
            trace.push(StepRecord::new(
                StepKind::ChainTraverse {
                    bucket: index,
                    entry: entry_key.clone(),
                    visited: visited.clone(),
                },
                format!("Checking chain. Is key \"{entry_key}\" equal to \"{key}\"?"),
                6,
            ));
            if entry_key == key {
                let old_value = self.buckets[index][i].value;
                self.buckets[index][i].value = value;
                trace.push(StepRecord::new(
                    StepKind::HashUpdate {
                        bucket: index,
                        key: key.to_string(),
                        value,
                        entry: entry_key,
                    },
                    format!(
                        "Key \"{key}\" already exists. Updating value from {old_value} to {value}."
                    ),
                    7,
                ));
                return Ok(trace);
            }
            visited.push(entry_key);
        }

        let entry = HashEntry {
            key: key.to_string(),
            value,
        };
        self.buckets[index].push(entry.clone());
        trace.push(StepRecord::new(
            StepKind::HashInsert {
                bucket: index,
                entry,
            },
            format!("Key \"{key}\" not found in chain. Inserting new entry."),
            12,
        ));
        Ok(trace)
    }

    /// Looks up `key`; the result is the stored value or `None`.
    pub fn search(&self, key: &str) -> StructureResult<(StepTrace, Option<i64>)> {
        if key.is_empty() {
            return Err(StructureError::EmptyKey);
        }
        debug!(key, "hash table search");
        let mut trace = StepTrace::new();
        let index = self.hash_preamble(key, &mut trace);

        let mut visited: Vec<String> = Vec::new();
        for entry in &self.buckets[index] {
            trace.push(StepRecord::new(
                StepKind::ChainTraverse {
                    bucket: index,
                    entry: entry.key.clone(),
                    visited: visited.clone(),
                },
                format!("Checking chain. Is key \"{}\" equal to \"{key}\"?", entry.key),
                6,
            ));
            if entry.key == key {
                trace.push(StepRecord::new(
                    StepKind::HashFound {
                        bucket: index,
                        entry: entry.key.clone(),
                    },
                    format!("Found key \"{key}\" with value {}.", entry.value),
                    7,
                ));
                return Ok((trace, Some(entry.value)));
            }
            visited.push(entry.key.clone());
        }

        trace.push_message(format!("Key \"{key}\" not found in the hash table."), 11);
        Ok((trace, None))
    }

    /// Removes `key` from its chain, if present.
    pub fn delete(&mut self, key: &str) -> StructureResult<StepTrace> {
        if key.is_empty() {
            return Err(StructureError::EmptyKey);
        }
        debug!(key, "hash table delete");
        let mut trace = StepTrace::new();
        let index = self.hash_preamble(key, &mut trace);

        let mut visited: Vec<String> = Vec::new();
        for i in 0..self.buckets[index].len() {
            let entry_key = self.buckets[index][i].key.clone();
            trace.push(StepRecord::new(
                StepKind::ChainTraverse {
                    bucket: index,
                    entry: entry_key.clone(),
                    visited: visited.clone(),
                },
                format!("Checking chain. Is key \"{entry_key}\" equal to \"{key}\"?"),
                6,
            ));
            if entry_key == key {
                trace.push(StepRecord::new(
                    StepKind::HashDelete {
                        bucket: index,
                        entry: entry_key,
                    },
                    format!("Found key \"{key}\". Deleting entry."),
                    7,
                ));
                self.buckets[index].remove(i);
                return Ok(trace);
            }
            visited.push(entry_key);
        }

        trace.push_message(format!("Key \"{key}\" not found. Nothing to delete."), 6);
        Ok(trace)
    }
}
