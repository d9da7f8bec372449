//! FILENAME: core/chart-engine/src/cache.rs
//! Bucket Cache - Per-call grouping state.
//!
//! The cache is designed for:
//! - A single O(n) pass over the filtered rows
//! - Interned keys: each distinct segment or x string is stored once and
//!   referenced by id, in first-seen order
//! - Incremental accumulators, so no raw value lists are kept per bucket
//! - Segment and x totals maintained alongside the (segment, x) buckets
//!
//! A cache lives for exactly one aggregation call and is then dropped.

use rustc_hash::FxHashMap;

use crate::definition::AggregationFn;

// ============================================================================
// KEY INTERNING
// ============================================================================

/// A reference to an interned key string.
pub type KeyId = u32;

/// Stands for "every key" in a total bucket.
pub const KEY_ID_ALL: KeyId = u32::MAX;

/// Distinct key strings, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct KeyInterner {
    key_to_id: FxHashMap<String, KeyId>,
    id_to_key: Vec<String>,
}

impl KeyInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a key and returns its id. Existing keys keep their id.
    pub fn intern(&mut self, key: &str) -> KeyId {
        if let Some(&id) = self.key_to_id.get(key) {
            return id;
        }

        let id = self.id_to_key.len() as KeyId;
        self.id_to_key.push(key.to_string());
        self.key_to_id.insert(key.to_string(), id);
        id
    }

    pub fn get(&self, id: KeyId) -> Option<&str> {
        self.id_to_key.get(id as usize).map(String::as_str)
    }

    pub fn id_of(&self, key: &str) -> Option<KeyId> {
        self.key_to_id.get(key).copied()
    }

    /// All keys, indexed by id (first-seen order).
    pub fn keys(&self) -> &[String] {
        &self.id_to_key
    }

    /// All ids in first-seen order.
    pub fn ids(&self) -> impl Iterator<Item = KeyId> {
        0..self.id_to_key.len() as KeyId
    }

    pub fn len(&self) -> usize {
        self.id_to_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_key.is_empty()
    }
}

// ============================================================================
// GROUP KEY
// ============================================================================

/// Identifies one bucket. `KEY_ID_ALL` on either side marks a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub segment: KeyId,
    pub x: KeyId,
}

impl GroupKey {
    pub fn new(segment: KeyId, x: KeyId) -> Self {
        GroupKey { segment, x }
    }

    /// All x values pooled for one segment.
    pub fn segment_total(segment: KeyId) -> Self {
        GroupKey { segment, x: KEY_ID_ALL }
    }

    /// All segments pooled for one x value.
    pub fn x_total(x: KeyId) -> Self {
        GroupKey { segment: KEY_ID_ALL, x }
    }
}

// ============================================================================
// AGGREGATE ACCUMULATOR
// ============================================================================

/// Running state sufficient for every `AggregationFn`.
///
/// All reductions are commutative, so the result does not depend on the
/// order in which rows reach a bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateAccumulator {
    pub sum: f64,
    pub count: u64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &AggregateAccumulator) {
        if other.count == 0 {
            return;
        }
        self.sum += other.sum;
        self.count += other.count;
        if let Some(other_min) = other.min {
            self.min = Some(self.min.map_or(other_min, |m| m.min(other_min)));
        }
        if let Some(other_max) = other.max {
            self.max = Some(self.max.map_or(other_max, |m| m.max(other_max)));
        }
    }

    /// Computes the final scalar. Empty accumulators reduce to 0.
    pub fn compute(&self, aggregation: AggregationFn) -> f64 {
        match aggregation {
            AggregationFn::Sum => self.sum,
            AggregationFn::Count => self.count as f64,
            AggregationFn::Average => {
                if self.count > 0 {
                    self.sum / (self.count as f64)
                } else {
                    0.0
                }
            }
            AggregationFn::Min => self.min.unwrap_or(0.0),
            AggregationFn::Max => self.max.unwrap_or(0.0),
        }
    }
}

// ============================================================================
// BUCKET CACHE
// ============================================================================

/// Row counts observed while building a cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Rows in the source table.
    pub total_rows: usize,
    /// Rows that passed the filters and carried a group key.
    pub bucketed_rows: usize,
}

/// Buckets for one aggregation call, keyed by (segment, x).
#[derive(Debug, Clone, Default)]
pub struct BucketCache {
    pub segments: KeyInterner,
    pub x_keys: KeyInterner,
    buckets: FxHashMap<GroupKey, AggregateAccumulator>,
    pub stats: CacheStats,
}

impl BucketCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one row's value to its bucket and to both totals.
    pub fn add(&mut self, segment: &str, x: &str, value: f64) {
        let segment_id = self.segments.intern(segment);
        let x_id = self.x_keys.intern(x);

        for key in [
            GroupKey::new(segment_id, x_id),
            GroupKey::segment_total(segment_id),
            GroupKey::x_total(x_id),
        ] {
            self.buckets.entry(key).or_default().add(value);
        }
        self.stats.bucketed_rows += 1;
    }

    pub fn get(&self, key: &GroupKey) -> Option<&AggregateAccumulator> {
        self.buckets.get(key)
    }

    /// The reduced value of a bucket, or `None` if no row landed in it.
    pub fn reduce(&self, key: &GroupKey, aggregation: AggregationFn) -> Option<f64> {
        self.buckets.get(key).map(|acc| acc.compute(aggregation))
    }

    /// Number of (segment, x) buckets, totals excluded.
    pub fn bucket_count(&self) -> usize {
        self.buckets
            .keys()
            .filter(|k| k.segment != KEY_ID_ALL && k.x != KEY_ID_ALL)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
