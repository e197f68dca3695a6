//! In-memory vector index with named partitions.
//!
//! [`VectorIndex`] is a registry of independent [`Partition`]s, created lazily by
//! [`VectorIndex::partition`]. Each partition holds `(id, vector, metadata)`
//! records and answers top-K queries by exact cosine similarity over a linear
//! scan. Partitions are scoped per character or universe and hold at most a few
//! hundred records, so there is no approximate index.
//!
//! Degenerate input never errors:
//!
//! - A record whose norm is zero or non-finite is stored with norm `0` and
//!   scores `0` against every query.
//! - A query whose norm is zero (or non-finite) returns no matches.
//! - A record whose length differs from the query's scores `0`.
//!
//! Nothing here is persisted; the index lives as long as the process.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// A record as handed to [`Partition::upsert`].
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord<M> {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: M,
}

/// A record as stored, with its norm computed at write time.
#[derive(Debug, Clone)]
struct StoredRecord<M> {
    record: VectorRecord<M>,
    norm: f64,
}

/// One query hit.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatch<M> {
    pub id: String,
    pub score: f64,
    pub metadata: M,
}

/// Options for [`Partition::query`].
pub struct QueryOptions<'a, M> {
    /// Maximum number of matches. `None` returns every match.
    pub limit: Option<usize>,
    filter: Option<Box<dyn Fn(&M) -> bool + Send + Sync + 'a>>,
}

impl<M> Default for QueryOptions<'_, M> {
    fn default() -> Self {
        Self {
            limit: None,
            filter: None,
        }
    }
}

impl<'a, M> QueryOptions<'a, M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only records whose metadata satisfies `predicate` are scored.
    pub fn filter(mut self, predicate: impl Fn(&M) -> bool + Send + Sync + 'a) -> Self {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, metadata: &M) -> bool {
        self.filter.as_ref().map_or(true, |f| f(metadata))
    }
}

impl<M> std::fmt::Debug for QueryOptions<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryOptions")
            .field("limit", &self.limit)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}

/// Euclidean norm, or `0.0` when the result is not finite.
pub fn l2_norm(vector: &[f32]) -> f64 {
    let norm = vector
        .iter()
        .map(|&x| f64::from(x) * f64::from(x))
        .sum::<f64>()
        .sqrt();
    if norm.is_finite() {
        norm
    } else {
        0.0
    }
}

/// Cosine similarity against precomputed norms. Zero on length mismatch or zero norm.
fn cosine_with_norms(query: &[f32], query_norm: f64, record: &[f32], record_norm: f64) -> f64 {
    if query.len() != record.len() || query_norm == 0.0 || record_norm == 0.0 {
        return 0.0;
    }
    let dot: f64 = query
        .iter()
        .zip(record)
        .map(|(&a, &b)| f64::from(a) * f64::from(b))
        .sum();
    dot / (query_norm * record_norm)
}

/// Cosine similarity of two dense vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    cosine_with_norms(a, l2_norm(a), b, l2_norm(b))
}

/// An isolated id → record map inside a [`VectorIndex`].
#[derive(Debug)]
pub struct Partition<M> {
    name: String,
    records: RwLock<HashMap<String, StoredRecord<M>>>,
}

impl<M: Clone> Partition<M> {
    fn new(name: String) -> Self {
        Self {
            name,
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert or fully replace the record with `record.id`.
    pub fn upsert(&self, record: VectorRecord<M>) {
        let norm = l2_norm(&record.vector);
        if norm == 0.0 {
            tracing::warn!(
                partition = %self.name,
                id = %record.id,
                dimensions = record.vector.len(),
                "vector has zero or non-finite norm; record will never match"
            );
        }
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.insert(record.id.clone(), StoredRecord { record, norm });
    }

    /// Remove a record. Returns `false` if it was not present.
    pub fn delete(&self, id: &str) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        records.remove(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<VectorRecord<M>> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.get(id).map(|stored| stored.record.clone())
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact top-K search by cosine similarity, highest first.
    ///
    /// Order among equal scores is unspecified.
    pub fn query(&self, vector: &[f32], options: &QueryOptions<'_, M>) -> Vec<VectorMatch<M>> {
        let query_norm = l2_norm(vector);
        if query_norm == 0.0 || options.limit == Some(0) {
            return Vec::new();
        }

        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        let mut matches: Vec<VectorMatch<M>> = records
            .values()
            .filter(|stored| options.accepts(&stored.record.metadata))
            .map(|stored| VectorMatch {
                id: stored.record.id.clone(),
                score: cosine_with_norms(vector, query_norm, &stored.record.vector, stored.norm),
                metadata: stored.record.metadata.clone(),
            })
            .collect();
        drop(records);

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }

        tracing::debug!(
            partition = %self.name,
            limit = ?options.limit,
            matches = matches.len(),
            "vector query"
        );
        matches
    }
}

/// Registry of named partitions. Construct once and share via `Arc`.
#[derive(Debug)]
pub struct VectorIndex<M> {
    partitions: Mutex<HashMap<String, Arc<Partition<M>>>>,
}

impl<M: Clone> Default for VectorIndex<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> VectorIndex<M> {
    pub fn new() -> Self {
        Self {
            partitions: Mutex::new(HashMap::new()),
        }
    }

    /// Get the partition called `name`, creating it empty on first touch.
    ///
    /// The registry lock is held only for the lookup, so operations on one
    /// partition never wait on another.
    pub fn partition(&self, name: &str) -> Arc<Partition<M>> {
        let mut partitions = self
            .partitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            partitions
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Partition::new(name.to_string()))),
        )
    }

    /// Names of every partition touched so far, sorted.
    pub fn partition_names(&self) -> Vec<String> {
        let partitions = self
            .partitions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = partitions.keys().cloned().collect();
        names.sort();
        names
    }
}
