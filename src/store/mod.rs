//! Bounded in-memory capture store
//!
//! This module provides the repository that holds every captured publish.
//! The store is bounded: once `capacity` live records exist, inserting a
//! new one silently evicts the oldest. Three indices are maintained
//! together under one readers-writer lock:
//!
//! - global insertion order (oldest first)
//! - primary index by message id
//! - secondary index by topic, preserving insertion order within the topic
//!
//! Ordering is keyed by a monotone insertion sequence number, so the
//! per-topic order agrees with the global order by construction.
//!
//! ## Example
//!
//! ```
//! use snslite::{CapturedMessage, MessageStore};
//! use bytes::Bytes;
//! use chrono::Utc;
//!
//! let store = MessageStore::new(100).unwrap();
//! let record = CapturedMessage::new("m-1", "orders", "hello", Utc::now(), Bytes::new());
//! store.add(record).unwrap();
//!
//! let captured = store.get_by_id("m-1").unwrap();
//! assert_eq!(captured.body, "hello");
//! ```

use crate::error::{Result, SnsLiteError};
use crate::message::CapturedMessage;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// Internal store state; every field is guarded by the single lock in
/// [`MessageStore`]. Writers must keep all three indices consistent
/// before releasing the lock.
struct StoreState {
    /// Next insertion sequence number; strictly increasing for the life
    /// of the store, including across `clear`
    next_seq: u64,
    /// Global insertion order, oldest sequence first
    order: BTreeMap<u64, Arc<CapturedMessage>>,
    /// Message id -> sequence number of the live record
    by_id: HashMap<String, u64>,
    /// Topic -> sequence numbers of live records in that topic
    by_topic: HashMap<String, BTreeSet<u64>>,
}

impl StoreState {
    fn new() -> Self {
        Self {
            next_seq: 0,
            order: BTreeMap::new(),
            by_id: HashMap::new(),
            by_topic: HashMap::new(),
        }
    }

    /// Unlink one record from all three indices. No-op if the sequence
    /// number is not live.
    fn unlink(&mut self, seq: u64) {
        if let Some(record) = self.order.remove(&seq) {
            self.by_id.remove(&record.id);
            if let Some(seqs) = self.by_topic.get_mut(&record.topic) {
                seqs.remove(&seq);
                if seqs.is_empty() {
                    self.by_topic.remove(&record.topic);
                }
            }
        }
    }
}

/// Thread-safe, bounded, multi-indexed repository of captured messages.
///
/// `add` and `clear` take the write side of the lock; every query takes
/// the read side and copies its result set out before returning, so a
/// caller iterating a snapshot never holds the lock.
pub struct MessageStore {
    capacity: usize,
    state: RwLock<StoreState>,
}

impl MessageStore {
    /// Create a store holding at most `capacity` live records.
    ///
    /// Zero capacity is a configuration error.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SnsLiteError::Config(
                "store capacity must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            state: RwLock::new(StoreState::new()),
        })
    }

    /// Maximum number of live records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a captured message at the newest position.
    ///
    /// Re-inserting an existing id replaces the prior record and moves it
    /// to the newest position. When the store is full, the oldest record
    /// is evicted silently; `add` never fails due to capacity.
    pub fn add(&self, record: CapturedMessage) -> Result<()> {
        if record.id.is_empty() || record.topic.is_empty() {
            return Err(SnsLiteError::NullMessage);
        }
        let record = Arc::new(record);
        let mut state = self.state.write();

        let existing = state.by_id.get(&record.id).copied();
        if let Some(existing) = existing {
            state.unlink(existing);
        } else if state.order.len() == self.capacity {
            let oldest = state.order.keys().next().copied();
            if let Some(oldest) = oldest {
                state.unlink(oldest);
            }
        }

        let seq = state.next_seq;
        state.next_seq += 1;
        state.by_id.insert(record.id.clone(), seq);
        state
            .by_topic
            .entry(record.topic.clone())
            .or_default()
            .insert(seq);
        state.order.insert(seq, record);
        Ok(())
    }

    /// Snapshot of every live record, oldest to newest.
    pub fn get_all(&self) -> Vec<Arc<CapturedMessage>> {
        self.state.read().order.values().cloned().collect()
    }

    /// Snapshot of the records published to one topic, in insertion
    /// order. An unknown topic yields an empty list; an empty topic is an
    /// error.
    pub fn get_by_topic(&self, topic: &str) -> Result<Vec<Arc<CapturedMessage>>> {
        if topic.is_empty() {
            return Err(SnsLiteError::NullTopic);
        }
        let state = self.state.read();
        let Some(seqs) = state.by_topic.get(topic) else {
            return Ok(Vec::new());
        };
        Ok(seqs
            .iter()
            .filter_map(|seq| state.order.get(seq).cloned())
            .collect())
    }

    /// Snapshot of the records captured between `start` and `end`,
    /// inclusive on both bounds. A degenerate range yields an empty list.
    pub fn get_by_time_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Arc<CapturedMessage>> {
        if start > end {
            return Vec::new();
        }
        self.state
            .read()
            .order
            .values()
            .filter(|record| record.timestamp >= start && record.timestamp <= end)
            .cloned()
            .collect()
    }

    /// Look up one record by id.
    pub fn get_by_id(&self, id: &str) -> Result<Arc<CapturedMessage>> {
        if id.is_empty() {
            return Err(SnsLiteError::NullMessageId);
        }
        let state = self.state.read();
        state
            .by_id
            .get(id)
            .and_then(|seq| state.order.get(seq).cloned())
            .ok_or_else(|| SnsLiteError::NotFound(id.to_string()))
    }

    /// Find the record with the same `(topic, dedup_id)`, if any. An
    /// empty dedup id never matches.
    pub fn find_by_dedup(&self, topic: &str, dedup_id: &str) -> Option<Arc<CapturedMessage>> {
        if dedup_id.is_empty() {
            return None;
        }
        self.state
            .read()
            .order
            .values()
            .find(|record| record.topic == topic && record.dedup_id.as_deref() == Some(dedup_id))
            .cloned()
    }

    /// Drop every record and all index entries. Capacity is unchanged.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.order.clear();
        state.by_id.clear();
        state.by_topic.clear();
    }
}
