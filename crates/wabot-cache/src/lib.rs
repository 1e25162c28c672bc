// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bounded, time-ordered cache of inbound messages for deletion recovery.
//!
//! The gateway's deletion notification carries only the message id and
//! conversation, never the original content, so recovery is possible only
//! because every inbound message was cached beforehand. The primary table
//! is bounded and evicts oldest-inserted first (FIFO by insertion, not LRU:
//! a deletion lookup should not keep an old message artificially alive).
//! A secondary slot keeps the last deleted message per conversation.
//!
//! The cache is an owned, injectable component with process lifetime; it is
//! never persisted. An entry that was evicted before its deletion notice
//! arrives is silently unrecoverable; callers cannot distinguish eviction
//! from a message that was never seen.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use wabot_core::InboundMessage;

/// Default bound on the primary table.
pub const MAX_CACHE_ENTRIES: usize = 1000;

/// Bounded key/value store correlating message ids to their original
/// payloads, plus a "last deleted per conversation" slot.
#[derive(Debug)]
pub struct DeletedMessageCache {
    entries: HashMap<String, InboundMessage>,
    /// Insertion order of `entries` keys; the front is evicted first.
    /// May contain ids already overwritten in `entries`; eviction skips
    /// stale positions.
    insertion_order: VecDeque<String>,
    last_deleted: HashMap<String, InboundMessage>,
    max_entries: usize,
}

impl DeletedMessageCache {
    /// Creates a cache bounded to [`MAX_CACHE_ENTRIES`].
    pub fn new() -> Self {
        Self::with_capacity(MAX_CACHE_ENTRIES)
    }

    /// Creates a cache with an explicit bound (used by tests).
    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            last_deleted: HashMap::new(),
            max_entries,
        }
    }

    /// Inserts or overwrites a message record.
    ///
    /// If the resulting size exceeds the bound, oldest-inserted entries are
    /// evicted until the size equals the bound. The eviction scan is
    /// proportional to the overflow count, not to the bound.
    pub fn put(&mut self, message: InboundMessage) {
        let id = message.id.clone();
        let previous = self.entries.insert(id.clone(), message);
        if previous.is_none() {
            self.insertion_order.push_back(id);
        }

        while self.entries.len() > self.max_entries {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    if self.entries.remove(&oldest).is_some() {
                        debug!(message_id = %oldest, "evicted oldest cached message");
                    }
                }
                // Order queue exhausted while the table is over bound; can
                // only happen if invariants were broken elsewhere.
                None => break,
            }
        }
    }

    /// Pure lookup by message id.
    pub fn get(&self, message_id: &str) -> Option<&InboundMessage> {
        self.entries.get(message_id)
    }

    /// Correlates a deletion notification with the primary table.
    ///
    /// If the id has a hit, a copy of the original record becomes the
    /// conversation's last-deleted entry. If the primary entry has already
    /// been evicted (or was never cached), this is a no-op: the deletion is
    /// unrecoverable by design.
    pub fn record_deletion(&mut self, conversation_id: &str, message_id: &str) {
        if let Some(original) = self.entries.get(message_id) {
            debug!(
                conversation_id,
                message_id, "deleted message retained for recovery"
            );
            self.last_deleted
                .insert(conversation_id.to_string(), original.clone());
        }
    }

    /// The most recently deleted recoverable message in a conversation.
    pub fn last_deleted(&self, conversation_id: &str) -> Option<&InboundMessage> {
        self.last_deleted.get(conversation_id)
    }

    /// Number of entries in the primary table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DeletedMessageCache {
    fn default() -> Self {
        Self::new()
    }
}
