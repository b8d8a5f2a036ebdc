use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default number of entries kept in the feed.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 50;

/// What a feed entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// A certification created from this client.
    Certification,
    /// An endorsement submitted from this client.
    Endorsement,
}

/// One line of the recent-activity feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    /// Headline, e.g. `New certification: Rust`.
    pub label: String,
    /// Secondary line under the headline.
    pub detail: String,
    /// When the action was observed locally, not the block time.
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(
        kind: ActivityKind,
        label: impl Into<String>,
        detail: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            detail: detail.into(),
            timestamp,
        }
    }
}

/// Client-local feed of recent actions, most recent first.
///
/// This is a display convenience only. Entries are appended after a
/// confirmation the client observed and are never reconciled with the
/// contract, so nothing should read certification state from here.
#[derive(Clone, Debug)]
pub struct ActivityLedger {
    entries: VecDeque<ActivityEntry>,
    capacity: usize,
}

impl Default for ActivityLedger {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ACTIVITY_CAPACITY)
    }
}

impl ActivityLedger {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Insert at the front, dropping the oldest entries beyond capacity.
    pub fn append(&mut self, entry: ActivityEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Replace the feed with `initial`, given most recent first.
    pub fn seed(&mut self, initial: Vec<ActivityEntry>) {
        self.entries = initial.into_iter().take(self.capacity).collect();
    }

    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    pub fn snapshot(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Demo feed shown before the user has done anything.
pub fn demo_activity(now: DateTime<Utc>) -> Vec<ActivityEntry> {
    vec![
        ActivityEntry::new(
            ActivityKind::Certification,
            "Smart Contract Development Certified",
            "Advanced level certification created",
            now - Duration::hours(2),
        ),
        ActivityEntry::new(
            ActivityKind::Endorsement,
            "Python Programming Endorsed",
            "Received endorsement from community member",
            now - Duration::hours(4),
        ),
        ActivityEntry::new(
            ActivityKind::Certification,
            "React Development Certified",
            "Intermediate level certification created",
            now - Duration::days(1),
        ),
        ActivityEntry::new(
            ActivityKind::Endorsement,
            "Blockchain Architecture Endorsed",
            "Received multiple endorsements",
            now - Duration::days(2),
        ),
    ]
}
