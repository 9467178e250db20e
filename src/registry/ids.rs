//! Route identifier spaces and allocation.
//!
//! # Responsibilities
//! - Strong-typed route identifiers
//! - Distinguish the two identifier spaces (direct, multi-hop)
//! - Allocate identifiers that are unique for the process lifetime
//!
//! # Design Decisions
//! - One allocator per route kind; the two spaces never interact
//! - Allocation is a single atomic fetch-add, so it is linearizable and
//!   never blocks a concurrent city lookup
//! - Relaxed ordering suffices: uniqueness comes from the read-modify-write,
//!   not from ordering against other memory

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier assigned to a generated route, unique within its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u64);

impl From<u64> for RouteId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<RouteId> for u64 {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two kinds of generated routes, each with its own identifier space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// City connected directly to a warehouse.
    Direct,
    /// City routed through a hub to a warehouse.
    Multihop,
}

impl RouteKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Direct => "direct",
            RouteKind::Multihop => "multihop",
        }
    }
}

impl std::fmt::Display for RouteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic identifier allocator for one route kind.
///
/// Every call to [`allocate`](IdAllocator::allocate) returns a previously
/// unissued identifier, regardless of how many threads call concurrently.
#[derive(Debug)]
pub struct IdAllocator {
    start: u64,
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first issued identifier is `start`.
    pub fn new(start: u64) -> Self {
        Self {
            start,
            next: AtomicU64::new(start),
        }
    }

    /// Issue a fresh identifier and advance the counter.
    pub fn allocate(&self) -> RouteId {
        RouteId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The identifier the next call to `allocate` will return.
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// How many identifiers have been issued so far.
    pub fn issued(&self) -> u64 {
        self.peek() - self.start
    }
}
