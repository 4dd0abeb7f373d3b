//! Per-client counter storage.
//!
//! # Responsibilities
//! - Derive the identity a request is counted under
//! - Hold the process-wide `ClientKey → ClientState` map
//! - Keep the request-path critical section to a single entry
//! - Drop entries that have gone idle
//!
//! # Design Decisions
//! - `DashMap` shards the lock: unrelated clients never contend
//! - Entries are created lazily on first request, never torn down explicitly
//! - All access goes through store methods; the map itself stays private

use std::net::{IpAddr, SocketAddr};
use std::time::Instant;

use axum::extract::ConnectInfo;
use axum::http::Request;
use dashmap::DashMap;

/// Identity a request is rate-limited under.
///
/// The port is stripped so a client reconnecting from an ephemeral port keeps
/// hitting the same counter. Requests with no usable remote address all share
/// [`ClientKey::Unknown`] — deliberately conservative: such traffic is pooled
/// under one limit rather than admitted unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientKey {
    Ip(IpAddr),
    Unknown,
}

impl ClientKey {
    /// Derive the key from a request's connection info, if present.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| ClientKey::Ip(addr.ip()))
            .unwrap_or(ClientKey::Unknown)
    }
}

impl std::fmt::Display for ClientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientKey::Ip(ip) => write!(f, "{}", ip),
            ClientKey::Unknown => write!(f, "unknown"),
        }
    }
}

/// Mutable per-client record. One exists per key at any time.
#[derive(Debug, Clone)]
pub struct ClientState {
    /// Requests admitted in the current window.
    pub count: u32,
    /// When the current window began.
    pub window_start: Instant,
    /// Most recent request (admitted or rejected), drives idle eviction.
    pub last_seen: Instant,
}

impl ClientState {
    fn fresh(now: Instant) -> Self {
        Self {
            count: 0,
            window_start: now,
            last_seen: now,
        }
    }
}

/// Process-wide map of per-client counters.
///
/// Created once at server startup and shared for the process lifetime.
pub struct LimiterStore {
    entries: DashMap<ClientKey, ClientState>,
}

impl LimiterStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Run `f` against the entry for `key` under the shard's write lock,
    /// creating a zeroed entry first if the client is new.
    ///
    /// The whole read-check-write of an admission decision happens inside
    /// this call, so concurrent requests for the same key serialize and no
    /// torn update is observable.
    pub fn with_entry<R>(
        &self,
        key: ClientKey,
        now: Instant,
        f: impl FnOnce(&mut ClientState) -> R,
    ) -> R {
        let mut entry = self
            .entries
            .entry(key)
            .or_insert_with(|| ClientState::fresh(now));
        f(entry.value_mut())
    }

    /// Remove entries not seen since `cutoff`. Returns how many were dropped.
    ///
    /// `retain` locks one shard at a time, so request-path locks are only
    /// held up briefly.
    pub fn evict_idle(&self, cutoff: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, state| state.last_seen >= cutoff);
        before.saturating_sub(self.entries.len())
    }

    /// Number of clients currently tracked.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LimiterStore {
    fn default() -> Self {
        Self::new()
    }
}
