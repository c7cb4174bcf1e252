//! Three-phase async-call lifecycle
//!
//! An async operation moves `idle → pending → {fulfilled | rejected}`. The
//! command carries a [`RequestId`] allocated by [`RequestIds`]; the reducer
//! applies the pending transition, records the id in its [`RequestFence`],
//! and the effect it returns feeds back exactly one terminal action carrying
//! that id and an [`AsyncOutcome`].
//!
//! Several calls may be in flight at once. The fence remembers the latest id
//! per operation kind and every call still outstanding, and the
//! [`FencingPolicy`] decides whether a completion from an older call may
//! still touch state.
//!
//! ```
//! use chirp_core::async_call::{FencingPolicy, RequestFence, RequestIds};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
//! enum Op {
//!     Fetch,
//! }
//!
//! let ids = RequestIds::new();
//! let mut fence = RequestFence::new();
//! let first = ids.allocate();
//! let second = ids.allocate();
//! fence.begin(Op::Fetch, first);
//! fence.begin(Op::Fetch, second);
//!
//! assert!(!FencingPolicy::LatestOnly.admits(&fence, Op::Fetch, first));
//! assert!(FencingPolicy::LatestOnly.admits(&fence, Op::Fetch, second));
//! assert!(FencingPolicy::LastWriterWins.admits(&fence, Op::Fetch, first));
//! assert!(fence.is_superseded(first));
//! ```

use crate::effect::Effect;
use crate::error::ClientError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// How many superseded ids a fence remembers
const SUPERSEDED_CAPACITY: usize = 256;

/// Token attached to one dispatched async call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates monotonically increasing request ids
///
/// Shared by everything that dispatches commands to one store, so the caller
/// knows the id of its request before sending it.
#[derive(Debug, Default)]
pub struct RequestIds {
    last: AtomicU64,
}

impl RequestIds {
    /// Start counting from one
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// A fresh id, greater than every id allocated before it
    pub fn allocate(&self) -> RequestId {
        RequestId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// How completions of superseded calls are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FencingPolicy {
    /// Ignore completions whose id is not the latest begun for their kind
    #[default]
    LatestOnly,
    /// Apply every completion in arrival order; a late one overwrites state
    LastWriterWins,
}

impl FencingPolicy {
    /// Parse a policy name (`latest`, `latest-only`, `last-writer-wins`)
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest-only" => Some(Self::LatestOnly),
            "last-writer-wins" | "last-writer" | "none" => Some(Self::LastWriterWins),
            _ => None,
        }
    }

    /// Whether a completion tagged `id` may be applied to state now
    #[must_use]
    pub fn admits<K: Ord>(self, fence: &RequestFence<K>, kind: K, id: RequestId) -> bool {
        match self {
            Self::LastWriterWins => true,
            Self::LatestOnly => fence.is_latest(&kind, id),
        }
    }

    /// Whether the completion of a settled request `id` was applied
    ///
    /// Only meaningful once the completion has been reduced.
    #[must_use]
    pub fn applied<K: Ord>(self, fence: &RequestFence<K>, id: RequestId) -> bool {
        match self {
            Self::LastWriterWins => true,
            Self::LatestOnly => !fence.is_superseded(id),
        }
    }

    /// Whether any request whose completion would be applied is outstanding
    #[must_use]
    pub fn is_busy<K: Ord>(self, fence: &RequestFence<K>) -> bool {
        match self {
            Self::LastWriterWins => fence.has_outstanding(),
            Self::LatestOnly => fence
                .outstanding
                .iter()
                .any(|(id, kind)| fence.is_latest(kind, *id)),
        }
    }
}

/// Tracks requests per operation kind: the latest begun, the ones still
/// outstanding, and the ones superseded before they settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFence<K> {
    latest: BTreeMap<K, RequestId>,
    outstanding: BTreeMap<RequestId, K>,
    superseded: BTreeSet<RequestId>,
}

impl<K: Ord> RequestFence<K> {
    /// Create an empty fence
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: BTreeMap::new(),
            outstanding: BTreeMap::new(),
            superseded: BTreeSet::new(),
        }
    }

    /// The most recent id begun for `kind`
    #[must_use]
    pub fn latest(&self, kind: &K) -> Option<RequestId> {
        self.latest.get(kind).copied()
    }

    /// Whether `id` is the most recent id begun for `kind`
    #[must_use]
    pub fn is_latest(&self, kind: &K, id: RequestId) -> bool {
        self.latest(kind) == Some(id)
    }

    /// Whether `id` was replaced (or cleared) while still outstanding
    #[must_use]
    pub fn is_superseded(&self, id: RequestId) -> bool {
        self.superseded.contains(&id)
    }

    /// Whether `id` has begun and not yet settled
    #[must_use]
    pub fn is_outstanding(&self, id: RequestId) -> bool {
        self.outstanding.contains_key(&id)
    }

    /// Whether any request has begun and not yet settled
    #[must_use]
    pub fn has_outstanding(&self) -> bool {
        !self.outstanding.is_empty()
    }

    /// Mark `id` settled; returns whether it was outstanding
    pub fn complete(&mut self, id: RequestId) -> bool {
        self.outstanding.remove(&id).is_some()
    }

    /// Forget every request; outstanding ones count as superseded
    pub fn clear(&mut self) {
        let outstanding = std::mem::take(&mut self.outstanding);
        for id in outstanding.into_keys() {
            self.supersede(id);
        }
        self.latest.clear();
    }

    fn supersede(&mut self, id: RequestId) {
        self.superseded.insert(id);
        if self.superseded.len() > SUPERSEDED_CAPACITY {
            self.superseded.pop_first();
        }
    }
}

impl<K: Ord + Clone> RequestFence<K> {
    /// Record `id` as the latest request of `kind`
    ///
    /// A previous latest request of the same kind that is still outstanding
    /// becomes superseded.
    pub fn begin(&mut self, kind: K, id: RequestId) {
        if let Some(previous) = self.latest.insert(kind.clone(), id) {
            if self.outstanding.contains_key(&previous) {
                self.supersede(previous);
            }
        }
        self.outstanding.insert(id, kind);
    }
}

impl<K: Ord> Default for RequestFence<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal result of an async call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AsyncOutcome<T> {
    /// The call resolved with a payload
    Fulfilled(T),
    /// The call failed
    Rejected(ClientError),
}

impl<T> AsyncOutcome<T> {
    /// Whether the call resolved
    #[must_use]
    pub const fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// Convert back into a `Result`
    ///
    /// # Errors
    ///
    /// Returns the rejection error for a rejected outcome.
    pub fn into_result(self) -> Result<T, ClientError> {
        match self {
            Self::Fulfilled(value) => Ok(value),
            Self::Rejected(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, ClientError>> for AsyncOutcome<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => Self::Fulfilled(value),
            Err(error) => Self::Rejected(error),
        }
    }
}

/// Build the effect that runs an async call and reports its outcome
///
/// `finish` wraps the outcome in the slice's terminal action.
pub fn settle<T, A, Fut, F>(call: Fut, finish: F) -> Effect<A>
where
    T: Send + 'static,
    A: 'static,
    Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    F: FnOnce(AsyncOutcome<T>) -> A + Send + 'static,
{
    crate::async_effect! { Some(finish(call.await.into())) }
}
