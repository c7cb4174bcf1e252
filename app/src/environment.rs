//! Dependencies injected into every slice reducer

use chirp_api::ChirpApi;
use chirp_core::{FencingPolicy, RequestId, RequestIds};
use std::sync::Arc;

/// Environment shared by the auth, tweets and users reducers
#[derive(Debug)]
pub struct ChirpEnvironment<C> {
    /// Backend client
    pub api: Arc<C>,
    /// How completions of superseded requests are treated
    pub fencing: FencingPolicy,
    /// Id source for every command sent to the store
    pub ids: Arc<RequestIds>,
}

impl<C: ChirpApi> ChirpEnvironment<C> {
    /// Create a new environment with the default fencing policy
    #[must_use]
    pub fn new(api: C) -> Self {
        Self {
            api: Arc::new(api),
            fencing: FencingPolicy::default(),
            ids: Arc::new(RequestIds::new()),
        }
    }

    /// Use a different fencing policy
    #[must_use]
    pub fn with_fencing(mut self, fencing: FencingPolicy) -> Self {
        self.fencing = fencing;
        self
    }
}

impl<C> ChirpEnvironment<C> {
    /// Allocate the id for the next command
    pub fn next_request_id(&self) -> RequestId {
        self.ids.allocate()
    }
}

impl<C> Clone for ChirpEnvironment<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            fencing: self.fencing,
            ids: Arc::clone(&self.ids),
        }
    }
}
