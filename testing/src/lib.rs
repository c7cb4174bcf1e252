//! # Chirp Testing
//!
//! Testing utilities for reducers and stores.
//!
//! - [`ReducerTest`]: Given-When-Then harness for a single reducer call
//! - [`assertions`]: Effect assertions
//! - [`run_effect`]: Drive one effect to its produced action without a store
//! - [`init_tracing`]: Opt-in log output for tests (`RUST_LOG`)
//!
//! ## Example
//!
//! ```ignore
//! use chirp_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(AuthReducer::new())
//!     .with_env(test_environment())
//!     .given_state(AuthState::default())
//!     .when_action(AuthAction::ResetAuthState)
//!     .then_state(|state| assert!(state.user.is_none()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

pub mod reducer_test;

pub use reducer_test::{assertions, ReducerTest};

use chirp_core::effect::Effect;
use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process
///
/// Output goes through the test writer so it is captured per test.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Run an effect to completion and collect the actions it produces
///
/// Delays are skipped (their action is returned immediately); parallel
/// effects are run in order.
pub async fn run_effect<A: Send + 'static>(effect: Effect<A>) -> Vec<A> {
    let mut produced = Vec::new();
    let mut queue = vec![effect];

    while let Some(effect) = queue.pop() {
        match effect {
            Effect::None => {},
            Effect::Future(fut) => {
                if let Some(action) = fut.await {
                    produced.push(action);
                }
            },
            Effect::Delay { action, .. } => produced.push(*action),
            Effect::Parallel(effects) | Effect::Sequential(effects) => {
                queue.extend(effects.into_iter().rev());
            },
        }
    }

    produced
}
