//! # Chirp
//!
//! Client for the Chirp micro-posting service, built on the Reducer / Effect /
//! Store architecture.
//!
//! - [`auth`], [`tweets`], [`users`]: state slices with their actions and
//!   reducers
//! - [`app`]: the slices composed under `auth`, `tweets` and `users` into one
//!   [`AppStore`]
//! - [`pages`]: headless page models that validate input, dispatch and wait
//!   for the store to settle
//! - [`router`]: route table and navigation state
//! - [`config`]: configuration from environment variables
//!
//! ## Example
//!
//! ```no_run
//! use chirp::pages::{LoginPage, PageContext};
//! use chirp::router::Router;
//! use chirp::validation::Field;
//! use chirp::{app, AppConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env();
//!     let store = app::connect(&config)?;
//!     let ctx = PageContext::new(store, Router::default(), config.request_wait);
//!
//!     let mut login = LoginPage::new();
//!     login.set_field(Field::Email, "user@example.com");
//!     login.set_field(Field::Password, "hunter22");
//!     let outcome = login.submit(&ctx).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod environment;
pub mod pages;
pub mod router;
pub mod tweets;
pub mod users;
pub mod validation;

pub use app::{AppAction, AppState, AppStore};
pub use config::AppConfig;
pub use environment::ChirpEnvironment;
