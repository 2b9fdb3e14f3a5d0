//! Client library for the Scribe blog API.
//!
//! Everything the front-end needs to talk to the server lives here:
//! a durable [`session::SessionStore`] holding the bearer token, an
//! authenticating transport that attaches the token to every request
//! and intercepts 401s, a [`cache::ResourceCache`] keeping fetched
//! resources consistent with user-driven mutations, and the typed
//! operations on [`api::BlogClient`]. Rendering, routing, and form
//! wiring are the embedding application's concern.

pub mod api;
pub mod cache;
mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use api::BlogClient;
pub use config::ClientConfig;
pub use error::ApiError;
