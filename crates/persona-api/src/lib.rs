//! JSON REST API for the persona catalog.
//!
//! Exposes an axum [`Router`] backed by any [`persona_core::store::PersonaStore`].
//! CORS, TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", persona_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod personas;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use persona_core::store::PersonaStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PersonaStore + 'static,
  S::Error: Into<persona_core::Error>,
{
  Router::new()
    .route("/personas", get(personas::list::<S>).post(personas::create::<S>))
    .route("/personas/estadisticas", get(personas::stats::<S>))
    .route(
      "/personas/{id}",
      put(personas::update::<S>).delete(personas::deactivate::<S>),
    )
    .route("/personas/{id}/reactivate", put(personas::reactivate::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
