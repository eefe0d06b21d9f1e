//! The `PersonaStore` trait and the aggregate stats read model.
//!
//! The trait is implemented by storage backends (e.g. `persona-store-sqlite`).
//! Handlers in [`crate::commands`] and [`crate::queries`] depend on this
//! abstraction and never build queries themselves.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::persona::{Persona, PersonaId, PersonaProfile};

// ─── Stats ───────────────────────────────────────────────────────────────────

/// Persona counts by status, as reported by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaStats {
  pub total:    i64,
  #[serde(rename = "activos")]
  pub active:   i64,
  #[serde(rename = "inactivos")]
  pub inactive: i64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a persona catalog backend.
///
/// Every write is an explicit statement; there is no change tracking. Write
/// methods return the number of affected rows so callers can tell a row that
/// vanished from one that was updated.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a persona by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: PersonaId,
  ) -> impl Future<Output = Result<Option<Persona>, Self::Error>> + Send + '_;

  /// Insert a new persona. The store assigns the id and row version; the
  /// persona starts active.
  fn add(
    &self,
    profile: PersonaProfile,
  ) -> impl Future<Output = Result<Persona, Self::Error>> + Send + '_;

  /// All personas, active and inactive, in insertion order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Persona>, Self::Error>> + Send + '_;

  /// Persist the six mutable profile fields of `persona`.
  fn save_profile<'a>(
    &'a self,
    persona: &'a Persona,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Persist the active flag of `persona`.
  fn save_status<'a>(
    &'a self,
    persona: &'a Persona,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Counts computed store-side. `None` if the aggregate yields no row.
  fn aggregate_stats(
    &self,
  ) -> impl Future<Output = Result<Option<PersonaStats>, Self::Error>> + Send + '_;
}
