//! Read-side use cases.

use crate::{
  Error, Result,
  persona::Persona,
  store::{PersonaStats, PersonaStore},
};

/// Every persona, active and inactive. Filtering by status is left to the
/// presentation layer.
pub async fn list_all<S>(store: &S) -> Result<Vec<Persona>>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  store.list_all().await.map_err(Into::into)
}

/// Counts by status. A store that reports no aggregate row yields zeros.
pub async fn stats<S>(store: &S) -> Result<PersonaStats>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  let stats = store.aggregate_stats().await.map_err(Into::into)?;
  Ok(stats.unwrap_or_default())
}
