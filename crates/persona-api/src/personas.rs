//! Handlers for `/personas` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/personas` | Active and inactive alike |
//! | `GET`    | `/personas/estadisticas` | `{total, activos, inactivos}` |
//! | `POST`   | `/personas` | Body: [`CreatePersona`]; returns the new id |
//! | `PUT`    | `/personas/:id` | Body: [`UpdatePersona`]; body id must match the path |
//! | `DELETE` | `/personas/:id` | Soft delete |
//! | `PUT`    | `/personas/:id/reactivate` | Undo a soft delete |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
};
use persona_core::{
  commands::{self, CreatePersona, DeactivatePersona, ReactivatePersona, UpdatePersona},
  persona::{Persona, PersonaId},
  queries,
  store::{PersonaStats, PersonaStore},
};

use crate::error::ApiError;

// ─── Queries ──────────────────────────────────────────────────────────────────

/// `GET /personas`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Persona>>, ApiError>
where
  S: PersonaStore,
  S::Error: Into<persona_core::Error>,
{
  let personas = queries::list_all(store.as_ref()).await?;
  Ok(Json(personas))
}

/// `GET /personas/estadisticas`
pub async fn stats<S>(State(store): State<Arc<S>>) -> Result<Json<PersonaStats>, ApiError>
where
  S: PersonaStore,
  S::Error: Into<persona_core::Error>,
{
  let stats = queries::stats(store.as_ref()).await?;
  Ok(Json(stats))
}

// ─── Commands ─────────────────────────────────────────────────────────────────

/// `POST /personas`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<CreatePersona>, JsonRejection>,
) -> Result<Json<PersonaId>, ApiError>
where
  S: PersonaStore,
  S::Error: Into<persona_core::Error>,
{
  let Json(cmd) = body?;
  let id = commands::create(store.as_ref(), cmd).await?;
  Ok(Json(id))
}

/// `PUT /personas/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<PersonaId>, PathRejection>,
  body: Result<Json<UpdatePersona>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PersonaStore,
  S::Error: Into<persona_core::Error>,
{
  let Path(id) = path?;
  let Json(cmd) = body?;
  if id != cmd.id {
    return Err(ApiError::BadRequest(
      "El ID de la URL no coincide con el cuerpo.".to_string(),
    ));
  }
  commands::update(store.as_ref(), cmd).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /personas/:id`
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<PersonaId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PersonaStore,
  S::Error: Into<persona_core::Error>,
{
  let Path(id) = path?;
  commands::deactivate(store.as_ref(), DeactivatePersona { id }).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `PUT /personas/:id/reactivate`
pub async fn reactivate<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<PersonaId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PersonaStore,
  S::Error: Into<persona_core::Error>,
{
  let Path(id) = path?;
  commands::reactivate(store.as_ref(), ReactivatePersona { id }).await?;
  Ok(StatusCode::NO_CONTENT)
}
