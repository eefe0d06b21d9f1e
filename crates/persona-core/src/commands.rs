//! Write-side use cases: create, update, deactivate, reactivate.
//!
//! Each command is a plain value and each handler is a single function
//! generic over [`PersonaStore`]. Handlers raise typed [`Error`]s and know
//! nothing about transports.

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;

use crate::{
  Error, Result,
  persona::{PersonaId, PersonaProfile, RowVersion, birth_date},
  store::PersonaStore,
  validation,
};

// ─── Command values ──────────────────────────────────────────────────────────

/// Register a new persona. Missing strings deserialize as empty and are then
/// caught by validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePersona {
  #[serde(rename = "nombre", default)]
  pub first_name:     String,
  #[serde(rename = "apellido", default)]
  pub last_name:      String,
  #[serde(rename = "fechaNacimiento", with = "birth_date")]
  pub birth_date:     NaiveDateTime,
  #[serde(default)]
  pub email:          String,
  #[serde(rename = "telefono", default)]
  pub phone:          String,
  #[serde(rename = "direccion", default)]
  pub address:        String,
  #[serde(rename = "genero", default)]
  pub gender:         String,
  #[serde(rename = "estadoCivil", default)]
  pub marital_status: String,
}

impl From<CreatePersona> for PersonaProfile {
  fn from(cmd: CreatePersona) -> Self {
    Self {
      first_name:     cmd.first_name,
      last_name:      cmd.last_name,
      birth_date:     cmd.birth_date,
      email:          cmd.email,
      phone:          cmd.phone,
      address:        cmd.address,
      gender:         cmd.gender,
      marital_status: cmd.marital_status,
    }
  }
}

/// Overwrite the mutable profile fields of an existing persona.
///
/// Gender and birth date are not part of this command; payloads that carry
/// them have those keys ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePersona {
  pub id:             PersonaId,
  #[serde(rename = "nombre", default)]
  pub first_name:     String,
  #[serde(rename = "apellido", default)]
  pub last_name:      String,
  #[serde(default)]
  pub email:          String,
  #[serde(rename = "telefono", default)]
  pub phone:          String,
  #[serde(rename = "direccion", default)]
  pub address:        String,
  #[serde(rename = "estadoCivil", default)]
  pub marital_status: String,
  /// Accepted for wire compatibility; not compared against the stored value.
  #[serde(rename = "rowVersion", default)]
  pub row_version:    Option<RowVersion>,
}

/// Soft-delete a persona.
#[derive(Debug, Clone, Copy)]
pub struct DeactivatePersona {
  pub id: PersonaId,
}

/// Undo a soft delete.
#[derive(Debug, Clone, Copy)]
pub struct ReactivatePersona {
  pub id: PersonaId,
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// Validate and insert a new persona, returning its id.
pub async fn create<S>(store: &S, cmd: CreatePersona) -> Result<PersonaId>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  validation::validate_create(&cmd, Local::now().naive_local())?;

  let persona = store.add(cmd.into()).await.map_err(Into::into)?;

  tracing::info!(id = persona.id(), "persona created");
  Ok(persona.id())
}

/// Validate, load, apply the profile change and persist it.
pub async fn update<S>(store: &S, cmd: UpdatePersona) -> Result<()>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  validation::validate_update(&cmd)?;

  let mut persona = store
    .find_by_id(cmd.id)
    .await
    .map_err(Into::into)?
    .ok_or(Error::NotFound(cmd.id))?;

  if let Some(supplied) = &cmd.row_version
    && supplied != persona.row_version()
  {
    tracing::debug!(id = cmd.id, "update carries a stale row version; applying anyway");
  }

  persona.update_profile(
    cmd.first_name,
    cmd.last_name,
    cmd.email,
    cmd.phone,
    cmd.address,
    cmd.marital_status,
  );

  let affected = store.save_profile(&persona).await.map_err(Into::into)?;
  if affected == 0 {
    return Err(Error::NotFound(cmd.id));
  }

  tracing::info!(id = cmd.id, "persona updated");
  Ok(())
}

pub async fn deactivate<S>(store: &S, cmd: DeactivatePersona) -> Result<()>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  set_active(store, cmd.id, false).await
}

pub async fn reactivate<S>(store: &S, cmd: ReactivatePersona) -> Result<()>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  set_active(store, cmd.id, true).await
}

async fn set_active<S>(store: &S, id: PersonaId, active: bool) -> Result<()>
where
  S: PersonaStore,
  S::Error: Into<Error>,
{
  let mut persona = store
    .find_by_id(id)
    .await
    .map_err(Into::into)?
    .ok_or(Error::NotFound(id))?;

  if active {
    persona.activate();
  } else {
    persona.deactivate();
  }

  let affected = store.save_status(&persona).await.map_err(Into::into)?;
  if affected == 0 {
    return Err(Error::NotFound(id));
  }

  tracing::info!(id, active, "persona status changed");
  Ok(())
}
