//! [`SqliteStore`], the SQLite implementation of [`PersonaStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use persona_core::{
  persona::{Persona, PersonaId, PersonaProfile, RowVersion},
  store::{PersonaStats, PersonaStore},
};

use crate::{
  Error, Result,
  encode::{RawPersona, encode_birth_date},
  schema::{PERSONA_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A persona catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("persona schema initialised");
    Ok(())
  }
}

// ─── PersonaStore impl ───────────────────────────────────────────────────────

impl PersonaStore for SqliteStore {
  type Error = Error;

  async fn find_by_id(&self, id: PersonaId) -> Result<Option<Persona>> {
    let raw: Option<RawPersona> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSONA_COLUMNS} FROM personas WHERE id = ?1"),
            rusqlite::params![id],
            RawPersona::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPersona::into_persona).transpose()
  }

  async fn add(&self, profile: PersonaProfile) -> Result<Persona> {
    let email          = profile.email.clone();
    let first_name     = profile.first_name.clone();
    let last_name      = profile.last_name.clone();
    let birth_date_str = encode_birth_date(&profile.birth_date);
    let phone          = profile.phone.clone();
    let address        = profile.address.clone();
    let gender         = profile.gender.clone();
    let marital_status = profile.marital_status.clone();
    let email_param    = email.clone();

    let (id, row_version): (PersonaId, Vec<u8>) = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "INSERT INTO personas (
             nombre, apellido, fecha_nacimiento, email, telefono,
             direccion, genero, estado_civil, activo, row_version
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, randomblob(8))
           RETURNING id, row_version",
          rusqlite::params![
            first_name,
            last_name,
            birth_date_str,
            email_param,
            phone,
            address,
            gender,
            marital_status,
          ],
          |row| Ok((row.get(0)?, row.get(1)?)),
        )?)
      })
      .await
      .map_err(|e| Error::from_write(e, &email))?;

    Ok(Persona::restore(id, profile, true, RowVersion::from_bytes(row_version)))
  }

  async fn list_all(&self) -> Result<Vec<Persona>> {
    let raws: Vec<RawPersona> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {PERSONA_COLUMNS} FROM personas ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawPersona::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPersona::into_persona).collect()
  }

  async fn save_profile(&self, persona: &Persona) -> Result<usize> {
    let id             = persona.id();
    let p              = persona.profile();
    let email          = p.email.clone();
    let email_param    = p.email.clone();
    let first_name     = p.first_name.clone();
    let last_name      = p.last_name.clone();
    let phone          = p.phone.clone();
    let address        = p.address.clone();
    let marital_status = p.marital_status.clone();

    self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE personas
              SET nombre = ?1, apellido = ?2, email = ?3, telefono = ?4,
                  direccion = ?5, estado_civil = ?6, row_version = randomblob(8)
            WHERE id = ?7",
          rusqlite::params![
            first_name,
            last_name,
            email_param,
            phone,
            address,
            marital_status,
            id,
          ],
        )?)
      })
      .await
      .map_err(|e| Error::from_write(e, &email))
  }

  async fn save_status(&self, persona: &Persona) -> Result<usize> {
    let id     = persona.id();
    let active = persona.is_active();

    let affected = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE personas SET activo = ?1, row_version = randomblob(8) WHERE id = ?2",
          rusqlite::params![active, id],
        )?)
      })
      .await?;
    Ok(affected)
  }

  async fn aggregate_stats(&self) -> Result<Option<PersonaStats>> {
    let stats = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT total, activos, inactivos FROM persona_stats",
            [],
            |row| {
              Ok(PersonaStats {
                total:    row.get(0)?,
                active:   row.get(1)?,
                inactive: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;
    Ok(stats)
  }
}
