//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Birth dates are stored as `YYYY-MM-DDTHH:MM:SS` text, the same shape used
//! on the wire. The active flag is an `INTEGER` 0/1.

use chrono::NaiveDateTime;
use persona_core::persona::{Persona, PersonaId, PersonaProfile, RowVersion, birth_date};

use crate::{Error, Result};

pub fn encode_birth_date(dt: &NaiveDateTime) -> String { birth_date::format(dt) }

pub fn decode_birth_date(s: &str) -> Result<NaiveDateTime> {
  birth_date::parse(s)
    .ok_or_else(|| Error::DateParse(format!("invalid stored birth date: {s:?}")))
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// A `personas` row exactly as SQLite returns it.
pub struct RawPersona {
  pub id:               PersonaId,
  pub nombre:           String,
  pub apellido:         String,
  pub fecha_nacimiento: String,
  pub email:            String,
  pub telefono:         String,
  pub direccion:        String,
  pub genero:           String,
  pub estado_civil:     String,
  pub activo:           bool,
  pub row_version:      Vec<u8>,
}

impl RawPersona {
  /// Map a row selected with [`PERSONA_COLUMNS`](crate::schema::PERSONA_COLUMNS).
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      nombre:           row.get(1)?,
      apellido:         row.get(2)?,
      fecha_nacimiento: row.get(3)?,
      email:            row.get(4)?,
      telefono:         row.get(5)?,
      direccion:        row.get(6)?,
      genero:           row.get(7)?,
      estado_civil:     row.get(8)?,
      activo:           row.get(9)?,
      row_version:      row.get(10)?,
    })
  }

  pub fn into_persona(self) -> Result<Persona> {
    let profile = PersonaProfile {
      first_name:     self.nombre,
      last_name:      self.apellido,
      birth_date:     decode_birth_date(&self.fecha_nacimiento)?,
      email:          self.email,
      phone:          self.telefono,
      address:        self.direccion,
      gender:         self.genero,
      marital_status: self.estado_civil,
    };
    Ok(Persona::restore(
      self.id,
      profile,
      self.activo,
      RowVersion::from_bytes(self.row_version),
    ))
  }
}
