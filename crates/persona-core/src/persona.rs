//! Persona: the catalog's single entity.
//!
//! A persona is created by the store from a complete [`PersonaProfile`] and
//! afterwards changes only through [`Persona::update_profile`],
//! [`Persona::activate`] and [`Persona::deactivate`]. Persisting those
//! changes is the caller's responsibility.

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Store-assigned identity of a persona.
pub type PersonaId = i64;

// ─── Row version ─────────────────────────────────────────────────────────────

/// Opaque concurrency stamp, regenerated by the store on every write.
///
/// Travels over the wire as a base64 string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowVersion(Vec<u8>);

impl RowVersion {
  pub fn from_bytes(bytes: Vec<u8>) -> Self { Self(bytes) }

  pub fn as_bytes(&self) -> &[u8] { &self.0 }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl Serialize for RowVersion {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&B64.encode(&self.0))
  }
}

impl<'de> Deserialize<'de> for RowVersion {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    B64
      .decode(raw.as_bytes())
      .map(Self)
      .map_err(serde::de::Error::custom)
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// The eight attributes every persona carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
  #[serde(rename = "nombre")]
  pub first_name:     String,
  #[serde(rename = "apellido")]
  pub last_name:      String,
  #[serde(rename = "fechaNacimiento", with = "birth_date")]
  pub birth_date:     NaiveDateTime,
  pub email:          String,
  #[serde(rename = "telefono")]
  pub phone:          String,
  #[serde(rename = "direccion")]
  pub address:        String,
  #[serde(rename = "genero")]
  pub gender:         String,
  #[serde(rename = "estadoCivil")]
  pub marital_status: String,
}

// ─── Entity ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Persona {
  id:          PersonaId,
  #[serde(flatten)]
  profile:     PersonaProfile,
  #[serde(rename = "activo")]
  active:      bool,
  #[serde(rename = "rowVersion")]
  row_version: RowVersion,
}

impl Persona {
  /// Rebuild a persona from a persisted row. Only storage backends should
  /// need this.
  pub fn restore(
    id: PersonaId,
    profile: PersonaProfile,
    active: bool,
    row_version: RowVersion,
  ) -> Self {
    Self { id, profile, active, row_version }
  }

  pub fn id(&self) -> PersonaId { self.id }

  pub fn profile(&self) -> &PersonaProfile { &self.profile }

  pub fn is_active(&self) -> bool { self.active }

  pub fn row_version(&self) -> &RowVersion { &self.row_version }

  /// Overwrite the six mutable profile fields. Gender, birth date, status,
  /// id and row version are left as they are.
  pub fn update_profile(
    &mut self,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: String,
    marital_status: String,
  ) {
    self.profile.first_name = first_name;
    self.profile.last_name = last_name;
    self.profile.email = email;
    self.profile.phone = phone;
    self.profile.address = address;
    self.profile.marital_status = marital_status;
  }

  /// Soft delete.
  pub fn deactivate(&mut self) { self.active = false; }

  pub fn activate(&mut self) { self.active = true; }
}

// ─── Birth date wire format ──────────────────────────────────────────────────

/// Serde adapter for birth dates.
///
/// Emits `YYYY-MM-DDTHH:MM:SS`. Accepts a bare `YYYY-MM-DD` (what an HTML
/// date input produces), a naive date-time with optional fraction, or an
/// RFC 3339 timestamp, which is converted to server-local time.
pub mod birth_date {
  use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
  use serde::{Deserialize, Deserializer, Serializer};

  pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

  pub fn format(dt: &NaiveDateTime) -> String { dt.format(FORMAT).to_string() }

  pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
      return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
      return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
  }

  pub fn serialize<S: Serializer>(
    dt: &NaiveDateTime,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&dt.format(FORMAT))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(&raw)
      .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {raw:?}")))
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn profile() -> PersonaProfile {
    PersonaProfile {
      first_name:     "Verso".into(),
      last_name:      "Dessendre".into(),
      birth_date:     NaiveDate::from_ymd_opt(1990, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap(),
      email:          "verso@test.com".into(),
      phone:          "8888-8585".into(),
      address:        "Lumiere".into(),
      gender:         "Masculino".into(),
      marital_status: "Soltero".into(),
    }
  }

  fn persona() -> Persona {
    Persona::restore(7, profile(), true, RowVersion::from_bytes(vec![1, 2, 3]))
  }

  #[test]
  fn update_profile_leaves_immutable_fields_alone() {
    let mut p = persona();
    p.update_profile(
      "Maelle".into(),
      "Dessendre".into(),
      "maelle@test.com".into(),
      "1234".into(),
      "Lumiere Norte".into(),
      "Casada".into(),
    );

    assert_eq!(p.id(), 7);
    assert_eq!(p.profile().first_name, "Maelle");
    assert_eq!(p.profile().email, "maelle@test.com");
    assert_eq!(p.profile().marital_status, "Casada");
    assert_eq!(p.profile().gender, "Masculino");
    assert_eq!(p.profile().birth_date, profile().birth_date);
    assert!(p.is_active());
    assert_eq!(p.row_version().as_bytes(), &[1, 2, 3]);
  }

  #[test]
  fn activate_and_deactivate_are_idempotent() {
    let mut p = persona();
    p.deactivate();
    p.deactivate();
    assert!(!p.is_active());
    p.activate();
    p.activate();
    assert!(p.is_active());
  }

  #[test]
  fn serializes_with_wire_names() {
    let json = serde_json::to_value(persona()).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["nombre"], "Verso");
    assert_eq!(json["apellido"], "Dessendre");
    assert_eq!(json["fechaNacimiento"], "1990-01-01T00:00:00");
    assert_eq!(json["telefono"], "8888-8585");
    assert_eq!(json["direccion"], "Lumiere");
    assert_eq!(json["genero"], "Masculino");
    assert_eq!(json["estadoCivil"], "Soltero");
    assert_eq!(json["activo"], true);
    assert_eq!(json["rowVersion"], "AQID");
  }

  #[test]
  fn birth_date_accepts_common_shapes() {
    let midnight = profile().birth_date;
    assert_eq!(birth_date::parse("1990-01-01"), Some(midnight));
    assert_eq!(birth_date::parse("1990-01-01T00:00:00"), Some(midnight));
    assert_eq!(birth_date::parse("1990-01-01T00:00:00.000"), Some(midnight));
    assert_eq!(birth_date::parse("01/01/1990"), None);
  }

  #[test]
  fn offset_timestamps_convert_to_local_time() {
    use chrono::{Local, TimeZone as _, Utc};

    let instant = Utc.with_ymd_and_hms(1990, 1, 1, 12, 0, 0).unwrap();
    let local = instant.with_timezone(&Local).naive_local();
    assert_eq!(birth_date::parse("1990-01-01T12:00:00Z"), Some(local));
    assert_eq!(birth_date::parse("1990-01-01T14:00:00+02:00"), Some(local));
  }

  #[test]
  fn row_version_rejects_invalid_base64() {
    let err = serde_json::from_str::<RowVersion>("\"not base64!\"");
    assert!(err.is_err());
    let ok: RowVersion = serde_json::from_str("\"AQID\"").unwrap();
    assert_eq!(ok.as_bytes(), &[1, 2, 3]);
  }
}
