//! Field rules checked before a command reaches its handler.
//!
//! Rules collect every violation rather than stopping at the first, so a
//! caller sees all problems with a payload at once.

use std::fmt;

use chrono::NaiveDateTime;

use crate::commands::{CreatePersona, UpdatePersona};

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 150;

/// A single rule violation, keyed by the wire name of the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

/// One or more rule violations for a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn errors(&self) -> &[FieldError] { &self.0 }

  pub fn has_field(&self, field: &str) -> bool {
    self.0.iter().any(|e| e.field == field)
  }

  fn push(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.push(FieldError { field, message: message.into() });
  }

  fn into_result(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
    f.write_str(&messages.join(" "))
  }
}

// ─── Rule sets ───────────────────────────────────────────────────────────────

/// Rules for [`CreatePersona`]. `now` is the current server time.
pub fn validate_create(
  cmd: &CreatePersona,
  now: NaiveDateTime,
) -> Result<(), ValidationErrors> {
  let mut errors = ValidationErrors::default();

  check_name(&mut errors, "nombre", &cmd.first_name);
  check_name(&mut errors, "apellido", &cmd.last_name);

  if cmd.email.trim().is_empty() {
    errors.push("email", "'email' no debe estar vacío.");
  } else {
    if !is_email_shaped(&cmd.email) {
      errors.push("email", "'email' no es una dirección de correo válida.");
    }
    if cmd.email.chars().count() > EMAIL_MAX_LEN {
      errors.push(
        "email",
        format!("'email' no debe exceder {EMAIL_MAX_LEN} caracteres."),
      );
    }
  }

  if cmd.birth_date >= now {
    errors.push(
      "fechaNacimiento",
      "La fecha de nacimiento no puede ser la fecha en curso.",
    );
  }

  errors.into_result()
}

/// Rules for [`UpdatePersona`]. Email, phone, address and marital status are
/// left to storage-level limits.
pub fn validate_update(cmd: &UpdatePersona) -> Result<(), ValidationErrors> {
  let mut errors = ValidationErrors::default();

  if cmd.id <= 0 {
    errors.push("id", "'id' debe ser mayor que 0.");
  }
  check_name(&mut errors, "nombre", &cmd.first_name);
  check_name(&mut errors, "apellido", &cmd.last_name);

  errors.into_result()
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn check_name(errors: &mut ValidationErrors, field: &'static str, value: &str) {
  if value.trim().is_empty() {
    errors.push(field, format!("'{field}' no debe estar vacío."));
  } else if value.chars().count() > NAME_MAX_LEN {
    errors.push(
      field,
      format!("'{field}' no debe exceder {NAME_MAX_LEN} caracteres."),
    );
  }
}

/// `local@domain`: exactly one `@`, both sides non-empty, no whitespace.
pub fn is_email_shaped(email: &str) -> bool {
  if email.chars().any(char::is_whitespace) {
    return false;
  }
  match email.split_once('@') {
    Some((local, domain)) => {
      !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    }
    None => false,
  }
}
