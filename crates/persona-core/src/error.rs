//! Error types for `persona-core`.

use thiserror::Error;

use crate::{persona::PersonaId, validation::ValidationErrors};

#[derive(Debug, Error)]
pub enum Error {
  #[error("Persona {0} no encontrada.")]
  NotFound(PersonaId),

  #[error("{0}")]
  Validation(ValidationErrors),

  #[error("el email {0:?} ya está registrado")]
  DuplicateEmail(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ValidationErrors> for Error {
  fn from(errors: ValidationErrors) -> Self { Self::Validation(errors) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
