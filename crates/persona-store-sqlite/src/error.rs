//! Error type for `persona-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The unique index on `personas.email` rejected a write.
  #[error("email already registered: {0}")]
  DuplicateEmail(String),
}

impl Error {
  /// Classify a failed insert/update, singling out unique-email violations.
  pub(crate) fn from_write(err: tokio_rusqlite::Error, email: &str) -> Self {
    if is_unique_violation(&err) {
      Self::DuplicateEmail(email.to_owned())
    } else {
      Self::Database(err)
    }
  }
}

fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

impl From<Error> for persona_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::DuplicateEmail(email) => Self::DuplicateEmail(email),
      other => Self::Store(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
