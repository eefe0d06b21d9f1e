//! SQL schema for the persona SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS personas (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre           TEXT    NOT NULL CHECK (length(nombre)   <= 100),
    apellido         TEXT    NOT NULL CHECK (length(apellido) <= 100),
    fecha_nacimiento TEXT    NOT NULL,   -- YYYY-MM-DDTHH:MM:SS
    email            TEXT    NOT NULL CHECK (length(email)    <= 150),
    telefono         TEXT    NOT NULL,
    direccion        TEXT    NOT NULL,
    genero           TEXT    NOT NULL,
    estado_civil     TEXT    NOT NULL,
    activo           INTEGER NOT NULL DEFAULT 1,
    -- Regenerated by every INSERT and UPDATE statement.
    row_version      BLOB    NOT NULL DEFAULT (randomblob(8))
);

-- Uniqueness holds across active and inactive rows alike.
CREATE UNIQUE INDEX IF NOT EXISTS personas_email_uidx ON personas(email);

-- Aggregate counts by status; always yields exactly one row.
CREATE VIEW IF NOT EXISTS persona_stats AS
SELECT
    COUNT(*)                          AS total,
    COALESCE(SUM(activo = 1), 0)      AS activos,
    COALESCE(SUM(activo = 0), 0)      AS inactivos
FROM personas;

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` that materialises a [`Persona`].
///
/// [`Persona`]: persona_core::persona::Persona
pub const PERSONA_COLUMNS: &str = "id, nombre, apellido, fecha_nacimiento, email, telefono,
     direccion, genero, estado_civil, activo, row_version";
