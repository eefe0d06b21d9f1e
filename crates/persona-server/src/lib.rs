//! HTTP host for the persona catalog.
//!
//! Assembles the JSON API with CORS and request tracing, and loads the
//! runtime configuration.

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  http::{HeaderValue, header::InvalidHeaderValue},
};
use persona_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, an optional TOML file, and `PERSONA_*`
/// environment variables (later sources win).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// SQLite database file. A leading `~/` is expanded by the binary.
  pub database_path:   PathBuf,
  /// Origins allowed to call the API from a browser. Empty disables CORS.
  #[serde(default)]
  pub allowed_origins: Vec<String>,
}

/// Build a [`ServerConfig`] from defaults, `file`, and the process
/// environment.
pub fn load_config<F>(file: F) -> Result<ServerConfig, config::ConfigError>
where
  F: config::Source + Send + Sync + 'static,
{
  load_config_with(file, environment())
}

/// `PERSONA_*` variables. `PERSONA_ALLOWED_ORIGINS` takes a `;`-separated
/// list.
pub fn environment() -> config::Environment {
  config::Environment::with_prefix("PERSONA")
    .try_parsing(true)
    .list_separator(";")
    .with_list_parse_key("allowed_origins")
}

/// [`load_config`] with an explicit environment source.
pub fn load_config_with<F>(
  file: F,
  env: config::Environment,
) -> Result<ServerConfig, config::ConfigError>
where
  F: config::Source + Send + Sync + 'static,
{
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5268)?
    .set_default("database_path", "personas.db")?
    .set_default("allowed_origins", Vec::<String>::new())?
    .add_source(file)
    .add_source(env)
    .build()?
    .try_deserialize()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS policy admitting exactly `origins`, with any method and header.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer, InvalidHeaderValue> {
  let origins = origins
    .iter()
    .map(|o| o.trim())
    .filter(|o| !o.is_empty())
    .map(HeaderValue::from_str)
    .collect::<Result<Vec<_>, _>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods(Any)
      .allow_headers(Any),
  )
}

/// The full application: `/api` routes plus CORS and tracing layers.
pub fn router(store: Arc<SqliteStore>, cors: CorsLayer) -> Router {
  Router::new()
    .nest("/api", persona_api::api_router(store))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}
