//! Runtime settings for the API service.
//!
//! Every field is read from the environment (after an optional `.env` file
//! is loaded at startup), matched case-insensitively by name; variables
//! that match no field are ignored and the declared defaults fill in
//! anything absent. The struct is built once in `main` and never mutated;
//! both derived accessors are pure functions of it.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use parley_core::config::Config;

/// File name of the embedded SQLite database used when no external
/// database is configured. Lives next to the server binary.
const FALLBACK_DB_FILE: &str = "app.db";

fn default_auth_algorithm() -> String {
    "HS256".to_owned()
}

fn default_access_token_expire_minutes() -> u32 {
    30
}

fn default_refresh_token_expire_days() -> u32 {
    7
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_owned()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_owned()
}

fn default_cors_origins() -> String {
    "http://localhost:5173,http://localhost:5174".to_owned()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Full database connection string; takes precedence over everything
    /// else in [`Settings::resolved_database_url`].
    #[serde(default)]
    pub database_url: Option<String>,
    /// Supabase project base URL, e.g. `https://<project>.supabase.co`.
    /// Not sufficient for a direct connection on its own.
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,

    #[serde(default)]
    pub auth_secret_key: Option<String>,
    #[serde(default = "default_auth_algorithm")]
    pub auth_algorithm: String,
    #[serde(default = "default_access_token_expire_minutes")]
    pub access_token_expire_minutes: u32,
    #[serde(default = "default_refresh_token_expire_days")]
    pub refresh_token_expire_days: u32,

    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,
    #[serde(default = "default_gemini_endpoint")]
    pub gemini_endpoint: String,

    /// Comma-separated allow-list consumed by the CORS layer.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

impl Config for Settings {}

/// The values every field takes when its environment variable is absent.
impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            supabase_url: None,
            supabase_anon_key: None,
            auth_secret_key: None,
            auth_algorithm: default_auth_algorithm(),
            access_token_expire_minutes: default_access_token_expire_minutes(),
            refresh_token_expire_days: default_refresh_token_expire_days(),
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_endpoint: default_gemini_endpoint(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Settings {
    /// Connection string for the configured database.
    ///
    /// Three tiers, first match wins:
    /// 1. `DATABASE_URL`, returned verbatim.
    /// 2. `SUPABASE_URL` alone — not enough for a direct connection; log
    ///    the connection string the operator should set and fall through.
    /// 3. An embedded SQLite file next to the server binary.
    ///
    /// Never fails: a malformed `SUPABASE_URL` is ignored and tier 3 always
    /// produces a string.
    pub fn resolved_database_url(&self) -> String {
        if let Some(url) = non_empty(self.database_url.as_deref()) {
            return url.to_owned();
        }

        if let Some(supabase) = non_empty(self.supabase_url.as_deref()) {
            if let Some(project_id) = supabase_project_id(supabase) {
                warn!("SUPABASE_URL is set but DATABASE_URL is not; falling back to local SQLite");
                warn!(
                    "for a direct PostgreSQL connection set \
                     DATABASE_URL=postgresql://postgres:[PASSWORD]@{project_id}.supabase.co:5432/postgres"
                );
            }
        }

        sqlite_url_in(&install_dir())
    }

    /// Ordered CORS allow-list parsed from the raw comma-separated field.
    /// Whitespace is trimmed, empty pieces dropped, order preserved,
    /// duplicates kept.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Project identifier embedded in a Supabase base URL
/// (`https://abc123.supabase.co` → `abc123`). `None` when the URL does not
/// have the expected shape.
fn supabase_project_id(url: &str) -> Option<&str> {
    let host = url.split_once("//")?.1;
    let id = host.split('.').next()?;
    (!id.is_empty()).then_some(id)
}

/// Directory the server binary runs from; the SQLite fallback lives next
/// to it. Falls back to the working directory when the executable path
/// cannot be resolved.
fn install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// SQLite connection string for an `app.db` inside `dir`, rendered with
/// forward slashes on every platform.
fn sqlite_url_in(dir: &Path) -> String {
    let path = dir.join(FALLBACK_DB_FILE);
    format!("sqlite:///{}", path.display().to_string().replace('\\', "/"))
}
