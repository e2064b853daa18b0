use anyhow::Context;

/// Loading of service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize`; `envy` matches each field to
/// the environment variable of the same name (case-insensitive), applies
/// `#[serde(default)]` values for anything absent, and ignores variables
/// that match no field. In local dev, call `dotenvy::dotenv().ok()` before
/// this so a `.env` file is picked up.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> anyhow::Result<Self> {
        envy::from_env().context("failed to load config from environment")
    }
}
