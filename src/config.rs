//! Process-wide settings, read once from the environment.

use crate::errors::BuildError;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Environment variable selecting the boolean backend (`auto`, `exact`, `bsp`).
pub const BACKEND_ENV: &str = "PARTFORGE_BACKEND";

/// Which boolean backend the process should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Exact backend when compiled in, otherwise BSP
    #[default]
    Auto,
    /// Exact backend; falls back to BSP when not compiled in
    Exact,
    /// Always BSP
    Bsp,
}

impl FromStr for BackendPreference {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "exact" | "bmesh" | "manifold" => Ok(Self::Exact),
            "bsp" | "approx" => Ok(Self::Bsp),
            other => Err(BuildError::invalid_parameter(
                BACKEND_ENV,
                format!("unknown backend `{other}` (expected auto, exact or bsp)"),
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendPreference,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// An unparsable value is logged and replaced by the default.
    pub fn from_env() -> Self {
        let backend = match std::env::var(BACKEND_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|err: BuildError| {
                warn!(%err, "ignoring {}", BACKEND_ENV);
                BackendPreference::default()
            }),
            Err(_) => BackendPreference::default(),
        };
        Settings { backend }
    }

    /// Settings for this process, computed on first access.
    pub fn global() -> &'static Settings {
        static SETTINGS: OnceLock<Settings> = OnceLock::new();
        SETTINGS.get_or_init(Settings::from_env)
    }
}
