use crate::config::DashboardConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads dashboard configuration by layering built-in defaults, a TOML
    /// file, and `DASHBOARD_` environment variables (nested keys split on `__`,
    /// e.g. `DASHBOARD_PATHS__DATA_DIR`).
    ///
    /// A missing TOML file is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file or an environment override cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<DashboardConfig> {
        let path = path.as_ref();
        let config: DashboardConfig = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(DashboardConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("DASHBOARD_").split("__"))
    }
}
