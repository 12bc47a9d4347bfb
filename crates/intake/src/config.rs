use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::services::DEFAULT_ENDPOINT;

pub const ENV_PREFIX: &str = "INTAKE";

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub dark_mode: bool,
    pub tick_rate: f64,
    pub frame_rate: f64,
    pub toast_ttl_ms: u64,
}

const CONFIG_FILES: [(&str, FileFormat); 2] = [
    ("config.json5", FileFormat::Json5),
    ("config.toml", FileFormat::Toml),
];

impl Config {
    /// Defaults -> config files in `config_dir` -> `INTAKE_*` environment ->
    /// CLI flags. Later layers win.
    pub fn load(config_dir: &Path, cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with(config_dir, Environment::with_prefix(ENV_PREFIX), cli)
    }

    fn load_with(config_dir: &Path, env: Environment, cli: &Cli) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("dark_mode", false)?
            .set_default("tick_rate", 4.0)?
            .set_default("frame_rate", 30.0)?
            .set_default("toast_ttl_ms", 5000_i64)?;

        let mut found: Vec<PathBuf> = Vec::new();
        for (file, format) in CONFIG_FILES {
            let path = config_dir.join(file);
            if path.exists() {
                found.push(path.clone());
            }
            builder = builder.add_source(File::from(path).format(format).required(false));
        }
        if found.is_empty() {
            debug!(dir = %config_dir.display(), "no configuration file, using defaults");
        } else {
            info!(files = ?found, "configuration files loaded");
        }

        builder = builder
            .add_source(env.try_parsing(true))
            .set_override_option("endpoint", cli.endpoint.clone())?
            .set_override_option("tick_rate", cli.tick_rate)?
            .set_override_option("frame_rate", cli.frame_rate)?;
        if cli.dark {
            builder = builder.set_override("dark_mode", true)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Message("endpoint must not be empty".into()));
        }
        if !(self.tick_rate > 0.0) || !(self.frame_rate > 0.0) {
            return Err(ConfigError::Message(
                "tick_rate and frame_rate must be positive".into(),
            ));
        }
        if self.toast_ttl_ms == 0 {
            return Err(ConfigError::Message("toast_ttl_ms must be positive".into()));
        }
        Ok(())
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }
}
