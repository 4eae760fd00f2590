use std::fs::read_to_string;

use anyhow::{anyhow, bail, Result};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{self, Deserialize};
use tracing::{debug, error, info};

use crate::error::StoreError;

pub const DEFAULT_WORKERS: usize = 5;
pub const DEFAULT_THREAD_NAME_PREFIX: &str = "worker";

pub static CONFIG: Lazy<RwLock<Configuration>> = Lazy::new(|| Default::default());

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Configuration {
    /// Number of concurrent workers the driver launches.
    pub workers: usize,
    pub thread_name_prefix: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            thread_name_prefix: DEFAULT_THREAD_NAME_PREFIX.to_string(),
        }
    }
}

impl Configuration {
    pub fn parse_config_file(file: &str) -> Result<Configuration> {
        info!("parsing configuration file: {}", file);

        let file_contents = read_to_string(file).map_err(|e| {
            error!("failed to read configuration file {}, err: {}", file, e);
            anyhow!(StoreError::FailedToRead)
        })?;

        let ret: Configuration = toml::from_str(&file_contents).map_err(|e| {
            error!("failed to parse configuration file {}, err: {}", file, e);
            anyhow!(StoreError::InvalidToml(e.to_string()))
        })?;

        debug!("configuration: {:?}", ret);
        Ok(ret)
    }
}

fn validate_configuration(config: &Configuration) -> Result<()> {
    if config.workers == 0 {
        bail!(StoreError::InvalidConfig(
            "workers must be at least 1".to_string()
        ));
    }

    Ok(())
}

pub fn init_config(config_file: &str) -> Result<()> {
    let conf = Configuration::parse_config_file(config_file)?;
    validate_configuration(&conf)?;

    *CONFIG.write() = conf;

    info!("successfully initialized config module");
    Ok(())
}
