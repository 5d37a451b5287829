//! Loading alias tables from YAML.
//!
//! ```yaml
//! scope: global            # global | caller | { fixed: "app::facades" }
//! aliases:
//!   Queue: app::proxies::QueueProxy
//! ```

use crate::error::{Error, Result};
use crate::scope::ResolutionScope;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_BASE_NAME: &str = "fibre_proxy";
const DEFAULT_CONFIG_EXTENSION: &str = "yaml";

#[derive(Debug, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
  #[serde(default)] // Global unless stated otherwise
  pub scope: ResolutionScope,
  #[serde(default)]
  pub aliases: BTreeMap<String, String>,
}

impl ProxyConfig {
  pub fn from_yaml_str(source: &str) -> Result<Self> {
    serde_yaml::from_str(source).map_err(|e| Error::ConfigParse(e.to_string()))
  }

  pub fn from_path(path: &Path) -> Result<Self> {
    tracing::debug!(?path, "Loading proxy configuration");
    let reader = io::BufReader::new(File::open(path)?);
    serde_yaml::from_reader(reader).map_err(|e| Error::ConfigParse(e.to_string()))
  }
}

/// Finds the configuration file in the working directory.
///
/// Looks for `fibre_proxy.<env>.yaml` first, where `<env>` comes from
/// `environment_suffix`, `FIBRE_ENV` or `APP_ENV`, then `fibre_proxy.yaml`.
pub fn find_config_file(environment_suffix: Option<&str>) -> Result<PathBuf> {
  find_config_file_in(Path::new("."), environment_suffix)
}

/// [`find_config_file`] rooted at `dir`.
pub fn find_config_file_in(dir: &Path, environment_suffix: Option<&str>) -> Result<PathBuf> {
  let env_name = environment_suffix
    .map(|s| s.to_string())
    .or_else(|| env::var("FIBRE_ENV").ok())
    .or_else(|| env::var("APP_ENV").ok());

  let mut files_to_check: Vec<String> = Vec::new();
  if let Some(env_name) = env_name.filter(|name| !name.is_empty()) {
    files_to_check.push(format!(
      "{}.{}.{}",
      DEFAULT_CONFIG_BASE_NAME, env_name, DEFAULT_CONFIG_EXTENSION
    ));
  }
  files_to_check.push(format!(
    "{}.{}",
    DEFAULT_CONFIG_BASE_NAME, DEFAULT_CONFIG_EXTENSION
  ));

  files_to_check
    .iter()
    .map(|file_name| dir.join(file_name))
    .find(|path| path.is_file())
    .ok_or_else(|| {
      Error::ConfigNotFound(format!(
        "Searched for: {:?} in {:?}. Provide a config file or check FIBRE_ENV/APP_ENV.",
        files_to_check, dir
      ))
    })
}
