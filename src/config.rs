use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::ConfigError(format!(
                "Unknown storage backend: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// 记录的存储键
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 设置后使用固定种子的随机源，便于复现
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".lootbox")
}

fn default_storage_key() -> String {
    "loot-box-data".to_string()
}

impl Config {
    /// 读取 CONFIG_PATH 指定的配置文件（默认 lootbox.toml），再用环境变量覆盖
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "lootbox.toml".to_string());
        let mut config = Self::from_path(&config_path)?;
        config.apply_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    /// 读取配置文件；文件不存在时使用默认值
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        use std::io::ErrorKind;

        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(config_str) => Self::parse(&config_str).map_err(|e| {
                AppError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(AppError::ConfigError(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str).map_err(|e| AppError::ConfigError(e.to_string()))
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）；无法解析的值记录警告后忽略
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("LOOTBOX_STORAGE_BACKEND") {
            match v.parse() {
                Ok(backend) => self.storage.backend = backend,
                Err(e) => log::warn!("Ignoring LOOTBOX_STORAGE_BACKEND: {e}"),
            }
        }
        if let Some(v) = lookup("LOOTBOX_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("LOOTBOX_STORAGE_KEY") {
            self.storage.key = v;
        }
        if let Some(v) = lookup("LOOTBOX_RNG_SEED") {
            match v.trim().parse::<u64>() {
                Ok(seed) => self.draw.rng_seed = Some(seed),
                Err(e) => log::warn!("Ignoring LOOTBOX_RNG_SEED={v}: {e}"),
            }
        }
    }
}
