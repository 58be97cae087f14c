use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub inventory: InventoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Каталог с файлами коллекций (products.json, customers.json, sales.json)
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Один JSON-файл на коллекцию в `data_dir`
    #[default]
    Json,
    /// Данные живут только до перезапуска процесса
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InventoryConfig {
    /// Остаток ниже этого значения считается низким
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

fn default_low_stock_threshold() -> u32 {
    5
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3001

[storage]
backend = "json"
data_dir = "data"

[inventory]
low_stock_threshold = 5
"#;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Current working directory
/// 2. Next to the executable (for production)
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    for candidate in config_candidates() {
        if candidate.exists() {
            tracing::info!("Loading config from: {}", candidate.display());
            return load_config_from(&candidate);
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
        .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
}

fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join(CONFIG_FILE_NAME));
        }
    }
    candidates
}

impl Config {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid server address {}: {}", addr, e))
    }

    /// Get the data directory path from configuration
    /// Resolves relative paths relative to the current directory
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        let dir = Path::new(&self.storage.data_dir);
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        Ok(std::env::current_dir()?.join(dir))
    }
}
