use anyhow::{Context, Result};
use serde::Deserialize;
use anyhow::anyhow;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Runtime environment name; `production` switches logs to JSON.
    #[serde(default = "default_env")]
    pub env: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: default_env(),
            gateway: GatewayConfig::default(),
            catalog: CatalogConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

fn default_env() -> String { "development".into() }

/// HTTP gateway settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Address of the catalog gRPC server, e.g. `http://127.0.0.1:9090`.
    pub catalog_url: String,
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_ms: u64,
    #[serde(default = "default_rpc_connect_timeout")]
    pub connect_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            catalog_url: "http://127.0.0.1:9090".into(),
            rpc_timeout_ms: default_rpc_timeout(),
            connect_timeout_ms: default_rpc_connect_timeout(),
        }
    }
}

fn default_rpc_timeout() -> u64 { 5_000 }
fn default_rpc_connect_timeout() -> u64 { 3_000 }

impl GatewayConfig {
    pub fn rpc_timeout(&self) -> Duration { Duration::from_millis(self.rpc_timeout_ms) }
    pub fn connect_timeout(&self) -> Duration { Duration::from_millis(self.connect_timeout_ms) }
}

/// Which record store backend the catalog runs on.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    Database,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "database" | "db" => Ok(Self::Database),
            other => Err(anyhow!("unknown store backend `{other}` (expected memory|database)")),
        }
    }
}

/// Catalog gRPC service settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub store: StoreBackend,
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
    /// Optional `/healthz` + `/metrics` listener, e.g. `127.0.0.1:9091`.
    #[serde(default)]
    pub admin_addr: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 9090,
            store: StoreBackend::default(),
            seed_path: default_seed_path(),
            request_timeout_ms: default_request_timeout(),
            admin_addr: None,
        }
    }
}

fn default_seed_path() -> String { "seed/movies.json".into() }
fn default_request_timeout() -> u64 { 10_000 }

impl CatalogConfig {
    pub fn request_timeout(&self) -> Duration { Duration::from_millis(self.request_timeout_ms) }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

/// Read a TOML config file. A missing file yields the defaults; any other
/// read or parse failure is returned.
pub fn load_or_default(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).with_context(|| format!("invalid config file `{path}`")),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(e).with_context(|| format!("failed to read config file `{path}`")),
    }
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `.env`, then the TOML file if present, then environment overrides.
    pub fn load_and_validate() -> Result<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = load_or_default(&config_path())?;
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("ENV") { self.env = env; }

        if let Some(host) = lookup("GATEWAY_HOST") { self.gateway.host = host; }
        if let Some(port) = lookup("API_PORT") { self.gateway.port = parse_port("API_PORT", &port)?; }
        if let Some(url) = lookup("GRPC_SERVER") { self.gateway.catalog_url = with_scheme(&url); }
        if let Some(ms) = lookup("RPC_TIMEOUT_MS") {
            self.gateway.rpc_timeout_ms = ms.parse().map_err(|_| anyhow!("RPC_TIMEOUT_MS must be an integer"))?;
        }

        if let Some(host) = lookup("CATALOG_HOST") { self.catalog.host = host; }
        if let Some(port) = lookup("LISTEN_PORT") { self.catalog.port = parse_port("LISTEN_PORT", &port)?; }
        if let Some(backend) = lookup("STORE_BACKEND") { self.catalog.store = backend.parse()?; }
        if let Some(path) = lookup("SEED_PATH") { self.catalog.seed_path = path; }
        if let Some(addr) = lookup("ADMIN_ADDR") { self.catalog.admin_addr = Some(addr); }

        if let Some(url) = lookup("DATABASE_URL") { self.database.url = url; }
        Ok(())
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.gateway.normalize()?;
        self.catalog.normalize()?;
        if self.catalog.store == StoreBackend::Database {
            self.database.validate()?;
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

fn parse_port(key: &str, raw: &str) -> Result<u16> {
    raw.trim().parse::<u16>().map_err(|_| anyhow!("{key} must be a port number, got `{raw}`"))
}

/// Accept bare `host:port` for the catalog address.
fn with_scheme(addr: &str) -> String {
    if addr.starts_with("http://") || addr.starts_with("https://") {
        addr.to_string()
    } else {
        format!("http://{addr}")
    }
}

impl GatewayConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("gateway.port must be in 1..=65535"));
        }
        if self.catalog_url.trim().is_empty() {
            return Err(anyhow!("gateway.catalog_url is empty"));
        }
        self.catalog_url = with_scheme(self.catalog_url.trim());
        if self.rpc_timeout_ms == 0 || self.connect_timeout_ms == 0 {
            return Err(anyhow!("gateway timeouts must be positive milliseconds"));
        }
        Ok(())
    }
}

impl CatalogConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "0.0.0.0".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("catalog.port must be in 1..=65535"));
        }
        if self.request_timeout_ms == 0 {
            return Err(anyhow!("catalog.request_timeout_ms must be positive"));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}
