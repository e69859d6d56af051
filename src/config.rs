use std::net::IpAddr;
use std::path::PathBuf;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub base_url: String,
    pub max_body_size: usize,
    pub trusted_proxies: Vec<IpNet>,
    pub log_level: String,
    pub submit_rate_limit: u32,
    pub submit_rate_window_secs: u64,
    pub honeypot_field: Option<String>,
    pub document_store: DocumentStoreConfig,
    pub object_store: ObjectStoreConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStoreConfig {
    Postgres { database_url: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectStoreConfig {
    /// Files land under `dir` and are served back from `/uploads`.
    Local { dir: PathBuf },
    Http {
        endpoint: String,
        public_url: String,
        token: Option<String>,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("ARK_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ARK_HOST: {e}"))?;

        let port: u16 = env_or("ARK_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ARK_PORT: {e}"))?;

        let base_url = env_or("ARK_BASE_URL", &format!("http://{host}:{port}"))
            .trim_end_matches('/')
            .to_string();

        let max_body_size: usize = env_or("ARK_MAX_BODY_SIZE", "10485760")
            .parse()
            .map_err(|e| format!("Invalid ARK_MAX_BODY_SIZE: {e}"))?;

        let trusted_proxies: Vec<IpNet> = env_or("ARK_TRUSTED_PROXIES", "")
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|e| format!("Invalid ARK_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let log_level = env_or("ARK_LOG_LEVEL", "info");

        let submit_rate_limit: u32 = env_or("ARK_SUBMIT_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid ARK_SUBMIT_RATE_LIMIT: {e}"))?;

        let submit_rate_window_secs: u64 = env_or("ARK_SUBMIT_RATE_WINDOW_SECS", "60")
            .parse()
            .map_err(|e| format!("Invalid ARK_SUBMIT_RATE_WINDOW_SECS: {e}"))?;

        let honeypot_field = Some(env_or("ARK_HONEYPOT_FIELD", "website"))
            .filter(|s| !s.trim().is_empty());

        let document_store = match env_or("ARK_DOCUMENT_STORE", "postgres").as_str() {
            "postgres" => DocumentStoreConfig::Postgres {
                database_url: env_required("DATABASE_URL")?,
            },
            "memory" => DocumentStoreConfig::Memory,
            other => return Err(format!("Invalid ARK_DOCUMENT_STORE: {other}")),
        };

        let object_store = match env_or("ARK_OBJECT_STORE", "local").as_str() {
            "local" => ObjectStoreConfig::Local {
                dir: PathBuf::from(env_or("ARK_UPLOAD_DIR", "uploads")),
            },
            "http" => ObjectStoreConfig::Http {
                endpoint: env_required("ARK_OBJECT_STORE_ENDPOINT")?,
                public_url: env_required("ARK_OBJECT_STORE_PUBLIC_URL")?,
                token: std::env::var("ARK_OBJECT_STORE_TOKEN")
                    .ok()
                    .filter(|s| !s.is_empty()),
            },
            other => return Err(format!("Invalid ARK_OBJECT_STORE: {other}")),
        };

        Ok(Config {
            host,
            port,
            base_url,
            max_body_size,
            trusted_proxies,
            log_level,
            submit_rate_limit,
            submit_rate_window_secs,
            honeypot_field,
            document_store,
            object_store,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
