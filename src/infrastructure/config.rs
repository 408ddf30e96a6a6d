use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

/// Which repository backend the process runs against. Selected once at
/// startup; handlers and services never see the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory collections snapshotted to whole JSON files on every mutation.
    Json,
    /// MongoDB collections, one document per entity.
    Mongodb,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub cors_origin: String,
    pub store_backend: StoreBackend,
    /// Directory holding the collection snapshot files (JSON backend).
    pub data_dir: PathBuf,
    pub mongo_uri: String,
    pub mongo_db: String,
    /// Static admin seed file, read once, never rewritten.
    pub admin_file: PathBuf,
    /// Inline JSON array of admin records; takes precedence over the file.
    pub admins_json: Option<String>,
    pub business_server_url: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let store_backend = match env_or("STORE_BACKEND", "json").as_str() {
            "json" => StoreBackend::Json,
            "mongodb" => StoreBackend::Mongodb,
            other => bail!("unknown STORE_BACKEND value: {other}"),
        };

        Ok(Self {
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:5000"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:3000"),
            store_backend,
            data_dir: PathBuf::from(env_or("DATA_DIR", ".")),
            mongo_uri: env_or("MONGO_URI", "mongodb://localhost:27017"),
            mongo_db: env_or("MONGO_DB", "remit"),
            admin_file: PathBuf::from(env_or("ADMIN_FILE", "./admin.json")),
            admins_json: env::var("ADMINS").ok(),
            business_server_url: env_or("BUSINESS_SERVER_URL", "http://localhost:5002"),
        })
    }
}
