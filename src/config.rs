use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "data/qr_linker.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_STATIC_DIR: &str = "./static";
const DEFAULT_POOL_SIZE: u32 = 8;

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub bind_addr: String,
    pub static_dir: PathBuf,
    pub pool_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let pool_size = match get("QR_LINKER_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!(
                        "QR_LINKER_POOL_SIZE={raw:?} is not a positive integer, using {DEFAULT_POOL_SIZE}"
                    );
                    DEFAULT_POOL_SIZE
                }
            },
            None => defaults.pool_size,
        };

        Self {
            database_path: get("QR_LINKER_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            bind_addr: get("QR_LINKER_BIND").unwrap_or(defaults.bind_addr),
            static_dir: get("QR_LINKER_STATIC")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            pool_size,
        }
    }
}
