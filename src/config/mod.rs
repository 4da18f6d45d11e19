use crate::errors::{AppError, AppResult};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `owner_id`.
pub const OWNER_ENV: &str = "RATTENDANCE_OWNER_ID";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    #[serde(default = "default_scan_interval")]
    pub scan_interval_secs: u64,
    #[serde(default = "default_first_delay")]
    pub scan_first_delay_secs: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_utc_offset() -> String {
    "+07:00".to_string()
}
fn default_scan_interval() -> u64 {
    60
}
fn default_first_delay() -> u64 {
    10
}
fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            owner_id: None,
            utc_offset: default_utc_offset(),
            scan_interval_secs: default_scan_interval(),
            scan_first_delay_secs: default_first_delay(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rattendance")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rattendance.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rattendance.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// `RATTENDANCE_OWNER_ID` wins over the file.
    pub fn load() -> AppResult<Self> {
        let mut cfg = Self::load_from(&Self::config_file())?;
        if let Ok(raw) = env::var(OWNER_ENV) {
            let id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| AppError::Config(format!("{OWNER_ENV} is not a user id: {raw}")))?;
            cfg.owner_id = Some(id);
        }
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        cfg.offset()?;
        Ok(cfg)
    }

    /// The fixed civil zone every wall-clock computation uses.
    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.utc_offset)
    }

    /// Write the default config file (unless `is_test`) and return it.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Config::default();
        if let Some(name) = custom_db {
            let p = Path::new(&name);
            let db_path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            };
            config.database = db_path.to_string_lossy().to_string();
        }

        if !is_test {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| AppError::Config(e.to_string()))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }
}

/// Parse `+HH:MM` / `-HH:MM` into a fixed offset.
pub fn parse_offset(s: &str) -> AppResult<FixedOffset> {
    s.trim()
        .parse::<FixedOffset>()
        .map_err(|_| AppError::Config(format!("invalid UTC offset '{s}', expected +HH:MM")))
}
