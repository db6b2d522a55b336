use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory for the rolling log files
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    /// User-Agent header sent on every upstream request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub tle: TleConfig,

    #[serde(default)]
    pub info: InfoConfig,
}

/// Satellite catalog upstream. `{}` in a URL is replaced by the encoded name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TleConfig {
    pub by_name_url: String,
    pub active_url: String,
    pub lookup_timeout_secs: u64,
    pub bulk_timeout_secs: u64,
}

/// Summary, search and link templates used to resolve entity info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub summary_url: String,
    pub search_url: String,
    pub google_search_url: String,
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_enable_cors() -> bool {
    true
}

fn default_user_agent() -> String {
    format!("satlink-backend/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            enable_cors: default_enable_cors(),
            user_agent: default_user_agent(),
            tle: TleConfig::default(),
            info: InfoConfig::default(),
        }
    }
}

impl Default for TleConfig {
    fn default() -> Self {
        Self {
            by_name_url: "https://celestrak.org/NORAD/elements/gp.php?NAME={}&FORMAT=TLE".to_string(),
            active_url: "https://celestrak.org/NORAD/elements/gp.php?GROUP=active&FORMAT=tle"
                .to_string(),
            lookup_timeout_secs: 15,
            bulk_timeout_secs: 20,
        }
    }
}

impl TleConfig {
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn bulk_timeout(&self) -> Duration {
        Duration::from_secs(self.bulk_timeout_secs)
    }
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            summary_url: "https://en.wikipedia.org/api/rest_v1/page/summary/{}".to_string(),
            search_url: "https://en.wikipedia.org/w/api.php?action=opensearch&search={}&limit=1&namespace=0&format=json"
                .to_string(),
            google_search_url: "https://www.google.com/search?q={}".to_string(),
            timeout_secs: 10,
        }
    }
}

impl InfoConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BackendConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: BackendConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the built-in defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_match_upstream_constants() {
        let config = BackendConfig::default();
        assert_eq!(config.server_address(), "0.0.0.0:5000");
        assert_eq!(config.tle.lookup_timeout(), Duration::from_secs(15));
        assert_eq!(config.tle.bulk_timeout(), Duration::from_secs(20));
        assert_eq!(config.info.timeout(), Duration::from_secs(10));
        assert!(config.info.google_search_url.contains("{}"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
port = 8080
log_level = "debug"

[info]
timeout_secs = 3
"#
        )
        .unwrap();

        let config = BackendConfig::from_file(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.info.timeout_secs, 3);
        assert_eq!(config.info.summary_url, InfoConfig::default().summary_url);
        assert_eq!(config.tle.lookup_timeout_secs, 15);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig::load_or_default(dir.path().join("config.toml")).unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        assert!(BackendConfig::load_or_default(file.path()).is_err());
    }
}
