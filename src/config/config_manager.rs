// src/config/config_manager.rs

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bidding::telaria::TelariaAdapter;
use crate::errors::ConfigError;

/// 适配器配置文件的默认位置
pub const DEFAULT_CONFIG_PATH: &str = "static/adapters.json";

/// **适配器配置**
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AdapterConfig {
    pub telaria: TelariaConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TelariaConfig {
    /// Telaria 竞价接口地址（不含 query 参数）
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl AdapterConfig {
    /// 从 JSON 文件读取配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// 命令行传入的 endpoint 优先于配置文件
    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if endpoint.is_some() {
            self.telaria.endpoint = endpoint;
        }
        self
    }

    /// 构造 Telaria 适配器，endpoint 缺失或不合法时返回错误
    pub fn build_telaria(&self) -> Result<TelariaAdapter, ConfigError> {
        let endpoint = self
            .telaria
            .endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEndpoint)?;
        TelariaAdapter::new(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_endpoint_from_json() {
        let config =
            AdapterConfig::from_json(r#"{ "telaria": { "endpoint": "https://eb.telaria.test/ad/hb" } }"#)
                .unwrap();
        let adapter = config.build_telaria().unwrap();
        assert_eq!(adapter.endpoint().as_str(), "https://eb.telaria.test/ad/hb");
    }

    #[test]
    fn override_replaces_file_endpoint() {
        let config = AdapterConfig::from_json(r#"{ "telaria": { "endpoint": "https://a.test/" } }"#)
            .unwrap()
            .with_endpoint_override(Some("https://b.test/".to_string()));
        assert_eq!(config.telaria.endpoint.as_deref(), Some("https://b.test/"));

        let kept = config.with_endpoint_override(None);
        assert_eq!(kept.telaria.endpoint.as_deref(), Some("https://b.test/"));
    }

    #[test]
    fn missing_endpoint_is_a_config_error() {
        let config = AdapterConfig::from_json(r#"{ "telaria": {} }"#).unwrap();
        assert!(matches!(config.build_telaria(), Err(ConfigError::MissingEndpoint)));
    }

    #[test]
    fn malformed_endpoint_is_a_config_error() {
        let config = AdapterConfig::default().with_endpoint_override(Some("::nope".to_string()));
        assert!(matches!(
            config.build_telaria(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let err = AdapterConfig::from_file("static/does-not-exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn bundled_config_file_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let config = AdapterConfig::from_file(path).unwrap();
        assert!(config.build_telaria().is_ok());
    }
}
