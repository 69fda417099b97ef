use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::env::{EnvConfig, ENV_CONFIG, ENV_TIMEOUT_SECS, ENV_URL};
use crate::api::{ApiGateway, DynTransport, EndpointTable};
use crate::error::{ConsoleError, Result};
use crate::utils::ConfigValidator;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/_switchboard";

/// 控制台连接配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// 管理接口的根地址，支持 `${VAR}` 占位符
    pub base_url: String,
    pub endpoints: EndpointTable,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: EndpointTable::default(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ConsoleError::Config(format!("invalid console config: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConsoleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// 加载顺序：`SWITCHBOARD_CONFIG` 指向的文件（没有则用默认值），
    /// 然后 `SWITCHBOARD_URL`、`SWITCHBOARD_TIMEOUT_SECS` 覆盖对应字段
    pub fn from_env() -> Result<Self> {
        let config = match EnvConfig::get_env_optional(ENV_CONFIG) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(url) = EnvConfig::get_env_optional(ENV_URL) {
            self.base_url = url;
        }
        if let Some(timeout) = EnvConfig::get_env_optional(ENV_TIMEOUT_SECS) {
            self.timeout_secs = timeout.parse().map_err(|_| {
                ConsoleError::Config(format!("{} must be an integer, got `{}`", ENV_TIMEOUT_SECS, timeout))
            })?;
        }
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 展开 base url 与各接口路径中的占位符并校验
    pub fn resolved(mut self) -> Result<Self> {
        self.base_url = EnvConfig::resolve(&self.base_url)?;
        for path in self.endpoints.paths_mut() {
            *path = EnvConfig::resolve(path)?;
        }
        ConfigValidator::validate_base_url(&self.base_url)?;
        ConfigValidator::validate_timeout(self.timeout_secs)?;
        ConfigValidator::validate_timeout(self.connect_timeout_secs)?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn gateway(&self, transport: DynTransport) -> ApiGateway {
        ApiGateway::new(transport, self.base_url.clone(), self.endpoints.clone())
    }

    #[cfg(feature = "http-client")]
    pub fn http_gateway(&self) -> Result<ApiGateway> {
        let transport = crate::api::HttpTransport::new(self.timeout(), self.connect_timeout())?;
        Ok(self.gateway(std::sync::Arc::new(transport)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_fields() {
        let config = ConsoleConfig::from_json(r#"{"base_url": "https://admin.example.com/sb"}"#)
            .unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.endpoints, EndpointTable::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "http://127.0.0.1:9000", "endpoints": {{"updateStatus": "toggle"}}}}"#
        )
        .unwrap();
        let config = ConsoleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoints.update_status, "toggle");
        assert_eq!(config.endpoints.add_switch, "add");
    }

    #[test]
    fn resolved_rejects_bad_url() {
        let config = ConsoleConfig::default().with_base_url("ftp://nowhere");
        assert!(matches!(config.resolved(), Err(ConsoleError::Config(_))));
    }

    #[test]
    fn resolved_expands_endpoint_placeholders() {
        std::env::set_var("TEST_SWITCHBOARD_AUDIT_HOST", "https://audit.internal");
        let config = ConsoleConfig::from_json(
            r#"{"base_url": "http://localhost:8080/sb", "endpoints": {"history": "${TEST_SWITCHBOARD_AUDIT_HOST}/history"}}"#,
        )
        .unwrap()
        .resolved()
        .unwrap();
        assert_eq!(config.endpoints.history, "https://audit.internal/history");
        assert_eq!(config.endpoints.add_switch, "add");
        std::env::remove_var("TEST_SWITCHBOARD_AUDIT_HOST");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = ConsoleConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }
}
