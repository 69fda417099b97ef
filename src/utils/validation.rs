use crate::error::{ConsoleError, Result};

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证管理接口根地址
    pub fn validate_base_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(ConsoleError::Config("base url must not be empty".to_string()));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConsoleError::Config(format!(
                "base url must start with http:// or https://, got `{}`",
                url
            )));
        }

        if url.contains(char::is_whitespace) {
            return Err(ConsoleError::Config(format!(
                "base url contains whitespace: `{}`",
                url
            )));
        }

        Ok(())
    }

    /// 验证超时（秒）
    pub fn validate_timeout(secs: u64) -> Result<()> {
        if secs == 0 {
            return Err(ConsoleError::Config(
                "timeouts must be at least one second".to_string(),
            ));
        }
        if secs > 600 {
            tracing::warn!(secs, "timeout is unusually long, requests cannot be cancelled");
        }
        Ok(())
    }
}
