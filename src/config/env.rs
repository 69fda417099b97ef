use crate::error::{ConsoleError, Result};
use std::env;

pub const ENV_URL: &str = "SWITCHBOARD_URL";
pub const ENV_CONFIG: &str = "SWITCHBOARD_CONFIG";
pub const ENV_TIMEOUT_SECS: &str = "SWITCHBOARD_TIMEOUT_SECS";
pub const ENV_DEBUG: &str = "SWITCHBOARD_DEBUG";

/// 环境变量配置管理
pub struct EnvConfig;

impl EnvConfig {
    /// 展开字符串中所有 `${VAR_NAME}` 占位符，其余内容原样保留
    ///
    /// 没有闭合 `}` 的 `${` 和空的 `${}` 不做处理。
    pub fn resolve(value: &str) -> Result<String> {
        let mut resolved = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find("${") {
            let Some(len) = rest[start + 2..].find('}') else {
                break;
            };
            let name = &rest[start + 2..start + 2 + len];
            resolved.push_str(&rest[..start]);
            if name.is_empty() {
                resolved.push_str("${}");
            } else {
                resolved.push_str(&Self::get_env(name)?);
            }
            rest = &rest[start + 3 + len..];
        }
        resolved.push_str(rest);
        Ok(resolved)
    }

    /// 从环境变量获取值
    pub fn get_env(key: &str) -> Result<String> {
        env::var(key).map_err(|_| {
            ConsoleError::Config(format!(
                "environment variable '{}' is not set",
                key
            ))
        })
    }

    /// 获取可选的环境变量，空字符串视为未设置
    pub fn get_env_optional(key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }

    /// 检查是否启用调试模式
    pub fn is_debug_mode() -> bool {
        env::var(ENV_DEBUG).is_ok()
    }
}
