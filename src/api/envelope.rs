use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConsoleError, Result};

/// 所有管理接口统一的响应外壳 `{"success": bool, "data": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::String(message.into()),
        }
    }

    /// 从响应体解析，解析失败视为传输错误
    pub fn from_body(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| ConsoleError::Transport(format!("malformed response envelope: {}", e)))
    }

    /// 失败时 `data` 即为服务端给出的错误信息
    pub fn into_result(self) -> Result<Value> {
        if self.success {
            return Ok(self.data);
        }
        let message = match self.data {
            Value::String(message) => message,
            Value::Null => "Unknown error".to_string(),
            other => other.to_string(),
        };
        Err(ConsoleError::Application(message))
    }
}
