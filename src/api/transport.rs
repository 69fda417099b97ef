use std::sync::Arc;

use async_trait::async_trait;

use super::envelope::Envelope;
use crate::error::Result;

/// 表单参数，保持插入顺序
pub type FormParams = Vec<(String, String)>;

/// 发送表单编码的 POST 请求并解析 JSON envelope
///
/// 请求无法完成或响应体无法解析时返回 [`ConsoleError::Transport`](crate::ConsoleError::Transport)。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(&self, url: &str, params: &FormParams) -> Result<Envelope>;
}

pub type DynTransport = Arc<dyn Transport>;

#[cfg(feature = "http-client")]
pub use http::HttpTransport;

#[cfg(feature = "http-client")]
mod http {
    use std::time::Duration;

    use async_trait::async_trait;
    use tracing::debug;

    use super::{FormParams, Transport};
    use crate::api::envelope::Envelope;
    use crate::error::{ConsoleError, Result};

    /// 基于 reqwest 的传输层
    #[derive(Clone)]
    pub struct HttpTransport {
        client: reqwest::Client,
    }

    impl HttpTransport {
        /// 创建 HTTP 客户端
        ///
        /// - 连接池复用连接
        /// - 超时只交给底层传输，不做额外的取消
        pub fn new(timeout: Duration, connect_timeout: Duration) -> Result<Self> {
            let client = reqwest::Client::builder()
                .pool_max_idle_per_host(4)
                .pool_idle_timeout(Duration::from_secs(90))
                .connect_timeout(connect_timeout)
                .timeout(timeout)
                .build()
                .map_err(|e| ConsoleError::Config(format!("failed to build HTTP client: {}", e)))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl Transport for HttpTransport {
        async fn post_form(&self, url: &str, params: &FormParams) -> Result<Envelope> {
            let response = self
                .client
                .post(url)
                .header("Accept", "application/json")
                .form(params)
                .send()
                .await
                .map_err(|e| ConsoleError::Transport(format!("request to {} failed: {}", url, e)))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| ConsoleError::Transport(format!("failed to read response: {}", e)))?;
            debug!(url, status = status.as_u16(), bytes = body.len(), "response received");

            if !status.is_success() {
                return Err(ConsoleError::Transport(format!(
                    "{} responded with HTTP {}",
                    url, status
                )));
            }
            Envelope::from_body(&body)
        }
    }
}
