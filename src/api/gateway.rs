use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::busy::BusyIndicator;
use super::endpoints::{Endpoint, EndpointTable};
use super::transport::{DynTransport, FormParams};
use crate::error::{ConsoleError, Result};
use crate::model::{Status, Switch};

/// 新增条件的请求参数
#[derive(Debug, Clone, PartialEq)]
pub struct NewCondition {
    pub key: String,
    /// 条件集 id
    pub id: String,
    pub field: String,
    /// 表单里的其余输入，按 name -> value
    pub values: FormParams,
}

/// 删除条件的请求参数
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedCondition {
    pub key: String,
    pub id: String,
    pub field: String,
    pub value: String,
}

/// 把逻辑操作翻译成对具名接口的请求，并解析 envelope
pub struct ApiGateway {
    transport: DynTransport,
    base_url: String,
    endpoints: EndpointTable,
    busy: Arc<BusyIndicator>,
}

impl ApiGateway {
    pub fn new(transport: DynTransport, base_url: impl Into<String>, endpoints: EndpointTable) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            endpoints,
            busy: Arc::new(BusyIndicator::new()),
        }
    }

    pub fn busy(&self) -> &Arc<BusyIndicator> {
        &self.busy
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        self.endpoints.url(&self.base_url, endpoint)
    }

    /// 发出一次调用，成功时返回 `data`
    ///
    /// 调用期间忙碌指示器保持可见；失败不重试。
    #[instrument(skip_all, fields(endpoint = endpoint.name()))]
    pub async fn call(&self, endpoint: Endpoint, params: FormParams) -> Result<Value> {
        let url = self.url(endpoint);
        let _busy = self.busy.begin();
        debug!(url = %url, params = params.len(), "calling switchboard endpoint");

        let envelope = self.transport.post_form(&url, &params).await?;
        envelope.into_result().map_err(|err| {
            warn!(error = %err, "endpoint rejected request");
            err
        })
    }

    pub async fn add_switch(&self, label: &str, key: &str, description: &str) -> Result<Switch> {
        let params = form(&[
            ("curkey", ""),
            ("label", label),
            ("key", key),
            ("description", description),
        ]);
        self.call_decoded(Endpoint::AddSwitch, params).await
    }

    /// `curkey` 为原 key，`key` 可以不同（重命名）
    pub async fn update_switch(
        &self,
        curkey: &str,
        label: &str,
        key: &str,
        description: &str,
    ) -> Result<Switch> {
        let params = form(&[
            ("curkey", curkey),
            ("label", label),
            ("key", key),
            ("description", description),
        ]);
        self.call_decoded(Endpoint::UpdateSwitch, params).await
    }

    pub async fn delete_switch(&self, key: &str) -> Result<()> {
        self.call(Endpoint::DeleteSwitch, form(&[("key", key)]))
            .await
            .map(|_| ())
    }

    pub async fn update_status(&self, key: &str, status: Status) -> Result<Switch> {
        let status = status.value().to_string();
        let params = form(&[("key", key), ("status", status.as_str())]);
        self.call_decoded(Endpoint::UpdateStatus, params).await
    }

    pub async fn add_condition(&self, condition: &NewCondition) -> Result<Switch> {
        let mut params = form(&[
            ("key", condition.key.as_str()),
            ("id", condition.id.as_str()),
            ("field", condition.field.as_str()),
        ]);
        for (name, value) in &condition.values {
            set_param(&mut params, name, value);
        }
        self.call_decoded(Endpoint::AddCondition, params).await
    }

    pub async fn del_condition(&self, condition: &RemovedCondition) -> Result<Switch> {
        let params = form(&[
            ("key", condition.key.as_str()),
            ("id", condition.id.as_str()),
            ("field", condition.field.as_str()),
            ("value", condition.value.as_str()),
        ]);
        self.call_decoded(Endpoint::DelCondition, params).await
    }

    /// 开关的历史版本，内容由服务端决定
    pub async fn history(&self, key: &str) -> Result<Vec<Value>> {
        self.call_decoded(Endpoint::History, form(&[("key", key)]))
            .await
    }

    async fn call_decoded<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: FormParams,
    ) -> Result<T> {
        let data = self.call(endpoint, params).await?;
        serde_json::from_value(data).map_err(|e| {
            ConsoleError::Transport(format!(
                "unexpected payload from {}: {}",
                endpoint.name(),
                e
            ))
        })
    }
}

fn form(pairs: &[(&str, &str)]) -> FormParams {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// 同名参数后写覆盖先写
fn set_param(params: &mut FormParams, name: &str, value: &str) {
    match params.iter_mut().find(|(existing, _)| existing.as_str() == name) {
        Some(slot) => slot.1 = value.to_string(),
        None => params.push((name.to_string(), value.to_string())),
    }
}
