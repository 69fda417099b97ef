use serde::{Deserialize, Serialize};

/// 管理接口的逻辑操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AddSwitch,
    UpdateSwitch,
    DeleteSwitch,
    UpdateStatus,
    AddCondition,
    DelCondition,
    History,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::AddSwitch => "addSwitch",
            Endpoint::UpdateSwitch => "updateSwitch",
            Endpoint::DeleteSwitch => "deleteSwitch",
            Endpoint::UpdateStatus => "updateStatus",
            Endpoint::AddCondition => "addCondition",
            Endpoint::DelCondition => "delCondition",
            Endpoint::History => "history",
        }
    }
}

/// 各操作对应的路径，未写协议头的路径会拼接到 base url 上
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointTable {
    pub add_switch: String,
    pub update_switch: String,
    pub delete_switch: String,
    pub update_status: String,
    pub add_condition: String,
    pub del_condition: String,
    pub history: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            add_switch: "add".to_string(),
            update_switch: "update".to_string(),
            delete_switch: "delete".to_string(),
            update_status: "status".to_string(),
            add_condition: "add_condition".to_string(),
            del_condition: "remove_condition".to_string(),
            history: "history".to_string(),
        }
    }
}

impl EndpointTable {
    pub fn path(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::AddSwitch => &self.add_switch,
            Endpoint::UpdateSwitch => &self.update_switch,
            Endpoint::DeleteSwitch => &self.delete_switch,
            Endpoint::UpdateStatus => &self.update_status,
            Endpoint::AddCondition => &self.add_condition,
            Endpoint::DelCondition => &self.del_condition,
            Endpoint::History => &self.history,
        }
    }

    pub(crate) fn paths_mut(&mut self) -> [&mut String; 7] {
        [
            &mut self.add_switch,
            &mut self.update_switch,
            &mut self.delete_switch,
            &mut self.update_status,
            &mut self.add_condition,
            &mut self.del_condition,
            &mut self.history,
        ]
    }

    /// 生成完整 URL
    pub fn url(&self, base_url: &str, endpoint: Endpoint) -> String {
        join_url(base_url, self.path(endpoint))
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") || base_url.is_empty() {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
