use serde::{Deserialize, Deserializer, Serialize};

use super::condition::ConditionGroup;
use super::status::Status;

/// 服务端返回的开关完整表示
///
/// 每次变更调用都会返回最新的开关，客户端用它整体覆盖本地记录。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Switch {
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conditions: Vec<ConditionGroup>,
}

impl Switch {
    pub fn new(key: impl Into<String>, status: Status) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            description: None,
            status,
            status_label: None,
            date_created: None,
            date_modified: None,
            conditions: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<ConditionGroup>) -> Self {
        self.conditions = conditions;
        self
    }

    /// 展示用名称，服务端没给 label 时退回 key
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn has_conditions(&self) -> bool {
        self.conditions
            .iter()
            .any(|group| !group.conditions.is_empty())
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.iter().map(|group| group.conditions.len()).sum()
    }

    /// 展示状态（见 [`Status::displayed`]）
    pub fn displayed_status(&self) -> Status {
        self.status.displayed(self.has_conditions())
    }

    /// 行内状态标签，例如 `(Active for everyone)`
    pub fn status_text(&self) -> String {
        self.displayed_status().bracketed_label()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_server_payload() {
        let switch: Switch = serde_json::from_value(json!({
            "key": "new_checkout",
            "status": 2,
            "status_label": "Active for conditions",
            "label": "New checkout",
            "description": null,
            "date_created": "2024-01-02T03:04:05",
            "date_modified": "2024-01-03T03:04:05",
            "conditions": [{
                "id": "request",
                "label": "Request",
                "conditions": [["ip_address", "10.0.0.1", "IP Address: 10.0.0.1", false]]
            }]
        }))
        .unwrap();
        assert_eq!(switch.status, Status::ActiveForConditions);
        assert!(switch.has_conditions());
        assert_eq!(switch.condition_count(), 1);
        assert_eq!(switch.status_text(), "(Active for conditions)");
        assert_eq!(switch.description(), "");
    }

    #[test]
    fn empty_groups_do_not_count_as_conditions() {
        let switch = Switch::new("beta", Status::ActiveForConditions).with_conditions(vec![
            ConditionGroup {
                id: "request".into(),
                label: "Request".into(),
                conditions: Vec::new(),
            },
        ]);
        assert!(!switch.has_conditions());
        assert_eq!(switch.displayed_status(), Status::ActiveForEveryone);
        assert_eq!(switch.status, Status::ActiveForConditions);
    }

    #[test]
    fn null_label_falls_back_to_key() {
        let switch: Switch =
            serde_json::from_value(json!({"key": "beta", "status": 1, "label": null})).unwrap();
        assert_eq!(switch.display_label(), "beta");
        assert!(switch.conditions.is_empty());
    }
}
