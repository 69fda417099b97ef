use serde::{Deserialize, Serialize};

use crate::model::{ConditionField, Notice, Switch};

/// `switchForm` 的上下文
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchFormContext {
    pub add: bool,
    #[serde(default)]
    pub curkey: String,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl SwitchFormContext {
    pub fn for_add() -> Self {
        Self {
            add: true,
            ..Default::default()
        }
    }

    /// 编辑表单，用当前行的属性预填，并保留原 key 作为 `curkey`
    pub fn for_edit(switch: &Switch) -> Self {
        Self {
            add: false,
            curkey: switch.key.clone(),
            key: switch.key.clone(),
            label: switch.label.clone(),
            description: switch.description().to_string(),
        }
    }
}

/// `switchConditions` 的上下文
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionsFormContext {
    #[serde(default)]
    pub fields: Vec<ConditionField>,
    /// 当前选中字段的 `data-path`，只有这一组输入可见
    #[serde(default)]
    pub selected: Option<String>,
}

/// `switchData` 的上下文：开关本身加上行级的界面状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowContext {
    #[serde(flatten)]
    pub switch: Switch,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub editor: Option<ConditionsFormContext>,
}

impl From<Switch> for RowContext {
    fn from(switch: Switch) -> Self {
        Self {
            switch,
            hidden: false,
            editor: None,
        }
    }
}

/// `switchTable` 的上下文：整个控制台
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableContext {
    #[serde(default)]
    pub rows: Vec<RowContext>,
    #[serde(default)]
    pub messages: Vec<Notice>,
    #[serde(default)]
    pub drawer: Option<SwitchFormContext>,
    #[serde(default)]
    pub busy: bool,
    #[serde(default)]
    pub query: String,
}
