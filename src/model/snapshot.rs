use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::condition::ConditionField;
use super::switch::Switch;
use crate::error::ConsoleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Label,
    DateCreated,
    DateModified,
}

impl SortField {
    fn as_str(self) -> &'static str {
        match self {
            SortField::Label => "label",
            SortField::DateCreated => "date_created",
            SortField::DateModified => "date_modified",
        }
    }
}

/// 列表排序方式，`-` 前缀表示倒序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortOrder {
    pub field: SortField,
    pub descending: bool,
}

impl SortOrder {
    pub fn sort(&self, switches: &mut [Switch]) {
        switches.sort_by(|a, b| {
            let ordering = self.compare(a, b);
            if self.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    fn compare(&self, a: &Switch, b: &Switch) -> Ordering {
        match self.field {
            SortField::Label => a.display_label().cmp(b.display_label()),
            SortField::DateCreated => a.date_created.cmp(&b.date_created),
            SortField::DateModified => a.date_modified.cmp(&b.date_modified),
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            field: SortField::DateModified,
            descending: true,
        }
    }
}

impl FromStr for SortOrder {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let descending = s.starts_with('-');
        let field = match s.trim_start_matches('-') {
            "label" => SortField::Label,
            "date_created" => SortField::DateCreated,
            "date_modified" => SortField::DateModified,
            _ => return Err(ConsoleError::InvalidSortOrder(s.to_string())),
        };
        Ok(Self { field, descending })
    }
}

impl TryFrom<String> for SortOrder {
    type Error = ConsoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortOrder> for String {
    fn from(order: SortOrder) -> Self {
        order.to_string()
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            f.write_str("-")?;
        }
        f.write_str(self.field.as_str())
    }
}

/// 表格上方的提示横幅
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub status: String,
    pub message: String,
}

/// 控制台初始数据，对应管理页面加载时服务端给出的内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleSnapshot {
    #[serde(default)]
    pub switches: Vec<Switch>,
    #[serde(default)]
    pub all_conditions: Vec<ConditionField>,
    #[serde(default)]
    pub sorted_by: SortOrder,
    #[serde(default)]
    pub messages: Vec<Notice>,
}

impl ConsoleSnapshot {
    pub fn from_json(content: &str) -> Result<Self, ConsoleError> {
        serde_json::from_str(content)
            .map_err(|e| ConsoleError::Config(format!("invalid console snapshot: {}", e)))
    }

    /// 按 `sorted_by` 排好序的开关列表
    pub fn ordered_switches(&self) -> Vec<Switch> {
        let mut switches = self.switches.clone();
        self.sorted_by.sort(&mut switches);
        switches
    }
}
