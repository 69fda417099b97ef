use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConsoleError;

/// 同一个条件集下的条件列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    /// 条件集 id
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub conditions: Vec<ConditionEntry>,
}

/// 单条条件，线上格式为 `[field, value, display, exclude]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct ConditionEntry {
    pub field: String,
    pub value: Value,
    pub display: String,
    pub exclude: bool,
}

impl ConditionEntry {
    /// 删除条件时回传给服务端的 `value` 参数
    pub fn value_param(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl TryFrom<Vec<Value>> for ConditionEntry {
    type Error = String;

    fn try_from(parts: Vec<Value>) -> Result<Self, Self::Error> {
        if parts.len() < 3 {
            return Err(format!(
                "condition entry needs at least 3 elements, got {}",
                parts.len()
            ));
        }
        let mut parts = parts.into_iter();
        let field = match parts.next() {
            Some(Value::String(field)) => field,
            other => return Err(format!("condition field must be a string, got {:?}", other)),
        };
        let value = parts.next().unwrap_or(Value::Null);
        let display = match parts.next() {
            Some(Value::String(display)) => display,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let exclude = parts.next().map(|flag| is_truthy(&flag)).unwrap_or(false);
        Ok(Self {
            field,
            value,
            display,
            exclude,
        })
    }
}

impl From<ConditionEntry> for Vec<Value> {
    fn from(entry: ConditionEntry) -> Self {
        vec![
            Value::String(entry.field),
            entry.value,
            Value::String(entry.display),
            Value::Bool(entry.exclude),
        ]
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "e"),
        _ => false,
    }
}

/// 条件字段路径：`<条件集 id>.<字段名>`
///
/// 条件集 id 本身可能包含 `.`，所以按最后一个 `.` 切分；
/// 下拉框的取值使用 `<条件集 id>,<字段名>` 格式，同样可以解析。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    pub set_id: String,
    pub field: String,
}

impl FieldPath {
    pub fn new(set_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            set_id: set_id.into(),
            field: field.into(),
        }
    }

    /// 字段输入组上的 `data-path`
    pub fn data_path(&self) -> String {
        format!("{}.{}", self.set_id, self.field)
    }

    /// 下拉框 option 的取值
    pub fn selector_value(&self) -> String {
        format!("{},{}", self.set_id, self.field)
    }
}

impl FromStr for FieldPath {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split = s.split_once(',').or_else(|| s.rsplit_once('.'));
        match split {
            Some((set_id, field)) if !set_id.is_empty() && !field.is_empty() => {
                Ok(FieldPath::new(set_id, field))
            }
            _ => Err(ConsoleError::InvalidFieldPath(s.to_string())),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data_path())
    }
}

/// 条件字段的输入类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Boolean,
    Choice {
        #[serde(default)]
        choices: Vec<String>,
    },
    Range,
    Percent,
    String,
    Regex,
    BeforeDate,
    OnOrAfterDate,
}

/// 服务端已知的一个条件字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionField {
    pub set_id: String,
    /// 条件集的分组名称，例如 `Request`
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl ConditionField {
    pub fn path(&self) -> FieldPath {
        FieldPath::new(self.set_id.clone(), self.name.clone())
    }

    pub fn display_label(&self) -> String {
        self.label.clone().unwrap_or_else(|| titlize(&self.name))
    }
}

/// `query_string` -> `Query String`
fn titlize(name: &str) -> String {
    name.split(|c: char| c == '_' || c == ' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
