use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;

/// 开关的全局状态
///
/// 数值与服务端约定一致：
/// - 4: 继承父级
/// - 3: 对所有人开启
/// - 2: 按条件开启
/// - 1: 对所有人关闭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Status {
    Inherit,
    ActiveForEveryone,
    ActiveForConditions,
    Disabled,
}

impl Status {
    /// 状态按钮的排列顺序
    pub const ALL: [Status; 4] = [
        Status::Inherit,
        Status::ActiveForEveryone,
        Status::ActiveForConditions,
        Status::Disabled,
    ];

    pub fn value(self) -> u8 {
        match self {
            Status::Inherit => 4,
            Status::ActiveForEveryone => 3,
            Status::ActiveForConditions => 2,
            Status::Disabled => 1,
        }
    }

    pub fn from_value(value: i64) -> Result<Self, ConsoleError> {
        match value {
            4 => Ok(Status::Inherit),
            3 => Ok(Status::ActiveForEveryone),
            2 => Ok(Status::ActiveForConditions),
            1 => Ok(Status::Disabled),
            other => Err(ConsoleError::InvalidStatus(other)),
        }
    }

    /// 状态描述文字
    pub fn label(self) -> &'static str {
        match self {
            Status::Inherit => "Inherit from parent",
            Status::ActiveForEveryone => "Active for everyone",
            Status::ActiveForConditions => "Active for conditions",
            Status::Disabled => "Disabled for everyone",
        }
    }

    /// 行内状态标签，带括号
    pub fn bracketed_label(self) -> String {
        format!("({})", self.label())
    }

    /// 状态按钮上的简短名称
    pub fn button_text(self) -> &'static str {
        match self {
            Status::Inherit => "Inherit",
            Status::ActiveForEveryone => "Global",
            Status::ActiveForConditions => "Selective",
            Status::Disabled => "Disabled",
        }
    }

    /// 没有任何条件时，“按条件开启”展示为“对所有人开启”。
    ///
    /// 仅影响展示，不会写回服务端。
    pub fn displayed(self, has_conditions: bool) -> Status {
        if self == Status::ActiveForConditions && !has_conditions {
            Status::ActiveForEveryone
        } else {
            self
        }
    }

    /// 全局开启影响面最大，需要二次确认
    pub fn requires_confirmation(self) -> bool {
        self == Status::ActiveForEveryone
    }
}

impl TryFrom<i64> for Status {
    type Error = ConsoleError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Status::from_value(value)
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> Self {
        i64::from(status.value())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Status {
    type Err = ConsoleError;

    /// 接受数值（`1`-`4`）或名称（`inherit`、`global`、`selective`、`disabled`）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Status::from_value(value);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "inherit" => Ok(Status::Inherit),
            "global" | "everyone" | "on" => Ok(Status::ActiveForEveryone),
            "selective" | "conditions" => Ok(Status::ActiveForConditions),
            "disabled" | "off" => Ok(Status::Disabled),
            _ => Err(ConsoleError::InvalidStatus(-1)),
        }
    }
}
