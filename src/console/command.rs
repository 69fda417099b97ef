use crate::api::FormParams;
use crate::model::{FieldPath, Status};

/// 抽屉表单提交的字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchFields {
    pub label: String,
    pub key: String,
    pub description: String,
}

impl SwitchFields {
    pub fn new(
        label: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            description: description.into(),
        }
    }
}

/// 条件表单里的一个输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    Text { name: String, value: String },
    Checkbox { name: String, checked: bool },
}

impl FormInput {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormInput::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        FormInput::Checkbox {
            name: name.into(),
            checked,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormInput::Text { name, .. } | FormInput::Checkbox { name, .. } => name,
        }
    }

    /// 复选框序列化为 `'1'`/`'0'`，其余取原值
    pub fn form_value(&self) -> String {
        match self {
            FormInput::Text { value, .. } => value.clone(),
            FormInput::Checkbox { checked, .. } => (if *checked { "1" } else { "0" }).to_string(),
        }
    }
}

/// 按输入名收集表单值，同名输入后者覆盖前者
pub fn collect_inputs(inputs: &[FormInput]) -> FormParams {
    let mut params: FormParams = Vec::with_capacity(inputs.len());
    for input in inputs {
        let value = input.form_value();
        match params.iter_mut().find(|(name, _)| name.as_str() == input.name()) {
            Some(slot) => slot.1 = value,
            None => params.push((input.name().to_string(), value)),
        }
    }
    params
}

/// 用户意图，控制台按它分发
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 打开空白的新增表单
    OpenAdd,
    /// 用该行当前属性打开编辑表单
    OpenEdit { key: String },
    /// 提交抽屉表单，新增或编辑取决于抽屉当前状态
    SubmitDrawer(SwitchFields),
    /// 关闭抽屉，丢弃未保存内容
    Cancel,
    DeleteSwitch { key: String },
    ChangeStatus { key: String, status: Status },
    /// 纯本地：显示/隐藏行内条件编辑器
    ToggleConditionEditor { key: String },
    /// 纯本地：切换条件字段，只显示对应的输入组
    SelectConditionField { key: String, field: FieldPath },
    SubmitCondition {
        key: String,
        field: FieldPath,
        inputs: Vec<FormInput>,
    },
    DeleteCondition {
        key: String,
        id: String,
        field: String,
        value: String,
    },
    Search { query: String },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::OpenAdd => "open_add",
            Command::OpenEdit { .. } => "open_edit",
            Command::SubmitDrawer(_) => "submit_drawer",
            Command::Cancel => "cancel",
            Command::DeleteSwitch { .. } => "delete_switch",
            Command::ChangeStatus { .. } => "change_status",
            Command::ToggleConditionEditor { .. } => "toggle_condition_editor",
            Command::SelectConditionField { .. } => "select_condition_field",
            Command::SubmitCondition { .. } => "submit_condition",
            Command::DeleteCondition { .. } => "delete_condition",
            Command::Search { .. } => "search",
        }
    }
}

/// 一次分发的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DrawerOpened,
    DrawerClosed,
    Added { key: String },
    Updated { key: String },
    Removed { key: String },
    /// 用户在确认框中取消，请求没有发出
    Declined,
    /// 服务端响应与本地状态不匹配，未做修改
    Unchanged,
    EditorToggled { key: String, open: bool },
    FieldSelected { key: String, field: FieldPath },
    Filtered { visible: usize },
}
