use crate::model::Switch;
use crate::view::SwitchFormContext;

/// 共享的侧滑面板，新增和编辑共用
///
/// 同一时间只有一个表单；重新打开会直接丢弃之前未保存的内容。
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Drawer {
    #[default]
    Hidden,
    OpenForAdd,
    OpenForEdit {
        /// 打开时的原 key
        curkey: String,
        form: SwitchFormContext,
    },
}

impl Drawer {
    pub fn open_for_add(&mut self) {
        *self = Drawer::OpenForAdd;
    }

    pub fn open_for_edit(&mut self, switch: &Switch) {
        *self = Drawer::OpenForEdit {
            curkey: switch.key.clone(),
            form: SwitchFormContext::for_edit(switch),
        };
    }

    pub fn hide(&mut self) {
        *self = Drawer::Hidden;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Drawer::Hidden)
    }

    /// 渲染 `switchForm` 用的上下文，隐藏时为 `None`
    pub fn form(&self) -> Option<SwitchFormContext> {
        match self {
            Drawer::Hidden => None,
            Drawer::OpenForAdd => Some(SwitchFormContext::for_add()),
            Drawer::OpenForEdit { form, .. } => Some(form.clone()),
        }
    }
}
