//! 视图渲染
//!
//! 模板在进程内编译一次（见 [`TemplateRegistry::builtin`]），渲染是纯函数：
//! 同样的上下文永远得到同样的 markup。

mod context;
mod registry;
mod templates;

pub use context::{ConditionsFormContext, RowContext, SwitchFormContext, TableContext};
pub use registry::{Template, TemplateRegistry};
pub use templates::{
    if_toggled, is_toggled, SWITCH_CONDITIONS, SWITCH_DATA, SWITCH_FORM, SWITCH_TABLE,
};
