// 开关数据模型

mod condition;
mod snapshot;
mod status;
mod switch;

pub use condition::{ConditionEntry, ConditionField, ConditionGroup, FieldKind, FieldPath};
pub use snapshot::{ConsoleSnapshot, Notice, SortField, SortOrder};
pub use status::Status;
pub use switch::Switch;
