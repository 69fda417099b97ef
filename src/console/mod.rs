// 控制台：状态、意图分发与搜索

mod command;
mod controller;
mod drawer;
mod prompt;
pub mod search;
mod table;

pub use command::{collect_inputs, Command, FormInput, Outcome, SwitchFields};
pub use controller::Console;
pub use drawer::Drawer;
pub use prompt::{AutoConfirm, Prompter, CONFIRM_DELETE, CONFIRM_ENABLE_GLOBALLY};
pub use search::{QuicksilverScorer, Scorer};
pub use table::{ConditionEditor, SwitchRow, SwitchTable};
