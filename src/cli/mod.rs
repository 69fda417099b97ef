use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::console::{Command, Console, FormInput, Outcome, Prompter, SwitchFields};
use crate::error::{ConsoleError, Result};
use crate::model::{ConsoleSnapshot, Switch};

/// 终端确认框：从标准输入读取 y/N
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }

    fn alert(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub fn load_snapshot(path: &Path) -> Result<ConsoleSnapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ConsoleError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;
    ConsoleSnapshot::from_json(&content)
}

/// 解析 `name=value` 形式的条件输入
pub fn parse_input(raw: &str) -> Result<FormInput> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok(FormInput::text(name, value)),
        _ => Err(ConsoleError::Config(format!(
            "condition input must look like name=value, got `{}`",
            raw
        ))),
    }
}

/// 命令行里直接操作某个 key 时，控制台需要先有这一行
pub fn ensure_row(console: Console, key: &str) -> Console {
    if console.switch(key).is_some() {
        return console;
    }
    let mut switches: Vec<Switch> = console
        .keys()
        .iter()
        .filter_map(|existing| console.switch(existing))
        .collect();
    switches.push(Switch::new(key, crate::model::Status::Disabled));
    console.with_switches(switches)
}

/// `update` 子命令里显式给出的字段，未给出的沿用当前行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchEdits {
    pub key: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
}

/// 通过控制台编辑开关
///
/// 服务端会整体覆盖 label 和 description。`curkey` 不在已加载的快照里时，
/// 本地没有可预填的真实值，因此两者都必须显式给出。
pub async fn update_switch(
    console: Console,
    curkey: &str,
    edits: SwitchEdits,
) -> Result<(Console, Outcome)> {
    if console.switch(curkey).is_none() && (edits.label.is_none() || edits.description.is_none()) {
        return Err(ConsoleError::Config(format!(
            "`{}` is not in the loaded snapshot, pass both --label and --description \
             (or --snapshot) to avoid overwriting them",
            curkey
        )));
    }
    let console = ensure_row(console, curkey);
    console
        .dispatch(Command::OpenEdit {
            key: curkey.to_string(),
        })
        .await?;
    let current = console.drawer().form().unwrap_or_default();
    let fields = SwitchFields::new(
        edits.label.unwrap_or(current.label),
        edits.key.unwrap_or(current.key),
        edits.description.unwrap_or(current.description),
    );
    let outcome = console.dispatch(Command::SubmitDrawer(fields)).await?;
    Ok((console, outcome))
}

pub fn render_switch_table(switches: &[Switch]) -> String {
    let mut out = format!(
        "{:<32} {:<32} {:<26} {}\n",
        "Key", "Label", "Status", "Conditions"
    );
    for switch in switches {
        out.push_str(&format!(
            "{:<32} {:<32} {:<26} {}\n",
            switch.key,
            switch.display_label(),
            switch.status_text(),
            switch.condition_count()
        ));
    }
    out
}
