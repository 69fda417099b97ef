use crate::model::{FieldPath, Switch};

/// 行内条件编辑器的界面状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionEditor {
    /// 当前选中的字段；只有对应的输入组可见
    pub selected: Option<FieldPath>,
}

/// 表格中的一行：服务端返回的开关加上纯本地的界面状态
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchRow {
    pub switch: Switch,
    pub hidden: bool,
    pub editor: Option<ConditionEditor>,
}

impl SwitchRow {
    fn new(switch: Switch) -> Self {
        Self {
            switch,
            hidden: false,
            editor: None,
        }
    }
}

/// 按 key 索引、保持显示顺序的开关表
///
/// 这是客户端唯一的状态缓存，内容总是来自服务端的最新响应。
#[derive(Debug, Clone, Default)]
pub struct SwitchTable {
    rows: Vec<SwitchRow>,
}

impl SwitchTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn from_switches(switches: impl IntoIterator<Item = Switch>) -> Self {
        let mut table = Self::new();
        for switch in switches {
            table.append(switch);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SwitchRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [SwitchRow] {
        &mut self.rows
    }

    pub fn keys(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.switch.key.clone()).collect()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.switch.key == key)
    }

    pub fn get(&self, key: &str) -> Option<&SwitchRow> {
        self.rows.iter().find(|row| row.switch.key == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut SwitchRow> {
        self.rows.iter_mut().find(|row| row.switch.key == key)
    }

    /// 追加为最后一行；key 已存在时原地覆盖
    pub fn append(&mut self, switch: Switch) {
        match self.position(&switch.key) {
            Some(index) => self.rows[index] = SwitchRow::new(switch),
            None => self.rows.push(SwitchRow::new(switch)),
        }
    }

    /// 用新渲染的行整体替换 `curkey` 对应的行，行内界面状态随之重置。
    ///
    /// 重命名后若表中已有另一行使用新 key，该行被移除以保持 key 唯一。
    /// `curkey` 不存在时不做任何修改并返回 `false`。
    pub fn replace(&mut self, curkey: &str, switch: Switch) -> bool {
        let Some(index) = self.position(curkey) else {
            return false;
        };
        let index = if switch.key != curkey {
            match self.position(&switch.key) {
                Some(duplicate) => {
                    self.rows.remove(duplicate);
                    if duplicate < index {
                        index - 1
                    } else {
                        index
                    }
                }
                None => index,
            }
        } else {
            index
        };
        self.rows[index] = SwitchRow::new(switch);
        true
    }

    /// 只更新记录，保留行内界面状态（编辑器、过滤标记）
    pub fn update_record(&mut self, switch: Switch) -> bool {
        match self.get_mut(&switch.key) {
            Some(row) => {
                row.switch = switch;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Switch> {
        self.position(key).map(|index| self.rows.remove(index).switch)
    }
}
