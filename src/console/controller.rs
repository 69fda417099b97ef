use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::command::{collect_inputs, Command, Outcome, SwitchFields};
use super::drawer::Drawer;
use super::prompt::{Prompter, CONFIRM_DELETE, CONFIRM_ENABLE_GLOBALLY};
use super::search::{apply_filter, matches_query, QuicksilverScorer, Scorer};
use super::table::{ConditionEditor, SwitchRow, SwitchTable};
use crate::api::{ApiGateway, BusyIndicator, NewCondition, RemovedCondition};
use crate::error::{ConsoleError, Result};
use crate::model::{ConditionField, ConsoleSnapshot, FieldPath, Notice, Status, Switch};
use crate::view::{
    ConditionsFormContext, RowContext, TableContext, TemplateRegistry, SWITCH_DATA, SWITCH_FORM,
    SWITCH_TABLE,
};

#[derive(Default)]
struct ConsoleState {
    table: SwitchTable,
    drawer: Drawer,
    query: String,
}

/// 管理控制台
///
/// 用户意图经 [`Command`] 分发：需要时先确认，再通过 [`ApiGateway`] 发请求，
/// 成功后用服务端返回的开关覆盖本地记录。视图总是从当前状态重新推导。
///
/// 请求之间互不排队：状态锁只在请求前后短暂持有，
/// 并发的两次修改各自落到自己的行上。
pub struct Console {
    gateway: ApiGateway,
    prompter: Arc<dyn Prompter>,
    templates: TemplateRegistry,
    scorer: Arc<dyn Scorer>,
    catalog: Vec<ConditionField>,
    messages: Vec<Notice>,
    state: Mutex<ConsoleState>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("catalog", &self.catalog)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

impl Console {
    pub fn new(gateway: ApiGateway, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            gateway,
            prompter,
            templates: TemplateRegistry::builtin().clone(),
            scorer: Arc::new(QuicksilverScorer),
            catalog: Vec::new(),
            messages: Vec::new(),
            state: Mutex::new(ConsoleState::default()),
        }
    }

    /// 用页面初始数据填充表格
    pub fn with_snapshot(mut self, snapshot: ConsoleSnapshot) -> Self {
        let switches = snapshot.ordered_switches();
        self.catalog = snapshot.all_conditions;
        self.messages = snapshot.messages;
        self.state.get_mut().table = SwitchTable::from_switches(switches);
        self
    }

    pub fn with_switches(mut self, switches: impl IntoIterator<Item = Switch>) -> Self {
        self.state.get_mut().table = SwitchTable::from_switches(switches);
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    pub fn busy(&self) -> &Arc<BusyIndicator> {
        self.gateway.busy()
    }

    /// 分发一个用户意图
    ///
    /// 服务端拒绝或传输失败时会先弹出提示，再把错误返回给调用方；
    /// 本地状态不做任何修改，也不会重试。
    pub async fn dispatch(&self, command: Command) -> Result<Outcome> {
        let name = command.name();
        debug!(command = name, "dispatching");
        let result = self.execute(command).await;
        if let Err(err) = &result {
            if err.is_user_facing() {
                self.prompter.alert(&err.user_message());
            } else {
                warn!(command = name, error = %err, "command failed");
            }
        }
        result
    }

    async fn execute(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::OpenAdd => {
                self.state.lock().drawer.open_for_add();
                Ok(Outcome::DrawerOpened)
            }
            Command::OpenEdit { key } => self.open_edit(&key),
            Command::Cancel => {
                self.state.lock().drawer.hide();
                Ok(Outcome::DrawerClosed)
            }
            Command::SubmitDrawer(fields) => self.submit_drawer(fields).await,
            Command::DeleteSwitch { key } => self.delete_switch(&key).await,
            Command::ChangeStatus { key, status } => self.change_status(&key, status).await,
            Command::ToggleConditionEditor { key } => self.toggle_condition_editor(&key),
            Command::SelectConditionField { key, field } => self.select_condition_field(&key, field),
            Command::SubmitCondition { key, field, inputs } => {
                let condition = NewCondition {
                    key: key.clone(),
                    id: field.set_id,
                    field: field.field,
                    values: collect_inputs(&inputs),
                };
                let switch = self.gateway.add_condition(&condition).await?;
                info!(key = %key, "condition added");
                Ok(self.replace_row(&key, switch))
            }
            Command::DeleteCondition {
                key,
                id,
                field,
                value,
            } => {
                let condition = RemovedCondition {
                    key: key.clone(),
                    id,
                    field,
                    value,
                };
                let switch = self.gateway.del_condition(&condition).await?;
                info!(key = %key, "condition removed");
                Ok(self.replace_row(&key, switch))
            }
            Command::Search { query } => {
                let mut state = self.state.lock();
                let visible = apply_filter(&mut state.table, self.scorer.as_ref(), &query);
                state.query = query;
                Ok(Outcome::Filtered { visible })
            }
        }
    }

    fn open_edit(&self, key: &str) -> Result<Outcome> {
        let mut state = self.state.lock();
        let switch = state
            .table
            .get(key)
            .map(|row| row.switch.clone())
            .ok_or_else(|| ConsoleError::UnknownSwitch(key.to_string()))?;
        state.drawer.open_for_edit(&switch);
        Ok(Outcome::DrawerOpened)
    }

    async fn submit_drawer(&self, fields: SwitchFields) -> Result<Outcome> {
        let drawer = self.state.lock().drawer.clone();
        match drawer {
            Drawer::Hidden => Err(ConsoleError::DrawerHidden),
            Drawer::OpenForAdd => {
                let switch = self
                    .gateway
                    .add_switch(&fields.label, &fields.key, &fields.description)
                    .await?;
                let key = switch.key.clone();
                info!(key = %key, "switch added");

                let mut state = self.state.lock();
                state.table.append(switch);
                self.refilter_row(&mut state, &key);
                state.drawer.hide();
                Ok(Outcome::Added { key })
            }
            Drawer::OpenForEdit { curkey, .. } => {
                let switch = self
                    .gateway
                    .update_switch(&curkey, &fields.label, &fields.key, &fields.description)
                    .await?;
                info!(curkey = %curkey, key = %switch.key, "switch updated");
                let outcome = self.replace_row(&curkey, switch);
                self.state.lock().drawer.hide();
                Ok(outcome)
            }
        }
    }

    async fn delete_switch(&self, key: &str) -> Result<Outcome> {
        if !self.prompter.confirm(CONFIRM_DELETE) {
            return Ok(Outcome::Declined);
        }
        self.gateway.delete_switch(key).await?;
        info!(key = %key, "switch removed");
        self.state.lock().table.remove(key);
        Ok(Outcome::Removed {
            key: key.to_string(),
        })
    }

    async fn change_status(&self, key: &str, status: Status) -> Result<Outcome> {
        if status.requires_confirmation() && !self.prompter.confirm(CONFIRM_ENABLE_GLOBALLY) {
            return Ok(Outcome::Declined);
        }
        let switch = self.gateway.update_status(key, status).await?;
        if switch.status != status || switch.key != key {
            warn!(
                key = %key,
                requested = %status,
                returned = %switch.status,
                "status response does not match request, ignoring"
            );
            return Ok(Outcome::Unchanged);
        }
        info!(key = %key, status = %status, label = %switch.status_text(), "status updated");
        if self.state.lock().table.update_record(switch) {
            Ok(Outcome::Updated {
                key: key.to_string(),
            })
        } else {
            Ok(Outcome::Unchanged)
        }
    }

    fn toggle_condition_editor(&self, key: &str) -> Result<Outcome> {
        let mut state = self.state.lock();
        let row = state
            .table
            .get_mut(key)
            .ok_or_else(|| ConsoleError::UnknownSwitch(key.to_string()))?;
        row.editor = match row.editor.take() {
            Some(_) => None,
            None => Some(ConditionEditor::default()),
        };
        Ok(Outcome::EditorToggled {
            key: key.to_string(),
            open: row.editor.is_some(),
        })
    }

    fn select_condition_field(&self, key: &str, field: FieldPath) -> Result<Outcome> {
        let mut state = self.state.lock();
        let row = state
            .table
            .get_mut(key)
            .ok_or_else(|| ConsoleError::UnknownSwitch(key.to_string()))?;
        let Some(editor) = row.editor.as_mut() else {
            debug!(key = %key, "condition editor is closed, ignoring field selection");
            return Ok(Outcome::Unchanged);
        };
        editor.selected = Some(field.clone());
        Ok(Outcome::FieldSelected {
            key: key.to_string(),
            field,
        })
    }

    /// 用服务端返回的开关整体替换行；当前的搜索条件对新行同样生效
    fn replace_row(&self, curkey: &str, switch: Switch) -> Outcome {
        let key = switch.key.clone();
        let mut state = self.state.lock();
        if !state.table.replace(curkey, switch) {
            warn!(key = %curkey, "row vanished before the response arrived");
            return Outcome::Unchanged;
        }
        self.refilter_row(&mut state, &key);
        Outcome::Updated { key }
    }

    fn refilter_row(&self, state: &mut ConsoleState, key: &str) {
        let query = state.query.clone();
        if let Some(row) = state.table.get_mut(key) {
            row.hidden = !matches_query(self.scorer.as_ref(), &row.switch, &query);
        }
    }

    // ---- 读取状态 ----

    pub fn keys(&self) -> Vec<String> {
        self.state.lock().table.keys()
    }

    pub fn visible_keys(&self) -> Vec<String> {
        self.state
            .lock()
            .table
            .rows()
            .iter()
            .filter(|row| !row.hidden)
            .map(|row| row.switch.key.clone())
            .collect()
    }

    pub fn row(&self, key: &str) -> Option<SwitchRow> {
        self.state.lock().table.get(key).cloned()
    }

    pub fn switch(&self, key: &str) -> Option<Switch> {
        self.row(key).map(|row| row.switch)
    }

    pub fn row_count(&self) -> usize {
        self.state.lock().table.len()
    }

    /// 表格为空时显示“还没有开关”的占位
    pub fn shows_empty_placeholder(&self) -> bool {
        self.state.lock().table.is_empty()
    }

    pub fn drawer(&self) -> Drawer {
        self.state.lock().drawer.clone()
    }

    pub fn query(&self) -> String {
        self.state.lock().query.clone()
    }

    // ---- 渲染 ----

    fn row_context(&self, row: &SwitchRow) -> RowContext {
        RowContext {
            switch: row.switch.clone(),
            hidden: row.hidden,
            editor: row.editor.as_ref().map(|editor| ConditionsFormContext {
                fields: self.catalog.clone(),
                selected: editor.selected.as_ref().map(FieldPath::data_path),
            }),
        }
    }

    /// 渲染整个控制台
    pub fn render(&self) -> Result<String> {
        let context = {
            let state = self.state.lock();
            TableContext {
                rows: state
                    .table
                    .rows()
                    .iter()
                    .map(|row| self.row_context(row))
                    .collect(),
                messages: self.messages.clone(),
                drawer: state.drawer.form(),
                busy: self.busy().is_visible(),
                query: state.query.clone(),
            }
        };
        self.templates.render_with(SWITCH_TABLE, &context)
    }

    /// 渲染单行（`switchData`）
    pub fn render_row(&self, key: &str) -> Result<String> {
        let context = {
            let state = self.state.lock();
            let row = state
                .table
                .get(key)
                .ok_or_else(|| ConsoleError::UnknownSwitch(key.to_string()))?;
            self.row_context(row)
        };
        self.templates.render_with(SWITCH_DATA, &context)
    }

    /// 渲染抽屉内容，隐藏时为 `None`
    pub fn render_drawer(&self) -> Result<Option<String>> {
        match self.state.lock().drawer.form() {
            Some(form) => self.templates.render_with(SWITCH_FORM, &form).map(Some),
            None => Ok(None),
        }
    }
}
