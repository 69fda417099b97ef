use maud::{html, Markup};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::context::{ConditionsFormContext, RowContext, SwitchFormContext, TableContext};
use crate::error::{ConsoleError, Result};
use crate::model::{ConditionField, FieldKind, Status, Switch};

pub const SWITCH_FORM: &str = "switchForm";
pub const SWITCH_DATA: &str = "switchData";
pub const SWITCH_CONDITIONS: &str = "switchConditions";
pub const SWITCH_TABLE: &str = "switchTable";

const HIDDEN_STYLE: &str = "display:none";

/// 状态按钮是否处于选中状态
pub fn is_toggled(status: Status, candidate: Status) -> bool {
    status == candidate
}

/// 两个状态相同时才渲染 `block`
pub fn if_toggled<F>(status: Status, candidate: Status, block: F) -> Markup
where
    F: FnOnce() -> Markup,
{
    if is_toggled(status, candidate) {
        block()
    } else {
        html! {}
    }
}

fn context<T: DeserializeOwned>(name: &str, ctx: &Value) -> Result<T> {
    serde_json::from_value(ctx.clone())
        .map_err(|e| ConsoleError::Render(format!("bad context for `{}`: {}", name, e)))
}

fn hidden_unless(visible: bool) -> Option<&'static str> {
    if visible {
        None
    } else {
        Some(HIDDEN_STYLE)
    }
}

pub(super) fn switch_form(ctx: &Value) -> Result<Markup> {
    let form: SwitchFormContext = context(SWITCH_FORM, ctx)?;
    Ok(switch_form_markup(&form))
}

pub(super) fn switch_data(ctx: &Value) -> Result<Markup> {
    let row: RowContext = context(SWITCH_DATA, ctx)?;
    Ok(row_markup(&row))
}

pub(super) fn switch_conditions(ctx: &Value) -> Result<Markup> {
    let form: ConditionsFormContext = context(SWITCH_CONDITIONS, ctx)?;
    Ok(conditions_form_markup(&form))
}

pub(super) fn switch_table(ctx: &Value) -> Result<Markup> {
    let table: TableContext = context(SWITCH_TABLE, ctx)?;
    Ok(table_markup(&table))
}

fn switch_form_markup(form: &SwitchFormContext) -> Markup {
    let action = if form.add { "add" } else { "update" };
    html! {
        form.switch-form data-action=(action) {
            h3 { @if form.add { "Add Switch" } @else { "Edit Switch" } }
            label for="switch-label" { "Name" }
            input #switch-label type="text" name="label" value=(form.label);
            label for="switch-key" { "Key" }
            input #switch-key type="text" name="key" value=(form.key);
            label for="switch-description" { "Description" }
            textarea #switch-description name="description" { (form.description) }
            div.actions {
                button.submit-switch type="submit" data-action=(action) data-curkey=(form.curkey) {
                    @if form.add { "Add" } @else { "Save" }
                }
                a.cancel href="#" { "Cancel" }
            }
        }
    }
}

fn status_markup(switch: &Switch) -> Markup {
    html! {
        div.btn-group {
            @for candidate in Status::ALL {
                button.btn.toggled[is_toggled(switch.status, candidate)]
                    type="button"
                    data-status=(candidate.value())
                    title=(candidate.label()) {
                    (if_toggled(switch.status, candidate, || html! { span.marker { "\u{2713} " } }))
                    (candidate.button_text())
                }
            }
        }
        span.inner { (switch.status_text()) }
    }
}

fn row_markup(row: &RowContext) -> Markup {
    let switch = &row.switch;
    html! {
        tr.hidden[row.hidden]
            data-switch-key=(switch.key)
            data-switch-label=(switch.label)
            data-switch-description=(switch.description())
            data-switch-status=(switch.status.value()) {
            td.name {
                span.label { (switch.display_label()) }
                " "
                small.key { (switch.key) }
                @if !switch.description().is_empty() {
                    p.description { (switch.description()) }
                }
            }
            td.status { (status_markup(switch)) }
            td.conditions {
                @for group in &switch.conditions {
                    @for entry in &group.conditions {
                        span.condition.excluded[entry.exclude]
                            data-switch=(group.id)
                            data-field=(entry.field)
                            data-value=(entry.value_param()) {
                            strong { (group.label) }
                            ": "
                            (entry.display)
                            @if entry.exclude { " (excluded)" }
                            " "
                            a.delete-condition href="#" title="Remove condition" { "\u{00d7}" }
                        }
                    }
                }
                div.add-condition { a href="#" { "Add condition" } }
                div.conditions-form style=[hidden_unless(row.editor.is_some())] {
                    @if let Some(editor) = &row.editor {
                        (conditions_form_markup(editor))
                    }
                }
            }
            td.actions {
                a.edit href="#" { "Edit" }
                " "
                a.delete href="#" { "Delete" }
            }
        }
    }
}

fn field_inputs(field: &ConditionField) -> Markup {
    let name = field.name.as_str();
    html! {
        @match &field.kind {
            FieldKind::Boolean => {
                input type="hidden" name=(name) value="1";
            }
            FieldKind::Range | FieldKind::Percent => {
                input type="text" placeholder="from" name=(format!("{}[min]", name)) value="";
                " - "
                input type="text" placeholder="to" name=(format!("{}[max]", name)) value="";
            }
            FieldKind::Choice { choices } => {
                @let list_id = format!("choices-{}", field.path().data_path());
                input type="text" name=(name) value="" list=(list_id);
                datalist id=(list_id) {
                    @for choice in choices {
                        option value=(choice) {}
                    }
                }
            }
            FieldKind::Regex => {
                "/" input type="text" name=(name) value=""; "/"
            }
            FieldKind::String | FieldKind::BeforeDate | FieldKind::OnOrAfterDate => {
                input type="text" name=(name) value="";
            }
        }
    }
}

fn conditions_form_markup(form: &ConditionsFormContext) -> Markup {
    let selected = form.selected.as_deref();
    html! {
        select name="field" {
            option value="" selected[selected.is_none()] { "Select a field" }
            @for field in &form.fields {
                @let path = field.path();
                option value=(path.selector_value()) selected[selected == Some(path.data_path().as_str())] {
                    (field.group) ": " (field.display_label())
                }
            }
        }
        @for field in &form.fields {
            @let path = field.path();
            div.fields
                data-path=(path.data_path())
                style=[hidden_unless(selected == Some(path.data_path().as_str()))] {
                form data-switch=(field.set_id) data-field=(field.name) {
                    (field_inputs(field))
                    label.exclude {
                        input type="checkbox" name="exclude" value="1";
                        " Exclude"
                    }
                    @if let Some(help) = &field.help_text {
                        p.help { (help) }
                    }
                    button type="submit" { "Add" }
                }
            }
        }
    }
}

fn table_markup(table: &TableContext) -> Markup {
    html! {
        div.switchboard {
            @for notice in &table.messages {
                div class=(format!("alert alert-{}", notice.status)) { (notice.message) }
            }
            div.toolbar {
                a.add-switch href="#" { "Add Switch" }
                input type="search" name="q" placeholder="Search switches" value=(table.query);
                span.spinner style=[hidden_unless(table.busy)] {}
            }
            table.switches.empty[table.rows.is_empty()] {
                @for row in &table.rows {
                    (row_markup(row))
                }
            }
            div.no-switches style=[hidden_unless(table.rows.is_empty())] {
                "No switches have been created yet."
            }
            div.drawer style=[hidden_unless(table.drawer.is_some())] {
                @if let Some(form) = &table.drawer {
                    (switch_form_markup(form))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_toggled_renders_only_matching_status() {
        let block = || html! { b { "on" } };
        assert_eq!(
            if_toggled(Status::Disabled, Status::Disabled, block).into_string(),
            "<b>on</b>"
        );
        assert_eq!(
            if_toggled(Status::Disabled, Status::Inherit, block).into_string(),
            ""
        );
    }

    #[test]
    fn edit_form_carries_original_key() {
        let switch = Switch::new("beta", Status::Disabled).with_label("Beta");
        let markup = switch_form_markup(&SwitchFormContext::for_edit(&switch)).into_string();
        assert!(markup.contains(r#"data-action="update""#));
        assert!(markup.contains(r#"data-curkey="beta""#));
        assert!(markup.contains(r#"value="Beta""#));
    }

    #[test]
    fn row_escapes_user_text() {
        let switch = Switch::new("xss", Status::Disabled).with_label("<script>");
        let markup = row_markup(&RowContext::from(switch)).into_string();
        assert!(markup.contains("&lt;script&gt;"));
        assert!(!markup.contains("<script>"));
    }
}
