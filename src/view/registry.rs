use std::collections::HashMap;

use maud::Markup;
use once_cell::sync::Lazy;
use serde_json::Value;

use super::templates;
use crate::error::{ConsoleError, Result};

/// 模板：上下文 -> markup，纯函数
pub type Template = fn(&Value) -> Result<Markup>;

/// 内置模板定义
const EMBEDDED_TEMPLATES: &[(&str, Template)] = &[
    (templates::SWITCH_FORM, templates::switch_form as Template),
    (templates::SWITCH_DATA, templates::switch_data as Template),
    (templates::SWITCH_CONDITIONS, templates::switch_conditions as Template),
    (templates::SWITCH_TABLE, templates::switch_table as Template),
];

static BUILTIN: Lazy<TemplateRegistry> = Lazy::new(TemplateRegistry::compile_embedded);

/// 模板名 -> 模板
#[derive(Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// 进程内只构建一次的内置模板表
    pub fn builtin() -> &'static TemplateRegistry {
        &BUILTIN
    }

    fn compile_embedded() -> Self {
        let mut registry = Self::new();
        for (name, template) in EMBEDDED_TEMPLATES {
            registry.register(*name, *template);
        }
        tracing::debug!(templates = registry.templates.len(), "templates compiled");
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, template: Template) {
        self.templates.insert(name.into(), template);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// 渲染模板；未注册的模板名属于编程错误
    pub fn render(&self, name: &str, context: &Value) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| ConsoleError::UnknownTemplate(name.to_string()))?;
        Ok(template(context)?.into_string())
    }

    /// 渲染任意可序列化的上下文
    pub fn render_with<T: serde::Serialize>(&self, name: &str, context: &T) -> Result<String> {
        let value = serde_json::to_value(context)
            .map_err(|e| ConsoleError::Render(format!("context for `{}`: {}", name, e)))?;
        self.render(name, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtin_registry_has_all_templates() {
        assert_eq!(
            TemplateRegistry::builtin().names(),
            vec!["switchConditions", "switchData", "switchForm", "switchTable"]
        );
    }

    #[test]
    fn unknown_template_is_an_error() {
        let err = TemplateRegistry::builtin()
            .render("switchHistory", &json!({}))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownTemplate(name) if name == "switchHistory"));
    }

    #[test]
    fn add_form_renders_empty_fields() {
        let markup = TemplateRegistry::builtin()
            .render("switchForm", &json!({"add": true}))
            .unwrap();
        assert!(markup.contains("Add Switch"));
        assert!(markup.contains(r#"data-action="add""#));
        assert!(markup.contains(r#"name="key" value="""#));
    }
}
