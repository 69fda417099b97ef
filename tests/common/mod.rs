#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use switchboard_console::{
    ApiGateway, Console, ConsoleError, EndpointTable, Envelope, FormParams, Prompter, Switch,
    Transport,
};
use tokio::sync::Semaphore;

pub const BASE_URL: &str = "http://switchboard.test/_switchboard";

type Handler = Box<dyn Fn(&str, &FormParams) -> switchboard_console::Result<Envelope> + Send + Sync>;

/// 按脚本应答的传输层，记录每次调用
pub struct ScriptedTransport {
    handler: Handler,
    calls: Mutex<Vec<(String, FormParams)>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&str, &FormParams) -> switchboard_console::Result<Envelope> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
        })
    }

    /// 模拟一个按规则应答的管理接口
    pub fn echo_server() -> Arc<Self> {
        Self::new(echo_response)
    }

    /// 该 key 的请求会一直挂起，直到 [`release`](Self::release)
    pub fn hold(&self, key: &str) {
        self.gates
            .lock()
            .insert(key.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().get(key) {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> Vec<(String, FormParams)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(&self, url: &str, params: &FormParams) -> switchboard_console::Result<Envelope> {
        self.calls.lock().push((url.to_string(), params.clone()));
        let gate = param(params, "key").and_then(|key| self.gates.lock().get(key).cloned());
        if let Some(gate) = gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| ConsoleError::Transport(e.to_string()))?;
            permit.forget();
        }
        (self.handler)(url, params)
    }
}

pub fn param<'a>(params: &'a FormParams, name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(existing, _)| existing == name)
        .map(|(_, value)| value.as_str())
}

pub fn endpoint(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or_default()
}

pub fn switch_json(key: &str, status: u8, conditions: Value) -> Value {
    json!({
        "key": key,
        "label": key.to_uppercase(),
        "description": format!("{} description", key),
        "status": status,
        "date_created": "2026-01-01T00:00:00",
        "date_modified": "2026-01-02T00:00:00",
        "conditions": conditions,
    })
}

fn echo_response(url: &str, params: &FormParams) -> switchboard_console::Result<Envelope> {
    let key = param(params, "key").unwrap_or_default();
    let data = match endpoint(url) {
        "add" | "update" => json!({
            "key": key,
            "label": param(params, "label").unwrap_or_default(),
            "description": param(params, "description").unwrap_or_default(),
            "status": 1,
            "conditions": [],
        }),
        "delete" => Value::Null,
        "status" => {
            let status: u8 = param(params, "status")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1);
            switch_json(key, status, json!([]))
        }
        "add_condition" => {
            let id = param(params, "id").unwrap_or_default();
            let field = param(params, "field").unwrap_or_default();
            let value = param(params, field).unwrap_or_default();
            let exclude = param(params, "exclude") == Some("1");
            switch_json(
                key,
                2,
                json!([{ "id": id, "label": "Request", "conditions": [[field, value, value, exclude]] }]),
            )
        }
        "remove_condition" => switch_json(key, 2, json!([])),
        "history" => json!([{ "date_created": "2026-01-01T00:00:00", "status": 1 }]),
        other => return Ok(Envelope::failure(format!("unknown endpoint {}", other))),
    };
    Ok(Envelope::ok(data))
}

/// 记录所有确认和提示，按预设回答确认框
pub struct RecordingPrompter {
    answer: bool,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl RecordingPrompter {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().clone()
    }
}

impl Prompter for RecordingPrompter {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().push(message.to_string());
    }
}

pub fn console(
    transport: Arc<ScriptedTransport>,
    prompter: Arc<RecordingPrompter>,
    switches: Vec<Switch>,
) -> Console {
    let gateway = ApiGateway::new(transport, BASE_URL, EndpointTable::default());
    Console::new(gateway, prompter).with_switches(switches)
}
