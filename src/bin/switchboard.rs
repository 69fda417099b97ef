use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use futures::future::join_all;
use switchboard_console::cli::{ensure_row, parse_input, update_switch, SwitchEdits};
use switchboard_console::logging::LoggingConfig;
use switchboard_console::{
    load_snapshot, render_switch_table, AutoConfirm, Command, Console, ConsoleConfig, FieldPath,
    FormInput, Outcome, Prompter, Status, SwitchFields, TerminalPrompter,
};

#[derive(Parser)]
#[command(name = "switchboard", version, about = "Switchboard admin console", author)]
struct Cli {
    /// 配置文件（JSON），默认读取 SWITCHBOARD_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 覆盖管理接口根地址
    #[arg(long, global = true)]
    url: Option<String>,
    /// 跳过所有确认
    #[arg(long, short = 'y', global = true)]
    yes: bool,
    /// 以 JSON 输出结果
    #[arg(long, global = true)]
    json: bool,
    /// 页面初始数据，用于填充本地表格
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    Add {
        #[arg(long)]
        key: String,
        #[arg(long, default_value = "")]
        label: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        /// 修改前的 key；不在 --snapshot 中时必须同时给出 --label 和 --description
        curkey: String,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        key: String,
    },
    /// 修改一个或多个开关的状态，请求并发发出
    Status {
        #[arg(required = true)]
        keys: Vec<String>,
        /// 1-4 或 disabled / selective / global / inherit
        #[arg(long)]
        to: Status,
    },
    AddCondition {
        key: String,
        /// `set_id,field`
        #[arg(long)]
        field: FieldPath,
        /// `name=value`，可重复
        #[arg(long = "input", short = 'i')]
        inputs: Vec<String>,
        #[arg(long)]
        exclude: bool,
    },
    DelCondition {
        key: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        field: String,
        #[arg(long)]
        value: String,
    },
    History {
        key: String,
    },
    /// 把页面初始数据渲染成 HTML
    Render {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    LoggingConfig::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let prompter: Arc<dyn Prompter> = if cli.yes {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(TerminalPrompter)
    };
    let mut console = Console::new(config.http_gateway()?, prompter);
    if let Some(path) = &cli.snapshot {
        console = console.with_snapshot(load_snapshot(path)?);
    }

    match cli.command {
        CliCommand::Add {
            key,
            label,
            description,
        } => {
            console.dispatch(Command::OpenAdd).await?;
            let outcome = console
                .dispatch(Command::SubmitDrawer(SwitchFields::new(label, key, description)))
                .await?;
            report(&console, &outcome, cli.json)?;
        }
        CliCommand::Update {
            curkey,
            key,
            label,
            description,
        } => {
            let edits = SwitchEdits {
                key,
                label,
                description,
            };
            let (console, outcome) = update_switch(console, &curkey, edits).await?;
            report(&console, &outcome, cli.json)?;
        }
        CliCommand::Delete { key } => {
            let console = ensure_row(console, &key);
            let outcome = console.dispatch(Command::DeleteSwitch { key }).await?;
            report(&console, &outcome, cli.json)?;
        }
        CliCommand::Status { keys, to } => {
            let console = keys
                .iter()
                .fold(console, |console, key| ensure_row(console, key));
            let results = join_all(keys.iter().map(|key| {
                console.dispatch(Command::ChangeStatus {
                    key: key.clone(),
                    status: to,
                })
            }))
            .await;
            let mut failed = 0;
            for result in results {
                match result {
                    Ok(outcome) => report(&console, &outcome, cli.json)?,
                    Err(_) => failed += 1,
                }
            }
            if failed > 0 {
                anyhow::bail!("{} of {} status updates failed", failed, keys.len());
            }
        }
        CliCommand::AddCondition {
            key,
            field,
            inputs,
            exclude,
        } => {
            let console = ensure_row(console, &key);
            let mut form = inputs
                .iter()
                .map(|raw| parse_input(raw))
                .collect::<switchboard_console::Result<Vec<_>>>()?;
            form.push(FormInput::checkbox("exclude", exclude));
            let outcome = console
                .dispatch(Command::SubmitCondition {
                    key,
                    field,
                    inputs: form,
                })
                .await?;
            report(&console, &outcome, cli.json)?;
        }
        CliCommand::DelCondition {
            key,
            id,
            field,
            value,
        } => {
            let console = ensure_row(console, &key);
            let outcome = console
                .dispatch(Command::DeleteCondition {
                    key,
                    id,
                    field,
                    value,
                })
                .await?;
            report(&console, &outcome, cli.json)?;
        }
        CliCommand::History { key } => {
            let entries = console.gateway().history(&key).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else if entries.is_empty() {
                println!("No history recorded for `{}`", key);
            } else {
                for entry in entries {
                    println!("{}", entry);
                }
            }
        }
        CliCommand::Render { search, output } => {
            if let Some(query) = search {
                console.dispatch(Command::Search { query }).await?;
            }
            let html = console.render()?;
            if let Some(path) = output {
                fs::write(&path, html)?;
                println!("Console rendered to `{}`", path.display());
            } else {
                println!("{html}");
            }
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)?.with_env_overrides()?,
        None => ConsoleConfig::from_env()?,
    };
    if let Some(url) = &cli.url {
        config = config.with_base_url(url.clone());
    }
    Ok(config.resolved()?)
}

fn report(console: &Console, outcome: &Outcome, json: bool) -> anyhow::Result<()> {
    let switch = match outcome {
        Outcome::Added { key } | Outcome::Updated { key } => console.switch(key),
        _ => None,
    };
    if json {
        let value = match &switch {
            Some(switch) => serde_json::to_value(switch)?,
            None => serde_json::json!({ "outcome": format!("{:?}", outcome) }),
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    match (outcome, switch) {
        (_, Some(switch)) => print!("{}", render_switch_table(std::slice::from_ref(&switch))),
        (Outcome::Removed { key }, None) => println!("Removed `{}`", key),
        (Outcome::Declined, None) => println!("Cancelled"),
        (other, None) => println!("{:?}", other),
    }
    Ok(())
}
