pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod utils;
pub mod view;

pub use api::{
    ApiGateway, BusyGuard, BusyIndicator, DynTransport, Endpoint, EndpointTable, Envelope,
    FormParams, NewCondition, RemovedCondition, Transport,
};
#[cfg(feature = "http-client")]
pub use api::HttpTransport;
pub use cli::{load_snapshot, render_switch_table, TerminalPrompter};
pub use config::{ConsoleConfig, EnvConfig};
pub use console::{
    AutoConfirm, Command, Console, Drawer, FormInput, Outcome, Prompter, QuicksilverScorer,
    Scorer, SwitchFields, SwitchRow, SwitchTable, CONFIRM_DELETE, CONFIRM_ENABLE_GLOBALLY,
};
pub use error::{ConsoleError, Result, TRANSPORT_FAILURE_MESSAGE};
pub use model::{
    ConditionEntry, ConditionField, ConditionGroup, ConsoleSnapshot, FieldKind, FieldPath,
    Notice, SortField, SortOrder, Status, Switch,
};
pub use utils::{logging, validation};
pub use view::{Template, TemplateRegistry};
