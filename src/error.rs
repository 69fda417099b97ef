use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConsoleError>;

/// 传输失败时展示给用户的通用提示
pub const TRANSPORT_FAILURE_MESSAGE: &str = "There was an internal error. Data probably wasn't saved";

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// 服务端返回 `success: false`，`data` 原样作为提示
    #[error("{0}")]
    Application(String),
    /// 请求未能完成，或响应体不是合法的 envelope
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("template `{0}` not registered")]
    UnknownTemplate(String),
    #[error("switch `{0}` not found in console")]
    UnknownSwitch(String),
    #[error("drawer is hidden, nothing to submit")]
    DrawerHidden,
    #[error("invalid switch status `{0}`")]
    InvalidStatus(i64),
    #[error("invalid condition field path `{0}`")]
    InvalidFieldPath(String),
    #[error("invalid sort order `{0}`")]
    InvalidSortOrder(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("render error: {0}")]
    Render(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConsoleError {
    /// 阻塞式弹窗里展示的文本
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Application(message) => message.clone(),
            ConsoleError::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// 服务端或网络造成的失败（需要提示用户），其余都是调用方的编程错误
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            ConsoleError::Application(_) | ConsoleError::Transport(_)
        )
    }
}
