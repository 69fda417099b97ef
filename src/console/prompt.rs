/// 阻塞式的确认框和提示框
pub trait Prompter: Send + Sync {
    /// 返回 `false` 时破坏性操作不会发出
    fn confirm(&self, message: &str) -> bool;
    /// 展示错误信息
    fn alert(&self, message: &str);
}

pub const CONFIRM_DELETE: &str = "Are you SURE you want to remove this switch?";
pub const CONFIRM_ENABLE_GLOBALLY: &str = "Are you SURE you want to enable this switch globally?";

/// 总是确认；提示只写日志
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl Prompter for AutoConfirm {
    fn confirm(&self, message: &str) -> bool {
        tracing::debug!(message, "auto-confirmed");
        true
    }

    fn alert(&self, message: &str) {
        tracing::error!(message, "switchboard error");
    }
}
