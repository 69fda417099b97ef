use tokio::sync::watch;
use tracing::trace;

/// 全局忙碌指示器
///
/// 按进行中的请求计数：计数大于 0 时可见，归零时隐藏。
/// 多个请求重叠时同样成立。
#[derive(Debug)]
pub struct BusyIndicator {
    in_flight: watch::Sender<usize>,
}

impl BusyIndicator {
    pub fn new() -> Self {
        let (in_flight, _) = watch::channel(0);
        Self { in_flight }
    }

    /// 开始一次请求，返回的 guard 释放时计数减一
    pub fn begin(&self) -> BusyGuard<'_> {
        self.in_flight.send_modify(|count| *count += 1);
        trace!(in_flight = self.in_flight(), "request started");
        BusyGuard { indicator: self }
    }

    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    pub fn is_visible(&self) -> bool {
        self.in_flight() > 0
    }

    /// 订阅计数变化，界面据此显示或隐藏指示器
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    fn finish(&self) {
        self.in_flight
            .send_modify(|count| *count = count.saturating_sub(1));
        trace!(in_flight = self.in_flight(), "request finished");
    }
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BusyGuard<'a> {
    indicator: &'a BusyIndicator,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.indicator.finish();
    }
}
