//! 管理接口访问层
//!
//! - `ApiGateway`: 逻辑操作 -> 具名接口的表单 POST，解析 `{success, data}` envelope
//! - `Transport`: 可替换的传输层，默认实现基于 reqwest
//! - `BusyIndicator`: 按进行中请求计数的忙碌指示器

mod busy;
mod endpoints;
mod envelope;
mod gateway;
mod transport;

pub use busy::{BusyGuard, BusyIndicator};
pub use endpoints::{Endpoint, EndpointTable};
pub use envelope::Envelope;
pub use gateway::{ApiGateway, NewCondition, RemovedCondition};
#[cfg(feature = "http-client")]
pub use transport::HttpTransport;
pub use transport::{DynTransport, FormParams, Transport};
