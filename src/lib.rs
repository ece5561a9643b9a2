//! Telaria 视频竞价适配器。
//!
//! 把一个 OpenRTB `BidRequest` 拆成每个 video imp 一个 GET 请求描述，
//! 再把 Telaria 的 HTTP 响应还原为带类型的出价。适配器本身不做网络 I/O，
//! 请求的发送由调用方（编排方）负责。

pub mod bidding;
pub mod config;
pub mod errors;
pub mod logging;
pub mod model;
pub mod openrtb;

pub use bidding::telaria::TelariaAdapter;
pub use bidding::types::{BidType, Bidder, RequestData, ResponseData, TypedBid};
pub use errors::{BidderError, ConfigError};
