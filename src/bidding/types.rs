// src/bidding/types.rs

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::errors::BidderError;
use crate::openrtb::request::BidRequest;
use crate::openrtb::response::Bid;

/// **发往需求方的请求描述**
/// 由适配器构造，真正的 HTTP 调用由外部编排方完成。
#[derive(Debug, Clone)]
pub struct RequestData {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    /// 该请求对应的 imp id
    pub imp_id: String,
}

/// 编排方拿到的原始 HTTP 响应
#[derive(Debug, Clone)]
pub struct ResponseData {
    pub status_code: u16,
    pub body: Vec<u8>,
}

/// 出价对应的广告类型
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BidType {
    Banner,
    Video,
    Audio,
    Native,
}

/// 带广告类型标记的出价
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypedBid {
    pub bid: Bid,
    pub bid_type: BidType,
}

/// 需求方适配器：把统一竞价请求拆成需求方请求，再把需求方响应还原为出价。
///
/// 两个方法都是纯函数，不做任何网络 I/O，可以被多个请求并发调用。
pub trait Bidder: Send + Sync {
    fn make_requests(&self, request: &BidRequest) -> (Vec<RequestData>, Vec<BidderError>);

    fn make_bids(
        &self,
        external_request: &RequestData,
        response: &ResponseData,
    ) -> (Vec<TypedBid>, Vec<BidderError>);
}
