// src/bidding/telaria/mod.rs

mod params;
mod request;
mod response;

use reqwest::Method;
use url::Url;

use crate::bidding::types::{Bidder, RequestData, ResponseData, TypedBid};
use crate::errors::{BidderError, ConfigError};
use crate::openrtb::request::BidRequest;

pub use params::check_params;
pub use request::build_common_headers;

pub const REQUEST_METHOD: Method = Method::GET;

const ERR_NO_IMPS: &str = "Telaria:No impressions found in the bid request";
const ERR_NO_VALID_IMPS: &str = "Telaria:No valid impression in the bid request";
const ERR_EXT_NOT_FOUND: &str = "Telaria: ext.bidder not found";
const ERR_EXT_BIDDER_PARSE_FAIL: &str = "Telaria: Failed to parse ext.bidder.publisher";

fn err_no_video_media_type(imp_id: &str) -> String {
    format!(
        "Telaria: only supports video media type. Ignoring imp id={}",
        imp_id
    )
}

fn err_unexpected_status_code(status_code: u16) -> String {
    format!(
        "Telaria: Unexpected response status code: {}. Run with request.debug = 1 for more info",
        status_code
    )
}

fn err_bad_server(detail: &dyn std::fmt::Display) -> String {
    format!("Telaria: bad server response: {}.", detail)
}

/// **Telaria 视频适配器**
///
/// 只持有启动时校验过的 endpoint，构造之后不可变。
#[derive(Debug, Clone)]
pub struct TelariaAdapter {
    endpoint: Url,
}

impl TelariaAdapter {
    /// 校验 endpoint，格式不合法时返回 `ConfigError::InvalidEndpoint`
    pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
        let endpoint = Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
            uri: endpoint.to_string(),
            source,
        })?;
        Ok(Self { endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Bidder for TelariaAdapter {
    fn make_requests(&self, request: &BidRequest) -> (Vec<RequestData>, Vec<BidderError>) {
        self.build_requests(request)
    }

    fn make_bids(
        &self,
        external_request: &RequestData,
        response: &ResponseData,
    ) -> (Vec<TypedBid>, Vec<BidderError>) {
        response::normalize(external_request, response)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::{json, Value};

    use crate::openrtb::request::{BidRequest, Device, Imp, Video};

    pub const ENDPOINT: &str = "https://eb.telaria.test/ad/hb";

    pub fn video_imp(id: &str, bidder: Value) -> Imp {
        Imp {
            id: id.to_string(),
            video: Some(Video {
                mimes: vec!["video/mp4".to_string()],
                w: Some(640),
                h: Some(360),
                ..Default::default()
            }),
            ext: Some(json!({ "bidder": bidder })),
            ..Default::default()
        }
    }

    pub fn banner_imp(id: &str) -> Imp {
        Imp {
            id: id.to_string(),
            ext: Some(json!({ "bidder": { "adCode": "banner-code" } })),
            ..Default::default()
        }
    }

    pub fn bid_request(imp: Vec<Imp>, device: Option<Device>) -> BidRequest {
        BidRequest {
            id: "req-1".to_string(),
            imp,
            device,
            ..Default::default()
        }
    }
}
