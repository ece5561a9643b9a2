// src/bidding/telaria/request.rs

use once_cell::sync::Lazy;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CACHE_CONTROL,
    CONNECTION, DNT, USER_AGENT,
};
use tracing::{debug, warn};

use super::{err_no_video_media_type, TelariaAdapter, ERR_NO_IMPS, ERR_NO_VALID_IMPS};
use crate::bidding::types::RequestData;
use crate::errors::BidderError;
use crate::openrtb::request::BidRequest;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// 每个请求都会带上的固定请求头
static FIXED_HEADERS: Lazy<HeaderMap> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers
});

/// **根据 device 信息生成本次竞价共用的请求头**
///
/// 请求头不随 imp 变化，所以每个 BidRequest 只计算一次，再复制到每个 RequestData。
/// device 字段为空时不添加对应请求头（而不是添加空值）。
pub fn build_common_headers(request: &BidRequest) -> HeaderMap {
    let mut headers = FIXED_HEADERS.clone();
    if let Some(device) = &request.device {
        add_header_if_not_empty(&mut headers, USER_AGENT, device.ua.as_deref());
        add_header_if_not_empty(
            &mut headers,
            HeaderName::from_static(X_FORWARDED_FOR),
            device.ip.as_deref(),
        );
        add_header_if_not_empty(&mut headers, ACCEPT_LANGUAGE, device.language.as_deref());
        if let Some(dnt) = device.dnt {
            add_header_if_not_empty(&mut headers, DNT, Some(dnt.to_string().as_str()));
        }
    }
    headers
}

fn add_header_if_not_empty(headers: &mut HeaderMap, name: HeaderName, value: Option<&str>) {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return;
    };
    match HeaderValue::from_str(value) {
        Ok(header_value) => {
            headers.insert(name, header_value);
        }
        Err(_) => warn!(header = %name, "device value is not a valid header value, skipped"),
    }
}

impl TelariaAdapter {
    /// 处理一个 BidRequest：逐个 imp 构造请求，单个 imp 的失败不影响其它 imp
    pub(super) fn build_requests(
        &self,
        request: &BidRequest,
    ) -> (Vec<RequestData>, Vec<BidderError>) {
        let mut errors = Vec::with_capacity(request.imp.len());

        if request.imp.is_empty() {
            errors.push(BidderError::BadInput(ERR_NO_IMPS.to_string()));
            return (Vec::new(), errors);
        }

        let headers = build_common_headers(request);

        let mut adapter_requests = Vec::new();
        let mut invalid_imp_count = 0;

        for imp in &request.imp {
            if imp.video.is_none() {
                warn!(request_id = %request.id, imp_id = %imp.id, "imp without video ignored");
                errors.push(BidderError::BadInput(err_no_video_media_type(&imp.id)));
                invalid_imp_count += 1;
                continue;
            }

            let (request_data, imp_errors) = self.build_single_request_data(request, imp, &headers);
            if let Some(request_data) = request_data {
                debug!(request_id = %request.id, imp_id = %imp.id, uri = %request_data.uri, "telaria request built");
                adapter_requests.push(request_data);
            }
            errors.extend(imp_errors);
        }

        if invalid_imp_count == request.imp.len() {
            errors.push(BidderError::BadInput(ERR_NO_VALID_IMPS.to_string()));
            return (Vec::new(), errors);
        }

        (adapter_requests, errors)
    }
}
