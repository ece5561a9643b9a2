// src/bidding/telaria/params.rs

use reqwest::header::HeaderMap;
use tracing::warn;

use super::{TelariaAdapter, ERR_EXT_BIDDER_PARSE_FAIL, ERR_EXT_NOT_FOUND, REQUEST_METHOD};
use crate::bidding::types::RequestData;
use crate::errors::BidderError;
use crate::model::params::{ExtImpBidder, ExtImpTelaria};
use crate::openrtb::request::{BidRequest, Imp};

/// 能力标记参数，每个请求都会带上
const CAPABILITY_PARAM: (&str, &str) = ("CC", "1");

/// **广告位参数校验**
///
/// 目前没有强制要求的字段，所有参数都放行；需要拒绝某类配置时在这里返回 `BadInput`。
pub fn check_params(_params: &ExtImpTelaria) -> Result<(), BidderError> {
    Ok(())
}

/// 从 imp.ext 中依次解析通用外壳和 Telaria 参数
fn parse_imp_ext(imp: &Imp) -> Result<ExtImpTelaria, BidderError> {
    let ext = imp
        .ext
        .clone()
        .ok_or_else(|| BidderError::BadInput(ERR_EXT_NOT_FOUND.to_string()))?;

    let bidder_ext: ExtImpBidder = serde_json::from_value(ext)
        .map_err(|_| BidderError::BadInput(ERR_EXT_NOT_FOUND.to_string()))?;

    serde_json::from_value(bidder_ext.bidder)
        .map_err(|_| BidderError::BadInput(ERR_EXT_BIDDER_PARSE_FAIL.to_string()))
}

impl TelariaAdapter {
    /// **为单个 video imp 构造 RequestData**
    ///
    /// 任何一步失败都只影响当前 imp，返回 `(None, errors)`。
    pub(super) fn build_single_request_data(
        &self,
        request: &BidRequest,
        imp: &Imp,
        headers: &HeaderMap,
    ) -> (Option<RequestData>, Vec<BidderError>) {
        let params = match parse_imp_ext(imp).and_then(|params| {
            check_params(&params)?;
            Ok(params)
        }) {
            Ok(params) => params,
            Err(err) => {
                warn!(request_id = %request.id, imp_id = %imp.id, error = %err, "telaria params rejected");
                return (None, vec![err]);
            }
        };

        let request_data = RequestData {
            method: REQUEST_METHOD,
            uri: self.build_single_request_uri(request, imp, &params),
            headers: headers.clone(),
            imp_id: imp.id.clone(),
        };
        (Some(request_data), Vec::new())
    }

    /// 拼接请求 URL：endpoint 自带的 query 保留，之后依次追加
    /// 能力标记、Telaria 参数、播放器尺寸、页面地址和 GDPR 信息，只输出有值的字段。
    fn build_single_request_uri(
        &self,
        request: &BidRequest,
        imp: &Imp,
        params: &ExtImpTelaria,
    ) -> String {
        let mut uri = self.endpoint().clone();
        {
            let mut query = uri.query_pairs_mut();
            query.append_pair(CAPABILITY_PARAM.0, CAPABILITY_PARAM.1);

            for (key, value) in params.query_fields() {
                if let Some(value) = value.filter(|v| !v.is_empty()) {
                    query.append_pair(key, value);
                }
            }
            if params.inc_id_sync {
                query.append_pair("incIdSync", "true");
            }

            if let Some(video) = &imp.video {
                if let Some(w) = video.w {
                    query.append_pair("playerWidth", &w.to_string());
                }
                if let Some(h) = video.h {
                    query.append_pair("playerHeight", &h.to_string());
                }
            }

            let page = request.site.as_ref().and_then(|site| site.page.as_deref());
            if let Some(page) = page.filter(|p| !p.is_empty()) {
                query.append_pair("srcPageUrl", page);
            }

            let gdpr = request
                .regs
                .as_ref()
                .and_then(|regs| regs.ext.as_ref())
                .and_then(|ext| ext.gdpr);
            if let Some(gdpr) = gdpr {
                query.append_pair("gdpr", &gdpr.to_string());
            }
            let consent = request
                .user
                .as_ref()
                .and_then(|user| user.ext.as_ref())
                .and_then(|ext| ext.consent.as_deref());
            if let Some(consent) = consent.filter(|c| !c.is_empty()) {
                query.append_pair("gdpr_consent", consent);
            }
        }
        uri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use url::Url;

    use super::*;
    use crate::bidding::telaria::build_common_headers;
    use crate::bidding::telaria::test_support::{bid_request, video_imp, ENDPOINT};
    use crate::openrtb::request::{Regs, RegsExt, Site, User, UserExt};

    fn adapter() -> TelariaAdapter {
        TelariaAdapter::new(ENDPOINT).unwrap()
    }

    fn build(imp: &Imp, request: &BidRequest) -> (Option<RequestData>, Vec<BidderError>) {
        adapter().build_single_request_data(request, imp, &build_common_headers(request))
    }

    fn query_pairs(uri: &str) -> Vec<(String, String)> {
        Url::parse(uri)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn missing_ext_is_reported_as_not_found() {
        let mut imp = video_imp("v1", json!({}));
        imp.ext = None;
        let (data, errors) = build(&imp, &bid_request(vec![], None));

        assert!(data.is_none());
        assert_eq!(errors, vec![BidderError::BadInput(ERR_EXT_NOT_FOUND.to_string())]);
    }

    #[test]
    fn malformed_bidder_wrapper_is_reported_as_not_found() {
        let mut imp = video_imp("v1", json!({}));
        imp.ext = Some(json!({ "publisher": 1 }));
        let (data, errors) = build(&imp, &bid_request(vec![], None));

        assert!(data.is_none());
        assert_eq!(errors, vec![BidderError::BadInput(ERR_EXT_NOT_FOUND.to_string())]);
    }

    #[test]
    fn malformed_telaria_params_are_reported_as_parse_failure() {
        let imp = video_imp("v1", json!({ "adCode": 42 }));
        let (data, errors) = build(&imp, &bid_request(vec![], None));

        assert!(data.is_none());
        assert_eq!(errors, vec![BidderError::BadInput(ERR_EXT_BIDDER_PARSE_FAIL.to_string())]);
    }

    #[test]
    fn check_params_accepts_empty_params() {
        assert!(check_params(&ExtImpTelaria::default()).is_ok());
    }

    #[test]
    fn minimal_params_only_emit_capability_marker_and_player_size() {
        let mut imp = video_imp("v1", json!({}));
        imp.video.as_mut().unwrap().w = None;
        imp.video.as_mut().unwrap().h = None;
        let (data, errors) = build(&imp, &bid_request(vec![], None));

        assert!(errors.is_empty());
        let data = data.unwrap();
        assert_eq!(data.uri, format!("{}?CC=1", ENDPOINT));
        assert_eq!(data.imp_id, "v1");
    }

    #[test]
    fn populated_params_map_to_query_in_table_order() {
        let imp = video_imp(
            "v1",
            json!({
                "supplyCode": "ssp-demo-rm6rh",
                "adCode": "ssp-!demo!-lufip",
                "mediaId": "MyCoolVideo",
                "mediaUrl": "",
                "floor": "1.25",
                "skipmin": "5",
                "videoMaxBitrate": "2000",
                "incIdSync": true
            }),
        );
        let mut request = bid_request(vec![], None);
        request.site = Some(Site {
            page: Some("https://news.example/watch?id=7".to_string()),
            ..Default::default()
        });
        let (data, _) = build(&imp, &request);

        let pairs = query_pairs(&data.unwrap().uri);
        let expected: Vec<(String, String)> = [
            ("CC", "1"),
            ("adCode", "ssp-!demo!-lufip"),
            ("supplyCode", "ssp-demo-rm6rh"),
            ("mediaId", "MyCoolVideo"),
            ("floor", "1.25"),
            ("skipmin", "5"),
            ("videoMaxBitrate", "2000"),
            ("incIdSync", "true"),
            ("playerWidth", "640"),
            ("playerHeight", "360"),
            ("srcPageUrl", "https://news.example/watch?id=7"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn endpoint_query_is_preserved() {
        let adapter = TelariaAdapter::new("https://eb.telaria.test/ad/hb?fmt=json").unwrap();
        let request = bid_request(vec![], None);
        let imp = video_imp("v1", json!({ "adCode": "a" }));
        let (data, _) =
            adapter.build_single_request_data(&request, &imp, &build_common_headers(&request));

        let pairs = query_pairs(&data.unwrap().uri);
        assert_eq!(pairs[0], ("fmt".to_string(), "json".to_string()));
        assert_eq!(pairs[1], ("CC".to_string(), "1".to_string()));
    }

    #[test]
    fn gdpr_signals_are_forwarded() {
        let imp = video_imp("v1", json!({ "adCode": "a" }));
        let mut request = bid_request(vec![], None);
        request.regs = Some(Regs {
            ext: Some(RegsExt { gdpr: Some(1) }),
            ..Default::default()
        });
        request.user = Some(User {
            ext: Some(UserExt { consent: Some("BOEFEAyOEFEAyAHABDENAI4AAAB9vABAASA".to_string()) }),
            ..Default::default()
        });
        let (data, _) = build(&imp, &request);

        let pairs = query_pairs(&data.unwrap().uri);
        let tail = &pairs[pairs.len() - 2..];
        assert_eq!(tail[0], ("gdpr".to_string(), "1".to_string()));
        assert_eq!(
            tail[1],
            ("gdpr_consent".to_string(), "BOEFEAyOEFEAyAHABDENAI4AAAB9vABAASA".to_string())
        );
    }

    #[test]
    fn gdpr_params_are_omitted_without_regs_or_consent() {
        let imp = video_imp("v1", json!({ "adCode": "a" }));
        let mut request = bid_request(vec![], None);
        request.user = Some(User {
            ext: Some(UserExt { consent: Some(String::new()) }),
            ..Default::default()
        });
        let (data, _) = build(&imp, &request);

        let pairs = query_pairs(&data.unwrap().uri);
        assert!(pairs.iter().all(|(k, _)| k != "gdpr" && k != "gdpr_consent"));
    }
}
