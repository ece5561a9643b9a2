// src/model/params.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// imp.ext 的通用外壳：`{"bidder": {...}}`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ExtImpBidder {
    pub bidder: Value,
}

/// **Telaria 广告位参数**，对应 `imp[i].ext.bidder`
///
/// 除 `inc_id_sync` 外全部是可选字符串；未配置或为空串的字段不会出现在请求 URL 中。
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtImpTelaria {
    pub ad_code: Option<String>,
    pub supply_code: Option<String>,
    pub media_id: Option<String>,
    pub media_url: Option<String>,
    pub media_title: Option<String>,
    pub content_length: Option<String>,
    pub floor: Option<String>,
    pub efloor: Option<String>,
    pub custom: Option<String>,
    pub categories: Option<String>,
    pub keywords: Option<String>,
    pub block_domains: Option<String>,
    pub c2: Option<String>,
    pub c3: Option<String>,
    pub c4: Option<String>,
    pub skip: Option<String>,
    #[serde(rename = "skipmin")]
    pub skip_min: Option<String>,
    #[serde(rename = "skipafter")]
    pub skip_after: Option<String>,
    pub delivery: Option<String>,
    pub placement: Option<String>,
    pub video_min_bitrate: Option<String>,
    pub video_max_bitrate: Option<String>,
    /// 是否请求第三方 ID 同步，原样透传
    #[serde(default)]
    pub inc_id_sync: bool,
}

impl ExtImpTelaria {
    /// 按固定顺序列出所有字符串参数及其 query 参数名
    pub fn query_fields(&self) -> [(&'static str, Option<&str>); 22] {
        [
            ("adCode", self.ad_code.as_deref()),
            ("supplyCode", self.supply_code.as_deref()),
            ("mediaId", self.media_id.as_deref()),
            ("mediaUrl", self.media_url.as_deref()),
            ("mediaTitle", self.media_title.as_deref()),
            ("contentLength", self.content_length.as_deref()),
            ("floor", self.floor.as_deref()),
            ("efloor", self.efloor.as_deref()),
            ("custom", self.custom.as_deref()),
            ("categories", self.categories.as_deref()),
            ("keywords", self.keywords.as_deref()),
            ("blockDomains", self.block_domains.as_deref()),
            ("c2", self.c2.as_deref()),
            ("c3", self.c3.as_deref()),
            ("c4", self.c4.as_deref()),
            ("skip", self.skip.as_deref()),
            ("skipmin", self.skip_min.as_deref()),
            ("skipafter", self.skip_after.as_deref()),
            ("delivery", self.delivery.as_deref()),
            ("placement", self.placement.as_deref()),
            ("videoMinBitrate", self.video_min_bitrate.as_deref()),
            ("videoMaxBitrate", self.video_max_bitrate.as_deref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_camel_case_and_lowercase_keys() {
        let params: ExtImpTelaria = serde_json::from_value(json!({
            "adCode": "ssp-!demo!-lufip",
            "supplyCode": "ssp-demo-rm6rh",
            "mediaId": "MyCoolVideo",
            "skipmin": "5",
            "skipafter": "10",
            "blockDomains": "example.com",
            "videoMaxBitrate": "2000",
            "incIdSync": true
        }))
        .unwrap();

        assert_eq!(params.ad_code.as_deref(), Some("ssp-!demo!-lufip"));
        assert_eq!(params.supply_code.as_deref(), Some("ssp-demo-rm6rh"));
        assert_eq!(params.skip_min.as_deref(), Some("5"));
        assert_eq!(params.skip_after.as_deref(), Some("10"));
        assert_eq!(params.block_domains.as_deref(), Some("example.com"));
        assert_eq!(params.video_max_bitrate.as_deref(), Some("2000"));
        assert!(params.inc_id_sync);
        assert!(params.floor.is_none());
    }

    #[test]
    fn inc_id_sync_defaults_to_false() {
        let params: ExtImpTelaria = serde_json::from_value(json!({ "adCode": "x" })).unwrap();
        assert!(!params.inc_id_sync);
    }

    #[test]
    fn query_fields_cover_every_string_field_in_order() {
        let keys: Vec<&str> = ExtImpTelaria::default()
            .query_fields()
            .iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys.first(), Some(&"adCode"));
        assert_eq!(keys.last(), Some(&"videoMaxBitrate"));
        assert_eq!(keys.len(), 22);
    }
}
