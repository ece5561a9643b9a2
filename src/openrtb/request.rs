// src/openrtb/request.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenRTB BidRequest 结构体（统一竞价请求），
/// 只对适配器需要读取的字段做强类型解析，其余字段原样透传。
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct BidRequest {
    pub id: String,

    /// 广告展示请求列表（每个 imp 对应一个广告位）
    #[serde(default)]
    pub imp: Vec<Imp>,

    /// 网站信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<Site>,

    /// 应用信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<App>,

    /// 设备信息（用于生成 User-Agent / X-Forwarded-For 等请求头）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,

    /// 用户信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    /// 隐私法规信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regs: Option<Regs>,

    // 其它简单字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmax: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cur: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bcat: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badv: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

/// Imp 表示 imp 数组中的单个广告位
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Imp {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidfloor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bidfloorcur: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<Banner>,
    /// 本适配器只处理带 video 的广告位
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<Native>,

    /// 各 bidder 的私有配置，形如 `{"bidder": {...}}`，由适配器自行解析
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Banner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Video {
    #[serde(default)]
    pub mimes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minduration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxduration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocols: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Audio {
    #[serde(default)]
    pub mimes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Native {
    #[serde(default)]
    pub request: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Site {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// 当前页面 URL，作为 srcPageUrl 透传
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct App {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
}

/// Device 中和请求头相关的字段
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Device {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ua: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Do-Not-Track：0 = 允许追踪，1 = 拒绝追踪
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dnt: Option<i8>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyeruid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<UserExt>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserExt {
    /// GDPR 同意串（TCF consent string）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Regs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coppa: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<RegsExt>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegsExt {
    /// 1 = 适用 GDPR，0 = 不适用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gdpr: Option<i8>,
}
