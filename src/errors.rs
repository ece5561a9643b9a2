// src/errors.rs

use thiserror::Error;

/// 单次竞价过程中可恢复的错误，只影响对应的 imp 或对应的一次请求
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BidderError {
    /// 调用方输入有误：没有 imp、非 video 的 imp、ext 解析失败等
    #[error("{0}")]
    BadInput(String),

    /// Telaria 返回了非预期的状态码或无法解析的响应体
    #[error("{0}")]
    BadServerResponse(String),
}

impl BidderError {
    pub fn message(&self) -> &str {
        match self {
            BidderError::BadInput(msg) | BidderError::BadServerResponse(msg) => msg,
        }
    }
}

/// 启动阶段的配置错误，出现时适配器实例不可用
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Incorrect Telaria request URI {uri}, please check the configuration.")]
    InvalidEndpoint {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no Telaria endpoint configured")]
    MissingEndpoint,

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
