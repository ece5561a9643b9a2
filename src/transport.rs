// src/transport.rs

use futures::future::join_all;
use reqwest::Client;
use std::time::Instant;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

use telaria_adapter::{RequestData, ResponseData};

/// 未指定 tmax 时的默认超时（毫秒）
const DEFAULT_TIMEOUT_MS: u64 = 250;

/// 单个请求描述的执行结果
pub struct Exchange {
    pub request: RequestData,
    pub outcome: Result<ResponseData, String>,
    pub elapsed_ms: u64,
}

pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(tmax: Option<u64>) -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_millis(tmax.unwrap_or(DEFAULT_TIMEOUT_MS)),
        }
    }

    /// 并发执行所有请求描述，失败不重试，结果顺序与输入一致
    pub async fn execute(&self, requests: Vec<RequestData>) -> Vec<Exchange> {
        let tasks = requests.into_iter().map(|request| async move {
            let start = Instant::now();
            let outcome = self.send(&request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &outcome {
                Ok(response) => info!(
                    imp_id = %request.imp_id,
                    status = response.status_code,
                    elapsed_ms,
                    "telaria responded"
                ),
                Err(reason) => warn!(imp_id = %request.imp_id, %reason, elapsed_ms, "telaria call failed"),
            }
            Exchange {
                request,
                outcome,
                elapsed_ms,
            }
        });
        join_all(tasks).await
    }

    async fn send(&self, request: &RequestData) -> Result<ResponseData, String> {
        let call = self
            .client
            .request(request.method.clone(), &request.uri)
            .headers(request.headers.clone())
            .send();

        let response = match timeout(self.timeout, call).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(format!("invalid_response: {}", err)),
            Err(_) => return Err("timeout".to_string()),
        };

        let status_code = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| format!("body_read_error: {}", err))?;
        Ok(ResponseData {
            status_code,
            body: body.to_vec(),
        })
    }
}
