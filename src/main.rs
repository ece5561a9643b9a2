// src/main.rs

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use std::fs;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

mod mock_dsp;
mod transport;

use telaria_adapter::config::config_manager::{AdapterConfig, DEFAULT_CONFIG_PATH};
use telaria_adapter::logging::logger::init_tracing;
use telaria_adapter::openrtb::request::BidRequest;
use telaria_adapter::Bidder;
use transport::HttpTransport;

#[derive(Parser, Debug)]
#[command(author = "whiteCcinn", version = "1.0", about = "Replay an OpenRTB request through the Telaria video adapter")]
struct CliArgs {
    /// OpenRTB BidRequest JSON 文件
    #[arg(short, long)]
    request: String,
    /// 覆盖配置文件中的 Telaria endpoint
    #[arg(short, long)]
    endpoint: Option<String>,
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, default_value = "logs")]
    log_dir: String,
    /// 同时在该端口启动 Mock Telaria，并把请求发往它
    #[arg(long)]
    mock_port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化全局 tracing 日志，guard 需要活到进程结束
    let _guard = init_tracing(&args.log_dir, "telaria_adapter.json")
        .context("unable to set global tracing subscriber")?;

    let mut endpoint = args.endpoint.clone();
    if let Some(port) = args.mock_port {
        // 先绑定端口再启动服务，endpoint 立即可用
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("unable to bind mock telaria port {}", port))?;
        endpoint = Some(format!("http://{}/bid", listener.local_addr()?));
        tokio::spawn(async move {
            if let Err(err) = mock_dsp::start_mock_dsp_server(listener).await {
                error!(%err, "mock telaria server stopped");
            }
        });
    }

    let config = AdapterConfig::from_file(&args.config)?.with_endpoint_override(endpoint);
    let adapter = config.build_telaria()?;
    info!(endpoint = %adapter.endpoint(), "telaria adapter ready");

    let raw_request = fs::read_to_string(&args.request)
        .with_context(|| format!("unable to read {}", args.request))?;
    let bid_request: BidRequest = serde_json::from_str(&raw_request)
        .with_context(|| format!("unable to parse {}", args.request))?;

    let (requests, request_errors) = adapter.make_requests(&bid_request);
    for err in &request_errors {
        warn!(request_id = %bid_request.id, %err, "request building error");
    }
    info!(
        request_id = %bid_request.id,
        imps = bid_request.imp.len(),
        requests = requests.len(),
        errors = request_errors.len(),
        "telaria requests built"
    );

    let transport = HttpTransport::new(bid_request.tmax);
    let mut call_details = Vec::new();
    for exchange in transport.execute(requests).await {
        let detail = match &exchange.outcome {
            Ok(response) => {
                let (bids, errors) = adapter.make_bids(&exchange.request, response);
                json!({
                    "imp_id": exchange.request.imp_id,
                    "uri": exchange.request.uri,
                    "status_code": response.status_code,
                    "inquiry_time_ms": exchange.elapsed_ms,
                    "bids": bids,
                    "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                })
            }
            Err(reason) => json!({
                "imp_id": exchange.request.imp_id,
                "uri": exchange.request.uri,
                "inquiry_time_ms": exchange.elapsed_ms,
                "failure_reason": reason,
            }),
        };
        call_details.push(detail);
    }

    let summary = json!({
        "request_id": bid_request.id,
        "request_errors": request_errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "telaria_call_details": call_details,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
