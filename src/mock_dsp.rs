use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, serve, Json, Router};
use rand::Rng;
use std::collections::HashMap;
use tokio::net::TcpListener;
use tracing::info;

use telaria_adapter::openrtb::response::{Bid, BidResponse, SeatBid};

/// 未配置 floor 时的出价基准
const DEFAULT_FLOOR: f64 = 1.0;

/// 模拟 Telaria 竞价接口
/// 没有 adCode 时返回 204，否则按 floor 乘以随机系数出价，并返回一段 VAST。
async fn handle_telaria_bid(Query(params): Query<HashMap<String, String>>) -> Response {
    info!(?params, "Mock Telaria received request");

    let Some(ad_code) = params.get("adCode") else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let floor = params
        .get("floor")
        .and_then(|f| f.parse::<f64>().ok())
        .unwrap_or(DEFAULT_FLOOR);
    // 视频广告通常投入较高成本，使用较高的 multiplier 范围
    let multiplier = rand::thread_rng().gen_range(1.0..2.5);

    let bid_id = uuid::Uuid::new_v4().to_string();
    let (w, h) = (
        params.get("playerWidth").and_then(|w| w.parse().ok()),
        params.get("playerHeight").and_then(|h| h.parse().ok()),
    );

    let adm = format!(
        r#"<VAST version="3.0">
  <Ad id="{bid_id}">
    <InLine>
      <AdSystem>Mock Telaria</AdSystem>
      <AdTitle>{ad_code}</AdTitle>
      <Impression><![CDATA[http://telaria-tracker.local/impression?bid={bid_id}]]></Impression>
      <Creatives>
        <Creative>
          <Linear>
            <Duration>00:00:30</Duration>
            <MediaFiles>
              <MediaFile delivery="progressive" type="video/mp4" width="640" height="360" bitrate="500">
                http://example.com/video.mp4
              </MediaFile>
            </MediaFiles>
          </Linear>
        </Creative>
      </Creatives>
    </InLine>
  </Ad>
</VAST>"#,
        bid_id = bid_id,
        ad_code = ad_code
    );

    let bid = Bid {
        id: bid_id,
        impid: ad_code.clone(),
        price: floor * multiplier,
        adm: Some(adm),
        crid: Some(format!("crid-{}", ad_code)),
        w,
        h,
        ..Default::default()
    };

    Json(BidResponse {
        id: uuid::Uuid::new_v4().to_string(),
        seatbid: vec![SeatBid {
            bid: vec![bid],
            seat: Some("mock_telaria".to_string()),
            group: Some(0),
        }],
        cur: Some("USD".to_string()),
        ..Default::default()
    })
    .into_response()
}

/// 启动 Mock Telaria 服务
/// 监听器由调用方提前绑定，路由为 `GET /bid`
pub async fn start_mock_dsp_server(listener: TcpListener) -> std::io::Result<()> {
    let app = Router::new().route("/bid", get(handle_telaria_bid));

    info!("Mock Telaria running at http://{}", listener.local_addr()?);
    serve(listener, app).await
}
