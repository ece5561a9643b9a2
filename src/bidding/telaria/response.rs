// src/bidding/telaria/response.rs

use tracing::{debug, warn};

use super::{err_bad_server, err_unexpected_status_code};
use crate::bidding::types::{BidType, RequestData, ResponseData, TypedBid};
use crate::errors::BidderError;
use crate::openrtb::response::BidResponse;

const STATUS_OK: u16 = 200;
const STATUS_NO_CONTENT: u16 = 204;

/// **把 Telaria 的 HTTP 响应还原为出价**
///
/// - 204：正常的无出价，不算错误
/// - 非 200：返回一个携带状态码的错误
/// - 200：解析 BidResponse，所有 seatbid 下的 bid 都标记为 video
pub(super) fn normalize(
    external_request: &RequestData,
    response: &ResponseData,
) -> (Vec<TypedBid>, Vec<BidderError>) {
    if response.status_code == STATUS_NO_CONTENT {
        debug!(imp_id = %external_request.imp_id, "telaria returned no bid");
        return (Vec::new(), Vec::new());
    }

    if response.status_code != STATUS_OK {
        warn!(imp_id = %external_request.imp_id, status = response.status_code, "unexpected telaria status");
        return (
            Vec::new(),
            vec![BidderError::BadServerResponse(err_unexpected_status_code(
                response.status_code,
            ))],
        );
    }

    let bid_response: BidResponse = match serde_json::from_slice(&response.body) {
        Ok(bid_response) => bid_response,
        Err(err) => {
            warn!(imp_id = %external_request.imp_id, error = %err, "undecodable telaria response");
            return (
                Vec::new(),
                vec![BidderError::BadServerResponse(err_bad_server(&err))],
            );
        }
    };

    // seatbid 可能为空，容量按实际 bid 总数计算
    let bid_count = bid_response.seatbid.iter().map(|sb| sb.bid.len()).sum();
    let mut bids = Vec::with_capacity(bid_count);
    for seat_bid in bid_response.seatbid {
        bids.extend(seat_bid.bid.into_iter().map(|bid| TypedBid {
            bid,
            bid_type: BidType::Video,
        }));
    }

    debug!(imp_id = %external_request.imp_id, bids = bids.len(), "telaria bids normalized");
    (bids, Vec::new())
}
