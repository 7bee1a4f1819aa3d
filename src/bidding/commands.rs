/// 입찰 관련 커맨드 처리
/// 0. 금액 형식 검사
/// 1. 입찰 하한선 검사 (저장소 트랜잭션 안에서 호출)
/// 2. 입찰
// region:    --- Imports
use crate::auction::model::{Bid, Listing, User};
use crate::error::AppError;
use crate::store::AuctionStore;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands
/// 입찰 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceBidCommand {
    pub amount: Decimal,
}

/// 금액 컬럼 NUMERIC(12, 2) 의 소수 자릿수
pub const AMOUNT_SCALE: u32 = 2;

/// 금액 컬럼 NUMERIC(12, 2) 에 들어가지 않는 첫 값 (10^10)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0x540B_E400, 2, 0, false, 0); // 10_000_000_000

/// 0. 금액 형식 검사
/// 저장 시 반올림되거나 넘치는 금액은 하한선 비교 전에 거절한다.
pub fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(AppError::Validation(format!(
            "Amount must have at most {AMOUNT_SCALE} decimal places."
        )));
    }
    if amount >= MAX_AMOUNT {
        return Err(AppError::Validation(format!(
            "Amount must be less than {MAX_AMOUNT}."
        )));
    }
    Ok(())
}

/// 1. 입찰 하한선 검사
/// 현재 입찰이 없으면 시작가, 있으면 현재 입찰가를 초과해야 한다 (같으면 거절).
pub fn check_bid(listing: &Listing, amount: Decimal) -> Result<(), AppError> {
    validate_amount(amount)?;
    let floor = listing.floor();
    if amount > floor {
        Ok(())
    } else {
        Err(AppError::BidRejected { floor })
    }
}

/// 2. 입찰
pub async fn handle_place_bid(
    store: &dyn AuctionStore,
    listing_name: &str,
    bidder: &User,
    cmd: PlaceBidCommand,
) -> Result<Bid, AppError> {
    info!(
        "{:<12} --> 입찰 요청 처리 시작: listing={} bidder={} {:?}",
        "Command", listing_name, bidder.id, cmd
    );

    validate_amount(cmd.amount)?;

    match store.place_bid(listing_name, bidder.id, cmd.amount).await {
        Ok(bid) => {
            info!(
                "{:<12} --> 입찰 성공: listing={} value={}",
                "Command", listing_name, bid.value
            );
            Ok(bid)
        }
        Err(AppError::BidRejected { floor }) => {
            warn!(
                "{:<12} --> 입찰 거절: 금액 {} <= 하한선 {}",
                "Command", cmd.amount, floor
            );
            Err(AppError::BidRejected { floor })
        }
        Err(e) => Err(e),
    }
}

// endregion: --- Commands

// endregion: --- Tests
