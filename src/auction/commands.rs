/// 리스팅 생성 커맨드 처리
// region:    --- Imports
use crate::auction::model::{Listing, User};
use crate::bidding::commands::validate_amount;
use crate::error::AppError;
use crate::store::{AuctionStore, NewListing};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

/// 이미지가 없을 때 사용하는 기본 이미지
pub const DEFAULT_IMAGE: &str = "/images/default.png";

/// 리스팅 이름 최대 길이 (스키마와 동일)
const MAX_NAME_LEN: usize = 64;

/// 리스팅 생성 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateListingCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub starting_bid: Decimal,
    pub image: Option<String>,
}

/// 리스팅 생성
pub async fn handle_create_listing(
    store: &dyn AuctionStore,
    creator: &User,
    cmd: CreateListingCommand,
) -> Result<Listing, AppError> {
    let name = cmd.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Listing name must not be empty.".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!(
            "Listing name must be at most {MAX_NAME_LEN} characters."
        )));
    }
    if cmd.starting_bid <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Starting bid must be greater than zero.".to_string(),
        ));
    }
    validate_amount(cmd.starting_bid)?;

    let image = cmd
        .image
        .filter(|image| !image.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());

    let listing = store
        .create_listing(NewListing {
            name: name.to_string(),
            description: cmd.description,
            starting_bid: cmd.starting_bid,
            creator_id: creator.id,
            image,
        })
        .await?;

    info!(
        "{:<12} --> 리스팅 생성: id={} name={} starting_bid={}",
        "Command", listing.id, listing.name, listing.starting_bid
    );
    Ok(listing)
}
