// region:    --- Imports
use super::{listing_not_found, AuctionStore, NewListing};
use crate::auction::model::{Bid, Comment, Listing, User, WatchlistEntry};
use crate::bidding::commands::check_bid;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

// endregion: --- Imports

// region:    --- Memory Store
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    listings: Vec<Listing>,
    bids: Vec<Bid>,
    watchlist: Vec<WatchlistEntry>,
    comments: Vec<Comment>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn listing_index(&self, name: &str) -> Result<usize, AppError> {
        self.listings
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| listing_not_found(name))
    }
}

/// 인메모리 저장소 구현체
/// 모든 연산이 하나의 뮤텍스 안에서 실행되므로 검사와 변경이 원자적이다.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuctionStore for MemoryStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AppError::DuplicateKey("Username already taken.".to_string()));
        }

        let user = User {
            id: tables.next_id(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_listing(&self, listing: NewListing) -> Result<Listing, AppError> {
        let mut tables = self.tables.lock().await;
        if tables.listings.iter().any(|l| l.name == listing.name) {
            return Err(AppError::DuplicateKey(
                "A listing with this name already exists.".to_string(),
            ));
        }

        let listing = Listing {
            id: tables.next_id(),
            name: listing.name,
            description: listing.description,
            starting_bid: listing.starting_bid,
            current_bid_id: None,
            current_bid_value: None,
            creator_id: listing.creator_id,
            image: listing.image,
            created_at: Utc::now(),
        };
        tables.listings.push(listing.clone());
        Ok(listing)
    }

    async fn get_listing(&self, name: &str) -> Result<Option<Listing>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.listings.iter().find(|l| l.name == name).cloned())
    }

    async fn all_listings(&self) -> Result<Vec<Listing>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.listings.iter().rev().cloned().collect())
    }

    async fn place_bid(
        &self,
        listing_name: &str,
        bidder_id: i64,
        amount: Decimal,
    ) -> Result<Bid, AppError> {
        let mut tables = self.tables.lock().await;
        let index = tables.listing_index(listing_name)?;
        check_bid(&tables.listings[index], amount)?;

        let bid = Bid {
            id: tables.next_id(),
            listing_id: tables.listings[index].id,
            buyer_id: bidder_id,
            value: amount,
            created_at: Utc::now(),
        };
        tables.bids.push(bid.clone());

        let listing = &mut tables.listings[index];
        listing.current_bid_id = Some(bid.id);
        listing.current_bid_value = Some(bid.value);
        Ok(bid)
    }

    async fn listing_bids(&self, listing_id: i64) -> Result<Vec<Bid>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .bids
            .iter()
            .rev()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn add_to_watchlist(&self, user_id: i64, listing_name: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        let index = tables.listing_index(listing_name)?;
        let listing_id = tables.listings[index].id;
        if tables
            .watchlist
            .iter()
            .any(|w| w.user_id == user_id && w.listing_id == listing_id)
        {
            return Ok(false);
        }

        let entry = WatchlistEntry {
            id: tables.next_id(),
            user_id,
            listing_id,
            created_at: Utc::now(),
        };
        tables.watchlist.push(entry);
        Ok(true)
    }

    async fn remove_from_watchlist(
        &self,
        user_id: i64,
        listing_name: &str,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;
        let index = tables.listing_index(listing_name)?;
        let listing_id = tables.listings[index].id;
        let before = tables.watchlist.len();
        tables
            .watchlist
            .retain(|w| !(w.user_id == user_id && w.listing_id == listing_id));
        Ok(tables.watchlist.len() < before)
    }

    async fn watched_listings(&self, user_id: i64) -> Result<Vec<Listing>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .watchlist
            .iter()
            .filter(|w| w.user_id == user_id)
            .filter_map(|w| tables.listings.iter().find(|l| l.id == w.listing_id))
            .cloned()
            .collect())
    }

    async fn is_watching(&self, user_id: i64, listing_id: i64) -> Result<bool, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .watchlist
            .iter()
            .any(|w| w.user_id == user_id && w.listing_id == listing_id))
    }

    async fn add_comment(
        &self,
        listing_name: &str,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, AppError> {
        let mut tables = self.tables.lock().await;
        let index = tables.listing_index(listing_name)?;
        let listing_id = tables.listings[index].id;
        let comment = Comment {
            id: tables.next_id(),
            listing_id,
            user_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn listing_comments(&self, listing_id: i64) -> Result<Vec<Comment>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.listing_id == listing_id)
            .cloned()
            .collect())
    }
}
// endregion: --- Memory Store
