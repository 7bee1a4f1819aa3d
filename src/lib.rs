// region:    --- Imports
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
// endregion: --- Imports

// region:    --- Modules
pub mod accounts;
pub mod auction;
pub mod bidding;
pub mod comments;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod query;
pub mod state;
pub mod store;
pub mod watchlist;
// endregion: --- Modules

// region:    --- Router
/// 라우터 설정
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::handle_get_listings))
        .route("/health", get(handlers::handle_health))
        .route("/register", post(handlers::handle_register_user))
        .route("/login", post(handlers::handle_login_user))
        .route("/listings", post(handlers::handle_create))
        .route("/listing/:name", get(handlers::handle_get_listing))
        .route("/listing/:name/bids", get(handlers::handle_get_listing_bids))
        .route("/listing/:name/bid", post(handlers::handle_bid))
        .route("/listing/:name/comment", post(handlers::handle_comment))
        .route("/watchlist", get(handlers::handle_get_watchlist))
        .route("/watchlist/:name/add", post(handlers::handle_watchlist_add))
        .route(
            "/watchlist/:name/remove",
            post(handlers::handle_watchlist_remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(state.config.body_limit_bytes))
        .with_state(state)
}
// endregion: --- Router
