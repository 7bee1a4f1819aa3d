/// 모든 리스팅 조회
pub const GET_ALL_LISTINGS: &str = r#"
    SELECT l.id, l.name, l.description, l.starting_bid, l.current_bid_id,
           b.value AS current_bid_value, l.creator_id, l.image, l.created_at
    FROM listings l
    LEFT JOIN bids b ON b.id = l.current_bid_id
    ORDER BY l.created_at DESC, l.id DESC
"#;

/// 리스팅 조회 (이름)
pub const GET_LISTING: &str = r#"
    SELECT l.id, l.name, l.description, l.starting_bid, l.current_bid_id,
           b.value AS current_bid_value, l.creator_id, l.image, l.created_at
    FROM listings l
    LEFT JOIN bids b ON b.id = l.current_bid_id
    WHERE l.name = $1
"#;

/// 리스팅 행 잠금 (같은 리스팅에 대한 입찰 직렬화)
/// 잠금 후 GET_LISTING 을 다시 실행해야 최신 현재 입찰가가 보인다.
pub const LOCK_LISTING: &str = "SELECT id FROM listings WHERE name = $1 FOR UPDATE";

/// 관심목록 리스팅 조회 (추가 순서)
pub const GET_WATCHED_LISTINGS: &str = r#"
    SELECT l.id, l.name, l.description, l.starting_bid, l.current_bid_id,
           b.value AS current_bid_value, l.creator_id, l.image, l.created_at
    FROM watchlist w
    JOIN listings l ON l.id = w.listing_id
    LEFT JOIN bids b ON b.id = l.current_bid_id
    WHERE w.user_id = $1
    ORDER BY w.created_at ASC, w.id ASC
"#;

/// 리스팅 생성
pub const INSERT_LISTING: &str = r#"
    INSERT INTO listings (name, description, starting_bid, creator_id, image)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, name, description, starting_bid, current_bid_id,
              NULL::NUMERIC AS current_bid_value, creator_id, image, created_at
"#;

/// 리스팅 아이디 조회
pub const GET_LISTING_ID: &str = "SELECT id FROM listings WHERE name = $1";

/// 입찰 생성
pub const INSERT_BID: &str = r#"
    INSERT INTO bids (listing_id, buyer_id, value)
    VALUES ($1, $2, $3)
    RETURNING id, listing_id, buyer_id, value, created_at
"#;

/// 현재 입찰 포인터 갱신
pub const UPDATE_CURRENT_BID: &str = "UPDATE listings SET current_bid_id = $1 WHERE id = $2";

/// 리스팅 입찰 이력 조회
pub const GET_LISTING_BIDS: &str = r#"
    SELECT id, listing_id, buyer_id, value, created_at
    FROM bids
    WHERE listing_id = $1
    ORDER BY id DESC
"#;

/// 관심목록 추가 (중복 무시)
pub const INSERT_WATCHLIST: &str = r#"
    INSERT INTO watchlist (user_id, listing_id)
    VALUES ($1, $2)
    ON CONFLICT (user_id, listing_id) DO NOTHING
"#;

/// 관심목록 삭제
pub const DELETE_WATCHLIST: &str = "DELETE FROM watchlist WHERE user_id = $1 AND listing_id = $2";

/// 관심목록 포함 여부
pub const IS_WATCHING: &str =
    "SELECT EXISTS (SELECT 1 FROM watchlist WHERE user_id = $1 AND listing_id = $2)";

/// 댓글 생성
pub const INSERT_COMMENT: &str = r#"
    INSERT INTO comments (listing_id, user_id, content)
    VALUES ($1, $2, $3)
    RETURNING id, listing_id, user_id, content, created_at
"#;

/// 리스팅 댓글 조회 (작성 순서)
/// created_at 은 동시 작성 시 커밋 순서와 어긋날 수 있어 id 로 정렬한다.
pub const GET_LISTING_COMMENTS: &str = r#"
    SELECT id, listing_id, user_id, content, created_at
    FROM comments
    WHERE listing_id = $1
    ORDER BY id ASC
"#;

/// 사용자 생성
pub const INSERT_USER: &str = r#"
    INSERT INTO users (username, email, password_hash)
    VALUES ($1, $2, $3)
    RETURNING id, username, email, password_hash, created_at
"#;

/// 사용자 조회 (아이디)
pub const GET_USER: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1";

/// 사용자 조회 (이름)
pub const GET_USER_BY_USERNAME: &str =
    "SELECT id, username, email, password_hash, created_at FROM users WHERE username = $1";
