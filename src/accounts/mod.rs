/// 회원 가입 / 로그인
/// 세션 관리는 외부 게이트웨이 담당, 여기서는 자격 증명 확인까지만 한다.
// region:    --- Imports
use crate::auction::model::User;
use crate::error::AppError;
use crate::store::AuctionStore;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Commands
/// 회원 가입 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegisterCommand {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    pub confirmation: String,
}

/// 로그인 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// argon2 는 CPU 를 오래 점유하므로 블로킹 스레드에서 실행
async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Credentials(e.to_string()))
    })
    .await
    .map_err(|e| AppError::Credentials(e.to_string()))?
}

async fn verify_password(password: String, password_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || {
        PasswordHash::new(&password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    })
    .await
    .map_err(|e| AppError::Credentials(e.to_string()))
}

/// 회원 가입
pub async fn handle_register(
    store: &dyn AuctionStore,
    cmd: RegisterCommand,
) -> Result<User, AppError> {
    let username = cmd.username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("Username must not be empty.".to_string()));
    }
    if cmd.password != cmd.confirmation {
        return Err(AppError::Validation("Passwords must match.".to_string()));
    }

    let password_hash = hash_password(cmd.password).await?;
    let user = store.create_user(username, &cmd.email, &password_hash).await?;
    info!("{:<12} --> 회원 가입: id={} username={}", "Command", user.id, user.username);
    Ok(user)
}

/// 로그인 (자격 증명 확인)
pub async fn handle_login(store: &dyn AuctionStore, cmd: LoginCommand) -> Result<User, AppError> {
    let invalid = || AppError::Unauthorized("Invalid username and/or password.".to_string());

    let user = store
        .find_user_by_username(cmd.username.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(cmd.password, user.password_hash.clone()).await? {
        warn!("{:<12} --> 로그인 실패: username={}", "Command", user.username);
        return Err(invalid());
    }

    info!("{:<12} --> 로그인: id={}", "Command", user.id);
    Ok(user)
}

// endregion: --- Commands
