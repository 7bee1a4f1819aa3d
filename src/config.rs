use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

/// 서비스 설정 (환경 변수)
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// 없으면 인메모리 저장소로 동작
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub reset_database: bool,
    pub body_limit_bytes: usize,
}

impl Config {
    pub fn load() -> Result<Self, String> {
        Ok(Self {
            port: try_load("PORT", "3000")?,
            database_url: var("DATABASE_URL").ok(),
            max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            reset_database: try_load("RESET_DATABASE", "false")?,
            body_limit_bytes: try_load("BODY_LIMIT_BYTES", "20971520")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: None,
            max_connections: 5,
            reset_database: false,
            body_limit_bytes: 20 * 1024 * 1024,
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("{:<12} --> 환경 변수 {key} 없음", "Config");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, String>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{:<12} --> {key} 기본값 사용: {default}", "Config");
            default.to_string()
        })
        .parse()
        .map_err(|e| format!("Invalid {key} value: {e}"))
}
