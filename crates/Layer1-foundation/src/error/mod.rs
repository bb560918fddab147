//! Error types for the MFE shell
//!
//! 모든 에러를 중앙에서 관리

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// MFE shell 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // 레지스트리 관련
    // ========================================================================
    /// 중복 name/routePath 등 - 플랫폼 시작 불가
    #[error("Registration error: {0}")]
    Registration(String),

    #[error("Remote not found: {0}")]
    NotFound(String),

    // ========================================================================
    // 저장소 관련
    // ========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    // ========================================================================
    // Remote 로딩 관련
    // ========================================================================
    #[error("Remote load failed: {remote} - {message}")]
    Load { remote: String, message: String },

    // ========================================================================
    // 일반
    // ========================================================================
    #[error("Validation error: {0}")]
    Validation(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 재시도 가능한 에러인지 확인
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Load { .. })
    }

    /// Load 에러 생성 헬퍼
    pub fn load(remote: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Load {
            remote: remote.into(),
            message: message.into(),
        }
    }
}
