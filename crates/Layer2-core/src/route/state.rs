//! Mount state - remote 마운트 하나의 상태 머신
//!
//! `Idle → Loading → {Ready | Failed}`, `Failed → Loading` (retry).
//! `Ready`는 shell이 내려갈 때까지 종착 상태.

use super::loader::{LoadError, RemoteModule};
use std::sync::Arc;

/// 마운트 상태
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountState {
    /// 아직 로드 요청 없음
    Idle,

    /// fetch 진행 중 (로딩 placeholder)
    Loading,

    /// root 컴포넌트 준비 완료
    Ready(Arc<RemoteModule>),

    /// 실패 (retry 가능한 에러 화면)
    Failed(LoadError),
}

impl Default for MountState {
    fn default() -> Self {
        Self::Idle
    }
}

impl MountState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// retry 가능 여부
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn module(&self) -> Option<&Arc<RemoteModule>> {
        match self {
            Self::Ready(module) => Some(module),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// 허용된 전이인지
    pub fn can_transition_to(&self, next: &MountState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Loading)
                | (Self::Loading, Self::Ready(_))
                | (Self::Loading, Self::Failed(_))
                | (Self::Failed(_), Self::Loading)
        )
    }
}

impl std::fmt::Display for MountState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Ready(_) => write!(f, "ready"),
            Self::Failed(_) => write!(f, "failed"),
        }
    }
}
