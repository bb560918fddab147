//! Environment signal - 빌드/배포 파이프라인이 정하는 실행 환경

use serde::{Deserialize, Serialize};

/// 실행 환경
///
/// `production`은 런타임에 계산하지 않고 파이프라인이 넘겨준다.
/// `base_origin`이 빈 문자열이면 "현재 origin" (상대 URL).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub production: bool,

    #[serde(default)]
    pub base_origin: String,
}

impl Environment {
    pub fn development() -> Self {
        Self::default()
    }

    pub fn production(base_origin: impl Into<String>) -> Self {
        Self {
            production: true,
            base_origin: base_origin.into(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.production
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.production {
            if self.base_origin.is_empty() {
                write!(f, "production (current origin)")
            } else {
                write!(f, "production ({})", self.base_origin)
            }
        } else {
            write!(f, "development")
        }
    }
}
