//! Platform Config - shell 통합 설정
//!
//! 글로벌 → 프로젝트 → 환경 변수 순으로 병합 (뒤가 우선)

use super::Environment;
use crate::registry::{RegistryStore, RemoteDescriptor, DEFAULT_DEV_PORT_FLOOR};
use crate::storage::JsonStore;
use crate::Result;
use serde::{Deserialize, Serialize};

/// 설정 파일명
pub const PLATFORM_CONFIG_FILE: &str = "mfe.json";

/// 프로덕션 여부 환경 변수
pub const ENV_PRODUCTION: &str = "MFE_PRODUCTION";

/// base origin 환경 변수
pub const ENV_BASE_ORIGIN: &str = "MFE_BASE_ORIGIN";

// ============================================================================
// Platform Config (통합)
// ============================================================================

/// MFE shell 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformConfig {
    /// 버전 (마이그레이션용)
    #[serde(default = "default_version")]
    pub version: u32,

    /// 프로덕션 빌드 여부
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production: Option<bool>,

    /// 프로덕션 manifest URL 앞에 붙는 origin
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_origin: Option<String>,

    /// 레지스트리가 비었을 때 제안할 개발 포트
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_port_floor: Option<u16>,

    /// 등록 목록
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<RemoteDescriptor>,

    /// remote 로더 설정
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl PlatformConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 + 프로젝트 + 환경 변수 병합 로드
    pub fn load() -> Result<Self> {
        let mut stores = Vec::new();
        if let Ok(global) = JsonStore::global() {
            stores.push(global);
        }
        if let Ok(project) = JsonStore::current_project() {
            stores.push(project);
        }

        let mut config = Self::load_from(&stores)?;
        config.apply_env_with(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// 주어진 저장소들을 순서대로 병합
    pub fn load_from(stores: &[JsonStore]) -> Result<Self> {
        let mut config = Self::new();
        for store in stores {
            if let Some(layer) = store.load_optional::<PlatformConfig>(PLATFORM_CONFIG_FILE)? {
                tracing::debug!("Merging config from {}", store.base_dir().display());
                config.merge(layer);
            }
        }
        Ok(config)
    }

    /// 환경 변수 적용 (lookup 주입)
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = lookup(ENV_PRODUCTION) {
            match parse_flag(&raw) {
                Some(flag) => self.production = Some(flag),
                None => tracing::warn!("Ignoring {}={:?}: not a boolean", ENV_PRODUCTION, raw),
            }
        }
        if let Some(origin) = lookup(ENV_BASE_ORIGIN) {
            self.base_origin = Some(origin);
        }
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: PlatformConfig) {
        self.version = other.version;
        if other.production.is_some() {
            self.production = other.production;
        }
        if other.base_origin.is_some() {
            self.base_origin = other.base_origin;
        }
        if other.dev_port_floor.is_some() {
            self.dev_port_floor = other.dev_port_floor;
        }
        // 등록 목록은 통째로 교체 (항목 단위 병합은 중복을 숨긴다)
        if !other.remotes.is_empty() {
            self.remotes = other.remotes;
        }
        self.loader.merge(other.loader);
    }

    // ========================================================================
    // Derived
    // ========================================================================

    pub fn environment(&self) -> Environment {
        Environment {
            production: self.production.unwrap_or(false),
            base_origin: self.base_origin.clone().unwrap_or_default(),
        }
    }

    pub fn effective_dev_port_floor(&self) -> u16 {
        self.dev_port_floor.unwrap_or(DEFAULT_DEV_PORT_FLOOR)
    }

    /// 설정의 등록 목록으로 store 생성
    pub fn build_store(&self) -> Result<RegistryStore> {
        RegistryStore::register(self.remotes.iter().cloned())
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn production(mut self, production: bool) -> Self {
        self.production = Some(production);
        self
    }

    pub fn base_origin(mut self, origin: impl Into<String>) -> Self {
        self.base_origin = Some(origin.into());
        self
    }

    pub fn remote(mut self, remote: RemoteDescriptor) -> Self {
        self.remotes.push(remote);
        self
    }
}

// ============================================================================
// Loader Config
// ============================================================================

/// remote 로더 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    /// manifest fetch 타임아웃 (초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl LoaderConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn effective_timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(Self::DEFAULT_TIMEOUT_SECS)
    }

    fn merge(&mut self, other: LoaderConfig) {
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }
}

fn default_version() -> u32 {
    1
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
