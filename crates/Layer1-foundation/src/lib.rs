//! # mfe-foundation
//!
//! Foundation layer for the MFE shell:
//! - Error: 중앙 에러 타입
//! - Storage: JsonStore (범용 JSON 파일)
//! - Config: 통합 설정 (PlatformConfig, Environment)
//! - Registry: 불변 remote 레지스트리 (RegistryStore)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  PlatformConfig (global → project → env)                 │
//! │        │                         │                      │
//! │        ▼                         ▼                      │
//! │  RegistryStore (Arc, 읽기 전용)   Environment             │
//! │        │                                                │
//! │        ▼                                                │
//! │  mfe-core: overrides → manifest → route binder          │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod storage;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{
    Environment, LoaderConfig, PlatformConfig, ENV_BASE_ORIGIN, ENV_PRODUCTION,
    PLATFORM_CONFIG_FILE,
};

// ============================================================================
// Registry (레지스트리)
// ============================================================================
pub use registry::{
    federation_name, RegistryFile, RegistryStore, RemoteDescriptor, SharedRegistry,
    DEFAULT_DEV_PORT_FLOOR, DEV_HOST, REMOTES_FILE,
};

// ============================================================================
// Storage (저장소)
// ============================================================================
pub use storage::{JsonStore, APP_DIR_NAME};
