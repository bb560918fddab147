//! Config - shell 설정
//!
//! - `platform`: 통합 설정 (mfe.json)
//! - `environment`: 프로덕션 여부 + base origin

mod environment;
mod platform;

pub use environment::Environment;
pub use platform::{
    LoaderConfig, PlatformConfig, ENV_BASE_ORIGIN, ENV_PRODUCTION, PLATFORM_CONFIG_FILE,
};
