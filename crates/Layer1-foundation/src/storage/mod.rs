//! Storage module for the MFE shell
//!
//! - `json`: JSON - 범용 파일 저장/로드 (설정, 레지스트리, 영속 override)

mod json;

// JSON Storage (범용)
pub use json::{JsonStore, APP_DIR_NAME};
