//! Federation - Module Federation 설정 생성 + manifest 형식
//!
//! - `config`: 빌드 타임 remote/shell 설정 객체
//! - `manifest`: `mf-manifest.json` 파싱

mod config;
mod manifest;

pub use config::{
    federation_name, RemoteFederationConfig, SharedDependency, ShellFederationConfig,
    EXPOSED_APP, EXPOSED_APP_KEY, REMOTE_ENTRY_FILE, SHELL_NAME,
};
pub use manifest::{FederationManifest, ManifestExpose, ManifestMetaData, RemoteEntry};
