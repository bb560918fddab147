//! Module Federation 빌드 설정 생성
//!
//! remote 쪽 (`exposes`)과 shell 쪽 (`remotes`) 설정 객체를 고정된 스키마로 만든다.

use crate::manifest::{resolve, MANIFEST_FILE_NAME};
use mfe_foundation::{Environment, RegistryStore, RemoteDescriptor, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// remote가 노출하는 root 모듈 이름
pub const EXPOSED_APP: &str = "App";

/// `exposes` 키 (`./App`)
pub const EXPOSED_APP_KEY: &str = "./App";

/// 기본 엔트리 파일명
pub const REMOTE_ENTRY_FILE: &str = "remoteEntry.js";

/// shell 호스트 이름
pub const SHELL_NAME: &str = "shell";

/// 기본 singleton 공유 패키지
const DEFAULT_SHARED: &[&str] = &["react", "react-dom", "react-router-dom"];

pub use mfe_foundation::federation_name;

// ============================================================================
// SharedDependency
// ============================================================================

/// 공유 의존성 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDependency {
    #[serde(default)]
    pub singleton: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_version: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub eager: bool,
}

impl SharedDependency {
    pub fn singleton() -> Self {
        Self {
            singleton: true,
            required_version: None,
            eager: false,
        }
    }

    pub fn required_version(mut self, version: impl Into<String>) -> Self {
        self.required_version = Some(version.into());
        self
    }

    pub fn eager(mut self) -> Self {
        self.eager = true;
        self
    }
}

fn default_shared() -> BTreeMap<String, SharedDependency> {
    DEFAULT_SHARED
        .iter()
        .map(|pkg| (pkg.to_string(), SharedDependency::singleton()))
        .collect()
}

// ============================================================================
// RemoteFederationConfig
// ============================================================================

/// remote 빌드용 federation 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFederationConfig {
    pub name: String,
    pub filename: String,
    pub exposes: BTreeMap<String, String>,
    pub shared: BTreeMap<String, SharedDependency>,
    pub manifest: bool,
}

impl RemoteFederationConfig {
    /// 기본값: `./App` → `./src/App`, react 계열 singleton, manifest 생성
    pub fn for_remote(descriptor: &RemoteDescriptor) -> Self {
        let mut exposes = BTreeMap::new();
        exposes.insert(EXPOSED_APP_KEY.to_string(), "./src/App".to_string());

        Self {
            name: federation_name(&descriptor.name),
            filename: REMOTE_ENTRY_FILE.to_string(),
            exposes,
            shared: default_shared(),
            manifest: true,
        }
    }

    pub fn expose(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.exposes.insert(key.into(), path.into());
        self
    }

    pub fn share(mut self, package: impl Into<String>, dependency: SharedDependency) -> Self {
        self.shared.insert(package.into(), dependency);
        self
    }
}

// ============================================================================
// ShellFederationConfig
// ============================================================================

/// shell 빌드용 federation 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellFederationConfig {
    pub name: String,
    /// federation 이름 → `<name>@<manifestUrl>`
    pub remotes: BTreeMap<String, String>,
    pub shared: BTreeMap<String, SharedDependency>,
}

impl ShellFederationConfig {
    /// 레지스트리 전체로 생성 (override 없이 환경 기준 URL)
    pub fn from_store(store: &RegistryStore, environment: &Environment) -> Result<Self> {
        let mut remotes = BTreeMap::new();
        for descriptor in store.all() {
            let url = resolve(&descriptor.name, store, None, environment)?;
            let fed_name = descriptor.federation_name();
            remotes.insert(fed_name.clone(), format!("{}@{}", fed_name, url));
        }

        Ok(Self {
            name: SHELL_NAME.to_string(),
            remotes,
            shared: default_shared(),
        })
    }

    pub fn share(mut self, package: impl Into<String>, dependency: SharedDependency) -> Self {
        self.shared.insert(package.into(), dependency);
        self
    }

    /// 모든 remote가 같은 manifest 파일명을 가리키는지
    pub fn uses_manifest(&self) -> bool {
        self.remotes.values().all(|entry| entry.ends_with(MANIFEST_FILE_NAME))
    }
}
