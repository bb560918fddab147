//! Manifest URL Resolver
//!
//! 우선순위 (먼저 맞는 것이 이긴다):
//! 1. override → `<override>/mf-manifest.json`
//! 2. production → `<baseOrigin><prodPath | routePath>/mf-manifest.json`
//! 3. development → `http://localhost:<devPort>/mf-manifest.json`
//!
//! I/O 없음. fetch는 route 모듈의 로더 몫.

use crate::overrides::{ClientHints, OverrideSet};
use mfe_foundation::{
    Environment, Error, RegistryStore, RemoteDescriptor, Result, SharedRegistry,
};
use serde::Serialize;

/// 모든 remote가 공유하는 federation manifest 파일명
///
/// 바꾸면 등록된 모든 remote와 호환이 깨진다.
pub const MANIFEST_FILE_NAME: &str = "mf-manifest.json";

/// 어떤 규칙으로 URL이 정해졌는지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    Override,
    Production,
    Development,
}

impl std::fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

/// 해석 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedManifest {
    pub name: String,
    pub url: String,
    pub source: ResolutionSource,
}

/// `name`의 manifest URL
///
/// 레지스트리에 없는 이름은 `Error::NotFound`. route를 같은 store로 만들었다면
/// 일어날 수 없으므로 배선 버그로 보고 크게 알린다.
pub fn resolve(
    name: &str,
    store: &RegistryStore,
    override_result: Option<&str>,
    environment: &Environment,
) -> Result<String> {
    resolve_detailed(name, store, override_result, environment).map(|r| r.url)
}

/// `resolve`와 같지만 적용된 규칙도 함께 반환
pub fn resolve_detailed(
    name: &str,
    store: &RegistryStore,
    override_result: Option<&str>,
    environment: &Environment,
) -> Result<ResolvedManifest> {
    let Some(descriptor) = store.lookup(name) else {
        tracing::error!("Manifest requested for unregistered remote '{}'", name);
        return Err(Error::NotFound(name.to_string()));
    };

    let (base, source) = match override_result {
        Some(target) => (target.to_string(), ResolutionSource::Override),
        None if environment.is_production() => (
            production_location(descriptor, &environment.base_origin),
            ResolutionSource::Production,
        ),
        None => (
            descriptor.dev_location(),
            ResolutionSource::Development,
        ),
    };

    Ok(ResolvedManifest {
        name: descriptor.name.clone(),
        url: manifest_url(&base),
        source,
    })
}

/// base URL 뒤에 manifest 파일명
pub fn manifest_url(base: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), MANIFEST_FILE_NAME)
}

fn production_location(descriptor: &RemoteDescriptor, base_origin: &str) -> String {
    let location = descriptor.effective_prod_location();
    if location.contains("://") {
        return location.to_string();
    }

    let origin = base_origin.trim_end_matches('/');
    if location.starts_with('/') {
        format!("{}{}", origin, location)
    } else {
        format!("{}/{}", origin, location)
    }
}

// ============================================================================
// ManifestResolver - store + 환경 + hint 스냅샷
// ============================================================================

/// 한 navigation 동안 쓰는 resolver
///
/// 캐시하지 않는다. 호출마다 다시 계산한다.
#[derive(Debug, Clone)]
pub struct ManifestResolver {
    store: SharedRegistry,
    environment: Environment,
    overrides: OverrideSet,
}

impl ManifestResolver {
    pub fn new(store: SharedRegistry, environment: Environment) -> Self {
        Self {
            store,
            environment,
            overrides: OverrideSet::default(),
        }
    }

    pub fn with_hints(mut self, hints: &ClientHints) -> Self {
        self.overrides = hints.overrides();
        self
    }

    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn store(&self) -> &SharedRegistry {
        &self.store
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    pub fn resolve(&self, name: &str) -> Result<ResolvedManifest> {
        resolve_detailed(
            name,
            &self.store,
            self.overrides.location(name),
            &self.environment,
        )
    }

    pub fn resolve_url(&self, name: &str) -> Result<String> {
        self.resolve(name).map(|r| r.url)
    }
}
