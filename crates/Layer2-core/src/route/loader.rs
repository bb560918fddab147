//! Remote loader - manifest를 받아 remote root 컴포넌트를 준비하는 외부 협력자
//!
//! 이름별 로더 매핑(`LoaderMap`)을 호출자가 제공한다. remote 추가는 데이터 변경만으로 끝난다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mfe_foundation::{Error as FoundationError, RegistryStore, RemoteDescriptor};
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

// ============================================================================
// LoadError
// ============================================================================

/// remote 로딩 에러
///
/// 공유 future를 건너야 하므로 `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// 연결 실패, DNS, 타임아웃 등
    #[error("Network error: {0}")]
    Network(String),

    /// 4xx/5xx
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// fetch할 수 없는 URL (상대 경로 등)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// manifest 파싱 실패
    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    /// `App` 등 필요한 모듈이 노출되지 않음
    #[error("Remote does not expose '{0}'")]
    MissingExpose(String),

    /// 이름에 대응하는 로더 없음
    #[error("No loader registered for remote '{0}'")]
    LoaderMissing(String),

    /// manifest URL 해석 실패
    #[error("Manifest resolution failed: {0}")]
    Resolution(String),

    #[error("{0}")]
    Failed(String),
}

impl LoadError {
    /// foundation 에러로 변환
    pub fn into_error(self, remote: impl Into<String>) -> FoundationError {
        FoundationError::load(remote, self.to_string())
    }
}

// ============================================================================
// LoadRequest / RemoteModule
// ============================================================================

/// 로더에 넘기는 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// remote 이름
    pub name: String,

    /// 해석된 manifest URL
    pub manifest_url: String,

    /// root 컴포넌트에 넘길 basePath (= routePath)
    pub base_path: String,

    /// 노출 모듈 이름 (`App`)
    pub expose: String,
}

/// 로드 완료된 remote root 컴포넌트
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModule {
    pub name: String,
    pub manifest_url: String,
    /// 실제 엔트리 스크립트 URL
    pub entry_url: String,
    pub exposed: String,
    pub base_path: String,
    pub loaded_at: DateTime<Utc>,
}

impl RemoteModule {
    pub fn new(request: &LoadRequest, entry_url: impl Into<String>) -> Self {
        Self {
            name: request.name.clone(),
            manifest_url: request.manifest_url.clone(),
            entry_url: entry_url.into(),
            exposed: request.expose.clone(),
            base_path: request.base_path.clone(),
            loaded_at: Utc::now(),
        }
    }
}

// ============================================================================
// RemoteLoader trait
// ============================================================================

/// remote 모듈 로더
#[async_trait]
pub trait RemoteLoader: Send + Sync {
    async fn load(&self, request: &LoadRequest) -> Result<RemoteModule, LoadError>;
}

/// 비동기 함수를 로더로
pub struct FnLoader<F> {
    f: F,
}

/// `Fn(LoadRequest) -> Future` 를 `RemoteLoader`로 감싼다
pub fn loader_fn<F, Fut>(f: F) -> Arc<dyn RemoteLoader>
where
    F: Fn(LoadRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RemoteModule, LoadError>> + Send + 'static,
{
    Arc::new(FnLoader { f })
}

#[async_trait]
impl<F, Fut> RemoteLoader for FnLoader<F>
where
    F: Fn(LoadRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RemoteModule, LoadError>> + Send + 'static,
{
    async fn load(&self, request: &LoadRequest) -> Result<RemoteModule, LoadError> {
        (self.f)(request.clone()).await
    }
}

// ============================================================================
// LoaderMap - name → loader
// ============================================================================

/// 이름별 로더 매핑
#[derive(Clone, Default)]
pub struct LoaderMap {
    loaders: HashMap<String, Arc<dyn RemoteLoader>>,
}

impl LoaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 등록 목록으로 채운다
    pub fn from_store(
        store: &RegistryStore,
        factory: impl Fn(&RemoteDescriptor) -> Arc<dyn RemoteLoader>,
    ) -> Self {
        let loaders = store
            .all()
            .iter()
            .map(|descriptor| (descriptor.name.clone(), factory(descriptor)))
            .collect();
        Self { loaders }
    }

    /// 모든 remote에 같은 로더
    pub fn uniform(store: &RegistryStore, loader: Arc<dyn RemoteLoader>) -> Self {
        Self::from_store(store, |_| Arc::clone(&loader))
    }

    pub fn with_loader(mut self, name: impl Into<String>, loader: Arc<dyn RemoteLoader>) -> Self {
        self.loaders.insert(name.into(), loader);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn RemoteLoader>> {
        self.loaders.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }

    /// 로더가 없는 remote 이름 (등록 순서)
    pub fn missing<'a>(&'a self, store: &'a RegistryStore) -> impl Iterator<Item = &'a str> + 'a {
        store.names().filter(move |name| !self.loaders.contains_key(*name))
    }
}

impl std::fmt::Debug for LoaderMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.loaders.keys().collect();
        names.sort();
        f.debug_struct("LoaderMap").field("remotes", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LoadRequest {
        LoadRequest {
            name: "mfe1".into(),
            manifest_url: "http://localhost:3001/mf-manifest.json".into(),
            base_path: "/mfe1".into(),
            expose: "App".into(),
        }
    }

    #[tokio::test]
    async fn test_loader_fn() {
        let loader = loader_fn(|req: LoadRequest| async move {
            Ok(RemoteModule::new(&req, "http://localhost:3001/remoteEntry.js"))
        });

        let module = loader.load(&request()).await.unwrap();
        assert_eq!(module.name, "mfe1");
        assert_eq!(module.base_path, "/mfe1");
        assert_eq!(module.exposed, "App");
    }

    #[test]
    fn test_loader_map_from_store() {
        let store = RegistryStore::register(vec![
            RemoteDescriptor::new("mfe1", "One", "/mfe1", 3001),
            RemoteDescriptor::new("mfe2", "Two", "/mfe2", 3002),
        ])
        .unwrap();
        let loader = loader_fn(|_req: LoadRequest| async move {
            Err::<RemoteModule, _>(LoadError::Failed("unused".into()))
        });

        let map = LoaderMap::uniform(&store, loader);
        assert_eq!(map.len(), 2);
        assert!(map.get("mfe2").is_some());
        assert_eq!(map.missing(&store).count(), 0);

        let partial = LoaderMap::new().with_loader("mfe1", map.get("mfe1").unwrap());
        assert_eq!(partial.missing(&store).collect::<Vec<_>>(), vec!["mfe2"]);
    }

    #[test]
    fn test_load_error_conversion() {
        let err = LoadError::Status {
            status: 404,
            url: "http://x.test/mf-manifest.json".into(),
        }
        .into_error("mfe1");
        assert!(err.is_retryable());
        assert!(err.to_string().contains("HTTP 404"));
    }
}
