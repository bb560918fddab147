//! Route Binder - 레지스트리 항목마다 마운트 경로 + lazy 로더
//!
//! 이름별 분기 없이 `LoaderMap`에서 로더를 찾는다.

use super::cache::{LoadCache, LoadResult, SharedLoad};
use super::loader::{LoadError, LoadRequest, LoaderMap, RemoteLoader};
use super::mount::RemoteMount;
use crate::federation::EXPOSED_APP;
use crate::manifest::ManifestResolver;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// 라우트 prefix 접미사
pub const ROUTE_WILDCARD: &str = "/*";

// ============================================================================
// RouteHandler
// ============================================================================

/// remote 하나의 lazy 로더
#[derive(Clone)]
pub struct RouteHandler {
    name: String,
    base_path: String,
    resolver: Arc<ManifestResolver>,
    loader: Option<Arc<dyn RemoteLoader>>,
    cache: Arc<LoadCache>,
}

impl RouteHandler {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// 새 마운트 (Idle)
    pub fn mount(&self) -> RemoteMount {
        RemoteMount::new(self.clone())
    }

    /// manifest URL을 해석하고 캐시된 로드를 공유하거나 새로 시작
    pub(crate) fn start(&self, retry: bool) -> Result<SharedLoad, LoadError> {
        let loader = self
            .loader
            .clone()
            .ok_or_else(|| LoadError::LoaderMissing(self.name.clone()))?;
        let resolved = self
            .resolver
            .resolve(&self.name)
            .map_err(|e| LoadError::Resolution(e.to_string()))?;

        let request = LoadRequest {
            name: self.name.clone(),
            manifest_url: resolved.url,
            base_path: self.base_path.clone(),
            expose: EXPOSED_APP.to_string(),
        };
        let source = resolved.source;

        let start = move || -> BoxFuture<'static, LoadResult> {
            async move {
                tracing::info!(
                    "Loading remote '{}' from {} ({})",
                    request.name,
                    request.manifest_url,
                    source
                );
                let result = loader.load(&request).await.map(Arc::new);
                if result.is_ok() {
                    tracing::info!("Remote '{}' ready", request.name);
                }
                result
            }
            .boxed()
        };

        Ok(if retry {
            self.cache.retry(&self.name, start)
        } else {
            self.cache.get_or_start(&self.name, start)
        })
    }
}

impl std::fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteHandler")
            .field("name", &self.name)
            .field("base_path", &self.base_path)
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}

// ============================================================================
// RouteBinding / RouteTable
// ============================================================================

/// 라우트 하나
#[derive(Debug, Clone)]
pub struct RouteBinding {
    /// `<routePath>/*`
    pub match_prefix: String,
    pub route_path: String,
    pub handler: RouteHandler,
}

impl RouteBinding {
    /// `route_path` 자체 또는 그 하위 경로인지
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.route_path.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// 등록 순서의 라우트 목록
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    bindings: Vec<RouteBinding>,
}

impl RouteTable {
    pub fn bindings(&self) -> &[RouteBinding] {
        &self.bindings
    }

    pub fn get(&self, name: &str) -> Option<&RouteBinding> {
        self.bindings.iter().find(|b| b.handler.name() == name)
    }

    /// 경로에 맞는 라우트 (가장 긴 route path 우선)
    ///
    /// query/fragment는 무시한다.
    pub fn match_path(&self, path: &str) -> Option<&RouteBinding> {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        self.bindings
            .iter()
            .filter(|b| b.matches(path))
            .max_by_key(|b| b.route_path.len())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ============================================================================
// RouteBinder
// ============================================================================

/// 레지스트리 → 라우트 테이블
pub struct RouteBinder {
    resolver: Arc<ManifestResolver>,
    loaders: LoaderMap,
    cache: Arc<LoadCache>,
}

impl RouteBinder {
    pub fn new(resolver: ManifestResolver, loaders: LoaderMap) -> Self {
        Self {
            resolver: Arc::new(resolver),
            loaders,
            cache: LoadCache::shared(),
        }
    }

    /// 세션 캐시 공유 (navigation마다 binder를 새로 만들 때)
    pub fn with_cache(mut self, cache: Arc<LoadCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<LoadCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &ManifestResolver {
        &self.resolver
    }

    /// 레지스트리의 모든 항목을 라우트로
    pub fn bind(&self) -> RouteTable {
        let store = self.resolver.store();
        for name in self.loaders.missing(store) {
            tracing::warn!("Remote '{}' has no loader; mounting it will fail", name);
        }

        let bindings = store
            .all()
            .iter()
            .map(|descriptor| RouteBinding {
                match_prefix: format!("{}{}", descriptor.route_path, ROUTE_WILDCARD),
                route_path: descriptor.route_path.clone(),
                handler: RouteHandler {
                    name: descriptor.name.clone(),
                    base_path: descriptor.route_path.clone(),
                    resolver: Arc::clone(&self.resolver),
                    loader: self.loaders.get(&descriptor.name),
                    cache: Arc::clone(&self.cache),
                },
            })
            .collect();

        RouteTable { bindings }
    }
}

impl std::fmt::Debug for RouteBinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteBinder")
            .field("loaders", &self.loaders)
            .field("cache", &self.cache)
            .finish()
    }
}
