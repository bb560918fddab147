//! Route binding 통합 테스트 - 공유 fetch, abandon, retry
//!
//! `cargo test -p mfe-core --test route_binding`

use async_trait::async_trait;
use mfe_core::{
    ClientHints, LoadError, LoadRequest, LoaderMap, ManifestResolver, MountOutcome, MountState,
    RemoteLoader, RemoteModule, RouteBinder, RouteTable,
};
use mfe_foundation::{Environment, RegistryStore, RemoteDescriptor, SharedRegistry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// 호출 수를 세는 로더 double
#[derive(Default)]
struct TestLoader {
    calls: Mutex<HashMap<String, usize>>,
    requests: Mutex<Vec<LoadRequest>>,
    failures_remaining: AtomicUsize,
    gate: Option<Notify>,
}

impl TestLoader {
    fn new() -> Self {
        Self::default()
    }

    /// `release()` 전까지 fetch가 끝나지 않는다
    fn gated() -> Self {
        Self {
            gate: Some(Notify::new()),
            ..Self::default()
        }
    }

    fn failing(mut self, times: usize) -> Self {
        self.failures_remaining = AtomicUsize::new(times);
        self
    }

    fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    fn calls(&self, name: &str) -> usize {
        self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
    }

    fn last_request(&self) -> Option<LoadRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RemoteLoader for TestLoader {
    async fn load(&self, request: &LoadRequest) -> Result<RemoteModule, LoadError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(request.name.clone())
            .or_default() += 1;
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let should_fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if should_fail {
            return Err(LoadError::Network("connection refused".into()));
        }
        Ok(RemoteModule::new(request, format!("{}/remoteEntry.js", request.name)))
    }
}

fn store() -> SharedRegistry {
    RegistryStore::register(vec![
        RemoteDescriptor::new("mfe1", "Dashboard", "/mfe1", 3001),
        RemoteDescriptor::new("mfe2", "Settings", "/mfe2", 3002),
        RemoteDescriptor::new("apps", "Apps", "/apps", 3003),
        RemoteDescriptor::new("admin", "Admin", "/apps/admin", 3004),
    ])
    .unwrap()
    .shared()
}

fn bind(loader: Arc<TestLoader>, hints: ClientHints) -> RouteTable {
    let store = store();
    let resolver = ManifestResolver::new(store.clone(), Environment::development()).with_hints(&hints);
    RouteBinder::new(resolver, LoaderMap::uniform(&store, loader)).bind()
}

#[test]
fn test_bindings_follow_registry() {
    let table = bind(Arc::new(TestLoader::new()), ClientHints::new());

    let prefixes: Vec<_> = table.bindings().iter().map(|b| b.match_prefix.as_str()).collect();
    assert_eq!(prefixes, vec!["/mfe1/*", "/mfe2/*", "/apps/*", "/apps/admin/*"]);
    assert_eq!(table.get("mfe2").unwrap().handler.base_path(), "/mfe2");
}

#[test]
fn test_match_path_prefers_longest_route() {
    let table = bind(Arc::new(TestLoader::new()), ClientHints::new());
    let matched = |path: &str| table.match_path(path).map(|b| b.handler.name().to_string());

    assert_eq!(matched("/mfe1").as_deref(), Some("mfe1"));
    assert_eq!(matched("/mfe1/orders/42?tab=items").as_deref(), Some("mfe1"));
    assert_eq!(matched("/apps/other").as_deref(), Some("apps"));
    assert_eq!(matched("/apps/admin/users").as_deref(), Some("admin"));
    assert_eq!(matched("/apps-legacy"), None);
    assert_eq!(matched("/"), None);
}

#[tokio::test]
async fn test_mount_loads_with_base_path_and_override() {
    let loader = Arc::new(TestLoader::new());
    let hints = ClientHints::new().with_session_query("mfe-override=mfe1:8888");
    let table = bind(loader.clone(), hints);

    let mount = table.get("mfe1").unwrap().handler.mount();
    assert_eq!(mount.state(), MountState::Idle);

    let outcome = mount.load().await;
    let module = match outcome {
        MountOutcome::Applied(MountState::Ready(module)) => module,
        other => panic!("unexpected outcome: {:?}", other),
    };
    assert_eq!(module.base_path, "/mfe1");
    assert_eq!(module.exposed, "App");
    assert_eq!(module.manifest_url, "http://localhost:8888/mf-manifest.json");

    let request = loader.last_request().unwrap();
    assert_eq!(request.manifest_url, "http://localhost:8888/mf-manifest.json");
}

#[tokio::test]
async fn test_concurrent_mounts_share_one_fetch() {
    let loader = Arc::new(TestLoader::gated());
    let table = bind(loader.clone(), ClientHints::new());
    let handler = table.get("mfe1").unwrap().handler.clone();

    let first = handler.mount();
    let second = handler.mount();

    let (a, b, _) = tokio::join!(first.load(), second.load(), async {
        tokio::task::yield_now().await;
        loader.release();
    });

    assert_eq!(loader.calls("mfe1"), 1);
    assert!(matches!(a, MountOutcome::Applied(MountState::Ready(_))));
    assert!(matches!(b, MountOutcome::Applied(MountState::Ready(_))));

    // 이후 마운트도 캐시된 결과를 쓴다
    let third = handler.mount();
    assert!(third.load().await.state().unwrap().is_ready());
    assert_eq!(loader.calls("mfe1"), 1);
}

#[tokio::test]
async fn test_abandoned_mount_ignores_late_result() {
    let loader = Arc::new(TestLoader::gated().failing(1));
    let table = bind(loader.clone(), ClientHints::new());
    let handler = table.get("mfe1").unwrap().handler.clone();

    let mount = handler.mount();
    let abandon = mount.abandon_handle();
    let mut states = mount.subscribe();

    let task = tokio::spawn(async move {
        let outcome = mount.load().await;
        (outcome, mount.state())
    });

    states.wait_for(|s| s.is_loading()).await.unwrap();
    abandon.abandon();
    loader.release();

    let (outcome, state) = task.await.unwrap();
    assert_eq!(outcome, MountOutcome::Discarded);
    // 에러 화면이 잠깐이라도 보이지 않는다
    assert_eq!(state, MountState::Loading);
    assert_eq!(*states.borrow(), MountState::Loading);
    assert_eq!(loader.calls("mfe1"), 1);
}

#[tokio::test]
async fn test_failure_is_scoped_and_retryable() {
    let loader = Arc::new(TestLoader::new().failing(1));
    let table = bind(loader.clone(), ClientHints::new());

    let broken = table.get("mfe1").unwrap().handler.mount();
    let outcome = broken.load().await;
    assert!(matches!(
        outcome,
        MountOutcome::Applied(MountState::Failed(LoadError::Network(_)))
    ));
    assert!(broken.state().is_retryable());

    // load()를 다시 불러도 Failed 유지 (retry만 다시 fetch)
    assert!(broken.load().await.state().unwrap().is_retryable());
    assert_eq!(loader.calls("mfe1"), 1);

    // 다른 remote는 영향 없음
    let healthy = table.get("mfe2").unwrap().handler.mount();
    assert!(healthy.load().await.state().unwrap().is_ready());

    let retried = broken.retry().await;
    assert!(retried.state().unwrap().is_ready());
    assert_eq!(loader.calls("mfe1"), 2);

    // Ready는 종착 상태
    assert!(broken.retry().await.state().unwrap().is_ready());
    assert_eq!(loader.calls("mfe1"), 2);
}

#[tokio::test]
async fn test_missing_loader_fails_only_that_remote() {
    let store = store();
    let loader: Arc<dyn RemoteLoader> = Arc::new(TestLoader::new());
    let loaders = LoaderMap::new().with_loader("mfe1", loader);
    let resolver = ManifestResolver::new(store.clone(), Environment::development());
    let table = RouteBinder::new(resolver, loaders).bind();

    let missing = table.get("mfe2").unwrap().handler.mount();
    assert_eq!(
        missing.load().await,
        MountOutcome::Applied(MountState::Failed(LoadError::LoaderMissing("mfe2".into())))
    );

    let present = table.get("mfe1").unwrap().handler.mount();
    assert!(present.load().await.state().unwrap().is_ready());
}

#[tokio::test]
async fn test_session_cache_survives_rebinding() {
    let loader = Arc::new(TestLoader::new());
    let store = store();

    let first = RouteBinder::new(
        ManifestResolver::new(store.clone(), Environment::development()),
        LoaderMap::uniform(&store, loader.clone()),
    );
    let cache = first.cache().clone();
    first.bind().get("mfe2").unwrap().handler.mount().load().await;

    // 새 navigation, 같은 세션 캐시
    let second = RouteBinder::new(
        ManifestResolver::new(store.clone(), Environment::development()),
        LoaderMap::uniform(&store, loader.clone()),
    )
    .with_cache(cache);
    let mount = second.bind().get("mfe2").unwrap().handler.mount();

    assert!(mount.load().await.state().unwrap().is_ready());
    assert_eq!(loader.calls("mfe2"), 1);
    assert_eq!(second.cache().stats().ready, 1);
}
