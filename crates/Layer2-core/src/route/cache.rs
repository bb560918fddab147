//! Load cache - remote 이름당 fetch 하나
//!
//! 같은 이름의 동시 마운트는 모두 같은 공유 future를 기다린다.
//! 성공한 항목은 세션 동안 유지되고, 실패한 항목은 명시적 retry로만 교체된다.

use super::loader::{LoadError, RemoteModule};
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 공유 로드 결과
pub type LoadResult = Result<Arc<RemoteModule>, LoadError>;

/// 공유 로드 future
pub type SharedLoad = Shared<BoxFuture<'static, LoadResult>>;

/// 캐시 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub in_flight: usize,
    pub ready: usize,
    pub failed: usize,
    /// 지금까지 시작된 fetch 수
    pub fetches_started: u64,
}

/// 이름 → 공유 로드
#[derive(Default)]
pub struct LoadCache {
    entries: Mutex<HashMap<String, SharedLoad>>,
    fetches_started: AtomicU64,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// 기존 로드를 공유하거나 `start`로 새로 시작
    pub fn get_or_start<F>(&self, name: &str, start: F) -> SharedLoad
    where
        F: FnOnce() -> BoxFuture<'static, LoadResult>,
    {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(name) {
            tracing::debug!("Sharing load of remote '{}'", name);
            return existing.clone();
        }
        self.insert_new(&mut entries, name, start)
    }

    /// 실패한 로드만 새로 시작, 진행 중/성공이면 그것을 공유
    pub fn retry<F>(&self, name: &str, start: F) -> SharedLoad
    where
        F: FnOnce() -> BoxFuture<'static, LoadResult>,
    {
        let mut entries = self.entries.lock();
        if let Some(existing) = entries.get(name) {
            if !matches!(existing.peek(), Some(Err(_))) {
                return existing.clone();
            }
            tracing::info!("Retrying failed load of remote '{}'", name);
        }
        self.insert_new(&mut entries, name, start)
    }

    fn insert_new<F>(
        &self,
        entries: &mut HashMap<String, SharedLoad>,
        name: &str,
        start: F,
    ) -> SharedLoad
    where
        F: FnOnce() -> BoxFuture<'static, LoadResult>,
    {
        let load = start().shared();
        entries.insert(name.to_string(), load.clone());
        self.fetches_started.fetch_add(1, Ordering::Relaxed);
        load
    }

    /// 완료된 결과 (진행 중이거나 없으면 None)
    pub fn peek(&self, name: &str) -> Option<LoadResult> {
        self.entries.lock().get(name).and_then(|load| load.peek().cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().contains_key(name)
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock();
        let mut stats = CacheStats {
            fetches_started: self.fetches_started.load(Ordering::Relaxed),
            ..CacheStats::default()
        };
        for load in entries.values() {
            match load.peek() {
                None => stats.in_flight += 1,
                Some(Ok(_)) => stats.ready += 1,
                Some(Err(_)) => stats.failed += 1,
            }
        }
        stats
    }
}

impl std::fmt::Debug for LoadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCache").field("stats", &self.stats()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::loader::LoadRequest;

    fn module(name: &str) -> Arc<RemoteModule> {
        let request = LoadRequest {
            name: name.into(),
            manifest_url: format!("http://localhost:3001/{}", name),
            base_path: format!("/{}", name),
            expose: "App".into(),
        };
        Arc::new(RemoteModule::new(&request, "entry.js"))
    }

    #[tokio::test]
    async fn test_get_or_start_shares() {
        let cache = LoadCache::new();
        let first = cache.get_or_start("mfe1", || async { Ok(module("mfe1")) }.boxed());
        let second = cache.get_or_start("mfe1", || panic!("must not start a second load"));

        assert_eq!(first.await.unwrap().name, "mfe1");
        assert_eq!(second.await.unwrap().name, "mfe1");
        assert_eq!(cache.stats().fetches_started, 1);
        assert_eq!(cache.stats().ready, 1);
    }

    #[tokio::test]
    async fn test_retry_only_replaces_failures() {
        let cache = LoadCache::new();
        let failed = cache.get_or_start("mfe1", || {
            async { Err(LoadError::Network("down".into())) }.boxed()
        });
        assert!(failed.await.is_err());
        assert_eq!(cache.stats().failed, 1);

        let retried = cache.retry("mfe1", || async { Ok(module("mfe1")) }.boxed());
        assert!(retried.await.is_ok());

        // 성공 후 retry는 새 fetch를 만들지 않는다
        let again = cache.retry("mfe1", || panic!("ready entries are never refetched"));
        assert!(again.await.is_ok());
        assert_eq!(cache.stats().fetches_started, 2);
        assert!(matches!(cache.peek("mfe1"), Some(Ok(_))));
    }

    #[test]
    fn test_in_flight_stats() {
        let cache = LoadCache::new();
        let pending = cache.get_or_start("slow", || futures::future::pending().boxed());
        let mut task = tokio_test::task::spawn(pending);
        tokio_test::assert_pending!(task.poll());

        assert!(cache.contains("slow"));
        assert!(cache.peek("slow").is_none());
        assert_eq!(cache.stats().in_flight, 1);
    }

    #[test]
    fn test_peek_after_completion() {
        let cache = LoadCache::new();
        let load = cache.get_or_start("mfe2", || async { Ok(module("mfe2")) }.boxed());
        tokio_test::block_on(load).unwrap();

        assert_eq!(cache.peek("mfe2").unwrap().unwrap().name, "mfe2");
    }
}
