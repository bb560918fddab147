//! mfe-core: Core Runtime for the MFE shell
//!
//! Layer2 - remote 해석/로딩 레이어
//!
//! # 주요 모듈
//!
//! - `overrides`: client hint (query string, 영속 저장) → override 위치
//! - `manifest`: remote의 `mf-manifest.json` URL 해석
//! - `federation`: Module Federation 설정 생성 + manifest 파싱
//! - `route`: 라우트 바인딩, 공유 로드 캐시, 마운트 상태 머신
//!
//! # 사용 예시
//!
//! ```ignore
//! use mfe_core::{ClientHints, HttpRemoteLoader, LoaderMap, ManifestResolver, RouteBinder};
//! use mfe_foundation::PlatformConfig;
//!
//! let config = PlatformConfig::load()?;
//! let store = config.build_store()?.shared();
//!
//! let hints = ClientHints::new().with_session_query("?mfe-override=mfe1:3005");
//! let resolver = ManifestResolver::new(store.clone(), config.environment()).with_hints(&hints);
//!
//! let loader = Arc::new(HttpRemoteLoader::from_config(&config.loader)?);
//! let table = RouteBinder::new(resolver, LoaderMap::uniform(&store, loader)).bind();
//!
//! if let Some(binding) = table.match_path("/mfe1/orders") {
//!     let mount = binding.handler.mount();
//!     mount.load().await;
//! }
//! ```

pub mod federation;
pub mod manifest;
pub mod overrides;
pub mod route;

// Re-exports: Overrides
pub use overrides::{
    normalize_location, resolve as resolve_override, ClientHints, FileKeyValueStore,
    KeyValueStore, MemoryKeyValueStore, OverrideEntry, OverrideSet, OverrideSource,
    PersistedOverride, PersistedOverrides, OVERRIDE_PARAM, PERSISTED_OVERRIDES_KEY,
};

// Re-exports: Manifest
pub use manifest::{
    resolve as resolve_manifest, ManifestResolver, ResolutionSource, ResolvedManifest,
    MANIFEST_FILE_NAME,
};

// Re-exports: Federation
pub use federation::{
    FederationManifest, RemoteFederationConfig, SharedDependency, ShellFederationConfig,
    EXPOSED_APP,
};

// Re-exports: Route
pub use route::{
    loader_fn, AbandonHandle, CacheStats, HttpRemoteLoader, LoadCache, LoadError, LoadRequest,
    LoaderMap, MountOutcome, MountState, RemoteLoader, RemoteModule, RemoteMount, RouteBinder,
    RouteBinding, RouteHandler, RouteTable,
};
