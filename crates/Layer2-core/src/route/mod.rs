//! Route - remote를 마운트 경로에 묶고 lazy 로드
//!
//! ```text
//! RouteBinder ──bind()──▶ RouteTable ──match_path()──▶ RouteBinding
//!                                                        │
//!                                          handler.mount()▼
//!   ManifestResolver ◀── RouteHandler ──▶ LoadCache (이름당 fetch 1개)
//!                              │                 │
//!                              ▼                 ▼
//!                         RemoteMount      RemoteLoader (LoaderMap)
//!                  Idle → Loading → Ready | Failed
//! ```

mod binder;
mod cache;
mod http;
mod loader;
mod mount;
mod state;

pub use binder::{RouteBinder, RouteBinding, RouteHandler, RouteTable, ROUTE_WILDCARD};
pub use cache::{CacheStats, LoadCache, LoadResult, SharedLoad};
pub use http::HttpRemoteLoader;
pub use loader::{
    loader_fn, FnLoader, LoadError, LoadRequest, LoaderMap, RemoteLoader, RemoteModule,
};
pub use mount::{AbandonHandle, MountOutcome, RemoteMount};
pub use state::MountState;
