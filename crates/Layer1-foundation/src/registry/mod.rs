//! Registry - remote 등록/조회
//!
//! - `remote/` - microfrontend 레지스트리 (불변 store + 파일 로드)

pub mod remote;

// Remote
pub use remote::{
    federation_name, RegistryFile, RegistryStore, RemoteDescriptor, SharedRegistry,
    DEFAULT_DEV_PORT_FLOOR, DEV_HOST, REMOTES_FILE,
};
