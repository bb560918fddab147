//! Remote registry - 등록된 microfrontend 목록
//!
//! `remotes.json` 형식:
//!
//! ```json
//! { "remotes": [ { "name": "mfe1", "displayName": "Dashboard", "routePath": "/mfe1", "devPort": 3001 } ] }
//! ```

mod descriptor;
mod store;

pub use descriptor::{federation_name, RemoteDescriptor, DEV_HOST};
pub use store::{RegistryStore, SharedRegistry, DEFAULT_DEV_PORT_FLOOR};

use crate::storage::JsonStore;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 레지스트리 파일명
pub const REMOTES_FILE: &str = "remotes.json";

/// 등록 목록 파일
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    #[serde(default)]
    pub remotes: Vec<RemoteDescriptor>,
}

impl RegistryFile {
    /// JsonStore에서 로드 (없으면 빈 목록)
    pub fn load_from(store: &JsonStore) -> Result<Self> {
        Ok(store.load_optional(REMOTES_FILE)?.unwrap_or_default())
    }

    /// 임의 경로에서 로드
    pub fn load_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// 불변 store로 변환
    pub fn into_store(self) -> Result<RegistryStore> {
        RegistryStore::register(self.remotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_file_roundtrip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let file = RegistryFile {
            remotes: vec![
                RemoteDescriptor::new("mfe1", "Dashboard", "/mfe1", 3001),
                RemoteDescriptor::new("mfe2", "Settings", "/mfe2", 3002),
            ],
        };
        store.save(REMOTES_FILE, &file).unwrap();

        let registry = RegistryFile::load_from(&store).unwrap().into_store().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("mfe2").unwrap().dev_port, 3002);
    }

    #[test]
    fn test_missing_registry_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let file = RegistryFile::load_from(&store).unwrap();
        assert!(file.remotes.is_empty());
    }

    #[test]
    fn test_load_path_rejects_duplicates_on_build() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remotes.json");
        std::fs::write(
            &path,
            r#"{"remotes":[
                {"name":"a","displayName":"A","routePath":"/a","devPort":3001},
                {"name":"a","displayName":"A2","routePath":"/a2","devPort":3002}
            ]}"#,
        )
        .unwrap();

        let file = RegistryFile::load_path(&path).unwrap();
        assert!(file.into_store().is_err());
    }
}
