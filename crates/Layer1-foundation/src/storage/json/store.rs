//! JSON 파일 저장소
//!
//! `mfe.json`, `remotes.json`, 영속 override(`storage.json`)가 모두 여기를 지난다.
//! 파일이 없으면 "설정 없음"이고, 깨진 파일은 호출자가 에러/기본값 중에서 고른다.

use crate::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 설정 디렉토리 이름
pub const APP_DIR_NAME: &str = "mfe-shell";

/// 디렉토리 하나에 묶인 JSON 파일들
#[derive(Debug, Clone)]
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 사용자 전역 (<config_dir>/mfe-shell/)
    pub fn global() -> Result<Self> {
        dirs::config_dir()
            .map(|dir| Self::new(dir.join(APP_DIR_NAME)))
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))
    }

    /// 프로젝트 (<root>/.mfe-shell/)
    pub fn project(root: impl AsRef<Path>) -> Self {
        Self::new(root.as_ref().join(format!(".{}", APP_DIR_NAME)))
    }

    pub fn current_project() -> Result<Self> {
        std::env::current_dir()
            .map(Self::project)
            .map_err(|e| Error::Config(format!("Cannot get current directory: {}", e)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.base_dir.join(filename).is_file()
    }

    /// 파일이 없으면 None, 읽기/파싱 실패는 Config 에러
    pub fn load_optional<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>> {
        let path = self.base_dir.join(filename);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::Config(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// 없거나 깨졌으면 기본값 (깨진 경우 warn)
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, filename: &str) -> T {
        self.load_optional(filename)
            .unwrap_or_else(|e| {
                tracing::warn!("{}; falling back to defaults", e);
                None
            })
            .unwrap_or_default()
    }

    /// 임시 파일에 쓴 뒤 rename (읽는 쪽이 반쯤 쓰인 파일을 보지 않는다)
    pub fn save<T: Serialize>(&self, filename: &str, data: &T) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            Error::Storage(format!(
                "Failed to create {}: {}",
                self.base_dir.display(),
                e
            ))
        })?;

        let path = self.base_dir.join(filename);
        let tmp = self.base_dir.join(format!(".{}.tmp", filename));
        let content = serde_json::to_string_pretty(data)?;

        std::fs::write(&tmp, content)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_save_then_load_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("nested"));

        let mut ports = BTreeMap::new();
        ports.insert("mfe1".to_string(), 3001u16);
        store.save("ports.json", &ports).unwrap();

        assert!(store.exists("ports.json"));
        assert!(!store.exists(".ports.json.tmp"));
        let loaded: Option<BTreeMap<String, u16>> = store.load_optional("ports.json").unwrap();
        assert_eq!(loaded, Some(ports));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let loaded: Option<Vec<String>> = store.load_optional("missing.json").unwrap();
        assert!(loaded.is_none());
        assert!(!store.exists("missing.json"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        std::fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let err = store.load_optional::<Vec<String>>("broken.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("broken.json"));

        let fallback: Vec<String> = store.load_or_default("broken.json");
        assert!(fallback.is_empty());
    }

    #[test]
    fn test_project_dir_name() {
        let store = JsonStore::project("/tmp/app");
        assert_eq!(store.base_dir(), Path::new("/tmp/app/.mfe-shell"));
    }
}
