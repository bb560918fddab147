//! 영속 override 저장 (write path)
//!
//! 클라이언트 key-value 저장소의 키 하나에 `[{name, url}]` JSON 배열을 둔다.
//! resolver는 이 모듈을 직접 호출하지 않고 `raw()` 결과를 주입받는다.

use super::hints::{parse_persisted_hints, PersistedOverride};
use mfe_foundation::{Error, JsonStore, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// 영속 override 키
pub const PERSISTED_OVERRIDES_KEY: &str = "mfe-overrides";

/// 파일 기반 클라이언트 저장소 파일명
pub const CLIENT_STORAGE_FILE: &str = "storage.json";

// ============================================================================
// KeyValueStore - 클라이언트 저장소 추상화
// ============================================================================

/// 문자열 key-value 저장소 (브라우저 localStorage와 같은 모양)
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// 메모리 저장소
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}

/// JSON 파일 저장소 (`storage.json` 한 파일에 모든 키)
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    store: JsonStore,
}

impl FileKeyValueStore {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        self.store.load_or_default(CLIENT_STORAGE_FILE)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());
        self.store.save(CLIENT_STORAGE_FILE, &values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.read_all();
        if values.remove(key).is_some() {
            self.store.save(CLIENT_STORAGE_FILE, &values)?;
        }
        Ok(())
    }
}

// ============================================================================
// PersistedOverrides
// ============================================================================

/// 영속 override 관리자
#[derive(Clone)]
pub struct PersistedOverrides {
    storage: Arc<dyn KeyValueStore>,
}

impl PersistedOverrides {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// 메모리 저장소로 생성
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// resolver에 넘길 raw 값
    pub fn raw(&self) -> Result<Option<String>> {
        self.storage.get(PERSISTED_OVERRIDES_KEY)
    }

    /// 현재 레코드들 (손상된 상태는 빈 목록)
    pub fn load(&self) -> Result<Vec<PersistedOverride>> {
        let raw = self.raw()?;
        Ok(parse_persisted_hints(raw.as_deref()))
    }

    /// 추가 또는 교체
    pub fn set(&self, name: &str, url: &str) -> Result<()> {
        let (name, url) = (name.trim(), url.trim());
        if name.is_empty() || url.is_empty() {
            return Err(Error::Validation(
                "override name and url must not be empty".to_string(),
            ));
        }

        let mut records = self.load()?;
        match records.iter_mut().find(|r| r.name == name) {
            Some(existing) => existing.url = url.to_string(),
            None => records.push(PersistedOverride::new(name, url)),
        }

        tracing::info!("Persisted override {} -> {}", name, url);
        self.write(&records)
    }

    /// 삭제 (있었으면 true)
    pub fn remove(&self, name: &str) -> Result<bool> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.name != name);

        if records.len() == before {
            return Ok(false);
        }
        self.write(&records)?;
        Ok(true)
    }

    /// 전부 삭제
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(PERSISTED_OVERRIDES_KEY)
    }

    fn write(&self, records: &[PersistedOverride]) -> Result<()> {
        if records.is_empty() {
            return self.clear();
        }
        let raw = serde_json::to_string(records)?;
        self.storage.set(PERSISTED_OVERRIDES_KEY, &raw)
    }
}

impl std::fmt::Debug for PersistedOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistedOverrides").finish_non_exhaustive()
    }
}
