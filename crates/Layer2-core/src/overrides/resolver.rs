//! Override Resolver - session/영속 hint 병합
//!
//! 우선순위: session (현재 navigation) > persisted.
//! 브라우저 전역(location, storage)을 직접 읽지 않고 항상 인자로 받는다.

use super::hints::{
    normalize_location, parse_persisted_hints, parse_session_hints, OverrideEntry,
    OverrideSource,
};
use mfe_foundation::RegistryStore;
use std::collections::BTreeMap;

// ============================================================================
// ClientHints - 주입되는 hint 입력
// ============================================================================

/// 한 번의 해석에 쓰이는 client hint 스냅샷
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientHints {
    /// 현재 navigation의 query string
    pub session_query: String,

    /// 영속 저장소의 raw 값 (JSON 배열)
    pub persisted: Option<String>,
}

impl ClientHints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_query(mut self, query: impl Into<String>) -> Self {
        self.session_query = query.into();
        self
    }

    pub fn with_persisted(mut self, raw: impl Into<String>) -> Self {
        self.persisted = Some(raw.into());
        self
    }

    /// 병합된 override 집합
    pub fn overrides(&self) -> OverrideSet {
        OverrideSet::from_hints(&self.session_query, self.persisted.as_deref())
    }
}

// ============================================================================
// OverrideSet - 병합 결과
// ============================================================================

/// name → 정규화된 override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    entries: BTreeMap<String, OverrideEntry>,
}

impl OverrideSet {
    /// persisted를 먼저 채우고 같은 이름의 session hint로 덮어쓴다
    pub fn from_hints(session_query: &str, persisted: Option<&str>) -> Self {
        let mut set = Self::default();

        for record in parse_persisted_hints(persisted) {
            set.insert(&record.name, &record.url, OverrideSource::Persisted);
        }
        for (name, value) in parse_session_hints(session_query) {
            set.insert(&name, &value, OverrideSource::Session);
        }

        set
    }

    fn insert(&mut self, name: &str, raw: &str, source: OverrideSource) {
        let Some(target_location) = normalize_location(raw) else {
            return;
        };
        let name = name.trim().to_string();
        self.entries.insert(
            name.clone(),
            OverrideEntry {
                name,
                target_location,
                source,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&OverrideEntry> {
        self.entries.get(name)
    }

    /// `name`의 target location
    pub fn location(&self, name: &str) -> Option<&str> {
        self.get(name).map(|e| e.target_location.as_str())
    }

    /// 이름순
    pub fn iter(&self) -> impl Iterator<Item = &OverrideEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 레지스트리에 없는 이름 (효과 없음)
    pub fn inert<'a>(&'a self, store: &'a RegistryStore) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .keys()
            .filter(move |name| !store.contains(name))
            .map(String::as_str)
    }
}

/// `name`에 대한 override target location
///
/// 순수 함수. 잘못된 입력에도 실패하지 않고 `None`이 "효과 없음"이다.
pub fn resolve(name: &str, session_query: &str, persisted: Option<&str>) -> Option<String> {
    OverrideSet::from_hints(session_query, persisted)
        .location(name)
        .map(str::to_string)
}
