//! Overrides - remote를 다른 위치로 돌리는 client hint
//!
//! - `hints`: query string / 영속 JSON 파싱 + 위치 정규화
//! - `resolver`: session > persisted 병합
//! - `persisted`: 영속 override write path

mod hints;
mod persisted;
mod resolver;

pub use hints::{
    normalize_location, parse_persisted_hints, parse_session_hints, OverrideEntry,
    OverrideSource, PersistedOverride, OVERRIDE_PARAM,
};
pub use persisted::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PersistedOverrides,
    CLIENT_STORAGE_FILE, PERSISTED_OVERRIDES_KEY,
};
pub use resolver::{resolve, ClientHints, OverrideSet};
