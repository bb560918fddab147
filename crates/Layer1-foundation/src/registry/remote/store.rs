//! Registry Store - 불변 remote 레지스트리
//!
//! 고정된 목록으로 한 번 만들어지고 이후 변경 API는 없다.
//! 새 remote 추가 = store 재생성.

use super::descriptor::RemoteDescriptor;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// 레지스트리가 비어 있을 때 제안하는 첫 개발 포트
pub const DEFAULT_DEV_PORT_FLOOR: u16 = 3000;

/// 공유 소유 (읽기 전용) 레지스트리
pub type SharedRegistry = Arc<RegistryStore>;

/// Remote 레지스트리 스냅샷
///
/// `name`, `route_path`, federation 이름은 스냅샷 안에서 각각 유일하다.
#[derive(Debug, Clone, Default)]
pub struct RegistryStore {
    /// 등록 순서 그대로
    remotes: Vec<RemoteDescriptor>,

    /// name -> index
    by_name: HashMap<String, usize>,
}

impl RegistryStore {
    /// 빈 레지스트리
    pub fn empty() -> Self {
        Self::default()
    }

    /// 목록으로 레지스트리 생성
    ///
    /// 하나라도 검증에 실패하면 전체가 실패한다 (부분 store 없음).
    pub fn register(descriptors: impl IntoIterator<Item = RemoteDescriptor>) -> Result<Self> {
        let mut remotes = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_route: HashMap<String, String> = HashMap::new();
        let mut by_federation: HashMap<String, String> = HashMap::new();

        for descriptor in descriptors {
            descriptor.validate()?;

            if by_name.contains_key(&descriptor.name) {
                return Err(Error::Registration(format!(
                    "duplicate remote name '{}'",
                    descriptor.name
                )));
            }
            if let Some(owner) = by_route.get(&descriptor.route_path) {
                return Err(Error::Registration(format!(
                    "route path '{}' of remote '{}' is already used by '{}'",
                    descriptor.route_path, descriptor.name, owner
                )));
            }

            let fed_name = descriptor.federation_name();
            if let Some(owner) = by_federation.get(&fed_name) {
                return Err(Error::Registration(format!(
                    "remote '{}' and '{}' share the federation name '{}'",
                    descriptor.name, owner, fed_name
                )));
            }

            by_federation.insert(fed_name, descriptor.name.clone());
            by_name.insert(descriptor.name.clone(), remotes.len());
            by_route.insert(descriptor.route_path.clone(), descriptor.name.clone());
            remotes.push(descriptor);
        }

        tracing::info!("Registry built with {} remote(s)", remotes.len());
        Ok(Self { remotes, by_name })
    }

    /// Arc로 감싸 소비자들에게 전달
    pub fn shared(self) -> SharedRegistry {
        Arc::new(self)
    }

    /// 이름으로 조회
    pub fn lookup(&self, name: &str) -> Option<&RemoteDescriptor> {
        self.by_name.get(name).map(|&idx| &self.remotes[idx])
    }

    /// 이름으로 조회 (없으면 NotFound)
    pub fn require(&self, name: &str) -> Result<&RemoteDescriptor> {
        self.lookup(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// 등록 순서대로 전체
    pub fn all(&self) -> &[RemoteDescriptor] {
        &self.remotes
    }

    /// 등록 순서대로 이름들
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.remotes.iter().map(|r| r.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    /// 다음으로 쓸 개발 포트 제안 (온보딩 도구용, 강제 아님)
    pub fn next_available_dev_port(&self) -> Option<u16> {
        self.next_available_dev_port_from(DEFAULT_DEV_PORT_FLOOR)
    }

    /// 최대 포트 + 1, 빈 레지스트리면 `floor`
    ///
    /// 최대 포트가 65535면 `floor`부터 비어 있는 가장 작은 포트.
    /// 그것도 없으면 None.
    pub fn next_available_dev_port_from(&self, floor: u16) -> Option<u16> {
        let Some(max) = self.remotes.iter().map(|r| r.dev_port).max() else {
            return Some(floor);
        };
        if let Some(next) = max.checked_add(1) {
            return Some(next);
        }

        let used: HashSet<u16> = self.remotes.iter().map(|r| r.dev_port).collect();
        (floor.max(1)..=u16::MAX).find(|port| !used.contains(port))
    }
}
