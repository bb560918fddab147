//! Remote descriptor - 등록된 microfrontend 하나의 정적 속성

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// 개발 모드에서 remote가 떠 있는 loopback 호스트
pub const DEV_HOST: &str = "localhost";

/// Module Federation 식별자 (`-` 불가 → `_`)
///
/// `mfe-1`과 `mfe_1`은 같은 식별자가 되므로 store가 함께 등록하지 않는다.
pub fn federation_name(name: &str) -> String {
    name.replace('-', "_")
}

/// 등록된 remote(MFE) 하나
///
/// `name`은 라우트 생성과 override 매칭에 쓰이는 안정적인 키이고,
/// `route_path`는 shell 기준 마운트 경로다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDescriptor {
    /// 고유 식별자
    pub name: String,

    /// 표시 이름
    pub display_name: String,

    /// 마운트 경로 (예: `/mfe1`)
    pub route_path: String,

    /// 개발 서버 포트 (`http://localhost:<devPort>`)
    pub dev_port: u16,

    /// 프로덕션 경로 (없으면 `route_path`)
    #[serde(default, rename = "prodPath", skip_serializing_if = "Option::is_none")]
    pub prod_location: Option<String>,

    /// 담당 팀
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// 설명
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RemoteDescriptor {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        route_path: impl Into<String>,
        dev_port: u16,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            route_path: route_path.into(),
            dev_port,
            prod_location: None,
            team: None,
            description: None,
        }
    }

    // 빌더
    pub fn prod_location(mut self, location: impl Into<String>) -> Self {
        self.prod_location = Some(location.into());
        self
    }

    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // effective 값들
    pub fn effective_prod_location(&self) -> &str {
        self.prod_location.as_deref().unwrap_or(&self.route_path)
    }

    pub fn federation_name(&self) -> String {
        federation_name(&self.name)
    }

    /// 개발 서버 base URL
    pub fn dev_location(&self) -> String {
        format!("http://{}:{}", DEV_HOST, self.dev_port)
    }

    /// 필드 단위 검증 (중복 검사는 store에서)
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Registration("remote name must not be empty".into()));
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::Registration(format!(
                "remote name '{}' may only contain ASCII letters, digits, '-' and '_'",
                self.name
            )));
        }
        if self.display_name.trim().is_empty() {
            return Err(Error::Registration(format!(
                "remote '{}' has an empty display name",
                self.name
            )));
        }
        validate_route_path(&self.name, &self.route_path)?;
        if self.dev_port == 0 {
            return Err(Error::Registration(format!(
                "remote '{}' has dev port 0",
                self.name
            )));
        }
        if let Some(prod) = &self.prod_location {
            if prod.is_empty() {
                return Err(Error::Registration(format!(
                    "remote '{}' has an empty prod path",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

fn validate_route_path(name: &str, route_path: &str) -> Result<()> {
    if !route_path.starts_with('/') {
        return Err(Error::Registration(format!(
            "route path '{}' of remote '{}' must start with '/'",
            route_path, name
        )));
    }
    if route_path == "/" {
        return Err(Error::Registration(format!(
            "remote '{}' cannot be mounted at the shell root",
            name
        )));
    }
    if route_path.ends_with('/') {
        return Err(Error::Registration(format!(
            "route path '{}' of remote '{}' must not end with '/'",
            route_path, name
        )));
    }
    if route_path.contains('*') || route_path.contains("//") {
        return Err(Error::Registration(format!(
            "route path '{}' of remote '{}' is not a plain path",
            route_path, name
        )));
    }
    Ok(())
}
