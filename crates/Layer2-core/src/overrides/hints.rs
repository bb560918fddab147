//! Client hint 파싱 - query string / 영속 JSON
//!
//! 잘못된 항목은 에러가 아니라 조용히 건너뛴다 (best-effort).

use serde::{Deserialize, Serialize};

/// session hint로 인식하는 query 파라미터 (반복 가능)
pub const OVERRIDE_PARAM: &str = "mfe-override";

/// override 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideSource {
    /// 현재 navigation의 query string (저장 안 됨)
    Session,
    /// 클라이언트 저장소 (세션 간 유지)
    Persisted,
}

impl std::fmt::Display for OverrideSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::Persisted => write!(f, "persisted"),
        }
    }
}

/// 정규화된 override 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideEntry {
    pub name: String,
    pub target_location: String,
    pub source: OverrideSource,
}

/// 영속 저장 레코드 (`[{ "name": ..., "url": ... }]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedOverride {
    pub name: String,
    pub url: String,
}

impl PersistedOverride {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// raw 값을 base URL로 정규화
///
/// - 숫자만: `http://localhost:<value>`
/// - scheme 있음: 그대로
/// - 그 외: `http://` 접두
///
/// 끝의 `/`는 제거한다. 빈 값이면 `None`.
pub fn normalize_location(raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let location = if value.bytes().all(|b| b.is_ascii_digit()) {
        format!("http://localhost:{}", value)
    } else if value.contains("://") {
        value.to_string()
    } else {
        format!("http://{}", value)
    };

    Some(location.trim_end_matches('/').to_string())
}

/// query string에서 `mfe-override=<name>:<value>` 쌍 추출
///
/// 첫 번째 `:`에서 자르므로 값에 URL (`http://...:8080`)이 와도 된다.
/// 앞의 `?`는 허용한다.
pub fn parse_session_hints(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);

    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == OVERRIDE_PARAM)
        .filter_map(|(_, value)| match split_hint(&value) {
            Some(pair) => Some(pair),
            None => {
                tracing::debug!("Skipping malformed {} hint: {:?}", OVERRIDE_PARAM, value);
                None
            }
        })
        .collect()
}

fn split_hint(value: &str) -> Option<(String, String)> {
    let (name, location) = value.split_once(':')?;
    let (name, location) = (name.trim(), location.trim());
    if name.is_empty() || location.is_empty() {
        return None;
    }
    Some((name.to_string(), location.to_string()))
}

/// 영속 저장값(JSON 배열) 파싱
///
/// 파싱 불가한 상태는 비어 있는 것으로 취급한다.
pub fn parse_persisted_hints(raw: Option<&str>) -> Vec<PersistedOverride> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<PersistedOverride>>(raw) {
        Ok(records) => records
            .into_iter()
            .filter(|r| {
                let keep = !r.name.trim().is_empty() && !r.url.trim().is_empty();
                if !keep {
                    tracing::debug!("Skipping incomplete persisted override: {:?}", r);
                }
                keep
            })
            .collect(),
        Err(e) => {
            tracing::warn!("Ignoring unreadable persisted overrides: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_numeric_shorthand() {
        assert_eq!(normalize_location("3005").as_deref(), Some("http://localhost:3005"));
    }

    #[test]
    fn test_normalize_keeps_scheme() {
        assert_eq!(normalize_location("http://foo.test").as_deref(), Some("http://foo.test"));
        assert_eq!(
            normalize_location("https://staging.example.com/mfe1/").as_deref(),
            Some("https://staging.example.com/mfe1")
        );
    }

    #[test]
    fn test_normalize_adds_http() {
        assert_eq!(normalize_location("foo.test").as_deref(), Some("http://foo.test"));
        assert_eq!(
            normalize_location("localhost:4000").as_deref(),
            Some("http://localhost:4000")
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_location(""), None);
        assert_eq!(normalize_location("   "), None);
    }

    #[test]
    fn test_parse_session_hints() {
        let hints = parse_session_hints(
            "?mfe-override=mfe1:8888&page=2&mfe-override=mfe2:http://localhost:9000",
        );
        assert_eq!(
            hints,
            vec![
                ("mfe1".to_string(), "8888".to_string()),
                ("mfe2".to_string(), "http://localhost:9000".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_session_hints_percent_encoded() {
        let hints = parse_session_hints("mfe-override=mfe1%3Ahttps%3A%2F%2Fpreview.test");
        assert_eq!(hints, vec![("mfe1".to_string(), "https://preview.test".to_string())]);
    }

    #[test]
    fn test_parse_session_hints_skips_malformed() {
        let hints = parse_session_hints(
            "mfe-override=mfe1&mfe-override=:3000&mfe-override=mfe2:&mfe-override=mfe3:3003",
        );
        assert_eq!(hints, vec![("mfe3".to_string(), "3003".to_string())]);

        assert!(parse_session_hints("").is_empty());
        assert!(parse_session_hints("?").is_empty());
    }

    #[test]
    fn test_parse_persisted_hints() {
        let raw = r#"[{"name":"mfe1","url":"9999"},{"name":"","url":"1"},{"name":"mfe2","url":""}]"#;
        assert_eq!(
            parse_persisted_hints(Some(raw)),
            vec![PersistedOverride::new("mfe1", "9999")]
        );
    }

    #[test]
    fn test_parse_persisted_hints_tolerates_garbage() {
        assert!(parse_persisted_hints(None).is_empty());
        assert!(parse_persisted_hints(Some("")).is_empty());
        assert!(parse_persisted_hints(Some("{not json")).is_empty());
        assert!(parse_persisted_hints(Some(r#"{"name":"mfe1"}"#)).is_empty());
    }
}
