//! Federation manifest (`mf-manifest.json`) 파싱
//!
//! 필요한 필드만 읽는다. 나머지는 무시.

use serde::{Deserialize, Serialize};
use url::Url;

/// remote의 federation manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederationManifest {
    pub name: String,

    pub meta_data: ManifestMetaData,

    #[serde(default)]
    pub exposes: Vec<ManifestExpose>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestMetaData {
    pub remote_entry: RemoteEntry,

    /// `auto`면 manifest 위치 기준
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub name: String,

    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestExpose {
    pub name: String,

    #[serde(default)]
    pub path: String,
}

impl FederationManifest {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// 노출 모듈 찾기 (`App` 또는 `./App`)
    pub fn find_expose(&self, name: &str) -> Option<&ManifestExpose> {
        let dotted = format!("./{}", name);
        self.exposes
            .iter()
            .find(|e| e.name == name || e.name == dotted || e.path == dotted)
    }

    /// 엔트리 스크립트 절대 URL
    pub fn remote_entry_url(&self, manifest_url: &str) -> Result<String, url::ParseError> {
        let mut base = Url::parse(manifest_url)?;

        if let Some(public_path) = self.meta_data.public_path.as_deref() {
            if !public_path.is_empty() && public_path != "auto" {
                let public_path = if public_path.ends_with('/') {
                    public_path.to_string()
                } else {
                    format!("{}/", public_path)
                };
                base = base.join(&public_path)?;
            }
        }

        let entry = &self.meta_data.remote_entry;
        let relative = match entry.path.trim_matches('/') {
            "" => entry.name.clone(),
            path => format!("{}/{}", path, entry.name),
        };
        Ok(base.join(&relative)?.to_string())
    }
}
