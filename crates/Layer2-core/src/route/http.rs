//! HTTP remote loader - manifest를 받아 엔트리 URL을 확정한다
//!
//! 스크립트 실행은 호스트 런타임 몫이고 여기서는 manifest 검증까지만 한다.

use super::loader::{LoadError, LoadRequest, RemoteLoader, RemoteModule};
use crate::federation::FederationManifest;
use async_trait::async_trait;
use mfe_foundation::{Error, LoaderConfig, Result};
use reqwest::Client;
use std::time::Duration;

/// reqwest 기반 manifest 로더
#[derive(Debug, Clone)]
pub struct HttpRemoteLoader {
    client: Client,
}

impl HttpRemoteLoader {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(client))
    }

    /// 호스트 앱의 client 공유 (프록시, TLS 설정 등)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        Self::new(Duration::from_secs(config.effective_timeout_secs()))
    }

    /// manifest만 가져와 파싱
    pub async fn fetch_manifest(&self, manifest_url: &str) -> std::result::Result<FederationManifest, LoadError> {
        if url::Url::parse(manifest_url).is_err() {
            return Err(LoadError::InvalidUrl(format!(
                "{} (set a base origin to fetch relative manifests)",
                manifest_url
            )));
        }

        let response = self
            .client
            .get(manifest_url)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: manifest_url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        FederationManifest::from_json(&body).map_err(|e| LoadError::InvalidManifest(e.to_string()))
    }
}

#[async_trait]
impl RemoteLoader for HttpRemoteLoader {
    async fn load(&self, request: &LoadRequest) -> std::result::Result<RemoteModule, LoadError> {
        let manifest = self.fetch_manifest(&request.manifest_url).await?;

        if manifest.find_expose(&request.expose).is_none() {
            return Err(LoadError::MissingExpose(request.expose.clone()));
        }
        let entry_url = manifest
            .remote_entry_url(&request.manifest_url)
            .map_err(|e| LoadError::InvalidManifest(e.to_string()))?;

        tracing::debug!("Remote '{}' entry: {}", request.name, entry_url);
        Ok(RemoteModule::new(request, entry_url))
    }
}
