use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use roster_core::{NewUser, User, UserId};
use roster_logging::{roster_debug, roster_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{DirectoryError, FailureKind};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com/users";

#[derive(Debug, Clone)]
pub struct DirectorySettings {
    /// Collection resource; members live at `{base_url}/{id}`.
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl DirectorySettings {
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for DirectorySettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Request/response mapping for the remote user collection.
///
/// Each call is a single exchange: no retries, no caching.
#[async_trait::async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DirectoryError>;
    async fn get_by_id(&self, id: UserId) -> Result<User, DirectoryError>;
    async fn create(&self, user: &NewUser) -> Result<User, DirectoryError>;
    async fn update(&self, user: &User) -> Result<User, DirectoryError>;
    async fn delete(&self, id: UserId) -> Result<(), DirectoryError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDirectory {
    settings: DirectorySettings,
    client: reqwest::Client,
}

impl ReqwestDirectory {
    pub fn new(settings: DirectorySettings) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| DirectoryError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn member_url(&self, id: UserId) -> Result<Url, DirectoryError> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                DirectoryError::new(
                    FailureKind::InvalidRequest,
                    format!("base url {} cannot address members", self.settings.base_url),
                )
            })?
            .pop_if_empty()
            .push(&id.to_string());
        Ok(url)
    }

    async fn exchange(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, DirectoryError> {
        roster_debug!("{} {}", method, url);
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            roster_warn!("{} {} answered {}", method, url, status);
            return Err(DirectoryError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("Http failure response for {url}: {status}"),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        roster_debug!("{} {} -> {} ({} bytes)", method, url, status, bytes.len());
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl UserDirectory for ReqwestDirectory {
    async fn list(&self) -> Result<Vec<User>, DirectoryError> {
        let body = self
            .exchange(Method::GET, self.settings.base_url.clone(), None)
            .await?;
        decode(&body)
    }

    async fn get_by_id(&self, id: UserId) -> Result<User, DirectoryError> {
        let url = self.member_url(id)?;
        let body = self.exchange(Method::GET, url, None).await?;
        decode(&body)
    }

    async fn create(&self, user: &NewUser) -> Result<User, DirectoryError> {
        let payload = encode(user)?;
        let body = self
            .exchange(Method::POST, self.settings.base_url.clone(), Some(payload))
            .await?;
        decode(&body)
    }

    async fn update(&self, user: &User) -> Result<User, DirectoryError> {
        let id = user.id.ok_or_else(|| {
            DirectoryError::new(FailureKind::InvalidRequest, "cannot update a user without id")
        })?;
        let url = self.member_url(id)?;
        let payload = encode(user)?;
        let body = self.exchange(Method::PUT, url, Some(payload)).await?;
        decode(&body)
    }

    async fn delete(&self, id: UserId) -> Result<(), DirectoryError> {
        let url = self.member_url(id)?;
        let body = self.exchange(Method::DELETE, url, None).await?;
        // The service answers `{}`; an empty body is accepted as well.
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        decode::<serde_json::Map<String, serde_json::Value>>(&body).map(|_| ())
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, DirectoryError> {
    serde_json::to_vec(value)
        .map_err(|err| DirectoryError::new(FailureKind::InvalidRequest, err.to_string()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DirectoryError> {
    serde_json::from_slice(body).map_err(|err| {
        roster_warn!("undecodable directory response: {}", err);
        DirectoryError::new(FailureKind::Decode, err.to_string())
    })
}

fn too_large(max_bytes: u64, actual: u64) -> DirectoryError {
    DirectoryError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> DirectoryError {
    if err.is_timeout() {
        return DirectoryError::new(FailureKind::Timeout, err.to_string());
    }
    DirectoryError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory(base: &str) -> ReqwestDirectory {
        ReqwestDirectory::new(DirectorySettings::with_base_url(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn member_url_appends_id() {
        let url = directory("https://example.com/api/users").member_url(4).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/users/4");
    }

    #[test]
    fn member_url_tolerates_trailing_slash() {
        let url = directory("https://example.com/users/").member_url(12).unwrap();
        assert_eq!(url.as_str(), "https://example.com/users/12");
    }

    #[test]
    fn member_url_rejects_opaque_base() {
        let err = directory("mailto:someone@example.com").member_url(1).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidRequest);
    }
}
