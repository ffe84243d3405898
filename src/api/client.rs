use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::error::ApiError;
use super::responses::ErrorBody;

/// Thin JSON client over the console backend. Every call races the given
/// cancellation token and decodes into an explicit response type.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: base_url.to_owned(),
            reason,
        };

        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_owned()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_owned(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: parsed,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Appends percent-encoded path segments to the base URL
    pub fn endpoint<I>(&self, segments: I) -> Result<Url, ApiError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "not a base URL".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<R: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        let request = self.http.get(url.clone()).query(query);
        self.send(request, url, cancel).await
    }

    pub async fn send_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        let request = self.http.request(method, url.clone()).json(body);
        self.send(request, url, cancel).await
    }

    /// Uploads `path` as a multipart form under `field`
    pub async fn upload<R: DeserializeOwned>(
        &self,
        url: Url,
        field: &'static str,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Upload {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.xlsx".to_owned());

        let form = Form::new().part(field, Part::bytes(bytes).file_name(file_name));
        let request = self.http.post(url.clone()).multipart(form);
        self.send(request, url, cancel).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: Url,
        cancel: &CancellationToken,
    ) -> Result<R, ApiError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let url = url.to_string();
        debug!(url = %url, "Sending request");

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ApiError::Cancelled { url }),
            response = request.send() => response.map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?,
        };

        let status = response.status();
        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(ApiError::Cancelled { url }),
            body = response.text() => body.map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?,
        };

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Status {
                url,
                status,
                message,
            });
        }

        // an empty success body decodes like `{}`, so optional-only types
        // accept it and collection envelopes still fail loudly
        let body = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(body).map_err(|source| ApiError::Decode { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, None, Duration::from_secs(30)).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client("https://desk.example.com/users/api");
        let url = api.endpoint(["jobs", "status", "Booked"]).unwrap();
        assert_eq!(url.as_str(), "https://desk.example.com/users/api/jobs/status/Booked");

        let api = client("https://desk.example.com/users/api/");
        let url = api.endpoint(["admin", "jobs", "all"]).unwrap();
        assert_eq!(url.as_str(), "https://desk.example.com/users/api/admin/jobs/all");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = client("http://localhost:5000");
        let url = api.endpoint(["prospects", "edit", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/prospects/edit/a%20b%2Fc");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url", None, Duration::from_secs(1)),
            Err(ApiError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ApiClient::new("mailto:desk@example.com", None, Duration::from_secs(1)),
            Err(ApiError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let api = ApiClient::new("http://localhost", Some("  ".into()), Duration::from_secs(1))
            .unwrap();
        assert!(api.token.is_none());
    }
}
