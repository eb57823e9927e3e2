//! Backend HTTP client

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use async_trait::async_trait;

use crate::api::types::{
    AccessCheckRequest, AccessCheckResponse, AdminMenu, CsrfToken, HeaderMenuNode,
    MenuTreeResponse, Session,
};
use crate::api::Backend;
use crate::core::config::Config;
use crate::core::{GateError, GateResult};

const IDENTITY_PATH: &str = "account";
const ACCESS_CHECK_PATH: &str = "admin-menu-permissions/check";
const ACCESSIBLE_MENUS_PATH: &str = "admin-menus/accessible";
const MENU_TREE_PATH: &str = "kitms-menus/tree";
const CSRF_TOKEN_PATH: &str = "csrf-token";

/// HTTP client for the content-management REST API
pub struct ApiClient {
    /// HTTP client
    client: reqwest::Client,
    /// Base of every API path, always ending in `/`
    api_base: Url,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> GateResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::USER_AGENT,
            format!("menugate/{}", env!("CARGO_PKG_VERSION"))
                .parse()
                .map_err(|_| GateError::config("invalid user agent"))?,
        );
        if let Some(ref cookie) = config.network.cookie {
            headers.insert(
                reqwest::header::COOKIE,
                cookie
                    .parse()
                    .map_err(|_| GateError::config("network.cookie is not a valid header value"))?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.network.timeout))
            .build()?;

        Ok(Self {
            client,
            api_base: Self::api_base(&config.server.base_url, &config.server.api_prefix)?,
        })
    }

    /// Join origin and API prefix into a directory-style base URL
    fn api_base(base_url: &str, api_prefix: &str) -> GateResult<Url> {
        let origin = Url::parse(base_url)?;
        let prefix = api_prefix.trim_matches('/');
        let path = if prefix.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", prefix)
        };
        Ok(origin.join(&path)?)
    }

    /// Absolute URL of an API endpoint
    pub fn endpoint(&self, path: &str) -> GateResult<Url> {
        Ok(self.api_base.join(path.trim_start_matches('/'))?)
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&AccessCheckRequest>,
    ) -> GateResult<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(path, status));
        }

        let text = response.text().await?;

        Ok(serde_json::from_str(&text)?)
    }

    fn status_error(path: &str, status: StatusCode) -> GateError {
        GateError::network(format!("{} returned HTTP {}", path, status))
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn fetch_identity(&self) -> GateResult<Session> {
        self.request_json(Method::GET, IDENTITY_PATH, None)
            .await
            .map_err(|e| GateError::IdentityUnavailable(e.to_string()))
    }

    async fn check_access(&self, request: &AccessCheckRequest) -> GateResult<AccessCheckResponse> {
        self.request_json(Method::POST, ACCESS_CHECK_PATH, Some(request))
            .await
            .map_err(|e| GateError::AuthorizationCheckFailed(e.to_string()))
    }

    async fn fetch_accessible_menus(&self) -> GateResult<Vec<AdminMenu>> {
        self.request_json(Method::GET, ACCESSIBLE_MENUS_PATH, None)
            .await
            .map_err(|e| GateError::MenuLoadFailed(e.to_string()))
    }

    async fn fetch_menu_tree(&self) -> GateResult<Vec<HeaderMenuNode>> {
        let response: MenuTreeResponse = self
            .request_json(Method::GET, MENU_TREE_PATH, None)
            .await
            .map_err(|e| GateError::HeaderLoadFailed(e.to_string()))?;

        if response.status != "OK" {
            return Err(GateError::HeaderLoadFailed(format!(
                "menu tree status {}",
                response.status
            )));
        }

        response
            .data
            .and_then(|data| data.menu_tree_json)
            .ok_or_else(|| GateError::HeaderLoadFailed("menu tree payload missing".into()))
    }

    async fn fetch_csrf_token(&self) -> GateResult<CsrfToken> {
        self.request_json(Method::GET, CSRF_TOKEN_PATH, None)
            .await
            .map_err(|e| GateError::CsrfUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(base_url: &str, api_prefix: &str) -> ApiClient {
        let mut config = Config::default();
        config.server.base_url = base_url.into();
        config.server.api_prefix = api_prefix.into();
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_prefix() {
        let client = client_for("https://cms.example.com", "/api");
        assert_eq!(
            client.endpoint(ACCESS_CHECK_PATH).unwrap().as_str(),
            "https://cms.example.com/api/admin-menu-permissions/check"
        );
    }

    #[test]
    fn test_endpoint_ignores_base_path_and_slashes() {
        let client = client_for("https://cms.example.com/admin/index.html", "api/");
        assert_eq!(
            client.endpoint("/account").unwrap().as_str(),
            "https://cms.example.com/api/account"
        );
    }

    #[test]
    fn test_invalid_cookie_is_config_error() {
        let mut config = Config::default();
        config.network.cookie = Some("bad\ncookie".into());
        assert!(matches!(ApiClient::new(&config), Err(GateError::Config(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let mut config = Config::default();
        config.server.base_url = "http://127.0.0.1:1".into();
        config.network.timeout = 2;
        let client = ApiClient::new(&config).unwrap();

        let err = client
            .request_json::<Session>(Method::GET, IDENTITY_PATH, None)
            .await
            .unwrap_err();
        assert!(matches!(err, GateError::Http(_)));
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_status_error_is_network_error() {
        let err = ApiClient::status_error(ACCESS_CHECK_PATH, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, GateError::Network(_)));
        assert_eq!(
            err.to_string(),
            "Network error: admin-menu-permissions/check returned HTTP 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_unreachable_identity_is_identity_unavailable() {
        let mut config = Config::default();
        config.server.base_url = "http://127.0.0.1:1".into();
        config.network.timeout = 2;
        let client = ApiClient::new(&config).unwrap();

        let err = client.fetch_identity().await.unwrap_err();
        assert!(matches!(err, GateError::IdentityUnavailable(_)));
    }
}
