//! CSRF token handling for form posts and mutating requests
//!
//! The token is issued by the backend, attached to same-origin mutating
//! requests outside the JSON API, injected into forms as a hidden field, and
//! re-issued whenever the server answers 403.

use parking_lot::RwLock;
use reqwest::{Method, StatusCode};
use url::Url;

use crate::api::Backend;
use crate::core::config::CsrfConfig;

const API_PATH_PREFIX: &str = "/api/";
const TOKEN_PATH_FRAGMENT: &str = "/csrf-token";

/// Token plus the names it travels under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub header_name: String,
    pub parameter_name: String,
}

/// Hidden input to append to a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

impl HiddenField {
    pub fn to_html(&self) -> String {
        format!(
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            crate::menu::html::escape(&self.name),
            crate::menu::html::escape(&self.value)
        )
    }
}

pub struct CsrfGuard {
    origin: Url,
    defaults: CsrfConfig,
    token: RwLock<Option<IssuedToken>>,
}

impl CsrfGuard {
    pub fn new(origin: Url, defaults: &CsrfConfig) -> Self {
        Self {
            origin,
            defaults: defaults.clone(),
            token: RwLock::new(None),
        }
    }

    /// Fetch a fresh token. A failure is logged and leaves no token behind.
    pub async fn issue<B: Backend + ?Sized>(&self, backend: &B) -> Option<IssuedToken> {
        match backend.fetch_csrf_token().await {
            Ok(raw) => {
                let issued = IssuedToken {
                    token: raw.token,
                    header_name: raw
                        .header_name
                        .unwrap_or_else(|| self.defaults.header_name.clone()),
                    parameter_name: raw
                        .parameter_name
                        .unwrap_or_else(|| self.defaults.parameter_name.clone()),
                };
                *self.token.write() = Some(issued.clone());
                Some(issued)
            }
            Err(e) => {
                tracing::error!("CSRF token could not be issued: {}", e);
                *self.token.write() = None;
                None
            }
        }
    }

    pub fn current(&self) -> Option<IssuedToken> {
        self.token.read().clone()
    }

    /// Header to attach to a request, if it needs one.
    ///
    /// Only POST/PUT/DELETE/PATCH to this origin qualify. JSON API calls are
    /// authenticated by session and go out untouched.
    pub fn header_for(&self, method: &Method, url: &str) -> Option<(String, String)> {
        if ![Method::POST, Method::PUT, Method::DELETE, Method::PATCH].contains(method) {
            return None;
        }

        let target = self.origin.join(url).ok()?;
        if target.origin() != self.origin.origin() {
            return None;
        }

        let path = target.path();
        if path.starts_with(API_PATH_PREFIX) && !path.contains(TOKEN_PATH_FRAGMENT) {
            return None;
        }

        self.current().map(|t| (t.header_name, t.token))
    }

    /// Hidden token field for a form, unless the form already carries one
    pub fn form_field<'a, I>(&self, existing_fields: I) -> Option<HiddenField>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let token = self.current()?;
        if existing_fields
            .into_iter()
            .any(|name| name == token.parameter_name)
        {
            return None;
        }
        Some(HiddenField {
            name: token.parameter_name,
            value: token.token,
        })
    }

    /// React to a response status; returns true when a new token was requested
    pub async fn on_response<B: Backend + ?Sized>(&self, status: StatusCode, backend: &B) -> bool {
        if status != StatusCode::FORBIDDEN {
            return false;
        }
        tracing::warn!("Request rejected with 403, re-issuing CSRF token");
        self.issue(backend).await;
        true
    }
}
