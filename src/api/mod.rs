//! Content-management backend access
//!
//! The gate and the menu renderers only see the [`Backend`] trait, so they
//! can be driven by the HTTP client below or by an in-memory stand-in.

pub mod client;
pub mod types;

use async_trait::async_trait;

use crate::core::GateResult;

pub use client::ApiClient;
pub use types::{
    AccessCheckRequest, AccessCheckResponse, AdminMenu, CsrfToken, HeaderMenuNode, Session,
};

/// Endpoints consumed by the gate and its collaborators
#[async_trait]
pub trait Backend: Send + Sync {
    /// Load the user behind the ambient credentials
    async fn fetch_identity(&self) -> GateResult<Session>;

    /// Ask the backend whether a user holds a capability
    async fn check_access(&self, request: &AccessCheckRequest) -> GateResult<AccessCheckResponse>;

    /// Admin menus the current user may see
    async fn fetch_accessible_menus(&self) -> GateResult<Vec<AdminMenu>>;

    /// Public site navigation tree
    async fn fetch_menu_tree(&self) -> GateResult<Vec<HeaderMenuNode>>;

    /// Issue a CSRF token for the current session
    async fn fetch_csrf_token(&self) -> GateResult<CsrfToken>;
}
