//! In-memory backend for unit tests

use parking_lot::Mutex;
use async_trait::async_trait;

use crate::api::{
    AccessCheckRequest, AccessCheckResponse, AdminMenu, Backend, CsrfToken, HeaderMenuNode,
    Session,
};
use crate::core::{GateError, GateResult};

/// Scripted backend; unset replies fail like an unreachable server
#[derive(Default)]
pub struct StubBackend {
    identity: Option<Result<Session, String>>,
    access: Option<Result<bool, String>>,
    menus: Option<Result<Vec<AdminMenu>, String>>,
    tree: Option<Result<Vec<HeaderMenuNode>, String>>,
    csrf: Option<Result<(), String>>,
    calls: Mutex<Vec<&'static str>>,
    access_requests: Mutex<Vec<AccessCheckRequest>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(mut self, reply: Result<Session, &str>) -> Self {
        self.identity = Some(reply.map_err(str::to_string));
        self
    }

    pub fn with_access(mut self, reply: Result<bool, &str>) -> Self {
        self.access = Some(reply.map_err(str::to_string));
        self
    }

    pub fn with_menus(mut self, reply: Result<Vec<AdminMenu>, &str>) -> Self {
        self.menus = Some(reply.map_err(str::to_string));
        self
    }

    pub fn with_tree(reply: Result<Vec<HeaderMenuNode>, &str>) -> Self {
        Self {
            tree: Some(reply.map_err(str::to_string)),
            ..Self::default()
        }
    }

    pub fn with_csrf(mut self, reply: Result<(), &str>) -> Self {
        self.csrf = Some(reply.map_err(str::to_string));
        self
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    pub fn access_requests(&self) -> Vec<AccessCheckRequest> {
        self.access_requests.lock().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().push(call);
    }
}

fn reply<T: Clone>(
    slot: &Option<Result<T, String>>,
    wrap: impl FnOnce(String) -> GateError,
) -> GateResult<T> {
    match slot {
        Some(Ok(value)) => Ok(value.clone()),
        Some(Err(reason)) => Err(wrap(reason.clone())),
        None => Err(wrap("connection refused".to_string())),
    }
}

#[async_trait]
impl Backend for StubBackend {
    async fn fetch_identity(&self) -> GateResult<Session> {
        self.record("identity");
        reply(&self.identity, GateError::IdentityUnavailable)
    }

    async fn check_access(&self, request: &AccessCheckRequest) -> GateResult<AccessCheckResponse> {
        self.record("check");
        self.access_requests.lock().push(request.clone());
        reply(&self.access, GateError::AuthorizationCheckFailed)
            .map(|has_access| AccessCheckResponse { has_access })
    }

    async fn fetch_accessible_menus(&self) -> GateResult<Vec<AdminMenu>> {
        self.record("menus");
        reply(&self.menus, GateError::MenuLoadFailed)
    }

    async fn fetch_menu_tree(&self) -> GateResult<Vec<HeaderMenuNode>> {
        self.record("tree");
        reply(&self.tree, GateError::HeaderLoadFailed)
    }

    async fn fetch_csrf_token(&self) -> GateResult<CsrfToken> {
        self.record("csrf");
        reply(&self.csrf, GateError::CsrfUnavailable)?;
        let issued = self.count("csrf");
        Ok(CsrfToken {
            token: format!("token-{}", issued),
            header_name: None,
            parameter_name: None,
        })
    }
}
