//! Permission gate service

use std::sync::Arc;

use crate::api::{AccessCheckRequest, Backend, Session};
use crate::core::config::GateConfig;
use crate::core::{GateError, GateResult};
use crate::gate::decision::{AccessDecision, DenyReason, GrantReason};
use crate::gate::rules::PageAccessRules;
use crate::gate::state::{GateEvent, GateState};
use crate::menu::{render_sidebar, MenuEntry};
use crate::ui::{MenuView, Navigator};

/// Shown when the gate itself fails
pub const GENERIC_ERROR_MESSAGE: &str = "권한 체크 중 오류가 발생했습니다.";

/// Alert text for a blocked page
pub fn access_denied_message(label: &str) -> String {
    format!("'{}' 페이지에 대한 접근 권한이 없습니다.\n대시보드로 이동합니다.", label)
}

/// Alert text for a gate failure
pub fn error_message(message: &str) -> String {
    format!("오류가 발생했습니다: {}\n대시보드로 이동합니다.", message)
}

/// Guards one page view: loads the user, checks the page, renders the menu
pub struct PermissionGate<B: ?Sized, V: ?Sized, N: ?Sized> {
    backend: Arc<B>,
    view: Arc<V>,
    navigator: Arc<N>,
    rules: PageAccessRules,
    landing_path: String,
    top_tier_code: String,
    state: GateState,
    decision: Option<AccessDecision>,
}

impl<B, V, N> PermissionGate<B, V, N>
where
    B: Backend + ?Sized,
    V: MenuView + ?Sized,
    N: Navigator + ?Sized,
{
    pub fn new(backend: Arc<B>, view: Arc<V>, navigator: Arc<N>, config: &GateConfig) -> Self {
        Self {
            backend,
            view,
            navigator,
            rules: PageAccessRules::new(config.rules.clone()),
            landing_path: config.landing_path.clone(),
            top_tier_code: config.top_tier_code.clone(),
            state: GateState::Init,
            decision: None,
        }
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Decision reached for the current page, once checked
    pub fn decision(&self) -> Option<&AccessDecision> {
        self.decision.as_ref()
    }

    pub fn rules(&self) -> &PageAccessRules {
        &self.rules
    }

    /// Run the gate once for this page view.
    ///
    /// Returns true iff access was granted; a menu that fails to load does
    /// not change the answer.
    pub async fn initialize(&mut self) -> bool {
        if self.state != GateState::Init {
            tracing::warn!("Permission gate already ran ({})", self.state);
            return self.state.access_granted();
        }

        match self.run().await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::error!("Permission gate failed: {}", e);
                if !self.state.is_terminal() {
                    self.state = GateState::Error { reason: e.to_string() };
                }
                self.show_error(GENERIC_ERROR_MESSAGE);
                false
            }
        }
    }

    async fn run(&mut self) -> GateResult<bool> {
        self.advance(GateEvent::Start)?;

        let session = match self.backend.fetch_identity().await {
            Ok(session) => session,
            Err(e) => {
                let reason = match e {
                    GateError::IdentityUnavailable(reason) => reason,
                    other => other.to_string(),
                };
                tracing::error!("Current user could not be loaded: {}", reason);
                self.advance(GateEvent::IdentityFailed(reason.clone()))?;
                return Err(GateError::IdentityUnavailable(reason));
            }
        };
        tracing::debug!("Loaded user {} (auth code {})", session.user_id, session.auth_code);
        self.advance(GateEvent::IdentityLoaded(session))?;

        let decision = self.check_page_permission().await;
        self.decision = Some(decision.clone());
        self.advance(GateEvent::AccessDecided(decision.clone()))?;

        if !decision.is_granted() {
            self.show_access_denied(&decision);
            return Ok(false);
        }

        self.advance(GateEvent::MenuLoadStarted)?;
        self.load_accessible_menus().await?;

        Ok(true)
    }

    /// Decide access to the current page for the loaded session
    pub async fn check_page_permission(&self) -> AccessDecision {
        let path = self.navigator.current_path();
        self.check_page_permission_for(self.state.session(), &path).await
    }

    /// Decide access to `path`. Anything short of an explicit `hasAccess: true`
    /// from the backend is a denial for mapped pages.
    pub async fn check_page_permission_for(
        &self,
        session: Option<&Session>,
        path: &str,
    ) -> AccessDecision {
        let Some(session) = session else {
            return AccessDecision::denied(self.rules.required_capability(path), DenyReason::NoSession);
        };

        let Some(capability) = self.rules.required_capability(path) else {
            return AccessDecision::granted(GrantReason::OpenPage);
        };

        if session.is_top_tier(&self.top_tier_code) {
            return AccessDecision::granted(GrantReason::TopTier);
        }

        let request = AccessCheckRequest {
            user_id: session.user_id.clone(),
            menu_name: capability.to_string(),
        };

        match self.backend.check_access(&request).await {
            Ok(response) if response.has_access => AccessDecision::granted(GrantReason::Remote),
            Ok(_) => {
                tracing::info!("{} has no access to {} ({})", session.user_id, path, capability);
                AccessDecision::denied(Some(capability), DenyReason::Remote)
            }
            Err(e) => {
                tracing::error!("Permission check for {} failed: {}", path, e);
                AccessDecision::denied(Some(capability), DenyReason::CheckFailed(e.to_string()))
            }
        }
    }

    async fn load_accessible_menus(&mut self) -> GateResult<()> {
        match self.backend.fetch_accessible_menus().await {
            Ok(menus) => {
                let entries: Vec<MenuEntry> = menus.into_iter().map(MenuEntry::from).collect();
                let sidebar = render_sidebar(&entries);
                let count = sidebar.len();
                self.view.render(sidebar);
                self.advance(GateEvent::MenusLoaded(count))
            }
            Err(e) => {
                tracing::warn!("Accessible menus could not be loaded: {}", e);
                self.advance(GateEvent::MenuLoadFailed(e.to_string()))
            }
        }
    }

    fn advance(&mut self, event: GateEvent) -> GateResult<()> {
        let next = self.state.clone().transition(event)?;
        tracing::trace!("Gate {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    fn show_access_denied(&self, decision: &AccessDecision) {
        let path = self.navigator.current_path();
        let label = match decision {
            AccessDecision::Denied { capability: Some(capability), .. } => capability.as_str(),
            _ => self.rules.label_for(&path),
        };
        self.navigator.alert(&access_denied_message(label));
        self.navigator.navigate(&self.landing_path);
    }

    fn show_error(&self, message: &str) {
        self.navigator.alert(&error_message(message));
        self.navigator.navigate(&self.landing_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AdminMenu;
    use crate::gate::rules::DEFAULT_LANDING_PATH;
    use crate::testing::StubBackend;
    use crate::ui::TerminalPage;

    type TestGate = PermissionGate<StubBackend, TerminalPage, TerminalPage>;

    fn gate_for(backend: StubBackend, path: &str) -> (TestGate, Arc<StubBackend>, Arc<TerminalPage>) {
        let backend = Arc::new(backend);
        let page = Arc::new(TerminalPage::new(path, false));
        let gate = PermissionGate::new(
            backend.clone(),
            page.clone(),
            page.clone(),
            &GateConfig::default(),
        );
        (gate, backend, page)
    }

    fn main_admin() -> Session {
        Session::new("admin", "001")
    }

    fn sub_admin() -> Session {
        Session::new("sub01", "002")
    }

    fn menu(no: i64, name: &str, url: &str) -> AdminMenu {
        AdminMenu {
            menu_no: no,
            menu_name: name.into(),
            menu_url: Some(url.into()),
            menu_icon: Some("dashboard".into()),
            menu_order: Some(no as i32),
            is_active: true,
            is_visible: true,
            children: vec![],
        }
    }

    #[tokio::test]
    async fn test_unmapped_dashboard_skips_authorization() {
        let backend = StubBackend::new()
            .with_identity(Ok(sub_admin()))
            .with_menus(Ok(vec![menu(1, "대시보드", "/admin/dashboard.html")]));
        let (mut gate, backend, page) = gate_for(backend, "/admin/dashboard.html");

        assert!(gate.initialize().await);
        assert_eq!(backend.count("check"), 0);
        assert_eq!(backend.calls(), vec!["identity", "menus"]);
        assert_eq!(gate.decision(), Some(&AccessDecision::granted(GrantReason::OpenPage)));
        assert!(page.alerts().is_empty());
        assert_eq!(page.menu().map(|m| m.len()), Some(1));
        assert_eq!(
            gate.state(),
            &GateState::Rendered { session: sub_admin(), menu_items: Some(1) }
        );
    }

    #[tokio::test]
    async fn test_top_tier_skips_authorization() {
        let backend = StubBackend::new()
            .with_identity(Ok(main_admin()))
            .with_access(Ok(false))
            .with_menus(Ok(vec![]));
        let (mut gate, backend, page) = gate_for(backend, "/admin/admin-management.html");

        assert!(gate.initialize().await);
        assert_eq!(backend.count("check"), 0);
        assert_eq!(gate.decision(), Some(&AccessDecision::granted(GrantReason::TopTier)));
        assert!(page.navigations().is_empty());
        assert!(page.menu().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sub_admin_denied_is_alerted_and_redirected() {
        let backend = StubBackend::new()
            .with_identity(Ok(sub_admin()))
            .with_access(Ok(false))
            .with_menus(Ok(vec![menu(1, "대시보드", "/admin/dashboard.html")]));
        let (mut gate, backend, page) = gate_for(backend, "/admin/admin-management.html");

        assert!(!gate.initialize().await);

        let alerts = page.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("'관리자 관리'"));
        assert_eq!(alerts[0], access_denied_message("관리자 관리"));
        assert_eq!(page.navigations(), vec![DEFAULT_LANDING_PATH.to_string()]);

        assert_eq!(backend.count("menus"), 0);
        assert!(page.menu().is_none());
        assert_eq!(
            backend.access_requests(),
            vec![AccessCheckRequest { user_id: "sub01".into(), menu_name: "관리자 관리".into() }]
        );
        assert!(matches!(gate.state(), GateState::Denied { reason: DenyReason::Remote, .. }));
    }

    #[tokio::test]
    async fn test_sub_admin_granted_remotely() {
        let backend = StubBackend::new()
            .with_identity(Ok(sub_admin()))
            .with_access(Ok(true))
            .with_menus(Ok(vec![menu(2, "메뉴 관리", "/admin/menu-management.html")]));
        let (mut gate, backend, page) = gate_for(backend, "/admin/menu-management.html");

        assert!(gate.initialize().await);
        assert_eq!(backend.calls(), vec!["identity", "check", "menus"]);
        assert_eq!(gate.decision(), Some(&AccessDecision::granted(GrantReason::Remote)));
        assert!(page.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_identity_failure_stops_everything() {
        let backend = StubBackend::new()
            .with_identity(Err("/api/account returned HTTP 500"))
            .with_access(Ok(true))
            .with_menus(Ok(vec![]));
        let (mut gate, backend, page) = gate_for(backend, "/admin/admin-management.html");

        assert!(!gate.initialize().await);
        assert_eq!(backend.calls(), vec!["identity"]);
        assert_eq!(
            gate.state(),
            &GateState::Error { reason: "/api/account returned HTTP 500".into() }
        );
        assert_eq!(page.alerts(), vec![error_message(GENERIC_ERROR_MESSAGE)]);
        assert_eq!(page.navigations(), vec![DEFAULT_LANDING_PATH.to_string()]);
        assert!(gate.decision().is_none());
    }

    #[tokio::test]
    async fn test_menu_failure_is_soft() {
        let backend = StubBackend::new()
            .with_identity(Ok(sub_admin()))
            .with_access(Ok(true))
            .with_menus(Err("HTTP 503"));
        let (mut gate, _backend, page) = gate_for(backend, "/admin/cms-test.html");

        assert!(gate.initialize().await);
        assert!(page.menu().is_none());
        assert!(page.alerts().is_empty());
        assert!(page.navigations().is_empty());
        assert_eq!(
            gate.state(),
            &GateState::Rendered { session: sub_admin(), menu_items: None }
        );
    }

    #[tokio::test]
    async fn test_check_failure_is_closed() {
        for failure in ["connection refused", "HTTP 500", "expected value at line 1 column 1"] {
            let backend = StubBackend::new()
                .with_identity(Ok(sub_admin()))
                .with_access(Err(failure))
                .with_menus(Ok(vec![]));
            let (mut gate, backend, page) = gate_for(backend, "/admin/notice-detail.html");

            assert!(!gate.initialize().await, "{failure} must not grant access");
            assert_eq!(backend.count("check"), 1, "no retry on {failure}");
            assert_eq!(backend.count("menus"), 0);
            assert!(page.alerts()[0].contains("'공지사항 관리'"));
            assert!(matches!(
                gate.decision(),
                Some(AccessDecision::Denied { reason: DenyReason::CheckFailed(_), .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_every_unmapped_path_is_open() {
        let backend = StubBackend::new().with_access(Ok(false));
        let (gate, backend, _page) = gate_for(backend, "/");

        let session = sub_admin();
        for path in ["/", "/admin/dashboard.html", "/admin/unknown.html", "/index.html", ""] {
            assert_eq!(
                gate.check_page_permission_for(Some(&session), path).await,
                AccessDecision::granted(GrantReason::OpenPage),
                "{path}"
            );
        }
        assert_eq!(backend.count("check"), 0);
    }

    #[tokio::test]
    async fn test_top_tier_granted_on_every_mapped_path() {
        let backend = StubBackend::new().with_access(Err("unreachable"));
        let (gate, backend, _page) = gate_for(backend, "/");

        let session = main_admin();
        let paths: Vec<String> = gate.rules().iter().map(|(p, _)| p.to_string()).collect();
        for path in paths {
            assert!(gate.check_page_permission_for(Some(&session), &path).await.is_granted());
        }
        assert_eq!(backend.count("check"), 0);
    }

    #[tokio::test]
    async fn test_sub_tier_never_granted_when_check_fails() {
        let backend = StubBackend::new().with_access(Err("HTTP 502"));
        let (gate, _backend, _page) = gate_for(backend, "/");

        for code in ["002", "003", "", "0010"] {
            let session = Session::new("someone", code);
            let paths: Vec<String> = gate.rules().iter().map(|(p, _)| p.to_string()).collect();
            for path in paths {
                assert!(!gate.check_page_permission_for(Some(&session), &path).await.is_granted());
            }
        }
    }

    #[tokio::test]
    async fn test_missing_session_is_denied() {
        let (gate, backend, _page) = gate_for(StubBackend::new().with_access(Ok(true)), "/");
        let decision = gate.check_page_permission_for(None, "/admin/dashboard.html").await;
        assert_eq!(decision, AccessDecision::denied(None, DenyReason::NoSession));
        assert_eq!(backend.count("check"), 0);
    }

    #[tokio::test]
    async fn test_second_initialize_does_not_rerun() {
        let backend = StubBackend::new()
            .with_identity(Ok(sub_admin()))
            .with_menus(Ok(vec![]));
        let (mut gate, backend, page) = gate_for(backend, "/admin/dashboard.html");

        assert!(gate.initialize().await);
        assert!(gate.initialize().await);
        assert_eq!(backend.count("identity"), 1);
        assert!(page.alerts().is_empty());
    }
}
