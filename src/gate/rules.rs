//! Page path to capability mapping

use std::collections::BTreeMap;

/// Page used for both the denied redirect and the generic-error redirect
pub const DEFAULT_LANDING_PATH: &str = "/admin/dashboard.html";

/// Authorization code of the main administrator
pub const TOP_TIER_CODE: &str = "001";

/// Label shown when a blocked page has no known capability
pub const UNKNOWN_PAGE_LABEL: &str = "알 수 없는 페이지";

/// Compiled-in rule table.
///
/// The landing page is intentionally absent: it is where denied users are
/// sent, so it has to stay open.
pub fn default_rules() -> BTreeMap<String, String> {
    [
        ("/admin/admin-management.html", "관리자 관리"),
        ("/admin/menu-management.html", "메뉴 관리"),
        ("/admin/notice-management.html", "공지사항 관리"),
        ("/admin/notice-detail.html", "공지사항 관리"),
        ("/admin/newsroom-management.html", "보도자료 관리"),
        ("/admin/cms-test.html", "콘텐츠 관리"),
    ]
    .into_iter()
    .map(|(path, capability)| (path.to_string(), capability.to_string()))
    .collect()
}

/// Immutable path -> capability table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAccessRules {
    rules: BTreeMap<String, String>,
}

impl PageAccessRules {
    pub fn new(rules: BTreeMap<String, String>) -> Self {
        Self { rules }
    }

    /// Capability a page requires, `None` for open pages
    pub fn required_capability(&self, path: &str) -> Option<&str> {
        self.rules.get(path).map(String::as_str)
    }

    /// Label used in the denial message
    pub fn label_for(&self, path: &str) -> &str {
        self.required_capability(path).unwrap_or(UNKNOWN_PAGE_LABEL)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PageAccessRules {
    fn default() -> Self {
        Self::new(default_rules())
    }
}
