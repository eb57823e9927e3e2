//! Menu tree shared by the sidebar and the header renderers

use serde::Serialize;

use crate::api::{AdminMenu, HeaderMenuNode};

/// Target used when an entry has no URL
pub const PLACEHOLDER_HREF: &str = "#";

/// One node of a navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub active: bool,
    pub new_window: bool,
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.map(str::to_string),
            icon: None,
            active: true,
            new_window: false,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = children;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Link target, `#` when the entry has no real URL
    pub fn href(&self) -> &str {
        match self.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => PLACEHOLDER_HREF,
        }
    }

    pub fn has_target(&self) -> bool {
        self.href() != PLACEHOLDER_HREF
    }

    /// Active children only
    pub fn active_children(&self) -> impl Iterator<Item = &MenuEntry> {
        self.children.iter().filter(|c| c.active)
    }
}

impl From<AdminMenu> for MenuEntry {
    fn from(menu: AdminMenu) -> Self {
        Self {
            id: menu.menu_no.to_string(),
            name: menu.menu_name,
            url: menu.menu_url,
            icon: menu.menu_icon,
            active: menu.is_active && menu.is_visible,
            new_window: false,
            children: menu.children.into_iter().map(MenuEntry::from).collect(),
        }
    }
}

impl From<HeaderMenuNode> for MenuEntry {
    fn from(node: HeaderMenuNode) -> Self {
        let id = node
            .menu_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| node.menu_name.clone());
        Self {
            id,
            name: node.menu_name,
            url: node.menu_url,
            icon: None,
            active: node.is_active.as_deref() != Some("N"),
            new_window: node.is_new_window.as_deref() == Some("Y"),
            children: node.children.into_iter().map(MenuEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_is_placeholder() {
        assert_eq!(MenuEntry::new("1", "a", None).href(), "#");
        assert_eq!(MenuEntry::new("1", "a", Some("  ")).href(), "#");
        assert!(!MenuEntry::new("1", "a", Some("#")).has_target());
        assert!(MenuEntry::new("1", "a", Some("/admin/x.html")).has_target());
    }

    #[test]
    fn test_hidden_admin_menu_is_inactive() {
        let menu = AdminMenu {
            menu_no: 7,
            menu_name: "접속 이력".into(),
            menu_url: Some("/admin/login-log.html".into()),
            menu_icon: Some("history".into()),
            menu_order: Some(7),
            is_active: true,
            is_visible: false,
            children: vec![],
        };
        let entry = MenuEntry::from(menu);
        assert_eq!(entry.id, "7");
        assert!(!entry.active);
    }

    #[test]
    fn test_header_flags() {
        let node = HeaderMenuNode {
            menu_id: None,
            menu_name: "채용공고".into(),
            menu_url: Some("./sub0401.html".into()),
            is_active: None,
            is_new_window: Some("Y".into()),
            children: vec![],
        };
        let entry = MenuEntry::from(node);
        assert!(entry.active);
        assert!(entry.new_window);
        assert_eq!(entry.id, "채용공고");
    }
}
