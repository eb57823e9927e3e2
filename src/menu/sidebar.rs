//! Admin sidebar rendering
//!
//! Rendering is pure: [`render_sidebar`] returns the items together with a
//! binding table, and whoever owns the real widget wires the bindings up.

use std::fmt::Write;
use serde::Serialize;

use crate::menu::entry::MenuEntry;
use crate::menu::html::escape;
use crate::menu::icons;

/// Shown when no entry survives filtering
pub const EMPTY_MENU_MESSAGE: &str = "등록된 메뉴가 없습니다.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub id: String,
    pub name: String,
    pub href: String,
    pub icon: &'static str,
    pub depth: usize,
    pub children: Vec<SidebarItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UiEvent {
    Click,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum MenuAction {
    /// Mark the item active and navigate
    Activate { href: String },
    /// Placeholder link, nothing happens
    Ignore,
}

/// One `(element, handler)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub menu_id: String,
    pub event: UiEvent,
    pub action: MenuAction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SidebarMenu {
    pub items: Vec<SidebarItem>,
    pub bindings: Vec<Binding>,
}

/// Build sidebar items from a menu tree, skipping inactive entries and their subtrees
pub fn render_sidebar(entries: &[MenuEntry]) -> SidebarMenu {
    let mut bindings = Vec::new();
    let items = render_level(entries, 0, &mut bindings);
    SidebarMenu { items, bindings }
}

fn render_level(entries: &[MenuEntry], depth: usize, bindings: &mut Vec<Binding>) -> Vec<SidebarItem> {
    entries
        .iter()
        .filter(|entry| entry.active)
        .map(|entry| {
            let href = entry.href().to_string();
            bindings.push(Binding {
                menu_id: entry.id.clone(),
                event: UiEvent::Click,
                action: if entry.has_target() {
                    MenuAction::Activate { href: href.clone() }
                } else {
                    MenuAction::Ignore
                },
            });
            SidebarItem {
                id: entry.id.clone(),
                name: entry.name.clone(),
                href,
                icon: icons::glyph(entry.icon.as_deref()),
                depth,
                children: render_level(&entry.children, depth + 1, bindings),
            }
        })
        .collect()
}

impl SidebarMenu {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of rendered items, nested ones included
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn binding(&self, menu_id: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.menu_id == menu_id)
    }

    /// Sidebar markup for the `sidebarMenu` container
    pub fn to_html(&self) -> String {
        if self.is_empty() {
            return format!("<li class=\"loading\">{}</li>", EMPTY_MENU_MESSAGE);
        }
        let mut out = String::new();
        write_items(&mut out, &self.items);
        out
    }
}

fn write_items(out: &mut String, items: &[SidebarItem]) {
    for item in items {
        let _ = write!(
            out,
            "<li class=\"menu-item\"><a class=\"menu-link\" href=\"{}\" data-menu-id=\"{}\">\
             <span class=\"menu-icon\">{}</span><span class=\"menu-text\">{}</span></a>",
            escape(&item.href),
            escape(&item.id),
            item.icon,
            escape(&item.name),
        );
        if !item.children.is_empty() {
            out.push_str("<ul class=\"sub-menu\">");
            write_items(out, &item.children);
            out.push_str("</ul>");
        }
        out.push_str("</li>");
    }
}

/// Which sidebar item is highlighted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidebarState {
    active: Option<String>,
}

impl SidebarState {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Handle a click; returns where to navigate.
    ///
    /// Placeholder links leave the current highlight alone.
    pub fn click(&mut self, menu: &SidebarMenu, menu_id: &str) -> Option<String> {
        match &menu.binding(menu_id)?.action {
            MenuAction::Activate { href } => {
                self.active = Some(menu_id.to_string());
                Some(href.clone())
            }
            MenuAction::Ignore => None,
        }
    }
}
