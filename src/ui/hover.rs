//! Header hover behavior as declarative style patches
//!
//! The controller never touches a document. It says which classes and inline
//! styles change, and an adapter applies them.

use serde::Serialize;

use crate::menu::HeaderMenu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "target", content = "index")]
pub enum PatchTarget {
    /// The `.header` element
    Header,
    /// A `.depth-1` item
    Item(usize),
    /// The `.depth-item` wrapper of an item
    Submenu(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum StyleOp {
    AddClass { class: &'static str },
    RemoveClass { class: &'static str },
    SetStyle { property: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePatch {
    pub target: PatchTarget,
    pub op: StyleOp,
}

impl StylePatch {
    fn new(target: PatchTarget, op: StyleOp) -> Self {
        Self { target, op }
    }

    fn style(target: PatchTarget, property: &'static str, value: impl Into<String>) -> Self {
        Self::new(target, StyleOp::SetStyle { property, value: value.into() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverEvent {
    MouseEnter,
    MouseLeave,
}

/// Hover bindings for the desktop header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverController {
    has_submenu: Vec<bool>,
}

impl HoverController {
    /// Derive bindings from the rendered desktop header
    pub fn for_header(header: &HeaderMenu) -> Self {
        let has_submenu = header
            .entries
            .iter()
            .filter(|e| e.active)
            .map(|e| e.active_children().next().is_some())
            .collect();
        Self { has_submenu }
    }

    /// `(item, event)` pairs to listen on; items without a submenu get none
    pub fn bindings(&self) -> Vec<(usize, HoverEvent)> {
        self.has_submenu
            .iter()
            .enumerate()
            .filter(|(_, has)| **has)
            .flat_map(|(i, _)| [(i, HoverEvent::MouseEnter), (i, HoverEvent::MouseLeave)])
            .collect()
    }

    /// Open the submenu of `item`, sized to the measured submenu height
    pub fn enter(&self, item: usize, submenu_height: Option<f64>) -> Vec<StylePatch> {
        if !self.is_bound(item) {
            return Vec::new();
        }
        let mut patches = vec![
            StylePatch::new(PatchTarget::Header, StyleOp::AddClass { class: "open" }),
            StylePatch::new(PatchTarget::Item(item), StyleOp::AddClass { class: "current" }),
            StylePatch::style(PatchTarget::Submenu(item), "visibility", "visible"),
            StylePatch::style(PatchTarget::Submenu(item), "opacity", "1"),
        ];
        if let Some(height) = submenu_height {
            patches.push(StylePatch::style(
                PatchTarget::Submenu(item),
                "height",
                format!("{}px", height),
            ));
        }
        patches
    }

    /// Collapse the submenu of `item`
    pub fn leave(&self, item: usize) -> Vec<StylePatch> {
        if !self.is_bound(item) {
            return Vec::new();
        }
        vec![
            StylePatch::new(PatchTarget::Header, StyleOp::RemoveClass { class: "open" }),
            StylePatch::new(PatchTarget::Item(item), StyleOp::RemoveClass { class: "current" }),
            StylePatch::style(PatchTarget::Submenu(item), "visibility", "hidden"),
            StylePatch::style(PatchTarget::Submenu(item), "opacity", "0"),
            StylePatch::style(PatchTarget::Submenu(item), "height", "0px"),
        ]
    }

    fn is_bound(&self, item: usize) -> bool {
        self.has_submenu.get(item).copied().unwrap_or(false)
    }
}
