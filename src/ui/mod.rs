//! Page-side seams: navigation, the menu container, and hover/accordion behavior

pub mod dropdown;
pub mod hover;
pub mod terminal;

use crate::menu::SidebarMenu;

pub use terminal::TerminalPage;

/// Browser location and modal feedback
pub trait Navigator: Send + Sync {
    /// Path of the page being gated
    fn current_path(&self) -> String;

    /// Blocking message to the user
    fn alert(&self, message: &str);

    /// Leave the current page
    fn navigate(&self, path: &str);
}

/// Container the sidebar is rendered into
pub trait MenuView: Send + Sync {
    fn render(&self, menu: SidebarMenu);
}
