//! Navigation menus: the permission-filtered admin sidebar and the public header

pub mod entry;
pub mod header;
pub mod html;
pub mod icons;
pub mod sidebar;

pub use entry::MenuEntry;
pub use header::{load_header, HeaderMenu, HeaderSource};
pub use sidebar::{render_sidebar, Binding, MenuAction, SidebarMenu, SidebarState};
