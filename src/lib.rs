//! Menugate - admin page permission gate
//!
//! Loads the signed-in user from a content-management backend, decides
//! whether an admin page may be shown, and renders the navigation the user
//! is allowed to see. The browser is abstracted behind [`ui::Navigator`] and
//! [`ui::MenuView`], the backend behind [`api::Backend`].

pub mod api;
pub mod cli;
pub mod core;
pub mod csrf;
pub mod gate;
pub mod menu;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::core::{Config, GateError, GateResult};
pub use gate::PermissionGate;
