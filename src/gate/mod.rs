//! Admin page permission gate
//!
//! On every admin page view the gate loads the current user, decides whether
//! the page may be shown, and either renders the permitted sidebar or sends
//! the user back to the landing page. Authorization failures are closed,
//! menu failures are soft.

pub mod decision;
pub mod manager;
pub mod rules;
pub mod state;

pub use decision::{AccessDecision, DenyReason, GrantReason};
pub use manager::PermissionGate;
pub use rules::PageAccessRules;
pub use state::{GateEvent, GateState};
