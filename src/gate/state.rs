//! Gate lifecycle as an explicit state machine
//!
//! ```text
//! Init -> LoadingUser -> CheckingPermission -> Granted -> LoadingMenu -> Rendered
//!                     \                     \-> Denied
//!                      \-> Error
//! ```
//!
//! `Rendered`, `Denied` and `Error` are terminal.

use std::fmt;

use crate::api::Session;
use crate::core::{GateError, GateResult};
use crate::gate::decision::{AccessDecision, DenyReason};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Init,
    LoadingUser,
    CheckingPermission { session: Session },
    Granted { session: Session },
    LoadingMenu { session: Session },
    /// `menu_items` is `None` when the menu could not be loaded
    Rendered { session: Session, menu_items: Option<usize> },
    Denied { session: Option<Session>, capability: Option<String>, reason: DenyReason },
    Error { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateEvent {
    Start,
    IdentityLoaded(Session),
    IdentityFailed(String),
    AccessDecided(AccessDecision),
    MenuLoadStarted,
    MenusLoaded(usize),
    MenuLoadFailed(String),
}

impl GateState {
    /// Apply an event, rejecting anything the lifecycle does not allow
    pub fn transition(self, event: GateEvent) -> GateResult<GateState> {
        use GateEvent as E;
        use GateState as S;

        match (self, event) {
            (S::Init, E::Start) => Ok(S::LoadingUser),
            (S::LoadingUser, E::IdentityLoaded(session)) => Ok(S::CheckingPermission { session }),
            (S::LoadingUser, E::IdentityFailed(reason)) => Ok(S::Error { reason }),
            (S::CheckingPermission { session }, E::AccessDecided(decision)) => Ok(match decision {
                AccessDecision::Granted { .. } => S::Granted { session },
                AccessDecision::Denied { capability, reason } => S::Denied {
                    session: Some(session),
                    capability,
                    reason,
                },
            }),
            (S::Granted { session }, E::MenuLoadStarted) => Ok(S::LoadingMenu { session }),
            (S::LoadingMenu { session }, E::MenusLoaded(count)) => Ok(S::Rendered {
                session,
                menu_items: Some(count),
            }),
            (S::LoadingMenu { session }, E::MenuLoadFailed(_)) => Ok(S::Rendered {
                session,
                menu_items: None,
            }),
            (state, event) => Err(GateError::InvalidTransition {
                from: state.to_string(),
                event: event.name().to_string(),
            }),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GateState::Rendered { .. } | GateState::Denied { .. } | GateState::Error { .. }
        )
    }

    /// Whether the page was let through, regardless of the menu outcome
    pub fn access_granted(&self) -> bool {
        matches!(
            self,
            GateState::Granted { .. } | GateState::LoadingMenu { .. } | GateState::Rendered { .. }
        )
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            GateState::CheckingPermission { session }
            | GateState::Granted { session }
            | GateState::LoadingMenu { session }
            | GateState::Rendered { session, .. } => Some(session),
            GateState::Denied { session, .. } => session.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateState::Init => "init",
            GateState::LoadingUser => "loading_user",
            GateState::CheckingPermission { .. } => "checking_permission",
            GateState::Granted { .. } => "granted",
            GateState::LoadingMenu { .. } => "loading_menu",
            GateState::Rendered { .. } => "rendered",
            GateState::Denied { .. } => "denied",
            GateState::Error { .. } => "error",
        };
        f.write_str(name)
    }
}

impl GateEvent {
    fn name(&self) -> &'static str {
        match self {
            GateEvent::Start => "start",
            GateEvent::IdentityLoaded(_) => "identity_loaded",
            GateEvent::IdentityFailed(_) => "identity_failed",
            GateEvent::AccessDecided(_) => "access_decided",
            GateEvent::MenuLoadStarted => "menu_load_started",
            GateEvent::MenusLoaded(_) => "menus_loaded",
            GateEvent::MenuLoadFailed(_) => "menu_load_failed",
        }
    }
}
