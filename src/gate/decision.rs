//! Outcome of a page permission check

use serde::Serialize;

/// Why access was granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantReason {
    /// The page has no rule
    OpenPage,
    /// The session holds the top-tier code
    TopTier,
    /// The backend answered `hasAccess: true`
    Remote,
}

/// Why access was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum DenyReason {
    /// No session was loaded
    NoSession,
    /// The backend answered `hasAccess: false`
    Remote,
    /// The check itself failed; treated as a refusal
    CheckFailed(String),
}

/// Result of checking the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum AccessDecision {
    Granted {
        reason: GrantReason,
    },
    Denied {
        capability: Option<String>,
        reason: DenyReason,
    },
}

impl AccessDecision {
    pub fn granted(reason: GrantReason) -> Self {
        AccessDecision::Granted { reason }
    }

    pub fn denied(capability: Option<&str>, reason: DenyReason) -> Self {
        AccessDecision::Denied {
            capability: capability.map(str::to_string),
            reason,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }
}
