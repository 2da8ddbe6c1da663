use serde::Serialize;
use thiserror::Error;

use crate::{
    PermissionCode, PermissionRegistry, PrincipalId, SessionPermissions, UnregisteredRoutePolicy,
    has_all,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: '{path}' requires {}", join(.missing))]
    Forbidden {
        path: String,
        missing: Vec<PermissionCode>,
    },

    #[error("forbidden: '{0}' is not a registered route")]
    Unregistered(String),
}

fn join(codes: &[PermissionCode]) -> String {
    codes
        .iter()
        .map(|c| format!("'{c}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Why a route decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// Registered without requirements.
    Public,
    /// Not registered; resolved by the unregistered-route policy.
    Unregistered,
    /// Every required code is held.
    Satisfied,
    /// At least one required code is missing.
    MissingPermissions,
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub path: String,
    pub granted: bool,
    pub reason: DecisionReason,
    /// Required codes the session lacks; empty when granted.
    pub missing: Vec<PermissionCode>,
}

impl RouteDecision {
    pub fn into_result(self) -> Result<(), AuthzError> {
        match (self.granted, self.reason) {
            (true, _) => Ok(()),
            (false, DecisionReason::Unregistered) => Err(AuthzError::Unregistered(self.path)),
            (false, _) => Err(AuthzError::Forbidden {
                path: self.path,
                missing: self.missing,
            }),
        }
    }
}

/// Decide whether `session` may enter `path`.
///
/// - No IO
/// - No panics
/// - Same inputs, same decision
pub fn decide_route(
    registry: &PermissionRegistry,
    policy: UnregisteredRoutePolicy,
    session: &SessionPermissions,
    path: &str,
) -> RouteDecision {
    if !registry.routes.is_registered(path) {
        return RouteDecision {
            path: path.to_string(),
            granted: policy.allows_unregistered(),
            reason: DecisionReason::Unregistered,
            missing: Vec::new(),
        };
    }

    let required = registry.routes.required_permissions(path);
    if required.is_empty() {
        return RouteDecision {
            path: path.to_string(),
            granted: true,
            reason: DecisionReason::Public,
            missing: Vec::new(),
        };
    }

    let coverage = has_all(&session.permissions, required);
    RouteDecision {
        path: path.to_string(),
        granted: coverage.granted,
        reason: if coverage.granted {
            DecisionReason::Satisfied
        } else {
            DecisionReason::MissingPermissions
        },
        missing: coverage.missing,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a route decision, for diagnostics and audit.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub decision: RouteDecision,
    pub policy: UnregisteredRoutePolicy,
    /// Human-readable reason for the decision.
    pub reason: String,
    pub required_permissions: Vec<PermissionCode>,
    pub principal: SessionState,
    /// If denied, what would fix it.
    pub suggestions: Vec<String>,
}

/// Snapshot of the session the decision was made for.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub principal_id: PrincipalId,
    pub roles: Vec<String>,
    pub effective_permissions: Vec<String>,
}

/// Explain why `session` may or may not enter `path`.
///
/// Suggestions name the roles of the registry that would grant the missing
/// codes, so an operator can fix a denial without reading the tables.
pub fn explain_route_access(
    registry: &PermissionRegistry,
    policy: UnregisteredRoutePolicy,
    session: &SessionPermissions,
    path: &str,
) -> AccessExplanation {
    let decision = decide_route(registry, policy, session, path);
    let required = registry.routes.required_permissions(path).to_vec();

    let principal = SessionState {
        principal_id: session.principal_id,
        roles: session.roles.iter().map(ToString::to_string).collect(),
        effective_permissions: session.permissions.iter().map(ToString::to_string).collect(),
    };

    let reason = match decision.reason {
        DecisionReason::Public => format!("Route '{path}' is registered as public"),
        DecisionReason::Unregistered if decision.granted => {
            format!("Route '{path}' is not registered; policy '{policy}' treats it as public")
        }
        DecisionReason::Unregistered => {
            format!("Route '{path}' is not registered; policy '{policy}' denies it")
        }
        DecisionReason::Satisfied => format!(
            "Principal holds every permission required by '{path}': [{}]",
            join(&required)
        ),
        DecisionReason::MissingPermissions => format!(
            "Principal lacks {} required by '{path}'",
            join(&decision.missing)
        ),
    };

    let mut suggestions = Vec::new();
    match decision.reason {
        DecisionReason::MissingPermissions => {
            for code in &decision.missing {
                let granting: Vec<String> = registry
                    .roles
                    .roles_granting(code)
                    .into_iter()
                    .map(ToString::to_string)
                    .collect();
                if granting.is_empty() {
                    suggestions.push(format!(
                        "Grant the '{code}' permission directly; no role in the table includes it"
                    ));
                } else {
                    suggestions.push(format!(
                        "Assign one of the roles {granting:?} to obtain '{code}'"
                    ));
                }
            }
        }
        DecisionReason::Unregistered if !decision.granted => {
            suggestions.push(format!(
                "Register '{path}' in the route table (with an empty list to make it public)"
            ));
        }
        _ => {}
    }

    AccessExplanation {
        decision,
        policy,
        reason,
        required_permissions: required,
        principal,
        suggestions,
    }
}
