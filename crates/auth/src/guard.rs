//! Access guard: the seam between the permission tables and the routing /
//! render layers.

use crate::{
    AccessExplanation, AuthzError, MenuNode, PermissionCode, PermissionRegistry, RouteDecision,
    SessionPermissions, UnregisteredRoutePolicy, decide_route, explain_route_access, filter_menu,
    has_permission, is_button_allowed,
};

/// Answers "may enter", "may render" and "what is visible" for a session.
///
/// The guard borrows its registry; it never caches session state, so every
/// decision reflects the session passed to that call.
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard<'a> {
    registry: &'a PermissionRegistry,
    policy: UnregisteredRoutePolicy,
}

impl<'a> AccessGuard<'a> {
    pub fn new(registry: &'a PermissionRegistry, policy: UnregisteredRoutePolicy) -> Self {
        Self { registry, policy }
    }

    /// Guard using [`DEFAULT_UNREGISTERED_ROUTE_POLICY`](crate::DEFAULT_UNREGISTERED_ROUTE_POLICY).
    pub fn with_default_policy(registry: &'a PermissionRegistry) -> Self {
        Self::new(registry, UnregisteredRoutePolicy::default())
    }

    pub fn check_route(&self, session: &SessionPermissions, path: &str) -> RouteDecision {
        let decision = decide_route(self.registry, self.policy, session, path);
        if !decision.granted {
            tracing::debug!(
                principal_id = %session.principal_id,
                path,
                reason = ?decision.reason,
                missing = ?decision.missing,
                "navigation denied"
            );
        }
        decision
    }

    pub fn authorize_route(&self, session: &SessionPermissions, path: &str) -> Result<(), AuthzError> {
        self.check_route(session, path).into_result()
    }

    pub fn explain_route(&self, session: &SessionPermissions, path: &str) -> AccessExplanation {
        explain_route_access(self.registry, self.policy, session, path)
    }

    /// A control without a permission is always visible.
    pub fn may_render(&self, session: &SessionPermissions, permission: Option<&PermissionCode>) -> bool {
        has_permission(&session.permissions, permission)
    }

    /// Button codes of `page` the session holds, in table order.
    pub fn visible_buttons(&self, session: &SessionPermissions, page: &str) -> Vec<PermissionCode> {
        self.registry
            .buttons
            .button_permissions_for_page(page)
            .iter()
            .filter(|code| is_button_allowed(code, &session.permissions))
            .cloned()
            .collect()
    }

    pub fn filter_menu(&self, session: &SessionPermissions, nodes: &[MenuNode]) -> Vec<MenuNode> {
        filter_menu(nodes, &session.permissions)
    }
}
