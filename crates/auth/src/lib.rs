//! `portal-auth` — permission resolution for the portal (routes, menus,
//! buttons).
//!
//! This crate is intentionally decoupled from HTTP, rendering and storage: it
//! reads a session's permission set and answers boolean / filter questions.

pub mod authorize;
pub mod buttons;
pub mod builtin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod grants;
pub mod guard;
pub mod menu;
pub mod permissions;
pub mod policy;
pub mod predicates;
pub mod principal;
pub mod registry;
pub mod roles;
pub mod routes;
mod unique_map;

pub use authorize::{
    AccessExplanation, AuthzError, DecisionReason, RouteDecision, SessionState, decide_route,
    explain_route_access,
};
pub use buttons::{ButtonPermissionTable, is_button_allowed};
pub use catalog::{PermissionCatalog, PermissionCatalogBuilder};
pub use config::AccessConfig;
pub use error::TableError;
pub use grants::{GrantSet, PermissionSet, RoleSet};
pub use guard::AccessGuard;
pub use menu::{MenuNode, filter_menu};
pub use permissions::PermissionCode;
pub use policy::{DEFAULT_UNREGISTERED_ROUTE_POLICY, UnregisteredRoutePolicy};
pub use predicates::{
    Coverage, has_all, has_all_roles, has_any, has_any_role, has_permission, has_role,
};
pub use principal::{PrincipalId, SessionPermissions};
pub use registry::{PermissionRegistry, RegistrySummary, TableDocument, TableIssue};
pub use roles::{Role, RoleDefinition, RoleTable, compose_groups};
pub use routes::RoutePermissionTable;
