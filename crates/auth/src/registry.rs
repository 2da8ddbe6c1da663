//! The full set of permission tables, built once at startup.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{
    ButtonPermissionTable, PermissionCatalog, PermissionCode, Role, RoleDefinition, RoleTable,
    RoutePermissionTable, TableError, builtin,
};

/// Catalog plus the tables derived from it.
///
/// Immutable once built. Guards borrow it, so tests can hand them a fixture
/// registry instead of the builtin one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRegistry {
    pub catalog: PermissionCatalog,
    pub roles: RoleTable,
    pub routes: RoutePermissionTable,
    pub buttons: ButtonPermissionTable,
}

/// Serialized form of a registry (deployment overrides, test fixtures).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDocument {
    pub catalog: PermissionCatalog,
    #[serde(default, deserialize_with = "crate::unique_map::deserialize")]
    pub roles: BTreeMap<Role, RoleDefinition>,
    #[serde(default)]
    pub routes: RoutePermissionTable,
    #[serde(default)]
    pub buttons: ButtonPermissionTable,
}

/// A code used by a table but missing from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableIssue {
    /// `routes`, `buttons` or `roles`.
    pub table: &'static str,
    /// Route path, page path or role name.
    pub key: String,
    pub code: PermissionCode,
}

impl core::fmt::Display for TableIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} entry '{}' uses '{}' which is not in the catalog",
            self.table, self.key, self.code
        )
    }
}

impl PermissionRegistry {
    /// The portal's own tables.
    pub fn builtin() -> Result<Self, TableError> {
        let catalog = builtin::catalog()?;
        let roles = RoleTable::compose(&catalog, &builtin::role_definitions())?;
        Self::new(catalog, roles, builtin::routes(), builtin::buttons()).validated()
    }

    pub fn new(
        catalog: PermissionCatalog,
        roles: RoleTable,
        routes: RoutePermissionTable,
        buttons: ButtonPermissionTable,
    ) -> Self {
        Self {
            catalog,
            roles,
            routes,
            buttons,
        }
    }

    pub fn from_document(document: TableDocument) -> Result<Self, TableError> {
        let roles = RoleTable::compose(&document.catalog, &document.roles)?;
        Self::new(document.catalog, roles, document.routes, document.buttons).validated()
    }

    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Self::from_document(serde_json::from_str(json)?)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, TableError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json(&json)
    }

    /// Every table code that does not originate from the catalog.
    pub fn validate(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();
        for (path, codes) in self.routes.entries() {
            self.collect_orphans("routes", path, codes.iter(), &mut issues);
        }
        for (path, codes) in self.buttons.entries() {
            self.collect_orphans("buttons", path, codes.iter(), &mut issues);
        }
        for (role, codes) in self.roles.roles() {
            self.collect_orphans("roles", role.as_str(), codes.iter(), &mut issues);
        }
        issues
    }

    fn collect_orphans<'a>(
        &self,
        table: &'static str,
        key: &str,
        codes: impl Iterator<Item = &'a PermissionCode>,
        issues: &mut Vec<TableIssue>,
    ) {
        for code in codes {
            if !self.catalog.contains(code) {
                issues.push(TableIssue {
                    table,
                    key: key.to_string(),
                    code: code.clone(),
                });
            }
        }
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, TableError> {
        let issues = self.validate();
        if issues.is_empty() {
            tracing::info!(
                codes = self.catalog.len(),
                routes = self.routes.len(),
                pages = self.buttons.len(),
                "permission tables loaded"
            );
            return Ok(self);
        }
        for issue in &issues {
            tracing::warn!(%issue, "orphan permission code");
        }
        Err(TableError::Inconsistent(issues))
    }

    /// Audit view of every role and permission.
    pub fn summary(&self) -> RegistrySummary {
        let roles = self
            .roles
            .roles()
            .map(|(role, perms)| RoleSummary {
                name: role.to_string(),
                description: self.roles.description(role).map(str::to_string),
                permissions: perms.iter().map(ToString::to_string).collect(),
            })
            .collect();

        let permissions = self
            .catalog
            .codes()
            .map(|(domain, code)| PermissionSummary {
                name: code.to_string(),
                category: domain.to_string(),
                description: permission_description(code),
                routes: self
                    .routes
                    .entries()
                    .filter(|(_, codes)| codes.contains(code))
                    .map(|(path, _)| path.to_string())
                    .collect(),
            })
            .collect();

        RegistrySummary { roles, permissions }
    }
}

/// Role with its granted permissions (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct RoleSummary {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

/// Catalog entry (for audit/display).
#[derive(Debug, Clone, Serialize)]
pub struct PermissionSummary {
    pub name: String,
    pub category: String,
    pub description: String,
    /// Routes that require this permission.
    pub routes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrySummary {
    pub roles: Vec<RoleSummary>,
    pub permissions: Vec<PermissionSummary>,
}

fn permission_description(code: &PermissionCode) -> String {
    // "admin:video:category:create" -> resource "video category", action "create"
    let parts: Vec<&str> = code.as_str().split(':').collect();
    let action = code.action();
    let resource = match parts.as_slice() {
        [_, rest @ .., _] if !rest.is_empty() => rest.join(" "),
        [domain, _] => domain.to_string(),
        _ => code.domain().to_string(),
    };

    let action_desc = match action {
        "list" => "View/list",
        "detail" => "View details of",
        "create" | "upload" => "Create new",
        "edit" => "Edit",
        "delete" => "Delete",
        "audit" => "Review",
        "publish" => "Publish",
        "export" | "download" => "Export",
        _ => action,
    };

    format!("{action_desc} {resource} resources")
}
