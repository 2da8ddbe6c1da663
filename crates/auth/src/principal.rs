use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PermissionCode, PermissionSet, Role, RoleSet, RoleTable};

/// Identity of an authenticated principal (portal user, back-office staff).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for PrincipalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Permissions held by the current session.
///
/// Owned by the session collaborator: it is created at login, replaced on role
/// change and dropped at logout. Decisions only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPermissions {
    pub principal_id: PrincipalId,
    #[serde(default)]
    pub roles: RoleSet,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl SessionPermissions {
    pub fn new(principal_id: PrincipalId, roles: RoleSet, permissions: PermissionSet) -> Self {
        Self {
            principal_id,
            roles,
            permissions,
        }
    }

    /// Session holding exactly the given codes and no roles.
    pub fn with_permissions(
        principal_id: PrincipalId,
        permissions: impl IntoIterator<Item = PermissionCode>,
    ) -> Self {
        Self::new(principal_id, RoleSet::new(), permissions.into_iter().collect())
    }

    /// Effective set: explicit grants plus everything the roles grant.
    pub fn resolve(
        principal_id: PrincipalId,
        roles: impl IntoIterator<Item = Role>,
        explicit: impl IntoIterator<Item = PermissionCode>,
        role_table: &RoleTable,
    ) -> Self {
        let roles: RoleSet = roles.into_iter().collect();
        let mut permissions: PermissionSet = explicit.into_iter().collect();
        permissions.extend_from(&role_table.permissions_for_roles(&roles));
        Self::new(principal_id, roles, permissions)
    }

    /// Anonymous visitor: no roles, no permissions.
    pub fn anonymous() -> Self {
        Self::new(PrincipalId::from_uuid(Uuid::nil()), RoleSet::new(), PermissionSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_unions_roles_and_explicit_grants() {
        let list = PermissionCode::from_static("admin:video:list");
        let audit = PermissionCode::from_static("admin:video:audit");
        let table = RoleTable::from_sets([(
            Role::from_static("REVIEWER"),
            [audit.clone()].into_iter().collect(),
        )]);

        let session = SessionPermissions::resolve(
            PrincipalId::new(),
            [Role::from_static("REVIEWER"), Role::from_static("UNKNOWN")],
            [list.clone()],
            &table,
        );

        assert!(session.permissions.contains(&list));
        assert!(session.permissions.contains(&audit));
        assert_eq!(session.permissions.len(), 2);
        assert_eq!(session.roles.len(), 2);
    }

    #[test]
    fn session_with_blank_role_is_rejected() {
        let blank = r#"{
            "principal_id": "00000000-0000-0000-0000-000000000000",
            "roles": ["EDITOR", ""],
            "permissions": ["admin:video:list"]
        }"#;
        assert!(serde_json::from_str::<SessionPermissions>(blank).is_err());

        let spaced = r#"{
            "principal_id": "00000000-0000-0000-0000-000000000000",
            "roles": ["CONTENT EDITOR"]
        }"#;
        assert!(serde_json::from_str::<SessionPermissions>(spaced).is_err());

        let valid = r#"{
            "principal_id": "00000000-0000-0000-0000-000000000000",
            "roles": ["EDITOR"],
            "permissions": ["admin:video:list"]
        }"#;
        let session: SessionPermissions = serde_json::from_str(valid).unwrap();
        assert!(session.roles.contains(&Role::from_static("EDITOR")));
    }

    #[test]
    fn anonymous_holds_nothing() {
        let session = SessionPermissions::anonymous();
        assert!(session.roles.is_empty());
        assert!(session.permissions.is_empty());
    }
}
