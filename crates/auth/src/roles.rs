use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use portal_core::{DomainError, DomainResult, ValueObject};

use crate::{PermissionCatalog, PermissionCode, PermissionSet, TableError};

/// Role identifier used for RBAC (`ADMIN`, `EDITOR`, ...).
///
/// Names read at runtime (table documents, sessions) go through
/// [`Role::parse`]: they must be non-empty and free of whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Build a role from a static literal without validation.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn parse(name: impl Into<Cow<'static, str>>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::validation("role name must not be empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(DomainError::validation(format!(
                "role name '{name}' must not contain whitespace"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Role {}

impl TryFrom<String> for Role {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.0.into_owned()
    }
}

impl core::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.to_owned())
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Union of catalog domain groups.
///
/// Order and repetition of `groups` do not affect the result. An unknown group
/// name is a construction error, never a silent empty contribution.
pub fn compose_groups<S: AsRef<str>>(
    catalog: &PermissionCatalog,
    groups: &[S],
) -> Result<PermissionSet, TableError> {
    let mut permissions = PermissionSet::new();
    for group in groups {
        let group = group.as_ref();
        let codes = catalog
            .group_codes(group)
            .ok_or_else(|| TableError::UnknownGroup(group.to_string()))?;
        permissions.extend_from(&codes);
    }
    Ok(permissions)
}

/// Role definition as declared in a table document: the groups it unions
/// plus any extra individual codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<PermissionCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Role → permission set, fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable {
    roles: BTreeMap<Role, PermissionSet>,
    descriptions: BTreeMap<Role, String>,
    empty: PermissionSet,
}

impl RoleTable {
    /// Compose every definition against the catalog.
    pub fn compose(
        catalog: &PermissionCatalog,
        definitions: &BTreeMap<Role, RoleDefinition>,
    ) -> Result<Self, TableError> {
        let mut table = Self::default();
        for (role, definition) in definitions {
            let mut permissions = compose_groups(catalog, &definition.groups)?;
            permissions.extend(definition.permissions.iter().cloned());
            table.roles.insert(role.clone(), permissions);
            if let Some(description) = &definition.description {
                table.descriptions.insert(role.clone(), description.clone());
            }
        }
        Ok(table)
    }

    /// Build directly from already resolved sets (fixtures).
    pub fn from_sets(roles: impl IntoIterator<Item = (Role, PermissionSet)>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Permissions granted by a role. Unknown roles grant nothing.
    pub fn permissions_for_role(&self, role: &Role) -> &PermissionSet {
        self.roles.get(role).unwrap_or(&self.empty)
    }

    /// Union of the permissions of all given roles.
    pub fn permissions_for_roles<'a>(&self, roles: impl IntoIterator<Item = &'a Role>) -> PermissionSet {
        let mut permissions = PermissionSet::new();
        for role in roles {
            permissions.extend_from(self.permissions_for_role(role));
        }
        permissions
    }

    /// Roles in the table whose set contains `code`.
    pub fn roles_granting(&self, code: &PermissionCode) -> Vec<&Role> {
        self.roles
            .iter()
            .filter(|(_, perms)| perms.contains(code))
            .map(|(role, _)| role)
            .collect()
    }

    pub fn description(&self, role: &Role) -> Option<&str> {
        self.descriptions.get(role).map(String::as_str)
    }

    pub fn roles(&self) -> impl Iterator<Item = (&Role, &PermissionSet)> {
        self.roles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> PermissionCatalog {
        PermissionCatalog::builder()
            .group(
                "A",
                [
                    ("list", PermissionCode::from_static("a:list")),
                    ("edit", PermissionCode::from_static("a:edit")),
                ],
            )
            .group("B", [("list", PermissionCode::from_static("b:list"))])
            .group("C", [("audit", PermissionCode::from_static("c:audit"))])
            .build()
            .unwrap()
    }

    #[test]
    fn role_names_are_validated_when_read() {
        assert_eq!(Role::parse("EDITOR").unwrap(), Role::from_static("EDITOR"));
        for bad in ["", " ", "CONTENT EDITOR", "ADMIN\n"] {
            assert!(matches!(Role::parse(bad), Err(DomainError::Validation(_))), "{bad:?}");
        }
        assert!(serde_json::from_str::<Role>("\"\"").is_err());
        assert!(serde_json::from_str::<Role>("\" \"").is_err());
        assert!(serde_json::from_str::<BTreeMap<Role, RoleDefinition>>(r#"{"": {}}"#).is_err());
        assert_eq!(serde_json::to_string(&Role::from_static("USER")).unwrap(), "\"USER\"");
    }

    #[test]
    fn unknown_role_yields_empty_set() {
        let table = RoleTable::default();
        assert!(table.permissions_for_role(&Role::from_static("GHOST")).is_empty());
    }

    #[test]
    fn zero_groups_compose_to_nothing() {
        let groups: [&str; 0] = [];
        assert!(compose_groups(&catalog(), &groups).unwrap().is_empty());
    }

    #[test]
    fn unknown_group_is_an_error() {
        assert_eq!(
            compose_groups(&catalog(), &["A", "Z"]),
            Err(TableError::UnknownGroup("Z".to_string()))
        );
    }

    #[test]
    fn compose_includes_extra_codes_and_descriptions() {
        let mut definitions = BTreeMap::new();
        definitions.insert(
            Role::from_static("EDITOR"),
            RoleDefinition {
                groups: vec!["B".into()],
                permissions: vec![PermissionCode::from_static("c:audit")],
                description: Some("Edits things".into()),
            },
        );
        let table = RoleTable::compose(&catalog(), &definitions).unwrap();
        let editor = Role::from_static("EDITOR");

        let perms = table.permissions_for_role(&editor);
        assert!(perms.contains(&PermissionCode::from_static("b:list")));
        assert!(perms.contains(&PermissionCode::from_static("c:audit")));
        assert_eq!(perms.len(), 2);
        assert_eq!(table.description(&editor), Some("Edits things"));
        assert_eq!(
            table.roles_granting(&PermissionCode::from_static("c:audit")),
            vec![&editor]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: composition ignores group order and repetition.
        #[test]
        fn composition_is_commutative_and_idempotent(
            groups in prop::collection::vec(prop::sample::select(vec!["A", "B", "C"]), 0..8)
        ) {
            let catalog = catalog();
            let forward = compose_groups(&catalog, &groups).unwrap();

            let mut reversed = groups.clone();
            reversed.reverse();
            prop_assert_eq!(&forward, &compose_groups(&catalog, &reversed).unwrap());

            let mut doubled = groups.clone();
            doubled.extend(groups.iter().copied());
            prop_assert_eq!(&forward, &compose_groups(&catalog, &doubled).unwrap());
        }
    }
}
