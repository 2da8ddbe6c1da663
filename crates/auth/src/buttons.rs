//! Button permission table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PermissionCode, PermissionSet};

/// Page path → codes that govern which action controls render on the page.
///
/// Order is preserved for display only; it never affects evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ButtonPermissionTable {
    #[serde(deserialize_with = "crate::unique_map::deserialize")]
    pages: BTreeMap<String, Vec<PermissionCode>>,
}

impl ButtonPermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(
        mut self,
        path: impl Into<String>,
        codes: impl IntoIterator<Item = PermissionCode>,
    ) -> Self {
        self.pages.insert(path.into(), codes.into_iter().collect());
        self
    }

    /// Codes governing the controls of `path`; empty when not registered.
    pub fn button_permissions_for_page(&self, path: &str) -> &[PermissionCode] {
        self.pages.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[PermissionCode])> {
        self.pages.iter().map(|(path, codes)| (path.as_str(), codes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Plain membership test for a single control.
pub fn is_button_allowed(code: &PermissionCode, user_codes: &PermissionSet) -> bool {
    user_codes.contains(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE: PermissionCode = PermissionCode::from_static("admin:user:create");
    const DELETE: PermissionCode = PermissionCode::from_static("admin:user:delete");

    #[test]
    fn page_lookup_preserves_declared_order() {
        let table = ButtonPermissionTable::new().with_page("/admin/user/list", [DELETE, CREATE]);
        assert_eq!(
            table.button_permissions_for_page("/admin/user/list"),
            &[DELETE, CREATE]
        );
        assert!(table.button_permissions_for_page("/nowhere").is_empty());
    }

    #[test]
    fn repeated_page_key_is_rejected() {
        let json = r#"{"/admin/user/list": ["admin:user:delete"], "/admin/user/list": []}"#;
        let err = serde_json::from_str::<ButtonPermissionTable>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate key '/admin/user/list'"), "{err}");
    }

    #[test]
    fn button_allowed_is_membership() {
        let user: PermissionSet = [CREATE].into_iter().collect();
        assert!(is_button_allowed(&CREATE, &user));
        assert!(!is_button_allowed(&DELETE, &user));
        assert!(!is_button_allowed(&CREATE, &PermissionSet::new()));
    }
}
