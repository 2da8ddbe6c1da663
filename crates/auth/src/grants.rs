//! Granted sets of permission codes and roles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{PermissionCode, Role};

/// A set of granted items with set semantics.
///
/// Inserting an item twice is a no-op, so unions are idempotent and
/// commutative by construction. Iteration order is the item ordering, which
/// keeps explanations and summaries deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent, bound(deserialize = "T: Deserialize<'de> + Ord"))]
pub struct GrantSet<T: Ord>(BTreeSet<T>);

/// Permission codes held by a session or granted by a role.
pub type PermissionSet = GrantSet<PermissionCode>;

/// Roles held by a session.
pub type RoleSet = GrantSet<Role>;

impl<T: Ord> GrantSet<T> {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, item: &T) -> bool {
        self.0.contains(item)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Ord + Clone> GrantSet<T> {
    /// Merge `other` into `self`.
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl<T: Ord> Default for GrantSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for GrantSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for GrantSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<T: Ord> IntoIterator for GrantSet<T> {
    type Item = T;
    type IntoIter = std::collections::btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a GrantSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &'static str) -> PermissionCode {
        PermissionCode::from_static(s)
    }

    #[test]
    fn duplicates_collapse() {
        let set: PermissionSet = [code("a:list"), code("a:list"), code("a:edit")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn merge_is_commutative_and_idempotent() {
        let a: PermissionSet = [code("a:list"), code("a:edit")].into_iter().collect();
        let b: PermissionSet = [code("b:list"), code("a:edit")].into_iter().collect();

        let mut ab = a.clone();
        ab.extend_from(&b);
        let mut ba = b.clone();
        ba.extend_from(&a);
        assert_eq!(ab, ba);
        assert_eq!(ab.len(), 3);

        let mut again = ab.clone();
        again.extend_from(&b);
        assert_eq!(again, ab);
    }

    #[test]
    fn serializes_as_sorted_list() {
        let set: PermissionSet = [code("b:list"), code("a:edit")].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a:edit","b:list"]"#);

        let back: PermissionSet = serde_json::from_str(r#"["b:list","a:edit","a:edit"]"#).unwrap();
        assert_eq!(back, set);
    }
}
