//! Permission and role predicates.
//!
//! Every function here is pure and total. An empty or absent requirement always
//! evaluates to "allowed"; routes, buttons, and roles share that convention.

use serde::Serialize;

use crate::{GrantSet, PermissionCode, PermissionSet, Role, RoleSet};

/// Outcome of an all-of check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coverage<T> {
    pub granted: bool,
    /// Required items the holder lacks, in requirement order, without repeats.
    pub missing: Vec<T>,
}

impl<T> Coverage<T> {
    fn from_missing(missing: Vec<T>) -> Self {
        Self {
            granted: missing.is_empty(),
            missing,
        }
    }
}

fn holds<T: Ord>(held: &GrantSet<T>, required: Option<&T>) -> bool {
    required.is_none_or(|item| held.contains(item))
}

fn holds_all<T: Ord + Clone>(held: &GrantSet<T>, required: &[T]) -> Coverage<T> {
    let mut missing: Vec<T> = Vec::new();
    for item in required {
        if !held.contains(item) && !missing.contains(item) {
            missing.push(item.clone());
        }
    }
    Coverage::from_missing(missing)
}

fn holds_any<T: Ord>(held: &GrantSet<T>, required: &[T]) -> bool {
    required.is_empty() || required.iter().any(|item| held.contains(item))
}

/// `true` when `required` is absent, otherwise exact membership.
pub fn has_permission(user_codes: &PermissionSet, required: Option<&PermissionCode>) -> bool {
    holds(user_codes, required)
}

/// All-of check with the precise missing subset.
pub fn has_all(user_codes: &PermissionSet, required: &[PermissionCode]) -> Coverage<PermissionCode> {
    holds_all(user_codes, required)
}

/// Any-of check; an empty requirement is satisfied.
pub fn has_any(user_codes: &PermissionSet, required: &[PermissionCode]) -> bool {
    holds_any(user_codes, required)
}

pub fn has_role(user_roles: &RoleSet, required: Option<&Role>) -> bool {
    holds(user_roles, required)
}

pub fn has_all_roles(user_roles: &RoleSet, required: &[Role]) -> Coverage<Role> {
    holds_all(user_roles, required)
}

pub fn has_any_role(user_roles: &RoleSet, required: &[Role]) -> bool {
    holds_any(user_roles, required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LIST: PermissionCode = PermissionCode::from_static("admin:video:list");
    const EDIT: PermissionCode = PermissionCode::from_static("admin:video:edit");
    const AUDIT: PermissionCode = PermissionCode::from_static("admin:video:audit");

    fn set(codes: &[PermissionCode]) -> PermissionSet {
        codes.iter().cloned().collect()
    }

    #[test]
    fn absent_requirement_is_allowed_even_for_empty_session() {
        assert!(has_permission(&PermissionSet::new(), None));
        assert!(has_permission(&set(&[LIST]), None));
    }

    #[test]
    fn membership_is_exact() {
        let user = set(&[LIST]);
        assert!(has_permission(&user, Some(&LIST)));
        assert!(!has_permission(&user, Some(&PermissionCode::from_static("admin:video"))));
        assert!(!has_permission(&user, Some(&PermissionCode::from_static("admin:video:list:all"))));
    }

    #[test]
    fn has_all_empty_requirement() {
        let coverage = has_all(&PermissionSet::new(), &[]);
        assert_eq!(coverage, Coverage { granted: true, missing: vec![] });
    }

    #[test]
    fn has_all_reports_missing_in_order_without_repeats() {
        let user = set(&[EDIT]);
        let coverage = has_all(&user, &[AUDIT, EDIT, LIST, AUDIT]);
        assert!(!coverage.granted);
        assert_eq!(coverage.missing, vec![AUDIT, LIST]);
    }

    #[test]
    fn has_any_conventions() {
        assert!(!has_any(&PermissionSet::new(), &[LIST]));
        assert!(has_any(&PermissionSet::new(), &[]));
        assert!(has_any(&set(&[EDIT]), &[AUDIT, EDIT]));
        assert!(!has_any(&set(&[EDIT]), &[AUDIT, LIST]));
    }

    #[test]
    fn role_predicates_mirror_permission_predicates() {
        let admin = Role::from_static("ADMIN");
        let editor = Role::from_static("EDITOR");
        let roles: RoleSet = [editor.clone()].into_iter().collect();

        assert!(has_role(&RoleSet::new(), None));
        assert!(has_role(&roles, Some(&editor)));
        assert!(!has_role(&roles, Some(&admin)));

        assert!(has_all_roles(&RoleSet::new(), &[]).granted);
        let coverage = has_all_roles(&roles, &[admin.clone(), editor.clone()]);
        assert_eq!(coverage.missing, vec![admin.clone()]);

        assert!(has_any_role(&roles, &[]));
        assert!(has_any_role(&roles, &[admin.clone(), editor]));
        assert!(!has_any_role(&RoleSet::new(), &[admin]));
    }

    fn code_strategy() -> impl Strategy<Value = PermissionCode> {
        "[a-c]:[a-c](:[a-c])?".prop_map(|s| PermissionCode::parse(s).unwrap())
    }

    fn role_strategy() -> impl Strategy<Value = Role> {
        "[A-E]".prop_map(|s| Role::parse(s).unwrap())
    }

    /// Elements of `items` whose mask bit is set, in order.
    fn sublist<T: Clone>(items: &[T], mask: &[bool]) -> Vec<T> {
        items
            .iter()
            .zip(mask.iter().chain(std::iter::repeat(&false)))
            .filter(|(_, keep)| **keep)
            .map(|(item, _)| item.clone())
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: a granted all-of check stays granted for any sublist, and a
        /// sublist never misses a code the full list did not miss.
        #[test]
        fn has_all_is_monotonic(
            user in prop::collection::vec(code_strategy(), 0..10),
            required in prop::collection::vec(code_strategy(), 0..6),
            mask in prop::collection::vec(any::<bool>(), 6),
            hold_required in any::<bool>(),
        ) {
            let mut user = set(&user);
            if hold_required {
                user.extend(required.iter().cloned());
            }
            let full = has_all(&user, &required);
            let part = has_all(&user, &sublist(&required, &mask));

            if full.granted {
                prop_assert!(part.granted);
            }
            for code in &part.missing {
                prop_assert!(full.missing.contains(code));
            }
        }

        /// Property: missing codes are exactly the required codes the user lacks.
        #[test]
        fn missing_is_exact_difference(
            user in prop::collection::vec(code_strategy(), 0..10),
            required in prop::collection::vec(code_strategy(), 0..6),
        ) {
            let user = set(&user);
            let coverage = has_all(&user, &required);
            for code in &coverage.missing {
                prop_assert!(!user.contains(code));
                prop_assert!(required.contains(code));
            }
            for code in &required {
                prop_assert_eq!(user.contains(code), !coverage.missing.contains(code));
            }
            prop_assert_eq!(coverage.granted, coverage.missing.is_empty());
        }

        /// Property: predicates are referentially transparent.
        #[test]
        fn predicates_are_idempotent(
            user in prop::collection::vec(code_strategy(), 0..10),
            required in prop::collection::vec(code_strategy(), 0..6),
        ) {
            let user = set(&user);
            prop_assert_eq!(has_all(&user, &required), has_all(&user, &required));
            prop_assert_eq!(has_any(&user, &required), has_any(&user, &required));
            prop_assert_eq!(
                has_permission(&user, required.first()),
                has_permission(&user, required.first())
            );
        }

        /// Property: role predicates follow the permission conventions.
        #[test]
        fn role_predicates_follow_conventions(
            held in prop::collection::vec(role_strategy(), 0..5),
            required in prop::collection::vec(role_strategy(), 0..4),
            mask in prop::collection::vec(any::<bool>(), 4),
        ) {
            let held: RoleSet = held.into_iter().collect();

            prop_assert!(has_role(&held, None));
            prop_assert!(has_all_roles(&held, &[]).granted);
            prop_assert!(has_any_role(&held, &[]));

            for role in &required {
                prop_assert_eq!(has_role(&held, Some(role)), held.contains(role));
            }

            let full = has_all_roles(&held, &required);
            prop_assert_eq!(full.granted, required.iter().all(|r| held.contains(r)));
            prop_assert_eq!(
                has_any_role(&held, &required),
                required.is_empty() || required.iter().any(|r| held.contains(r))
            );
            if full.granted {
                prop_assert!(has_all_roles(&held, &sublist(&required, &mask)).granted);
            }
            if !required.is_empty() {
                prop_assert!(!has_any_role(&RoleSet::new(), &required));
            }
        }

        /// Property: any-of is implied by a granted non-empty all-of.
        #[test]
        fn all_implies_any(
            user in prop::collection::vec(code_strategy(), 0..10),
            required in prop::collection::vec(code_strategy(), 1..6),
        ) {
            let user = set(&user);
            if has_all(&user, &required).granted {
                prop_assert!(has_any(&user, &required));
            }
            prop_assert!(!has_any(&PermissionSet::new(), &required));
        }
    }
}
