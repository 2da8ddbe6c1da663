//! Route permission table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::PermissionCode;

/// Route path → permission codes required to enter it.
///
/// Keys are matched literally, including placeholder keys such as
/// `/video/:id`; there is no pattern matching. A route registered with an
/// empty list is explicitly public, which only matters under
/// [`UnregisteredRoutePolicy::FailClosed`](crate::UnregisteredRoutePolicy).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutePermissionTable {
    #[serde(deserialize_with = "crate::unique_map::deserialize")]
    routes: BTreeMap<String, Vec<PermissionCode>>,
}

impl RoutePermissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the requirement of a route.
    pub fn with_route(
        mut self,
        path: impl Into<String>,
        required: impl IntoIterator<Item = PermissionCode>,
    ) -> Self {
        self.routes.insert(path.into(), required.into_iter().collect());
        self
    }

    /// Codes required to enter `path`; empty when the path is not registered.
    pub fn required_permissions(&self, path: &str) -> &[PermissionCode] {
        self.routes.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_protected(&self, path: &str) -> bool {
        !self.required_permissions(path).is_empty()
    }

    pub fn is_registered(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &[PermissionCode])> {
        self.routes.iter().map(|(path, codes)| (path.as_str(), codes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
