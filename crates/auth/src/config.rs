//! Runtime configuration of the permission subsystem.
//!
//! Read from environment variables:
//! - `PORTAL_UNREGISTERED_ROUTES`: `open` (default) or `closed`.
//! - `PORTAL_PERMISSION_TABLES`: path to a JSON table document replacing the
//!   builtin tables.

use std::fs::File;
use std::path::PathBuf;

use crate::{PermissionRegistry, TableError, UnregisteredRoutePolicy};

pub const POLICY_ENV: &str = "PORTAL_UNREGISTERED_ROUTES";
pub const TABLES_ENV: &str = "PORTAL_PERMISSION_TABLES";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessConfig {
    pub unregistered_route_policy: UnregisteredRoutePolicy,
    pub tables_path: Option<PathBuf>,
}

impl AccessConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a closure over a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let unregistered_route_policy = match lookup(POLICY_ENV) {
            None => UnregisteredRoutePolicy::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                let fallback = UnregisteredRoutePolicy::default();
                tracing::warn!(%err, %fallback, "{POLICY_ENV} is invalid; using default");
                fallback
            }),
        };

        let tables_path = lookup(TABLES_ENV)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        Self {
            unregistered_route_policy,
            tables_path,
        }
    }

    /// Build the registry this configuration points at.
    pub fn load_registry(&self) -> Result<PermissionRegistry, TableError> {
        match &self.tables_path {
            None => PermissionRegistry::builtin(),
            Some(path) => {
                tracing::info!(path = %path.display(), "loading permission tables");
                PermissionRegistry::from_reader(File::open(path)?)
            }
        }
    }
}
