//! Resolution policy for routes missing from the route table.

use serde::{Deserialize, Serialize};

/// How a path that is not registered in the route table is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnregisteredRoutePolicy {
    /// Unregistered paths are public.
    FailOpen,
    /// Unregistered paths are denied; public routes must be registered with an
    /// empty requirement list.
    FailClosed,
}

/// The single place the unregistered-route behaviour is decided.
///
/// Fail-open matches how the portal has always behaved: any route omitted from
/// the table is unprotected. Deployments opt into fail-closed through
/// [`AccessConfig`](crate::AccessConfig).
pub const DEFAULT_UNREGISTERED_ROUTE_POLICY: UnregisteredRoutePolicy =
    UnregisteredRoutePolicy::FailOpen;

impl UnregisteredRoutePolicy {
    pub fn allows_unregistered(self) -> bool {
        matches!(self, Self::FailOpen)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailOpen => "open",
            Self::FailClosed => "closed",
        }
    }
}

impl Default for UnregisteredRoutePolicy {
    fn default() -> Self {
        DEFAULT_UNREGISTERED_ROUTE_POLICY
    }
}

impl core::str::FromStr for UnregisteredRoutePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" | "fail_open" | "fail-open" => Ok(Self::FailOpen),
            "closed" | "fail_closed" | "fail-closed" => Ok(Self::FailClosed),
            other => Err(format!("unknown unregistered-route policy '{other}'")),
        }
    }
}

impl core::fmt::Display for UnregisteredRoutePolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fail_open() {
        assert_eq!(UnregisteredRoutePolicy::default(), UnregisteredRoutePolicy::FailOpen);
        assert!(UnregisteredRoutePolicy::default().allows_unregistered());
        assert!(!UnregisteredRoutePolicy::FailClosed.allows_unregistered());
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("open".parse::<UnregisteredRoutePolicy>(), Ok(UnregisteredRoutePolicy::FailOpen));
        assert_eq!(" Fail-Closed ".parse::<UnregisteredRoutePolicy>(), Ok(UnregisteredRoutePolicy::FailClosed));
        assert!("maybe".parse::<UnregisteredRoutePolicy>().is_err());
    }
}
