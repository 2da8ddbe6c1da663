//! Permission catalog: every permission code the portal knows about, grouped
//! by feature domain.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::unique_map::UniqueMap;
use crate::{PermissionCode, PermissionSet, TableError};

/// Mapping `domain -> (action key -> code)`.
///
/// Construction rejects a code registered twice (even under different domains
/// or action keys): two distinct capabilities may never share a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionCatalog {
    domains: BTreeMap<String, BTreeMap<String, PermissionCode>>,
}

impl PermissionCatalog {
    pub fn builder() -> PermissionCatalogBuilder {
        PermissionCatalogBuilder::default()
    }

    /// Resolve a `(domain, action)` pair to its code.
    pub fn lookup_code(&self, domain: &str, action: &str) -> Result<&PermissionCode, TableError> {
        let group = self
            .domains
            .get(domain)
            .ok_or_else(|| TableError::UnknownDomain(domain.to_string()))?;
        group.get(action).ok_or_else(|| TableError::UnknownAction {
            domain: domain.to_string(),
            action: action.to_string(),
        })
    }

    pub fn group(&self, domain: &str) -> Option<&BTreeMap<String, PermissionCode>> {
        self.domains.get(domain)
    }

    /// All codes of a domain as a set (used for role composition).
    pub fn group_codes(&self, domain: &str) -> Option<PermissionSet> {
        self.group(domain).map(|g| g.values().cloned().collect())
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }

    /// All codes with the domain that owns them.
    pub fn codes(&self) -> impl Iterator<Item = (&str, &PermissionCode)> {
        self.domains
            .iter()
            .flat_map(|(domain, group)| group.values().map(move |code| (domain.as_str(), code)))
    }

    pub fn contains(&self, code: &PermissionCode) -> bool {
        self.codes().any(|(_, c)| c == code)
    }

    /// Domain that owns a code, if any.
    pub fn domain_of(&self, code: &PermissionCode) -> Option<&str> {
        self.codes().find(|(_, c)| *c == code).map(|(d, _)| d)
    }

    pub fn len(&self) -> usize {
        self.domains.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'de> Deserialize<'de> for PermissionCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let UniqueMap(domains) =
            UniqueMap::<String, UniqueMap<String, PermissionCode>>::deserialize(deserializer)?;
        let mut builder = PermissionCatalog::builder();
        for (domain, UniqueMap(group)) in domains {
            for (action, code) in group {
                builder = builder.code(&domain, &action, code);
            }
        }
        builder.build().map_err(serde::de::Error::custom)
    }
}

/// Incremental catalog construction; duplicate detection happens in `build`.
#[derive(Debug, Default)]
pub struct PermissionCatalogBuilder {
    entries: Vec<(String, String, PermissionCode)>,
}

impl PermissionCatalogBuilder {
    pub fn code(mut self, domain: &str, action: &str, code: PermissionCode) -> Self {
        self.entries.push((domain.to_string(), action.to_string(), code));
        self
    }

    pub fn group<'a>(
        mut self,
        domain: &str,
        codes: impl IntoIterator<Item = (&'a str, PermissionCode)>,
    ) -> Self {
        for (action, code) in codes {
            self = self.code(domain, action, code);
        }
        self
    }

    pub fn build(self) -> Result<PermissionCatalog, TableError> {
        let mut seen: HashMap<PermissionCode, String> = HashMap::new();
        let mut domains: BTreeMap<String, BTreeMap<String, PermissionCode>> = BTreeMap::new();

        for (domain, action, code) in self.entries {
            let owner = format!("{domain}.{action}");
            if let Some(first) = seen.get(&code) {
                return Err(TableError::DuplicateCode {
                    code: code.to_string(),
                    first: first.clone(),
                    second: owner,
                });
            }
            seen.insert(code.clone(), owner);
            domains.entry(domain).or_default().insert(action, code);
        }

        Ok(PermissionCatalog { domains })
    }
}
