use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use portal_core::{DomainError, DomainResult, ValueObject};

/// Permission code (e.g. `admin:user:edit`).
///
/// Codes are opaque, case-sensitive tokens shaped `domain:action` or
/// `domain:subresource:action`. Matching is always exact: there is no prefix
/// or wildcard interpretation anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionCode(Cow<'static, str>);

impl PermissionCode {
    /// Build a code from a static literal without validation.
    ///
    /// Reserved for catalog constants; everything read at runtime goes through
    /// [`PermissionCode::parse`].
    pub const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Parse and validate a code.
    pub fn parse(code: impl Into<Cow<'static, str>>) -> DomainResult<Self> {
        let code = code.into();
        validate(&code)?;
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First segment of the code (`admin` for `admin:user:edit`).
    pub fn domain(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }

    /// Last segment of the code (`edit` for `admin:user:edit`).
    pub fn action(&self) -> &str {
        self.0.rsplit(':').next().unwrap_or_default()
    }
}

fn validate(code: &str) -> DomainResult<()> {
    if code.is_empty() {
        return Err(DomainError::validation("permission code must not be empty"));
    }
    if code.chars().any(char::is_whitespace) {
        return Err(DomainError::validation(format!(
            "permission code '{code}' must not contain whitespace"
        )));
    }
    let segments: Vec<&str> = code.split(':').collect();
    if segments.len() < 2 {
        return Err(DomainError::validation(format!(
            "permission code '{code}' must be shaped 'domain:action'"
        )));
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(DomainError::validation(format!(
            "permission code '{code}' has an empty segment"
        )));
    }
    Ok(())
}

impl ValueObject for PermissionCode {}

impl TryFrom<String> for PermissionCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<PermissionCode> for String {
    fn from(value: PermissionCode) -> Self {
        value.0.into_owned()
    }
}

impl core::str::FromStr for PermissionCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.to_owned())
    }
}

impl core::fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
