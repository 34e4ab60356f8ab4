use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use rolegate_core::{RbacError, RbacResult, ValueObject};

const WILDCARD: &str = "*";

/// Permission token of the form `resource:action`.
///
/// The action may be the wildcard `*` (`users:*` covers every users action) and
/// the global wildcard `*:*` covers everything. Any other use of `*` is
/// rejected at construction, so a value of this type is never ambiguous.
/// Tokens are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    raw: Cow<'static, str>,
    separator: usize,
}

impl Permission {
    /// The global wildcard `*:*`.
    pub const ALL: Permission = Permission {
        raw: Cow::Borrowed("*:*"),
        separator: 1,
    };

    /// Parse an owned or borrowed token.
    pub fn parse(value: impl Into<Cow<'static, str>>) -> RbacResult<Self> {
        let raw = value.into();
        let separator = validate(&raw)?;
        Ok(Self { raw, separator })
    }

    /// Parse a token from a static table without allocating.
    pub fn from_static(value: &'static str) -> RbacResult<Self> {
        Self::parse(Cow::Borrowed(value))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn resource(&self) -> &str {
        &self.raw[..self.separator]
    }

    pub fn action(&self) -> &str {
        &self.raw[self.separator + 1..]
    }

    /// `true` for `resource:*` and `*:*`.
    pub fn is_wildcard(&self) -> bool {
        self.action() == WILDCARD
    }

    /// `true` only for `*:*`.
    pub fn is_global(&self) -> bool {
        self.resource() == WILDCARD
    }

    /// Whether holding `self` satisfies a requirement for `required`.
    pub fn covers(&self, required: &Permission) -> bool {
        if self.is_global() {
            return true;
        }
        if self.is_wildcard() {
            return self.resource() == required.resource();
        }
        self.raw == required.raw
    }
}

fn validate(value: &str) -> RbacResult<usize> {
    let Some(separator) = value.find(':') else {
        return Err(RbacError::invalid_permission(
            value,
            "missing ':' separator",
        ));
    };
    let (resource, action) = (&value[..separator], &value[separator + 1..]);

    if action.contains(':') {
        return Err(RbacError::invalid_permission(
            value,
            "more than one ':' separator",
        ));
    }
    if resource.is_empty() || action.is_empty() {
        return Err(RbacError::invalid_permission(
            value,
            "empty resource or action",
        ));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(RbacError::invalid_permission(
            value,
            "whitespace is not allowed",
        ));
    }
    for segment in [resource, action] {
        if segment != WILDCARD && segment.contains('*') {
            return Err(RbacError::invalid_permission(
                value,
                "'*' must be a whole segment",
            ));
        }
    }
    if resource == WILDCARD && action != WILDCARD {
        return Err(RbacError::invalid_permission(
            value,
            "resource wildcard is only valid as '*:*'",
        ));
    }

    Ok(separator)
}

impl ValueObject for Permission {}

impl core::str::FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.to_string())
    }
}

impl TryFrom<String> for Permission {
    type Error = RbacError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.raw.into_owned()
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw)
    }
}
