//! Error model for RBAC construction boundaries.
//!
//! Decision functions never return these; they only surface when untyped input
//! (strings from a session payload, a config value) is turned into typed values.

use thiserror::Error;

/// Result type used across the RBAC crates.
pub type RbacResult<T> = Result<T, RbacError>;

/// Failure to construct a typed RBAC value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RbacError {
    /// A permission string did not have the `resource:action` shape.
    #[error("invalid permission '{value}': {reason}")]
    InvalidPermission { value: String, reason: &'static str },

    /// A role name is not part of the vocabulary it was parsed against.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// An HTTP method name is not supported by the endpoint resolver.
    #[error("unknown http method '{0}'")]
    UnknownMethod(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A value failed validation (e.g. a configuration setting).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl RbacError {
    pub fn invalid_permission(value: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPermission {
            value: value.into(),
            reason,
        }
    }

    pub fn unknown_role(name: impl Into<String>) -> Self {
        Self::UnknownRole(name.into())
    }

    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod(name.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = RbacError::invalid_permission("users", "missing ':' separator");
        assert_eq!(
            err.to_string(),
            "invalid permission 'users': missing ':' separator"
        );
        assert_eq!(RbacError::unknown_role("root").to_string(), "unknown role 'root'");
    }
}
