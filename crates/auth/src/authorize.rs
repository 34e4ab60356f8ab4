//! Access decision engine.
//!
//! Every function here is pure: inputs are passed in, nothing is cached, and the
//! result is a plain `bool` (or an explanation value). Missing data denies.

use serde::{Deserialize, Serialize};

use rolegate_core::ValueObject;

use crate::matcher::{matches, matches_all, matches_any};
use crate::{Permission, Registry, RoleLevel, RoleVocabulary};

/// Required role(s): a single role or a list of which any one suffices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRequirement<R> {
    One(R),
    AnyOf(Vec<R>),
}

impl<R> RoleRequirement<R> {
    pub fn roles(&self) -> &[R] {
        match self {
            RoleRequirement::One(role) => core::slice::from_ref(role),
            RoleRequirement::AnyOf(roles) => roles,
        }
    }
}

/// Criteria for a single access check. Built fresh per check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCheckCriteria<R> {
    pub required_role: Option<RoleRequirement<R>>,
    #[serde(default)]
    pub required_permissions: Vec<Permission>,
    /// `false` (the default) means any one of `required_permissions` suffices.
    #[serde(default)]
    pub require_all_permissions: bool,
}

impl<R> Default for AccessCheckCriteria<R> {
    fn default() -> Self {
        Self {
            required_role: None,
            required_permissions: Vec::new(),
            require_all_permissions: false,
        }
    }
}

impl<R> AccessCheckCriteria<R> {
    /// No restriction at all.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(mut self, role: R) -> Self {
        self.required_role = Some(RoleRequirement::One(role));
        self
    }

    pub fn any_role(mut self, roles: impl IntoIterator<Item = R>) -> Self {
        self.required_role = Some(RoleRequirement::AnyOf(roles.into_iter().collect()));
        self
    }

    pub fn permission(mut self, permission: Permission) -> Self {
        self.required_permissions.push(permission);
        self
    }

    pub fn permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.required_permissions.extend(permissions);
        self
    }

    pub fn require_all(mut self) -> Self {
        self.require_all_permissions = true;
        self
    }

    /// `true` when neither a role nor a permission is required.
    pub fn is_unrestricted(&self) -> bool {
        self.required_role.is_none() && self.required_permissions.is_empty()
    }
}

impl<R: Clone + PartialEq + core::fmt::Debug> ValueObject for AccessCheckCriteria<R> {}

/// `true` if any of `required` is held.
pub fn has_role<R: PartialEq>(user_roles: &[R], required: &[R]) -> bool {
    required.iter().any(|r| user_roles.contains(r))
}

pub fn has_permission(user_permissions: &[Permission], required: &Permission) -> bool {
    matches(user_permissions, required)
}

pub fn has_all_permissions(user_permissions: &[Permission], required: &[Permission]) -> bool {
    matches_all(user_permissions, required)
}

pub fn has_any_permission(user_permissions: &[Permission], required: &[Permission]) -> bool {
    matches_any(user_permissions, required)
}

/// `true` if the highest level among `user_roles` is at least `min_level`.
///
/// A user without roles has no level and never passes, not even for level 0.
pub fn has_role_level<R: RoleVocabulary>(
    registry: &Registry<R>,
    user_roles: &[R],
    min_level: RoleLevel,
) -> bool {
    registry
        .max_level(user_roles)
        .is_some_and(|level| level >= min_level)
}

fn role_satisfied<R: PartialEq>(criteria: &AccessCheckCriteria<R>, user_roles: &[R]) -> bool {
    criteria
        .required_role
        .as_ref()
        .is_none_or(|req| has_role(user_roles, req.roles()))
}

fn permissions_satisfied<R>(
    criteria: &AccessCheckCriteria<R>,
    user_permissions: &[Permission],
) -> bool {
    if criteria.required_permissions.is_empty() {
        return true;
    }
    if criteria.require_all_permissions {
        matches_all(user_permissions, &criteria.required_permissions)
    } else {
        matches_any(user_permissions, &criteria.required_permissions)
    }
}

/// The single authorization decision used by route guards and conditional UI.
///
/// Role and permission requirements are independent and BOTH must hold when
/// both are given. A role never substitutes for an explicit permission.
pub fn has_access<R: PartialEq + core::fmt::Debug>(
    criteria: &AccessCheckCriteria<R>,
    user_roles: &[R],
    user_permissions: &[Permission],
) -> bool {
    let role_ok = role_satisfied(criteria, user_roles);
    let perm_ok = permissions_satisfied(criteria, user_permissions);

    if !(role_ok && perm_ok) {
        tracing::debug!(
            ?criteria,
            roles = ?user_roles,
            role_ok,
            perm_ok,
            "access denied"
        );
    }
    role_ok && perm_ok
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an access decision, for debugging "why was this hidden?".
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub granted: bool,
    pub reason: String,
    pub roles: Vec<String>,
    pub effective_permissions: Vec<String>,
    pub has_global_wildcard: bool,
    pub denial: Option<DenialReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// No user context, or the user is suspended.
    NoSubject,
    MissingRole,
    MissingPermission,
}

/// Explain the outcome [`has_access`] would produce for the same inputs.
///
/// `granted` always equals `has_access(criteria, user_roles, user_permissions)`.
pub fn explain_access<R: RoleVocabulary>(
    registry: &Registry<R>,
    criteria: &AccessCheckCriteria<R>,
    user_roles: &[R],
    user_permissions: &[Permission],
) -> AccessExplanation {
    let roles: Vec<String> = user_roles.iter().map(|r| r.as_str().to_string()).collect();
    let mut effective_permissions: Vec<String> = user_permissions
        .iter()
        .map(|p| p.as_str().to_string())
        .collect();
    effective_permissions.sort();
    let has_global_wildcard = user_permissions.iter().any(Permission::is_global);

    if !role_satisfied(criteria, user_roles) {
        let required: Vec<&str> = criteria
            .required_role
            .as_ref()
            .map(|req| req.roles().iter().map(|r| r.as_str()).collect())
            .unwrap_or_default();
        return AccessExplanation {
            granted: false,
            reason: format!(
                "None of the required roles {required:?} is held; held roles: {roles:?}"
            ),
            roles,
            effective_permissions,
            has_global_wildcard,
            denial: Some(DenialReason {
                kind: DenialKind::MissingRole,
                message: format!("Missing one of the required roles: {required:?}"),
                suggestions: required
                    .iter()
                    .map(|r| format!("Assign the '{r}' role"))
                    .collect(),
            }),
        };
    }

    if !permissions_satisfied(criteria, user_permissions) {
        let missing: Vec<&Permission> = criteria
            .required_permissions
            .iter()
            .filter(|p| !matches(user_permissions, p))
            .collect();
        let mode = if criteria.require_all_permissions {
            "all"
        } else {
            "any"
        };

        let mut suggestions = Vec::new();
        for perm in &missing {
            let granting: Vec<&str> = R::ALL
                .iter()
                .filter(|&&role| matches(registry.permissions_for(role), perm))
                .map(|role| role.as_str())
                .collect();
            if granting.is_empty() {
                suggestions.push(format!("No role grants '{perm}'; it cannot be obtained"));
            } else {
                suggestions.push(format!("'{perm}' is granted by roles: {granting:?}"));
            }
        }

        return AccessExplanation {
            granted: false,
            reason: format!(
                "Requires {mode} of {:?}; not covered: {:?}",
                criteria
                    .required_permissions
                    .iter()
                    .map(Permission::as_str)
                    .collect::<Vec<_>>(),
                missing.iter().map(|p| p.as_str()).collect::<Vec<_>>()
            ),
            roles,
            effective_permissions,
            has_global_wildcard,
            denial: Some(DenialReason {
                kind: DenialKind::MissingPermission,
                message: format!("Missing {mode} of the required permissions"),
                suggestions,
            }),
        };
    }

    let reason = if criteria.is_unrestricted() {
        "No role or permission restriction".to_string()
    } else if has_global_wildcard && !criteria.required_permissions.is_empty() {
        "Holds wildcard permission '*:*'".to_string()
    } else {
        "All requirements satisfied".to_string()
    };

    AccessExplanation {
        granted: true,
        reason,
        roles,
        effective_permissions,
        has_global_wildcard,
        denial: None,
    }
}

/// Explanation for a check made without any user context.
pub fn explain_no_subject() -> AccessExplanation {
    AccessExplanation {
        granted: false,
        reason: "No active user (signed out or suspended)".to_string(),
        roles: Vec::new(),
        effective_permissions: Vec::new(),
        has_global_wildcard: false,
        denial: Some(DenialReason {
            kind: DenialKind::NoSubject,
            message: "There is no active user to evaluate".to_string(),
            suggestions: vec![
                "Sign in, or ask an administrator to reactivate the account".to_string(),
            ],
        }),
    }
}
