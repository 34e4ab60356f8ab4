//! Session boundary: the profile payload delivered by the auth provider and the
//! RBAC view of the signed-in user derived from it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use rolegate_core::UserId;

use crate::{Permission, Registry, RoleVocabulary};

/// User account status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// User is active and is evaluated normally.
    #[default]
    Active,
    /// User is suspended; every check denies.
    Suspended,
}

/// Profile payload as received from the backend (`/profile` or token claims).
///
/// Roles and permissions are untyped strings at this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub sub: UserId,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// When absent, permissions are derived from `roles` via the registry.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub status: UserStatus,
}

/// Where a user's permission list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSource {
    /// Supplied explicitly by the backend.
    Supplied,
    /// Flattened from the user's roles via the registry.
    Derived,
}

/// RBAC view of a user.
///
/// `permissions` is a projection computed when the view is built; it does not
/// follow later registry or backend changes until [`RbacUser::refresh`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RbacUser<R> {
    pub id: UserId,
    pub email: String,
    pub roles: Vec<R>,
    pub permissions: Vec<Permission>,
    pub status: UserStatus,
    pub permission_source: PermissionSource,
    pub loaded_at: DateTime<Utc>,
}

impl<R: RoleVocabulary> RbacUser<R> {
    /// Build a view whose permissions are derived from `roles`.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        roles: Vec<R>,
        registry: &Registry<R>,
        now: DateTime<Utc>,
    ) -> Self {
        let permissions = registry.effective_permissions(&roles);
        Self {
            id,
            email: email.into(),
            roles,
            permissions,
            status: UserStatus::Active,
            permission_source: PermissionSource::Derived,
            loaded_at: now,
        }
    }

    /// Build a view from a backend profile.
    ///
    /// Unknown role names and malformed permission strings are dropped with a
    /// warning, which can only narrow access.
    pub fn from_profile(
        profile: &SessionProfile,
        registry: &Registry<R>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut roles: Vec<R> = Vec::with_capacity(profile.roles.len());
        for name in &profile.roles {
            match name.parse::<R>() {
                Ok(role) if !roles.contains(&role) => roles.push(role),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(
                        user = %profile.sub,
                        role = %name,
                        error = %err,
                        "dropping unknown role from profile"
                    );
                }
            }
        }

        let (permissions, permission_source) = match &profile.permissions {
            Some(raw) => {
                let mut parsed: Vec<Permission> = Vec::with_capacity(raw.len());
                for value in raw {
                    match value.parse::<Permission>() {
                        Ok(p) if !parsed.contains(&p) => parsed.push(p),
                        Ok(_) => {}
                        Err(err) => {
                            tracing::warn!(
                                user = %profile.sub,
                                error = %err,
                                "dropping malformed permission from profile"
                            );
                        }
                    }
                }
                (parsed, PermissionSource::Supplied)
            }
            None => (
                registry.effective_permissions(&roles),
                PermissionSource::Derived,
            ),
        };

        Self {
            id: profile.sub,
            email: profile.email.clone(),
            roles,
            permissions,
            status: profile.status,
            permission_source,
            loaded_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Whether the view is older than `max_age` at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.loaded_at > max_age
    }

    /// Re-derive permissions from roles against `registry`.
    ///
    /// Permissions supplied by the backend are left alone; only a new profile
    /// can change those.
    pub fn refresh(&mut self, registry: &Registry<R>, now: DateTime<Utc>) {
        if self.permission_source == PermissionSource::Derived {
            self.permissions = registry.effective_permissions(&self.roles);
        }
        self.loaded_at = now;
    }
}
