//! Role vocabularies.
//!
//! Two vocabularies exist: the organisational [`Role`] set and the community
//! [`BasicRole`] set. Their permission strings have different shapes
//! (`content:view` vs `post:read`), so they are separate types that share one
//! generic engine through [`RoleVocabulary`] rather than a merged enum.

use core::hash::Hash;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use rolegate_core::RbacError;

use crate::endpoint::HttpMethod::{Delete, Get, Post, Put};
use crate::endpoint::{EndpointPermissionSpec, EndpointSpec, HttpMethod};
use crate::registry::Registry;

/// Numeric privilege rank. Higher means more privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleLevel(pub u8);

impl RoleLevel {
    /// Rank of unauthenticated visitors and of any unknown role.
    pub const LOWEST: RoleLevel = RoleLevel(0);
}

impl core::fmt::Display for RoleLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A closed set of roles with static permission and endpoint tables.
pub trait RoleVocabulary:
    Copy
    + Eq
    + Hash
    + core::fmt::Debug
    + core::fmt::Display
    + core::str::FromStr<Err = RbacError>
    + Send
    + Sync
    + 'static
{
    /// Every role, from least to most privileged where the order is linear.
    const ALL: &'static [Self];

    /// Permission requirements declared per endpoint, for display/debugging.
    const ENDPOINT_PERMISSIONS: &'static [EndpointPermissionSpec];

    fn as_str(self) -> &'static str;
    fn level(self) -> RoleLevel;
    fn description(self) -> &'static str;
    /// Icon name shown next to the role in badges and menus.
    fn icon(self) -> &'static str;
    fn granted_permissions(self) -> &'static [&'static str];
    fn endpoints(self) -> &'static [EndpointSpec];

    /// The process-wide registry built from the tables above.
    fn registry() -> &'static Registry<Self>;
}

fn parse_role<R: RoleVocabulary>(s: &str) -> Result<R, RbacError> {
    R::ALL
        .iter()
        .copied()
        .find(|r| r.as_str() == s)
        .ok_or_else(|| RbacError::unknown_role(s))
}

const fn ep(pattern: &'static str, methods: &'static [HttpMethod]) -> EndpointSpec {
    EndpointSpec { pattern, methods }
}

const fn needs(
    pattern: &'static str,
    methods: &'static [HttpMethod],
    permissions: &'static [&'static str],
) -> EndpointPermissionSpec {
    EndpointPermissionSpec {
        pattern,
        methods,
        permissions,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Organisational roles
// ─────────────────────────────────────────────────────────────────────────────

/// Organisational role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Public,
    User,
    Employee,
    Manager,
    Admin,
    SuperAdmin,
    /// Read-only compliance role, outside the linear public → super_admin chain.
    Auditor,
}

const PUBLIC_ENDPOINTS: &[EndpointSpec] = &[ep("/public/*", &[Get]), ep("/auth/*", &[Post])];

const USER_ENDPOINTS: &[EndpointSpec] = &[
    ep("/public/*", &[Get]),
    ep("/auth/*", &[Post]),
    ep("/profile/*", &[Get, Put]),
    ep("/content/*", &[Get]),
];

const EMPLOYEE_ENDPOINTS: &[EndpointSpec] = &[
    ep("/public/*", &[Get]),
    ep("/auth/*", &[Post]),
    ep("/profile/*", &[Get, Put]),
    ep("/content/*", &[Get, Post, Put]),
    ep("/dashboard", &[Get]),
];

const MANAGER_ENDPOINTS: &[EndpointSpec] = &[
    ep("/public/*", &[Get]),
    ep("/auth/*", &[Post]),
    ep("/profile/*", &[Get, Put]),
    ep("/content/*", HttpMethod::CRUD),
    ep("/dashboard", &[Get]),
    ep("/users", &[Get]),
    ep("/users/:id", &[Get]),
    ep("/reports/*", &[Get]),
];

const ADMIN_ENDPOINTS: &[EndpointSpec] = &[
    ep("/public/*", &[Get]),
    ep("/auth/*", &[Post]),
    ep("/profile/*", &[Get, Put]),
    ep("/content/*", HttpMethod::CRUD),
    ep("/dashboard", &[Get]),
    ep("/users/*", HttpMethod::CRUD),
    ep("/reports/*", &[Get, Post]),
    ep("/audit/*", &[Get]),
    ep("/admin/*", HttpMethod::CRUD),
];

const SUPER_ADMIN_ENDPOINTS: &[EndpointSpec] = &[ep("/*", HttpMethod::ALL)];

const AUDITOR_ENDPOINTS: &[EndpointSpec] = &[
    ep("/public/*", &[Get]),
    ep("/auth/*", &[Post]),
    ep("/profile", &[Get]),
    ep("/dashboard", &[Get]),
    ep("/users", &[Get]),
    ep("/reports/*", &[Get]),
    ep("/audit/*", &[Get]),
];

impl RoleVocabulary for Role {
    const ALL: &'static [Self] = &[
        Role::Public,
        Role::User,
        Role::Employee,
        Role::Manager,
        Role::Admin,
        Role::SuperAdmin,
        Role::Auditor,
    ];

    const ENDPOINT_PERMISSIONS: &'static [EndpointPermissionSpec] = &[
        needs("/profile/*", &[Get], &["profile:view"]),
        needs("/profile/*", &[Put], &["profile:update"]),
        needs("/content/*", &[Get], &["content:view"]),
        needs("/content/*", &[Post], &["content:create"]),
        needs("/content/*", &[Put], &["content:update"]),
        needs("/content/*", &[Delete], &["content:delete"]),
        needs("/dashboard", &[Get], &["dashboard:view"]),
        needs("/users", &[Get], &["users:view_list"]),
        needs("/users/:id", &[Get], &["users:view_details"]),
        needs("/users/*", &[Post, Put], &["users:manage"]),
        needs("/users/:id", &[Delete], &["users:delete"]),
        needs("/reports/*", &[Get], &["reports:view"]),
        needs("/reports/*", &[Post], &["reports:create"]),
        needs("/audit/*", &[Get], &["audit:view"]),
        needs("/admin/*", HttpMethod::CRUD, &["admin:access"]),
    ];

    fn as_str(self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::User => "user",
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
            Role::Auditor => "auditor",
        }
    }

    fn level(self) -> RoleLevel {
        match self {
            Role::Public => RoleLevel(0),
            Role::User => RoleLevel(1),
            Role::Employee => RoleLevel(2),
            Role::Auditor => RoleLevel(2),
            Role::Manager => RoleLevel(3),
            Role::Admin => RoleLevel(4),
            Role::SuperAdmin => RoleLevel(5),
        }
    }

    fn description(self) -> &'static str {
        match self {
            Role::Public => "Unauthenticated visitor",
            Role::User => "Registered user managing their own profile",
            Role::Employee => "Staff member creating and editing content",
            Role::Manager => "Team lead with user directory and report access",
            Role::Admin => "Administrator with full user and content management",
            Role::SuperAdmin => "Unrestricted system owner",
            Role::Auditor => "Read-only compliance reviewer",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Role::Public => "globe",
            Role::User => "user",
            Role::Employee => "briefcase",
            Role::Manager => "users",
            Role::Admin => "shield",
            Role::SuperAdmin => "crown",
            Role::Auditor => "clipboard-check",
        }
    }

    fn granted_permissions(self) -> &'static [&'static str] {
        match self {
            Role::Public => &[],
            Role::User => &["profile:view", "profile:update", "content:view"],
            Role::Employee => &[
                "profile:*",
                "content:view",
                "content:create",
                "content:update",
                "dashboard:view",
            ],
            Role::Manager => &[
                "profile:*",
                "content:*",
                "users:view_list",
                "users:view_details",
                "reports:view",
                "dashboard:view",
            ],
            Role::Admin => &[
                "admin:*",
                "profile:*",
                "content:*",
                "users:*",
                "reports:*",
                "audit:*",
                "dashboard:*",
            ],
            Role::SuperAdmin => &["*:*"],
            Role::Auditor => &[
                "profile:view",
                "content:view",
                "users:view_list",
                "audit:view",
                "audit:export",
                "reports:view",
                "dashboard:view",
            ],
        }
    }

    fn endpoints(self) -> &'static [EndpointSpec] {
        match self {
            Role::Public => PUBLIC_ENDPOINTS,
            Role::User => USER_ENDPOINTS,
            Role::Employee => EMPLOYEE_ENDPOINTS,
            Role::Manager => MANAGER_ENDPOINTS,
            Role::Admin => ADMIN_ENDPOINTS,
            Role::SuperAdmin => SUPER_ADMIN_ENDPOINTS,
            Role::Auditor => AUDITOR_ENDPOINTS,
        }
    }

    fn registry() -> &'static Registry<Self> {
        static REGISTRY: LazyLock<Registry<Role>> = LazyLock::new(Registry::build);
        &REGISTRY
    }
}

impl core::str::FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_role(s)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Community roles
// ─────────────────────────────────────────────────────────────────────────────

/// Community role vocabulary (forum-style deployments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicRole {
    Guest,
    User,
    Moderator,
    Admin,
}

impl RoleVocabulary for BasicRole {
    const ALL: &'static [Self] = &[
        BasicRole::Guest,
        BasicRole::User,
        BasicRole::Moderator,
        BasicRole::Admin,
    ];

    const ENDPOINT_PERMISSIONS: &'static [EndpointPermissionSpec] = &[
        needs("/posts/*", &[Get], &["post:read"]),
        needs("/posts/*", &[Post], &["post:create"]),
        needs("/posts/:id", &[Delete], &["post:delete"]),
        needs("/users/me", &[Get], &["user:read"]),
        needs("/users/me", &[Put], &["user:update_self"]),
        needs("/reports/*", &[Get, Put], &["report:review"]),
        needs("/system/*", HttpMethod::CRUD, &["system:manage"]),
    ];

    fn as_str(self) -> &'static str {
        match self {
            BasicRole::Guest => "guest",
            BasicRole::User => "user",
            BasicRole::Moderator => "moderator",
            BasicRole::Admin => "admin",
        }
    }

    fn level(self) -> RoleLevel {
        match self {
            BasicRole::Guest => RoleLevel(0),
            BasicRole::User => RoleLevel(1),
            BasicRole::Moderator => RoleLevel(2),
            BasicRole::Admin => RoleLevel(3),
        }
    }

    fn description(self) -> &'static str {
        match self {
            BasicRole::Guest => "Anonymous reader",
            BasicRole::User => "Member posting and editing their own account",
            BasicRole::Moderator => "Community moderator reviewing reports",
            BasicRole::Admin => "Community administrator",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            BasicRole::Guest => "eye",
            BasicRole::User => "user",
            BasicRole::Moderator => "gavel",
            BasicRole::Admin => "shield",
        }
    }

    fn granted_permissions(self) -> &'static [&'static str] {
        match self {
            BasicRole::Guest => &["post:read"],
            BasicRole::User => &["post:read", "post:create", "user:read", "user:update_self"],
            BasicRole::Moderator => &[
                "post:*",
                "comment:*",
                "user:read",
                "user:update_self",
                "report:review",
            ],
            BasicRole::Admin => &["post:*", "comment:*", "user:*", "report:*", "system:*"],
        }
    }

    fn endpoints(self) -> &'static [EndpointSpec] {
        match self {
            BasicRole::Guest => const { &[ep("/posts/*", &[Get])] },
            BasicRole::User => {
                const { &[ep("/posts/*", &[Get, Post]), ep("/users/me", &[Get, Put])] }
            }
            BasicRole::Moderator => {
                const {
                    &[
                        ep("/posts/*", HttpMethod::CRUD),
                        ep("/comments/*", HttpMethod::CRUD),
                        ep("/users/me", &[Get, Put]),
                        ep("/reports/*", &[Get, Put]),
                    ]
                }
            }
            BasicRole::Admin => const { &[ep("/*", HttpMethod::ALL)] },
        }
    }

    fn registry() -> &'static Registry<Self> {
        static REGISTRY: LazyLock<Registry<BasicRole>> = LazyLock::new(Registry::build);
        &REGISTRY
    }
}

impl core::str::FromStr for BasicRole {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_role(s)
    }
}

impl core::fmt::Display for BasicRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Permission;

    #[test]
    fn names_roundtrip_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        for role in BasicRole::ALL {
            assert_eq!(role.as_str().parse::<BasicRole>().unwrap(), *role);
        }
    }

    #[test]
    fn vocabularies_do_not_share_names_silently() {
        assert!("moderator".parse::<Role>().is_err());
        assert!("super_admin".parse::<BasicRole>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn levels_span_public_to_super_admin() {
        assert_eq!(Role::Public.level(), RoleLevel::LOWEST);
        assert_eq!(Role::SuperAdmin.level(), RoleLevel(5));
        assert!(Role::Manager.level() > Role::Employee.level());
    }

    #[test]
    fn every_declared_permission_is_well_formed() {
        for role in Role::ALL {
            for p in role.granted_permissions() {
                assert!(Permission::from_static(p).is_ok(), "{role}: {p}");
            }
        }
        for role in BasicRole::ALL {
            for p in role.granted_permissions() {
                assert!(Permission::from_static(p).is_ok(), "{role}: {p}");
            }
        }
        for spec in Role::ENDPOINT_PERMISSIONS
            .iter()
            .chain(BasicRole::ENDPOINT_PERMISSIONS)
        {
            for p in spec.permissions {
                assert!(Permission::from_static(p).is_ok(), "{}: {p}", spec.pattern);
            }
        }
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        let role: BasicRole = serde_json::from_str("\"moderator\"").unwrap();
        assert_eq!(role, BasicRole::Moderator);
    }
}
