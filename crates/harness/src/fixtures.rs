//! Synthetic fixtures.
//!
//! Plain data, rebuilt on every call. The role table is declared here on its own
//! rather than read from the production registry, so that drift between the two
//! shows up in [`crate::validate::validate_registry_drift`].

use serde::Serialize;

use rolegate_auth::{SessionProfile, UserStatus};
use rolegate_core::UserId;

/// One expected permission outcome for a fixture user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCase {
    pub permission: &'static str,
    pub should_have: bool,
}

const fn case(permission: &'static str, should_have: bool) -> PermissionCase {
    PermissionCase {
        permission,
        should_have,
    }
}

/// Synthetic persona with the outcomes it must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestUser {
    pub id: UserId,
    pub name: &'static str,
    pub email: &'static str,
    pub roles: Vec<&'static str>,
    pub permissions: Vec<&'static str>,
    pub status: UserStatus,
    pub cases: Vec<PermissionCase>,
}

impl TestUser {
    /// The profile payload the auth provider would deliver for this persona.
    pub fn to_profile(&self) -> SessionProfile {
        SessionProfile {
            sub: self.id,
            email: self.email.to_string(),
            roles: self.roles.iter().map(|r| r.to_string()).collect(),
            permissions: Some(self.permissions.iter().map(|p| p.to_string()).collect()),
            status: self.status,
        }
    }
}

/// The five personas: admin, manager, employee, user and a suspended account.
pub fn generate_test_users() -> Vec<TestUser> {
    vec![
        TestUser {
            id: UserId::from_u128(1),
            name: "Admin",
            email: "admin@example.com",
            roles: vec!["admin"],
            permissions: vec![
                "admin:*",
                "profile:*",
                "content:*",
                "users:*",
                "reports:*",
                "audit:*",
                "dashboard:*",
            ],
            status: UserStatus::Active,
            cases: vec![
                case("admin:dashboard", true),
                case("admin:settings", true),
                case("users:delete", true),
                case("content:publish", true),
                case("audit:export", true),
                case("system:shutdown", false),
                case("billing:view", false),
            ],
        },
        TestUser {
            id: UserId::from_u128(2),
            name: "Manager",
            email: "manager@example.com",
            roles: vec!["manager"],
            permissions: vec!["profile:*", "content:*", "users:view_list", "users:view_details"],
            status: UserStatus::Active,
            cases: vec![
                case("content:view", true),
                case("content:create", true),
                case("profile:update", true),
                case("users:view_list", true),
                case("users:delete", false),
                case("admin:dashboard", false),
            ],
        },
        TestUser {
            id: UserId::from_u128(3),
            name: "Employee",
            email: "employee@example.com",
            roles: vec!["employee"],
            permissions: vec![
                "profile:*",
                "content:view",
                "content:create",
                "content:update",
                "dashboard:view",
            ],
            status: UserStatus::Active,
            cases: vec![
                case("content:create", true),
                case("profile:update", true),
                case("dashboard:view", true),
                case("content:delete", false),
                case("users:view_list", false),
            ],
        },
        TestUser {
            id: UserId::from_u128(4),
            name: "User",
            email: "user@example.com",
            roles: vec!["user"],
            permissions: vec!["profile:view", "profile:update", "content:view"],
            status: UserStatus::Active,
            cases: vec![
                case("profile:view", true),
                case("content:view", true),
                case("content:create", false),
                case("admin:dashboard", false),
            ],
        },
        TestUser {
            id: UserId::from_u128(5),
            name: "Suspended",
            email: "suspended@example.com",
            roles: vec![],
            permissions: vec![],
            status: UserStatus::Suspended,
            cases: vec![case("content:view", false), case("profile:view", false)],
        },
    ]
}

/// Role declaration in one of the harness's own tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestRole {
    pub name: &'static str,
    pub level: u8,
    pub permissions: Vec<&'static str>,
    /// The role this one is expected to contain entirely.
    pub inherits: Option<&'static str>,
}

pub type RoleTable = Vec<TestRole>;

/// Expected role table, mirroring the organisational vocabulary.
pub fn generate_test_roles() -> RoleTable {
    vec![
        TestRole {
            name: "public",
            level: 0,
            permissions: vec![],
            inherits: None,
        },
        TestRole {
            name: "user",
            level: 1,
            permissions: vec!["profile:view", "profile:update", "content:view"],
            inherits: Some("public"),
        },
        TestRole {
            name: "employee",
            level: 2,
            permissions: vec![
                "profile:*",
                "content:view",
                "content:create",
                "content:update",
                "dashboard:view",
            ],
            inherits: Some("user"),
        },
        TestRole {
            name: "manager",
            level: 3,
            permissions: vec![
                "profile:*",
                "content:*",
                "users:view_list",
                "users:view_details",
                "reports:view",
                "dashboard:view",
            ],
            inherits: Some("employee"),
        },
        TestRole {
            name: "admin",
            level: 4,
            permissions: vec![
                "admin:*",
                "profile:*",
                "content:*",
                "users:*",
                "reports:*",
                "audit:*",
                "dashboard:*",
            ],
            inherits: Some("manager"),
        },
        TestRole {
            name: "super_admin",
            level: 5,
            permissions: vec!["*:*"],
            inherits: Some("admin"),
        },
        TestRole {
            name: "auditor",
            level: 2,
            permissions: vec![
                "profile:view",
                "content:view",
                "users:view_list",
                "audit:view",
                "audit:export",
                "reports:view",
                "dashboard:view",
            ],
            inherits: None,
        },
    ]
}

/// Expected role table for the community vocabulary.
pub fn generate_basic_test_roles() -> RoleTable {
    vec![
        TestRole {
            name: "guest",
            level: 0,
            permissions: vec!["post:read"],
            inherits: None,
        },
        TestRole {
            name: "user",
            level: 1,
            permissions: vec!["post:read", "post:create", "user:read", "user:update_self"],
            inherits: Some("guest"),
        },
        TestRole {
            name: "moderator",
            level: 2,
            permissions: vec![
                "post:*",
                "comment:*",
                "user:read",
                "user:update_self",
                "report:review",
            ],
            inherits: Some("user"),
        },
        TestRole {
            name: "admin",
            level: 3,
            permissions: vec!["post:*", "comment:*", "user:*", "report:*", "system:*"],
            inherits: Some("moderator"),
        },
    ]
}

/// Expected reachability of one endpoint for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointExpectation {
    pub role: &'static str,
    pub method: &'static str,
    pub path: &'static str,
    pub expected: bool,
}

const fn expect(
    role: &'static str,
    method: &'static str,
    path: &'static str,
    expected: bool,
) -> EndpointExpectation {
    EndpointExpectation {
        role,
        method,
        path,
        expected,
    }
}

/// Expected endpoint access, written independently of the role endpoint tables.
pub fn expected_endpoint_access() -> Vec<EndpointExpectation> {
    vec![
        expect("public", "GET", "/public/info", true),
        expect("public", "POST", "/auth/login", true),
        expect("public", "GET", "/profile", false),
        expect("user", "GET", "/profile", true),
        expect("user", "PUT", "/profile/avatar", true),
        expect("user", "POST", "/content/article", false),
        expect("user", "GET", "/users", false),
        expect("employee", "POST", "/content/article", true),
        expect("employee", "DELETE", "/content/article/1", false),
        expect("employee", "GET", "/dashboard", true),
        expect("manager", "DELETE", "/content/article/1", true),
        expect("manager", "GET", "/users/42", true),
        expect("manager", "DELETE", "/users/42", false),
        expect("manager", "GET", "/audit/log", false),
        expect("admin", "DELETE", "/admin/users/42", true),
        expect("admin", "DELETE", "/public/info", false),
        expect("admin", "GET", "/administrator", false),
        expect("admin", "DELETE", "/users/42", true),
        expect("super_admin", "PATCH", "/anything/at/all", true),
        expect("auditor", "GET", "/audit/log", true),
        expect("auditor", "PUT", "/profile", false),
    ]
}
