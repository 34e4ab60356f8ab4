//! `rolegate-auth` — client-side RBAC permission evaluation.
//!
//! Pure, synchronous decisions over immutable role tables. This crate never
//! talks to the backend; it evaluates the roles/permissions the session layer
//! hands it and mirrors (never replaces) server-side enforcement.

pub mod authorize;
pub mod endpoint;
pub mod guard;
pub mod matcher;
pub mod permissions;
pub mod registry;
pub mod resolver;
pub mod roles;
pub mod session;

pub use authorize::{
    AccessCheckCriteria, AccessExplanation, DenialKind, RoleRequirement, explain_access,
    has_access, has_all_permissions, has_any_permission, has_permission, has_role, has_role_level,
};
pub use endpoint::{EndpointDescriptor, HttpMethod, PathPattern};
pub use guard::Authorizer;
pub use permissions::Permission;
pub use registry::{Registry, RegistrySnapshot};
pub use resolver::{EndpointRequirements, EndpointResolver};
pub use roles::{BasicRole, Role, RoleLevel, RoleVocabulary};
pub use session::{PermissionSource, RbacUser, SessionProfile, UserStatus};
