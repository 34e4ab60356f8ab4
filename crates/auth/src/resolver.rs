//! Endpoint access resolver.
//!
//! Client-side mirror of the backend's route table, used to hide navigation
//! and actions a user cannot reach. It never replaces server-side checks.

use serde::Serialize;

use crate::endpoint::HttpMethod;
use crate::{Permission, Registry, RoleVocabulary};

/// Requirements declared for a `(method, path)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointRequirements<R> {
    /// Roles owning a descriptor that covers the pair.
    pub required_roles: Vec<R>,
    /// Permissions declared for the pair, deduplicated.
    pub required_permissions: Vec<Permission>,
}

impl<R> EndpointRequirements<R> {
    /// `true` when no role can reach the endpoint.
    pub fn is_unreachable(&self) -> bool {
        self.required_roles.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EndpointResolver<'r, R: RoleVocabulary> {
    registry: &'r Registry<R>,
}

impl<R: RoleVocabulary> EndpointResolver<'static, R> {
    pub fn global() -> Self {
        Self::new(R::registry())
    }
}

impl<'r, R: RoleVocabulary> EndpointResolver<'r, R> {
    pub fn new(registry: &'r Registry<R>) -> Self {
        Self { registry }
    }

    /// Whether any held role owns a descriptor allowing `method` on `path`.
    ///
    /// Unknown method names are denied.
    pub fn can_access_endpoint(&self, method: &str, path: &str, user_roles: &[R]) -> bool {
        match method.parse::<HttpMethod>() {
            Ok(method) => self.can_access(method, path, user_roles),
            Err(err) => {
                tracing::debug!(
                    method,
                    path,
                    error = %err,
                    "endpoint check with unknown method denied"
                );
                false
            }
        }
    }

    pub fn can_access(&self, method: HttpMethod, path: &str, user_roles: &[R]) -> bool {
        user_roles
            .iter()
            .any(|&role| self.role_can_access(role, method, path))
    }

    pub fn role_can_access(&self, role: R, method: HttpMethod, path: &str) -> bool {
        self.registry
            .endpoints_for(role)
            .iter()
            .any(|d| d.allows(method, path))
    }

    /// Declared requirement metadata for display/debugging. Grants nothing.
    ///
    /// An unknown method yields empty requirements.
    pub fn get_endpoint_permissions(&self, method: &str, path: &str) -> EndpointRequirements<R> {
        let Ok(method) = method.parse::<HttpMethod>() else {
            return EndpointRequirements {
                required_roles: Vec::new(),
                required_permissions: Vec::new(),
            };
        };

        let required_roles = R::ALL
            .iter()
            .copied()
            .filter(|&role| self.role_can_access(role, method, path))
            .collect();

        let mut required_permissions: Vec<Permission> = Vec::new();
        for req in self.registry.endpoint_requirements() {
            if req.methods.contains(&method) && req.pattern.matches(path) {
                for perm in &req.permissions {
                    if !required_permissions.contains(perm) {
                        required_permissions.push(perm.clone());
                    }
                }
            }
        }

        EndpointRequirements {
            required_roles,
            required_permissions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicRole, Role};

    fn perm(s: &str) -> Permission {
        s.parse().unwrap()
    }

    #[test]
    fn admin_reaches_admin_tree_but_not_undeclared_paths() {
        let resolver = EndpointResolver::<Role>::global();
        assert!(resolver.can_access_endpoint("DELETE", "/admin/users/42", &[Role::Admin]));
        assert!(!resolver.can_access_endpoint("DELETE", "/public/info", &[Role::Admin]));
        assert!(resolver.can_access_endpoint("GET", "/public/info", &[Role::Admin]));
    }

    #[test]
    fn any_held_role_suffices() {
        let resolver = EndpointResolver::<Role>::global();
        assert!(!resolver.can_access_endpoint("GET", "/audit/log", &[Role::Manager]));
        assert!(resolver.can_access_endpoint("GET", "/audit/log", &[Role::Manager, Role::Auditor]));
    }

    #[test]
    fn no_roles_or_unknown_method_denies() {
        let resolver = EndpointResolver::<Role>::global();
        assert!(!resolver.can_access_endpoint("GET", "/public/info", &[]));
        assert!(!resolver.can_access_endpoint("FETCH", "/public/info", &[Role::SuperAdmin]));
    }

    #[test]
    fn super_admin_reaches_everything() {
        let resolver = EndpointResolver::<Role>::global();
        assert!(resolver.can_access_endpoint("PATCH", "/anything/here", &[Role::SuperAdmin]));
    }

    #[test]
    fn path_params_are_single_segments() {
        let resolver = EndpointResolver::<Role>::global();
        assert!(resolver.can_access_endpoint("GET", "/users/42", &[Role::Manager]));
        assert!(!resolver.can_access_endpoint("GET", "/users/42/sessions", &[Role::Manager]));
    }

    #[test]
    fn endpoint_permissions_list_roles_and_permissions() {
        let resolver = EndpointResolver::<Role>::global();
        let req = resolver.get_endpoint_permissions("DELETE", "/users/42");
        assert_eq!(req.required_roles, vec![Role::Admin, Role::SuperAdmin]);
        assert_eq!(req.required_permissions, vec![perm("users:delete")]);

        let req = resolver.get_endpoint_permissions("GET", "/users");
        assert_eq!(
            req.required_roles,
            vec![Role::Manager, Role::Admin, Role::SuperAdmin, Role::Auditor]
        );
        assert_eq!(req.required_permissions, vec![perm("users:view_list")]);
    }

    #[test]
    fn unknown_method_has_no_requirements() {
        let req = EndpointResolver::<Role>::global().get_endpoint_permissions("BREW", "/users");
        assert!(req.is_unreachable());
        assert!(req.required_permissions.is_empty());
    }

    #[test]
    fn basic_vocabulary_uses_its_own_table() {
        let resolver = EndpointResolver::<BasicRole>::global();
        assert!(resolver.can_access_endpoint("GET", "/posts/7", &[BasicRole::Guest]));
        assert!(!resolver.can_access_endpoint("POST", "/posts", &[BasicRole::Guest]));
        assert!(resolver.can_access_endpoint("DELETE", "/posts/7", &[BasicRole::Moderator]));
    }
}
