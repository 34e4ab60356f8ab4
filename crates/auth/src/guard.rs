//! User-bound facade over the decision engine, for route guards and
//! conditional rendering.

use crate::authorize::{self, AccessCheckCriteria, AccessExplanation};
use crate::endpoint::HttpMethod;
use crate::resolver::EndpointResolver;
use crate::session::RbacUser;
use crate::{Permission, Registry, RoleLevel, RoleVocabulary};

#[derive(Debug, Clone, Copy)]
struct Subject<'a, R> {
    roles: &'a [R],
    permissions: &'a [Permission],
}

/// Answers access questions for one (possibly absent) user.
///
/// Without a subject (signed out, or suspended) every question is answered
/// `false`, including checks that carry no restriction.
#[derive(Debug, Clone, Copy)]
pub struct Authorizer<'a, R: RoleVocabulary> {
    subject: Option<Subject<'a, R>>,
    registry: &'a Registry<R>,
}

impl<'a, R: RoleVocabulary> Authorizer<'a, R> {
    /// Authorizer for an optional session user. Suspended users count as absent.
    pub fn for_user(registry: &'a Registry<R>, user: Option<&'a RbacUser<R>>) -> Self {
        let subject = user.filter(|u| u.is_active()).map(|u| Subject {
            roles: &u.roles,
            permissions: &u.permissions,
        });
        Self { subject, registry }
    }

    /// Authorizer with no user at all.
    pub fn anonymous(registry: &'a Registry<R>) -> Self {
        Self {
            subject: None,
            registry,
        }
    }

    pub fn has_subject(&self) -> bool {
        self.subject.is_some()
    }

    fn check(&self, f: impl FnOnce(&Subject<'a, R>) -> bool) -> bool {
        self.subject.as_ref().is_some_and(f)
    }

    pub fn has_access(&self, criteria: &AccessCheckCriteria<R>) -> bool {
        self.check(|s| authorize::has_access(criteria, s.roles, s.permissions))
    }

    pub fn has_role(&self, role: R) -> bool {
        self.has_any_role(&[role])
    }

    pub fn has_any_role(&self, roles: &[R]) -> bool {
        self.check(|s| authorize::has_role(s.roles, roles))
    }

    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.check(|s| authorize::has_permission(s.permissions, permission))
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        self.check(|s| authorize::has_all_permissions(s.permissions, permissions))
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.check(|s| authorize::has_any_permission(s.permissions, permissions))
    }

    pub fn has_role_level(&self, min_level: RoleLevel) -> bool {
        self.check(|s| authorize::has_role_level(self.registry, s.roles, min_level))
    }

    pub fn can_access_endpoint(&self, method: &str, path: &str) -> bool {
        self.check(|s| {
            EndpointResolver::new(self.registry).can_access_endpoint(method, path, s.roles)
        })
    }

    pub fn can_access(&self, method: HttpMethod, path: &str) -> bool {
        self.check(|s| EndpointResolver::new(self.registry).can_access(method, path, s.roles))
    }

    pub fn explain(&self, criteria: &AccessCheckCriteria<R>) -> AccessExplanation {
        match &self.subject {
            Some(s) => authorize::explain_access(self.registry, criteria, s.roles, s.permissions),
            None => authorize::explain_no_subject(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crate::session::{SessionProfile, UserStatus};
    use chrono::Utc;
    use rolegate_core::UserId;

    fn perm(s: &str) -> Permission {
        s.parse().unwrap()
    }

    #[test]
    fn anonymous_denies_everything_even_unrestricted_checks() {
        let registry = Registry::<Role>::global();
        let auth = Authorizer::anonymous(registry);
        assert!(!auth.has_access(&AccessCheckCriteria::new()));
        assert!(!auth.has_all_permissions(&[]));
        assert!(!auth.has_any_permission(&[]));
        assert!(!auth.has_role_level(RoleLevel::LOWEST));
        assert!(!auth.can_access_endpoint("GET", "/public/info"));
        assert!(!auth.explain(&AccessCheckCriteria::new()).granted);
    }

    #[test]
    fn suspended_user_is_treated_as_absent() {
        let registry = Registry::<Role>::global();
        let profile = SessionProfile {
            sub: UserId::from_u128(9),
            email: "sam@example.com".to_string(),
            roles: vec!["admin".to_string()],
            permissions: None,
            status: UserStatus::Suspended,
        };
        let user = RbacUser::from_profile(&profile, registry, Utc::now());
        let auth = Authorizer::for_user(registry, Some(&user));
        assert!(!auth.has_subject());
        assert!(!auth.has_permission(&perm("admin:dashboard")));
        assert!(!auth.has_role(Role::Admin));
    }

    #[test]
    fn active_user_is_evaluated() {
        let registry = Registry::<Role>::global();
        let user = RbacUser::new(
            UserId::from_u128(3),
            "mo@example.com",
            vec![Role::Manager],
            registry,
            Utc::now(),
        );
        let auth = Authorizer::for_user(registry, Some(&user));

        assert!(auth.has_role(Role::Manager));
        assert!(auth.has_all_permissions(&[perm("content:view"), perm("content:create")]));
        assert!(!auth.has_permission(&perm("admin:dashboard")));
        assert!(auth.has_role_level(RoleLevel(3)));
        assert!(!auth.has_role_level(RoleLevel(4)));
        assert!(auth.can_access(HttpMethod::Get, "/reports/q3"));
        assert!(auth.has_access(&AccessCheckCriteria::new()));
    }

    #[test]
    fn no_user_at_all() {
        let registry = Registry::<Role>::global();
        let auth = Authorizer::for_user(registry, None);
        assert!(!auth.has_subject());
        assert!(!auth.has_access(&AccessCheckCriteria::new().role(Role::User)));
    }
}
