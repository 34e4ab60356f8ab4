//! Validators. Each one runs to completion and reports every problem it finds.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use serde::Serialize;

use rolegate_auth::matcher::matches;
use rolegate_auth::{
    AccessCheckCriteria, Authorizer, EndpointResolver, Permission, RbacUser, Registry, Role,
    RoleLevel, RoleVocabulary, has_access, has_all_permissions, has_any_permission,
};

use crate::fixtures::{EndpointExpectation, RoleTable, TestUser};

/// Outcome of one named check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Pass/fail counts plus per-check detail.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    fn record(&mut self, name: String, passed: bool, detail: String) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(CheckResult {
            name,
            passed,
            detail,
        });
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

fn parse_all(owner: &str, raw: &[&'static str], issues: &mut Vec<String>) -> Vec<Permission> {
    let mut out = Vec::with_capacity(raw.len());
    for &value in raw {
        match Permission::from_static(value) {
            Ok(p) => out.push(p),
            Err(err) => issues.push(format!("{owner}: {err}")),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Permission matrix
// ─────────────────────────────────────────────────────────────────────────────

/// Check every declared case of every fixture user against `has_permission`.
///
/// Users go through the same path a real session does: profile → RBAC view →
/// authorizer, so suspended personas are denied by status, not by data.
pub fn validate_permission_matrix(users: &[TestUser]) -> CheckReport {
    let registry = Registry::<Role>::global();
    let mut report = CheckReport::default();

    for user in users {
        let view: RbacUser<Role> = RbacUser::from_profile(&user.to_profile(), registry, Utc::now());
        let authorizer = Authorizer::for_user(registry, Some(&view));

        for case in &user.cases {
            let name = format!("{}: {}", user.name, case.permission);
            match case.permission.parse::<Permission>() {
                Ok(required) => {
                    let actual = authorizer.has_permission(&required);
                    report.record(
                        name,
                        actual == case.should_have,
                        format!("expected {}, got {}", case.should_have, actual),
                    );
                }
                Err(err) => report.record(name, false, format!("fixture error: {err}")),
            }
        }
    }

    tracing::info!(passed = report.passed, failed = report.failed, "permission matrix validated");
    report
}

// ─────────────────────────────────────────────────────────────────────────────
// Role hierarchy
// ─────────────────────────────────────────────────────────────────────────────

/// Structural checks over a role table. Returns every inconsistency found.
///
/// - names are unique and every permission parses
/// - some role sits at level 0
/// - a role with an `inherits` parent has a higher level and covers all of
///   the parent's permissions
/// - `admin` covers every lower-level role
/// - a role holding `*:*` sits at the top level
pub fn validate_role_hierarchy(table: &RoleTable) -> Vec<String> {
    let mut issues = Vec::new();

    let mut parsed: HashMap<&str, (u8, Vec<Permission>)> = HashMap::new();
    for role in table {
        let perms = parse_all(role.name, &role.permissions, &mut issues);
        if parsed.insert(role.name, (role.level, perms)).is_some() {
            issues.push(format!("role '{}' is declared more than once", role.name));
        }
    }

    if !table.iter().any(|r| r.level == 0) {
        issues.push("no role is declared at level 0".to_string());
    }

    let covers = |holder: &[Permission], required: &[Permission]| -> Vec<String> {
        required
            .iter()
            .filter(|p| !matches(holder, p))
            .map(|p| p.as_str().to_string())
            .collect()
    };

    for role in table {
        let Some(parent) = role.inherits else { continue };
        let Some((parent_level, parent_perms)) = parsed.get(parent) else {
            issues.push(format!("role '{}' inherits unknown role '{parent}'", role.name));
            continue;
        };
        let (level, perms) = &parsed[role.name];
        if level <= parent_level {
            issues.push(format!(
                "role '{}' (level {level}) must rank above '{parent}' (level {parent_level})",
                role.name
            ));
        }
        let missing = covers(perms, parent_perms);
        if !missing.is_empty() {
            issues.push(format!(
                "role '{}' is missing permissions of '{parent}': {missing:?}",
                role.name
            ));
        }
    }

    match parsed.get("admin") {
        Some((admin_level, admin_perms)) => {
            for role in table.iter().filter(|r| r.level < *admin_level) {
                let missing = covers(admin_perms, &parsed[role.name].1);
                if !missing.is_empty() {
                    issues.push(format!(
                        "admin does not cover lower role '{}': missing {missing:?}",
                        role.name
                    ));
                }
            }
        }
        None => issues.push("no 'admin' role declared".to_string()),
    }

    let top = table.iter().map(|r| r.level).max().unwrap_or(0);
    for role in table {
        if parsed[role.name].1.iter().any(Permission::is_global) && role.level < top {
            issues.push(format!(
                "role '{}' holds '*:*' but sits below the top level {top}",
                role.name
            ));
        }
    }

    tracing::info!(issues = issues.len(), "role hierarchy validated");
    issues
}

// ─────────────────────────────────────────────────────────────────────────────
// Endpoint access
// ─────────────────────────────────────────────────────────────────────────────

/// Check the resolver against an independently written expectation table.
pub fn validate_endpoint_access(expectations: &[EndpointExpectation]) -> CheckReport {
    let resolver = EndpointResolver::<Role>::global();
    let mut report = CheckReport::default();

    for exp in expectations {
        let name = format!("{} {} {}", exp.role, exp.method, exp.path);
        match exp.role.parse::<Role>() {
            Ok(role) => {
                let actual = resolver.can_access_endpoint(exp.method, exp.path, &[role]);
                report.record(
                    name,
                    actual == exp.expected,
                    format!("expected {}, got {}", exp.expected, actual),
                );
            }
            Err(err) => report.record(name, false, format!("fixture error: {err}")),
        }
    }

    tracing::info!(passed = report.passed, failed = report.failed, "endpoint access validated");
    report
}

// ─────────────────────────────────────────────────────────────────────────────
// Registry drift
// ─────────────────────────────────────────────────────────────────────────────

/// Compare a harness role table with the production registry of vocabulary `R`.
pub fn validate_registry_drift<R: RoleVocabulary>(table: &RoleTable) -> Vec<String> {
    let registry = Registry::<R>::global();
    let mut issues = Vec::new();

    for expected in table {
        let Ok(role) = expected.name.parse::<R>() else {
            issues.push(format!("fixture role '{}' is not in the registry", expected.name));
            continue;
        };

        let level = registry.level_for(role);
        if level != RoleLevel(expected.level) {
            issues.push(format!(
                "role '{}': registry level {level}, fixture level {}",
                expected.name, expected.level
            ));
        }

        let actual: BTreeSet<&str> = registry
            .permissions_for(role)
            .iter()
            .map(Permission::as_str)
            .collect();
        let wanted: BTreeSet<&str> = expected.permissions.iter().copied().collect();
        let extra: Vec<&&str> = actual.difference(&wanted).collect();
        let missing: Vec<&&str> = wanted.difference(&actual).collect();
        if !extra.is_empty() {
            issues.push(format!(
                "role '{}': registry grants unexpected {extra:?}",
                expected.name
            ));
        }
        if !missing.is_empty() {
            issues.push(format!("role '{}': registry lacks {missing:?}", expected.name));
        }
    }

    for role in R::ALL {
        if !table.iter().any(|r| r.name == role.as_str()) {
            issues.push(format!("registry role '{role}' has no fixture entry"));
        }
    }

    tracing::info!(issues = issues.len(), "registry drift checked");
    issues
}

// ─────────────────────────────────────────────────────────────────────────────
// Engine properties
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed scenario checks for the decision engine's core guarantees.
pub fn validate_engine_properties() -> CheckReport {
    let registry = Registry::<Role>::global();
    let mut report = CheckReport::default();
    let mut check = |name: &str, passed: bool| {
        report.record(name.to_string(), passed, String::new());
    };
    let perm = |s: &'static str| Permission::from_static(s);

    let (Ok(x_y), Ok(content_view), Ok(admin_dashboard)) =
        (perm("x:y"), perm("content:view"), perm("admin:dashboard"))
    else {
        check("scenario permissions parse", false);
        return report;
    };

    check(
        "unknown role has lowest level and no permissions",
        registry.get_level_for_role("ghost") == RoleLevel::LOWEST
            && registry.get_permissions_for_role("ghost").is_empty(),
    );
    check(
        "empty requirement lists are vacuously satisfied",
        has_all_permissions(&[], &[]) && has_any_permission(&[], &[]),
    );
    check(
        "no criteria means no restriction",
        has_access(&AccessCheckCriteria::<Role>::new(), &[], &[]),
    );
    check(
        "role does not substitute for a required permission",
        !has_access(
            &AccessCheckCriteria::new().role(Role::Admin).permission(x_y),
            &[Role::Admin],
            &[],
        ),
    );
    check(
        "role requirement with no roles is denied",
        !has_access(&AccessCheckCriteria::new().role(Role::User), &[], &[]),
    );

    let criteria = AccessCheckCriteria::new().any_role([Role::Manager]).permission(content_view);
    let held = registry.permissions_for(Role::Manager);
    let first = has_access(&criteria, &[Role::Manager], held);
    check(
        "decisions are idempotent",
        (0..16).all(|_| has_access(&criteria, &[Role::Manager], held) == first),
    );

    let anonymous = Authorizer::anonymous(registry);
    check(
        "missing user context denies everything",
        !anonymous.has_access(&AccessCheckCriteria::new())
            && !anonymous.has_permission(&admin_dashboard)
            && !anonymous.has_role_level(RoleLevel::LOWEST),
    );

    tracing::info!(passed = report.passed, failed = report.failed, "engine properties validated");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        TestRole, expected_endpoint_access, generate_basic_test_roles, generate_test_roles,
        generate_test_users,
    };
    use rolegate_auth::BasicRole;

    #[test]
    fn fixture_matrix_passes() {
        let report = validate_permission_matrix(&generate_test_users());
        assert_eq!(report.failed, 0, "{:?}", report.failures().collect::<Vec<_>>());
        assert_eq!(report.total(), 24);
    }

    #[test]
    fn wrong_expectation_is_reported_not_panicked() {
        let mut users = generate_test_users();
        users[0].cases[0].should_have = false;
        users[1].cases.push(crate::fixtures::PermissionCase {
            permission: "not a permission",
            should_have: false,
        });
        let report = validate_permission_matrix(&users);
        assert_eq!(report.failed, 2);
    }

    #[test]
    fn fixture_hierarchy_is_consistent() {
        assert_eq!(validate_role_hierarchy(&generate_test_roles()), Vec::<String>::new());
    }

    #[test]
    fn hierarchy_collects_every_problem() {
        let mut table = generate_test_roles();
        // admin loses users:* and audit:*, auditor gains an unparseable entry
        let admin = table.iter_mut().find(|r| r.name == "admin").unwrap();
        admin.permissions.retain(|p| *p != "users:*" && *p != "audit:*");
        let auditor = table.iter_mut().find(|r| r.name == "auditor").unwrap();
        auditor.permissions.push("audit");
        table.push(TestRole {
            name: "intern",
            level: 1,
            permissions: vec![],
            inherits: Some("nobody"),
        });

        let issues = validate_role_hierarchy(&table);
        assert!(issues.iter().any(|i| i.contains("'admin' is missing permissions of 'manager'")));
        assert!(issues.iter().any(|i| i.contains("admin does not cover lower role 'auditor'")));
        assert!(issues.iter().any(|i| i.contains("auditor: invalid permission 'audit'")));
        assert!(issues.iter().any(|i| i.contains("inherits unknown role 'nobody'")));
        assert!(issues.len() >= 4);
    }

    #[test]
    fn global_wildcard_below_top_is_flagged() {
        let mut table = generate_test_roles();
        table.iter_mut().find(|r| r.name == "manager").unwrap().permissions.push("*:*");
        let issues = validate_role_hierarchy(&table);
        assert!(issues.iter().any(|i| i.contains("'manager' holds '*:*'")));
    }

    #[test]
    fn endpoint_expectations_hold() {
        let report = validate_endpoint_access(&expected_endpoint_access());
        assert_eq!(report.failed, 0, "{:?}", report.failures().collect::<Vec<_>>());
    }

    #[test]
    fn endpoint_regression_is_caught() {
        let mut expectations = expected_endpoint_access();
        expectations[0].expected = false;
        expectations[1].role = "janitor";
        let report = validate_endpoint_access(&expectations);
        assert_eq!(report.failed, 2);
    }

    #[test]
    fn registry_matches_fixture_table() {
        assert_eq!(validate_registry_drift::<Role>(&generate_test_roles()), Vec::<String>::new());
    }

    #[test]
    fn drift_is_reported() {
        let mut table = generate_test_roles();
        table.retain(|r| r.name != "auditor");
        table.iter_mut().find(|r| r.name == "user").unwrap().level = 2;
        table.iter_mut().find(|r| r.name == "manager").unwrap().permissions.pop();

        let issues = validate_registry_drift::<Role>(&table);
        assert!(issues.iter().any(|i| i.contains("'user': registry level 1, fixture level 2")));
        assert!(issues.iter().any(|i| i.contains("'manager': registry grants unexpected")));
        assert!(issues.iter().any(|i| i.contains("registry role 'auditor' has no fixture entry")));
    }

    #[test]
    fn community_table_is_consistent_and_matches_its_registry() {
        let table = generate_basic_test_roles();
        assert_eq!(validate_role_hierarchy(&table), Vec::<String>::new());
        assert_eq!(validate_registry_drift::<BasicRole>(&table), Vec::<String>::new());
    }

    #[test]
    fn weakened_community_admin_is_caught() {
        let mut table = generate_basic_test_roles();
        let admin = table.iter_mut().find(|r| r.name == "admin").unwrap();
        admin.permissions = vec!["post:read", "system:*"];

        let hierarchy = validate_role_hierarchy(&table);
        let has = |needle: &str| hierarchy.iter().any(|i| i.contains(needle));
        assert!(has("'admin' is missing permissions of 'moderator'"));
        assert!(has("admin does not cover lower role 'user'"));

        let drift = validate_registry_drift::<BasicRole>(&table);
        assert!(drift.iter().any(|i| i.contains("'admin': registry grants unexpected")));
    }

    #[test]
    fn vocabularies_are_not_interchangeable() {
        let issues = validate_registry_drift::<BasicRole>(&generate_test_roles());
        let has = |needle: &str| issues.iter().any(|i| i.contains(needle));
        assert!(has("fixture role 'manager' is not in the registry"));
        assert!(has("registry role 'moderator' has no fixture entry"));
    }

    #[test]
    fn engine_properties_hold() {
        let report = validate_engine_properties();
        assert_eq!(report.failed, 0, "{:?}", report.failures().collect::<Vec<_>>());
        assert_eq!(report.total(), 7);
    }
}
