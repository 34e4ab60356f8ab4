use rolegate_auth::{
    AccessCheckCriteria, Authorizer, EndpointResolver, Permission, RbacUser, Registry, Role,
    has_access,
};
use rolegate_harness::{
    HarnessConfig, generate_test_roles, generate_test_users, run_full_test_suite,
    validate_permission_matrix,
};

fn perm(s: &str) -> Permission {
    s.parse().unwrap()
}

fn fixture_user(name: &str) -> RbacUser<Role> {
    let users = generate_test_users();
    let user = users.iter().find(|u| u.name == name).unwrap();
    RbacUser::from_profile(&user.to_profile(), Registry::<Role>::global(), chrono::Utc::now())
}

#[test]
fn full_suite_reports_success_and_serializes() {
    let config = HarnessConfig {
        perf_iterations: 20,
        perf_budget_ms: None,
    };
    let summary = run_full_test_suite(&config);
    assert!(summary.is_success(), "{:#?}", summary.issues);
    assert_eq!(summary.passed, summary.total_tests);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["failed"], 0);
    assert_eq!(json["performance"].as_array().unwrap().len(), 11);
    assert_eq!(json["config"]["perf_iterations"], 20);
}

#[test]
fn admin_fixture_scenario() {
    let admin = fixture_user("Admin");
    let auth = Authorizer::for_user(Registry::global(), Some(&admin));
    assert!(auth.has_permission(&perm("admin:dashboard")));
    assert!(!auth.has_permission(&perm("system:shutdown")));
}

#[test]
fn suspended_fixture_scenario() {
    let suspended = fixture_user("Suspended");
    let auth = Authorizer::for_user(Registry::global(), Some(&suspended));
    assert!(!auth.has_permission(&perm("content:view")));
    let criteria = AccessCheckCriteria::new().role(Role::User);
    assert!(!has_access(&criteria, &suspended.roles, &suspended.permissions));
}

#[test]
fn manager_fixture_scenario() {
    let manager = fixture_user("Manager");
    let auth = Authorizer::for_user(Registry::global(), Some(&manager));
    assert!(auth.has_all_permissions(&[perm("content:view"), perm("content:create")]));
    assert!(!auth.has_permission(&perm("admin:dashboard")));
}

#[test]
fn endpoint_scenario() {
    let resolver = EndpointResolver::<Role>::global();
    assert!(resolver.can_access_endpoint("DELETE", "/admin/users/42", &[Role::Admin]));
    assert!(!resolver.can_access_endpoint("DELETE", "/public/info", &[Role::Admin]));
}

#[test]
fn matrix_is_stable_across_runs() {
    let first = validate_permission_matrix(&generate_test_users());
    let second = validate_permission_matrix(&generate_test_users());
    assert_eq!(first.results, second.results);
    assert_eq!(generate_test_roles(), generate_test_roles());
}
