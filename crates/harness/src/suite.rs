//! Full validation run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::HarnessConfig;
use rolegate_auth::{BasicRole, Role};

use crate::fixtures::{
    expected_endpoint_access, generate_basic_test_roles, generate_test_roles, generate_test_users,
};
use crate::perf::{PerfTiming, budget_issues, run_performance_timings};
use crate::validate::{
    CheckReport, validate_endpoint_access, validate_engine_properties, validate_permission_matrix,
    validate_registry_drift, validate_role_hierarchy,
};

/// Aggregate result of [`run_full_test_suite`].
///
/// Counts: one test per matrix case, per endpoint expectation and per engine
/// property; one hierarchy and one drift check per role vocabulary; one per
/// performance timing (failing only when over budget).
#[derive(Debug, Clone, Serialize)]
pub struct SuiteSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub issues: Vec<String>,
    pub permission_matrix: CheckReport,
    pub endpoint_access: CheckReport,
    pub engine_properties: CheckReport,
    pub performance: Vec<PerfTiming>,
    pub config: HarnessConfig,
    pub generated_at: DateTime<Utc>,
}

impl SuiteSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

#[derive(Default)]
struct Tally {
    passed: usize,
    failed: usize,
    issues: Vec<String>,
}

impl Tally {
    fn report(&mut self, section: &str, report: &CheckReport) {
        self.passed += report.passed;
        self.failed += report.failed;
        self.issues.extend(
            report
                .failures()
                .map(|r| format!("[{section}] {}: {}", r.name, r.detail)),
        );
    }

    fn issue_list(&mut self, section: &str, issues: Vec<String>) {
        if issues.is_empty() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.issues.extend(issues.into_iter().map(|i| format!("[{section}] {i}")));
        }
    }
}

/// Run every validator and performance timing and fold the results together.
pub fn run_full_test_suite(config: &HarnessConfig) -> SuiteSummary {
    tracing::info!(iterations = config.perf_iterations, "running rbac validation suite");

    let users = generate_test_users();
    let roles = generate_test_roles();
    let basic_roles = generate_basic_test_roles();

    let permission_matrix = validate_permission_matrix(&users);
    let endpoint_access = validate_endpoint_access(&expected_endpoint_access());
    let engine_properties = validate_engine_properties();
    let hierarchy = validate_role_hierarchy(&roles);
    let drift = validate_registry_drift::<Role>(&roles);
    let basic_hierarchy = validate_role_hierarchy(&basic_roles);
    let basic_drift = validate_registry_drift::<BasicRole>(&basic_roles);
    let performance = run_performance_timings(config.perf_iterations);

    let mut tally = Tally::default();
    tally.report("permission-matrix", &permission_matrix);
    tally.report("endpoint-access", &endpoint_access);
    tally.report("engine", &engine_properties);
    tally.issue_list("role-hierarchy", hierarchy);
    tally.issue_list("registry-drift", drift);
    tally.issue_list("community-role-hierarchy", basic_hierarchy);
    tally.issue_list("community-registry-drift", basic_drift);

    let over_budget = budget_issues(&performance, config.perf_budget_ms);
    tally.failed += over_budget.len();
    tally.passed += performance.len() - over_budget.len();
    tally.issues.extend(over_budget.into_iter().map(|i| format!("[performance] {i}")));

    let summary = SuiteSummary {
        total_tests: tally.passed + tally.failed,
        passed: tally.passed,
        failed: tally.failed,
        issues: tally.issues,
        permission_matrix,
        endpoint_access,
        engine_properties,
        performance,
        config: config.clone(),
        generated_at: Utc::now(),
    };

    if summary.is_success() {
        tracing::info!(total = summary.total_tests, "rbac validation suite passed");
    } else {
        tracing::warn!(
            total = summary.total_tests,
            failed = summary.failed,
            "rbac validation suite found problems"
        );
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_passes_with_default_fixtures() {
        let config = HarnessConfig {
            perf_iterations: 5,
            perf_budget_ms: None,
        };
        let summary = run_full_test_suite(&config);
        assert!(summary.is_success(), "{:#?}", summary.issues);
        // 24 matrix + 21 endpoint + 7 engine + 2 hierarchy + 2 drift + 11 timings
        assert_eq!(summary.total_tests, 67);
        assert_eq!(summary.passed, 67);
    }

    #[test]
    fn tight_budget_only_flags_performance() {
        let config = HarnessConfig {
            perf_iterations: 5,
            perf_budget_ms: Some(f64::MIN_POSITIVE),
        };
        let summary = run_full_test_suite(&config);
        assert!(summary.failed <= summary.performance.len());
        assert!(summary.issues.iter().all(|i| i.starts_with("[performance]")));
    }
}
