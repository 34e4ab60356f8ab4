//! `rolegate-harness` — executable checks for the RBAC engine.
//!
//! Fixtures are plain data; validators are pure functions that collect every
//! problem instead of stopping at the first. Not a runtime dependency of the
//! UI-facing crates.

pub mod config;
pub mod fixtures;
pub mod perf;
pub mod suite;
pub mod validate;

pub use config::HarnessConfig;
pub use fixtures::{
    EndpointExpectation, PermissionCase, RoleTable, TestRole, TestUser, expected_endpoint_access,
    generate_basic_test_roles, generate_test_roles, generate_test_users,
};
pub use perf::{PerfTiming, run_performance_timings};
pub use suite::{SuiteSummary, run_full_test_suite};
pub use validate::{
    CheckReport, CheckResult, validate_endpoint_access, validate_engine_properties,
    validate_permission_matrix, validate_registry_drift, validate_role_hierarchy,
};
