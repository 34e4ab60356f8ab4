//! Latency timings for the decision engine.
//!
//! Wall-clock sampling around tight loops; meant to catch accidental
//! quadratic behaviour as the tables grow, not to replace the criterion benches.
//! `has_permission` is also timed against synthetic held sets of increasing
//! size so growth shows up in the report.

use std::hint::black_box;
use std::time::Instant;

use serde::Serialize;

use rolegate_auth::{
    AccessCheckCriteria, EndpointResolver, Permission, Registry, Role, RoleLevel, has_access,
    has_all_permissions, has_any_permission, has_permission, has_role, has_role_level,
};

/// Average per-call latency of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfTiming {
    pub operation: &'static str,
    pub iterations: usize,
    pub total_ms: f64,
    pub avg_ms: f64,
}

fn time_operation(
    operation: &'static str,
    iterations: usize,
    mut f: impl FnMut() -> bool,
) -> PerfTiming {
    let iterations = iterations.max(1);
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(f());
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    let result = PerfTiming {
        operation,
        iterations,
        total_ms,
        avg_ms: total_ms / iterations as f64,
    };
    tracing::debug!(operation, avg_ms = result.avg_ms, "timing finished");
    result
}

/// Held-set sizes for the scaled `has_permission` timings.
const HELD_SCALES: [(usize, &str); 3] = [
    (16, "has_permission/held_16"),
    (256, "has_permission/held_256"),
    (1024, "has_permission/held_1024"),
];

fn perms(raw: &[&'static str]) -> Vec<Permission> {
    raw.iter().filter_map(|&p| Permission::from_static(p).ok()).collect()
}

/// `size` exact permissions that never match, followed by `content:*`.
fn scaled_held_set(size: usize) -> Vec<Permission> {
    (0..size)
        .map(|i| format!("resource{i}:view"))
        .chain(std::iter::once("content:*".to_string()))
        .filter_map(|raw| Permission::parse(raw).ok())
        .collect()
}

/// Time every engine operation over `iterations` calls, using manager-shaped data.
pub fn run_performance_timings(iterations: usize) -> Vec<PerfTiming> {
    let registry = Registry::<Role>::global();
    let resolver = EndpointResolver::new(registry);
    let roles = [Role::Manager, Role::Auditor];
    let held = registry.effective_permissions(&roles);
    let single = perms(&["users:view_details"]);
    let several = perms(&["content:view", "content:create", "reports:view"]);
    let absent = perms(&["admin:dashboard", "system:shutdown", "billing:view"]);
    let criteria = AccessCheckCriteria::new()
        .any_role([Role::Manager, Role::Admin])
        .permissions(several.clone())
        .require_all();

    let mut timings = vec![
        time_operation("has_permission", iterations, || {
            single.iter().all(|p| has_permission(black_box(&held), p))
        }),
        time_operation("has_all_permissions", iterations, || {
            has_all_permissions(black_box(&held), black_box(&several))
        }),
        time_operation("has_any_permission", iterations, || {
            has_any_permission(black_box(&held), black_box(&absent))
        }),
        time_operation("has_role", iterations, || {
            has_role(black_box(&roles), &[Role::Admin, Role::Manager])
        }),
        time_operation("has_role_level", iterations, || {
            has_role_level(registry, black_box(&roles), RoleLevel(3))
        }),
        time_operation("has_access", iterations, || {
            has_access(black_box(&criteria), black_box(&roles), black_box(&held))
        }),
        time_operation("can_access_endpoint", iterations, || {
            resolver.can_access_endpoint(black_box("GET"), black_box("/users/42"), &roles)
        }),
        time_operation("get_endpoint_permissions", iterations, || {
            !resolver
                .get_endpoint_permissions(black_box("DELETE"), black_box("/content/article/1"))
                .is_unreachable()
        }),
    ];

    let required = perms(&["content:delete"]);
    for (size, operation) in HELD_SCALES {
        let held = scaled_held_set(size);
        timings.push(time_operation(operation, iterations, || {
            required.iter().all(|p| has_permission(black_box(&held), p))
        }));
    }
    timings
}

/// Issues for every timing whose average exceeds `budget_ms`.
pub fn budget_issues(timings: &[PerfTiming], budget_ms: Option<f64>) -> Vec<String> {
    let Some(budget) = budget_ms else {
        return Vec::new();
    };
    timings
        .iter()
        .filter(|p| p.avg_ms > budget)
        .map(|p| {
            format!(
                "{} averaged {:.6} ms per call, above the {budget} ms budget",
                p.operation, p.avg_ms
            )
        })
        .collect()
}
