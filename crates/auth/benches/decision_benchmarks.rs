use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use rolegate_auth::{
    AccessCheckCriteria, EndpointResolver, Permission, Registry, Role, RoleLevel, RoleVocabulary,
    has_access, has_permission, has_role_level,
};

fn perm(s: &str) -> Permission {
    s.parse().expect("valid permission literal")
}

/// Held set of `n` exact permissions with the interesting one last.
fn held_permissions(n: usize) -> Vec<Permission> {
    let mut held: Vec<Permission> = (0..n).map(|i| perm(&format!("resource{i}:view"))).collect();
    held.push(perm("content:*"));
    held
}

fn bench_has_permission(c: &mut Criterion) {
    let mut group = c.benchmark_group("has_permission");
    let required = perm("content:delete");
    for size in [4usize, 64, 1024] {
        let held = held_permissions(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &held, |b, held| {
            b.iter(|| has_permission(black_box(held), black_box(&required)))
        });
    }
    group.finish();
}

fn bench_has_access(c: &mut Criterion) {
    let registry = Registry::<Role>::global();
    let roles = [Role::Manager, Role::Auditor];
    let held = registry.effective_permissions(&roles);
    let criteria = AccessCheckCriteria::new()
        .any_role([Role::Manager, Role::Admin])
        .permissions([perm("users:view_list"), perm("reports:view")])
        .require_all();

    c.bench_function("has_access/manager_all_of_two", |b| {
        b.iter(|| has_access(black_box(&criteria), black_box(&roles), black_box(&held)))
    });

    c.bench_function("has_role_level/two_roles", |b| {
        b.iter(|| has_role_level(registry, black_box(&roles), black_box(RoleLevel(3))))
    });
}

fn bench_endpoint_resolution(c: &mut Criterion) {
    let resolver = EndpointResolver::<Role>::global();
    let all_roles = Role::ALL.to_vec();

    c.bench_function("can_access_endpoint/all_roles", |b| {
        b.iter(|| {
            resolver.can_access_endpoint(
                black_box("DELETE"),
                black_box("/admin/users/42"),
                &all_roles,
            )
        })
    });

    c.bench_function("get_endpoint_permissions/users_id", |b| {
        b.iter(|| resolver.get_endpoint_permissions(black_box("GET"), black_box("/users/42")))
    });
}

criterion_group!(
    benches,
    bench_has_permission,
    bench_has_access,
    bench_endpoint_resolution
);
criterion_main!(benches);
