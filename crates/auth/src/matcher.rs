//! Permission matching over a held permission set.
//!
//! Exact tokens match themselves, `resource:*` matches any action on that
//! resource and `*:*` matches everything. There is no other prefix matching.

use crate::Permission;

/// Whether any held permission covers `required`.
pub fn matches(held: &[Permission], required: &Permission) -> bool {
    held.iter().any(|p| p.covers(required))
}

/// Whether every permission in `required` is covered. Empty `required` is vacuously true.
pub fn matches_all(held: &[Permission], required: &[Permission]) -> bool {
    required.iter().all(|r| matches(held, r))
}

/// Whether at least one permission in `required` is covered. Empty `required` is vacuously true.
pub fn matches_any(held: &[Permission], required: &[Permission]) -> bool {
    required.is_empty() || required.iter().any(|r| matches(held, r))
}
