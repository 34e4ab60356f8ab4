//! Role → permission/level registry.
//!
//! Built once per vocabulary from the static role tables and read-only
//! afterwards. Unknown roles resolve to the most restrictive answer: no
//! permissions and the lowest level.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::endpoint::{EndpointDescriptor, HttpMethod, PathPattern};
use crate::{Permission, RoleLevel, RoleVocabulary};

/// Registry entry for one role.
#[derive(Debug, Clone)]
pub struct RoleEntry {
    pub level: RoleLevel,
    pub description: &'static str,
    pub permissions: Vec<Permission>,
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Permissions an endpoint declares as required.
#[derive(Debug, Clone)]
pub struct EndpointRequirement {
    pub pattern: PathPattern,
    pub methods: Vec<HttpMethod>,
    pub permissions: Vec<Permission>,
}

/// Read-only mapping of every role in `R` to its permissions, level and endpoints.
#[derive(Debug)]
pub struct Registry<R: RoleVocabulary> {
    entries: HashMap<R, RoleEntry>,
    endpoint_requirements: Vec<EndpointRequirement>,
}

impl<R: RoleVocabulary> Registry<R> {
    /// The process-wide registry for `R`.
    pub fn global() -> &'static Self {
        R::registry()
    }

    /// Build from the vocabulary's static tables.
    ///
    /// A malformed table entry is logged and dropped, which can only narrow
    /// access. The role table tests reject such entries before they ship.
    pub fn build() -> Self {
        let entries = R::ALL
            .iter()
            .map(|&role| {
                let entry = RoleEntry {
                    level: role.level(),
                    description: role.description(),
                    permissions: parse_table(role.as_str(), role.granted_permissions()),
                    endpoints: role
                        .endpoints()
                        .iter()
                        .map(EndpointDescriptor::from)
                        .collect(),
                };
                (role, entry)
            })
            .collect();

        let endpoint_requirements = R::ENDPOINT_PERMISSIONS
            .iter()
            .map(|spec| EndpointRequirement {
                pattern: PathPattern::parse(spec.pattern),
                methods: spec.methods.to_vec(),
                permissions: parse_table(spec.pattern, spec.permissions),
            })
            .collect();

        Self {
            entries,
            endpoint_requirements,
        }
    }

    pub fn entry(&self, role: R) -> Option<&RoleEntry> {
        self.entries.get(&role)
    }

    pub fn permissions_for(&self, role: R) -> &[Permission] {
        self.entry(role)
            .map(|e| e.permissions.as_slice())
            .unwrap_or(&[])
    }

    pub fn level_for(&self, role: R) -> RoleLevel {
        self.entry(role)
            .map(|e| e.level)
            .unwrap_or(RoleLevel::LOWEST)
    }

    pub fn endpoints_for(&self, role: R) -> &[EndpointDescriptor] {
        self.entry(role)
            .map(|e| e.endpoints.as_slice())
            .unwrap_or(&[])
    }

    /// Permissions for a role given by name. Unknown names get an empty set.
    pub fn get_permissions_for_role(&self, name: &str) -> &[Permission] {
        match name.parse::<R>() {
            Ok(role) => self.permissions_for(role),
            Err(_) => &[],
        }
    }

    /// Level for a role given by name. Unknown names get the lowest level.
    pub fn get_level_for_role(&self, name: &str) -> RoleLevel {
        match name.parse::<R>() {
            Ok(role) => self.level_for(role),
            Err(_) => RoleLevel::LOWEST,
        }
    }

    /// Highest level among `roles`, or `None` when there are no roles.
    pub fn max_level(&self, roles: &[R]) -> Option<RoleLevel> {
        roles.iter().map(|&r| self.level_for(r)).max()
    }

    /// Union of the permissions of `roles`, in first-seen order.
    pub fn effective_permissions(&self, roles: &[R]) -> Vec<Permission> {
        let mut out: Vec<Permission> = Vec::new();
        for &role in roles {
            for perm in self.permissions_for(role) {
                if !out.contains(perm) {
                    out.push(perm.clone());
                }
            }
        }
        out
    }

    pub fn endpoint_requirements(&self) -> &[EndpointRequirement] {
        &self.endpoint_requirements
    }

    /// Serializable view of every role and permission, for display/debugging.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut roles = Vec::with_capacity(R::ALL.len());
        let mut permissions: BTreeMap<String, PermissionDefinition> = BTreeMap::new();

        for &role in R::ALL {
            let perms = self.permissions_for(role);
            roles.push(RoleDefinition {
                name: role.as_str().to_string(),
                level: self.level_for(role),
                description: role.description().to_string(),
                icon: role.icon().to_string(),
                permissions: perms.iter().map(|p| p.as_str().to_string()).collect(),
            });

            for perm in perms {
                permissions
                    .entry(perm.as_str().to_string())
                    .or_insert_with(|| PermissionDefinition {
                        name: perm.as_str().to_string(),
                        description: permission_description(perm),
                        category: permission_category(perm),
                    });
            }
        }

        RegistrySnapshot {
            roles,
            permissions: permissions.into_values().collect(),
        }
    }
}

fn parse_table(owner: &str, table: &'static [&'static str]) -> Vec<Permission> {
    table
        .iter()
        .filter_map(|&raw| match Permission::from_static(raw) {
            Ok(p) => Some(p),
            Err(err) => {
                tracing::error!(
                    owner,
                    permission = raw,
                    error = %err,
                    "dropping malformed permission from role table"
                );
                None
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Snapshot (audit/display)
// ─────────────────────────────────────────────────────────────────────────────

/// Role definition with its granted permissions.
#[derive(Debug, Clone, Serialize)]
pub struct RoleDefinition {
    pub name: String,
    pub level: RoleLevel,
    pub description: String,
    pub icon: String,
    pub permissions: Vec<String>,
}

/// Permission definition.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionDefinition {
    pub name: String,
    pub description: String,
    pub category: String,
}

/// Complete view of one vocabulary's registry.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub roles: Vec<RoleDefinition>,
    pub permissions: Vec<PermissionDefinition>,
}

fn permission_description(perm: &Permission) -> String {
    if perm.is_global() {
        return "Wildcard permission - grants all permissions".to_string();
    }
    if perm.is_wildcard() {
        return format!("All actions on {} resources", perm.resource());
    }

    let action_desc = match perm.action() {
        "view" | "read" => "View",
        "view_list" => "List",
        "view_details" => "View details of",
        "create" => "Create new",
        "update" => "Update",
        "delete" => "Delete",
        "export" => "Export",
        "manage" => "Manage",
        other => other,
    };
    format!("{} {} resources", action_desc, perm.resource())
}

fn permission_category(perm: &Permission) -> String {
    if perm.is_global() {
        "system".to_string()
    } else {
        perm.resource().to_string()
    }
}
