// Capability checks gating the grid's write actions
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionAction {
    TenantSqlAdminRead,
    TenantSqlAdminWrite,
}

pub trait PermissionCheck: Send + Sync {
    fn can(&self, action: PermissionAction, resource: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Owner,
    Admin,
    Developer,
    ReadOnly,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "developer" => Ok(Role::Developer),
            "read_only" | "readonly" => Ok(Role::ReadOnly),
            other => Err(format!("Unknown role '{}'", other)),
        }
    }
}

/// Grants by role: everyone reads, only read-only users are denied writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePermissions {
    role: Role,
}

impl RolePermissions {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    /// Unrecognised roles get read-only access.
    pub fn from_role_name(name: &str) -> Self {
        let role = name.parse().unwrap_or_else(|e: String| {
            tracing::warn!(error = %e, "Falling back to read-only permissions");
            Role::ReadOnly
        });
        Self { role }
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl PermissionCheck for RolePermissions {
    fn can(&self, action: PermissionAction, resource: &str) -> bool {
        let allowed = match action {
            PermissionAction::TenantSqlAdminRead => true,
            PermissionAction::TenantSqlAdminWrite => self.role != Role::ReadOnly,
        };
        tracing::trace!(?action, resource, role = ?self.role, allowed, "Permission check");
        allowed
    }
}

/// Rows can be deleted only when the grid is configured editable and the user may write rows.
pub fn rows_editable(configured: bool, permissions: &dyn PermissionCheck) -> bool {
    configured && permissions.can(PermissionAction::TenantSqlAdminWrite, "rows")
}
