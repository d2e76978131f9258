use serde::{Deserialize, Serialize};

/// The role assigned to a user account.
///
/// The derived ordering (`User < Admin < SuperAdmin`) exists for display and
/// comparison purposes only. Authorization decisions are always a membership
/// test against an explicit [`RequiredRoles`](crate::authz::RequiredRoles)
/// set - a higher role never implicitly satisfies a check declared for a
/// lower one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
