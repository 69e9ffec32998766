use serde::{Deserialize, Serialize};
use std::fmt;

/// Storefront role carried in access-token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum Role {
    #[default]
    Customer = 0,
    Admin = 1,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Admin => "admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::Customer),
            1 => Some(Role::Admin),
            _ => None,
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "customer" => Some(Role::Customer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_id() {
        assert_eq!(Role::from_id(0), Some(Role::Customer));
        assert_eq!(Role::from_id(1), Some(Role::Admin));
        assert_eq!(Role::from_id(7), None);
    }

    #[test]
    fn test_role_from_code() {
        assert_eq!(Role::from_code("customer"), Some(Role::Customer));
        assert_eq!(Role::from_code("admin"), Some(Role::Admin));
        assert_eq!(Role::from_code("root"), None);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Customer.to_string(), "customer");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_role_checks() {
        assert!(!Role::Customer.is_admin());
        assert!(Role::Admin.is_admin());
    }
}
