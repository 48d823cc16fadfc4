//! Role - coarse permission vocabulary
//!
//! Exactly two roles exist. The role is attached to a user's directory
//! record and is never settable by the user themselves.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse permission label attached to every registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to catalog administration.
    Administrator,
    /// Default role assigned on registration.
    #[default]
    Customer,
}

impl Role {
    /// Stable string code, as stored in the directory table and sent on the wire.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Customer => "customer",
        }
    }

    /// Parse a directory/wire code. Unknown codes are rejected, not defaulted:
    /// a bad role value is a data-integrity defect the caller must surface.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "administrator" => Some(Role::Administrator),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
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
    fn test_role_codes_round_trip() {
        assert_eq!(Role::from_code("administrator"), Some(Role::Administrator));
        assert_eq!(Role::from_code("customer"), Some(Role::Customer));
        assert_eq!(Role::Administrator.code(), "administrator");
        assert_eq!(Role::Customer.code(), "customer");
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(Role::from_code("superuser"), None);
        assert_eq!(Role::from_code(""), None);
        assert_eq!(Role::from_code("Administrator"), None);
    }

    #[test]
    fn test_default_is_customer() {
        assert_eq!(Role::default(), Role::Customer);
        assert!(!Role::default().is_administrator());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Role::Administrator).unwrap();
        assert_eq!(json, "\"administrator\"");
        let role: Role = serde_json::from_str("\"customer\"").unwrap();
        assert_eq!(role, Role::Customer);
    }
}
