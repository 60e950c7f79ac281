//! Account domain types.

use serde::{Deserialize, Serialize};

/// Account permission level.
///
/// Wire format: `i16` (0 = Customer, 1 = Admin). Admins never sign up through
/// the storefront; they are provisioned out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Customer = 0,
    Admin = 1,
}

impl AccountRole {
    /// Convert from `i16` column value. Returns `None` for unknown values.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(Self::Customer),
            1 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `i16` column value.
    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn is_admin(self) -> bool {
        self == Self::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_i16_to_account_role() {
        assert_eq!(AccountRole::from_i16(0), Some(AccountRole::Customer));
        assert_eq!(AccountRole::from_i16(1), Some(AccountRole::Admin));
        assert_eq!(AccountRole::from_i16(2), None);
        assert_eq!(AccountRole::from_i16(-1), None);
    }

    #[test]
    fn should_convert_account_role_to_i16() {
        assert_eq!(AccountRole::Customer.as_i16(), 0);
        assert_eq!(AccountRole::Admin.as_i16(), 1);
    }

    #[test]
    fn should_round_trip_account_role_via_serde() {
        for role in [AccountRole::Customer, AccountRole::Admin] {
            let json = serde_json::to_string(&role).unwrap();
            let parsed: AccountRole = serde_json::from_str(&json).unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn should_serialize_role_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&AccountRole::Customer).unwrap(),
            "\"customer\""
        );
        assert_eq!(
            serde_json::to_string(&AccountRole::Admin).unwrap(),
            "\"admin\""
        );
    }
}
