//! User records.

use serde::{Deserialize, Serialize};

use crate::define_text_enum;

define_text_enum! {
    /// Application role of a user.
    UserRole {
        /// Regular account.
        Member => "member",
        /// Privileged account with access to the admin area.
        Admin => "admin",
    }
}

impl UserRole {
    /// The role every seed admin receives.
    pub const PRIVILEGED: Self = Self::Admin;
}

/// A row of the `users` table as written by the seeder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Application role.
    pub role: UserRole,
    /// Email address, unique within a batch.
    pub email: String,
    /// Already-hashed password.
    pub password: String,
    /// Display name.
    pub name: String,
}

impl UserRecord {
    /// Returns true if the user has the privileged role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::PRIVILEGED
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_text() {
        assert_eq!(UserRole::Member.as_str(), "member");
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_is_admin() {
        let mut user = UserRecord {
            role: UserRole::Member,
            email: "user@example.com".to_owned(),
            password: "hash".to_owned(),
            name: "User".to_owned(),
        };
        assert!(!user.is_admin());

        user.role = UserRole::Admin;
        assert!(user.is_admin());
    }
}
