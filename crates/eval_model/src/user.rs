//! User records

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A user of the evaluation system.
///
/// Only the fields the export pipeline needs are modeled here; account
/// credentials and validator assignments live with the upstream identity
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User identity
    pub id: UserId,
    /// First name
    pub firstname: String,
    /// Last name
    pub lastname: String,
    /// Contact address
    pub email: String,
}

impl User {
    /// Create a new user with a fresh identity
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::new(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            email: email.into(),
        }
    }

    /// Name as printed on the exported document: first and last name,
    /// space-joined.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let user = User::new("Ada", "Lovelace", "ada@example.org");
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
}
