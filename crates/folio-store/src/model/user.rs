use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Directory entry for an account. User lifecycle (authentication, password
/// handling, role administration) is owned by the surrounding system; the
/// content services only resolve users by id or username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: uuid::Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub roles: BTreeSet<String>,
}

impl User {
    #[must_use]
    pub fn new(username: &str, full_name: &str, email: &str) -> Self {
        Self {
            id: uuid::Uuid::now_v7(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            roles: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: &str) -> Self {
        self.roles.insert(role.to_string());
        self
    }
}
