use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog user. Accounts are owned by the identity collaborator upstream;
/// this service only reads them to resolve owners, readers and permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Write access to a book: its owner, or staff.
    pub fn can_modify(&self, owner_id: Option<i32>) -> bool {
        self.is_staff || owner_id == Some(self.id)
    }
}
