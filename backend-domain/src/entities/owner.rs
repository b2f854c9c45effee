// Owner entity
// Contact data for the traveler who filed a lost report

use serde::{Deserialize, Serialize};

use crate::value_objects::{OwnerId, UserRef};

/// Created once per lost-report submission and never mutated by this
/// service; profile edits happen elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub id: OwnerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// 6-character alphanumeric booking reference.
    pub booking_reference: String,
    pub user_ref: Option<UserRef>,
    pub created_at: i64,
}
