use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::verification::UserType;

/// A user whose registration was approved.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub email: lettre::Address,
    #[serde(rename = "type")]
    pub kind: UserType,
    pub dorm: Option<String>,
    pub room: Option<String>,
    pub program: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}
