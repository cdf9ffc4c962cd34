pub mod handle;

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Review status of a registration or a post.
///
/// A record only leaves [`Status::Pending`] once.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Status {
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, Status::Pending)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Status::Pending => "pending",
            Status::Approved => "approved",
            Status::Rejected => "rejected",
        })
    }
}

/// The decision a reviewer takes on a pending record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Approve,
    Reject,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Approve, Action::Reject];

    /// The status a pending record ends up in after this action.
    #[inline]
    pub fn outcome(self) -> Status {
        match self {
            Action::Approve => Status::Approved,
            Action::Reject => Status::Rejected,
        }
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Approve => "approve",
            Action::Reject => "reject",
        }
    }
}

impl Display for Action {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a campus account.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Student,
    Faculty,
    Staff,
}

/// Registration fields submitted by a prospective user.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub student_id: String,
    pub email: lettre::Address,
    #[serde(rename = "type")]
    pub kind: UserType,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub dorm: Option<String>,
    #[serde(default)]
    #[validate(length(max = 16))]
    pub room: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub program: Option<String>,
    #[validate(length(min = 3, max = 32))]
    pub username: String,
}

/// A pending, approved or rejected registration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    pub id: String,
    /// Snapshot of the registration fields at submission time.
    pub user: Registration,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub verified_at: Option<DateTime<Utc>>,
    /// Free-text identity of the reviewer.
    #[serde(default)]
    pub verified_by: Option<String>,
}
