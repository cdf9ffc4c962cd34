use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StudyGroup {
    pub id: u64,
    pub name: String,
    pub subject: String,
    pub course: Option<String>,
    pub description: String,
    pub organizer: String,
    /// Usernames, the organizer first.
    pub members: Vec<String>,
    pub max_members: u32,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

fn default_max_members() -> u32 {
    10
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyGroup {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub course: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 32))]
    pub organizer: String,
    #[serde(default = "default_max_members")]
    #[validate(range(min = 2, max = 50))]
    pub max_members: u32,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub meeting_time: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StudyGroupQuery {
    #[serde(default)]
    pub subject: Option<String>,
}

/// Names a user joining a group or attending an event.
#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct MemberDescriptor {
    #[validate(length(min = 1, max = 32))]
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SocialEvent {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub organizer: String,
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSocialEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub starts_at: DateTime<Utc>,
    #[validate(length(min = 1, max = 32))]
    pub organizer: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
}

/// A connection request between two users, keyed by `"{from}:{to}"`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub from: String,
    pub to: String,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

impl Connection {
    /// The key of the connection requested by `from` to `to`.
    #[inline]
    pub fn key(from: &str, to: &str) -> String {
        format!("{from}:{to}")
    }

    /// Whether `user` is on either side.
    #[inline]
    pub fn involves(&self, user: &str) -> bool {
        self.from == user || self.to == user
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "check_distinct"))]
pub struct NewConnection {
    #[validate(length(min = 1, max = 32), custom = "check_handle")]
    pub from: String,
    #[validate(length(min = 1, max = 32), custom = "check_handle")]
    pub to: String,
}

/// `:` separates the two sides of a connection key.
fn check_handle(username: &str) -> Result<(), ValidationError> {
    if username.contains(':') {
        let mut err = ValidationError::new("username");
        err.message = Some(Cow::Borrowed("usernames cannot contain ':'"));
        return Err(err);
    }
    Ok(())
}

fn check_distinct(conn: &NewConnection) -> Result<(), ValidationError> {
    if conn.from == conn.to {
        let mut err = ValidationError::new("to");
        err.message = Some(Cow::Borrowed("cannot connect to oneself"));
        return Err(err);
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ConnectionQuery {
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub from: String,
    pub to: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct NewMessage {
    #[validate(length(min = 1, max = 32))]
    pub from: String,
    #[validate(length(min = 1, max = 32))]
    pub to: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Filters messages sent or received by `user`,
/// optionally narrowed to the conversation `with` another user.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MessageQuery {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub with: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SleepSchedule {
    Early,
    Regular,
    Late,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoommateProfile {
    pub username: String,
    pub name: String,
    pub program: String,
    pub year: u8,
    pub dorm_preference: String,
    pub sleep_schedule: SleepSchedule,
    /// From 1 (relaxed) to 5 (spotless).
    pub cleanliness: u8,
    pub interests: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoommateQuery {
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub dorm: Option<String>,
    #[serde(default)]
    pub sleep_schedule: Option<SleepSchedule>,
    #[serde(default)]
    pub year: Option<u8>,
}

impl RoommateQuery {
    pub fn matches(&self, profile: &RoommateProfile) -> bool {
        self.program
            .as_deref()
            .map_or(true, |p| profile.program.eq_ignore_ascii_case(p))
            && self
                .dorm
                .as_deref()
                .map_or(true, |d| profile.dorm_preference.eq_ignore_ascii_case(d))
            && self
                .sleep_schedule
                .map_or(true, |s| profile.sleep_schedule == s)
            && self.year.map_or(true, |y| profile.year == y)
    }
}
