use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CampusEvent {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewCampusEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CampusEventQuery {
    #[serde(default)]
    pub category: Option<String>,
    /// Only events that have not started yet.
    #[serde(default)]
    pub upcoming: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: u64,
    pub name: String,
    /// Short code printed on campus maps.
    pub code: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub facilities: Vec<String>,
}

/// A link to an online service students use.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
}
