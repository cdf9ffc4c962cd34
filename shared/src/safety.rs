use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A contact or place students can turn to.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SafetyResource {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    #[serde(rename = "available24x7")]
    pub available_24x7: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSafetyResource {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(min = 3, max = 32))]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(default)]
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default, rename = "available24x7")]
    pub available_24x7: bool,
}

/// A time-boxed safety notice.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAlert {
    pub id: u64,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub category: String,
    pub location: Option<String>,
    pub active_from: DateTime<Utc>,
    /// `None` means the alert stays up until deactivated.
    pub active_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl SafetyAlert {
    /// Whether this alert should be shown at `now`.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.active_from <= now
            && self.active_until.map_or(true, |until| now < until)
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_alert_window"))]
pub struct NewSafetyAlert {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    pub severity: Severity,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: Option<String>,
    /// Defaults to the creation time.
    #[serde(default)]
    pub active_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active_until: Option<DateTime<Utc>>,
}

fn check_alert_window(alert: &NewSafetyAlert) -> Result<(), ValidationError> {
    match (alert.active_from, alert.active_until) {
        (Some(from), Some(until)) if until <= from => {
            let mut err = ValidationError::new("active_until");
            err.message = Some(Cow::Borrowed("alert window is empty"));
            Err(err)
        }
        _ => Ok(()),
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AlertQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Only alerts inside their active window.
    #[serde(default)]
    pub active: Option<bool>,
}
