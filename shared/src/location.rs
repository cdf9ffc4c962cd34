use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The last location a user chose to share.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SharedLocation {
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[validate(schema(function = "check_coordinates"))]
pub struct LocationUpdate {
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    pub latitude: f64,
    pub longitude: f64,
}

fn check_coordinates(update: &LocationUpdate) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&update.latitude) && (-180.0..=180.0).contains(&update.longitude)
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("coordinates");
        err.message = Some(Cow::Borrowed("coordinates out of range"));
        Err(err)
    }
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct StopSharing {
    #[validate(length(min = 1, max = 32))]
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LocationsRes {
    pub locations: Vec<SharedLocation>,
}
