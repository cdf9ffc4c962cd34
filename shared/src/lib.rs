//! Wire types shared by the campus portal backend and its client.

pub mod campus;
pub mod discussion;
pub mod location;
pub mod post;
pub mod safety;
pub mod social;
pub mod user;
pub mod verification;

use serde::{Deserialize, Serialize};

/// Query filtering a collection by category, matched case-insensitively.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CategoryQuery {
    #[serde(default)]
    pub category: Option<String>,
}

impl CategoryQuery {
    /// Whether `category` passes this query.
    pub fn matches(&self, category: &str) -> bool {
        self.category
            .as_deref()
            .map_or(true, |c| c.eq_ignore_ascii_case(category))
    }
}

/// Response of the health check.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthRes {
    pub status: String,
    /// Process uptime, as seconds.
    pub uptime: f64,
    pub environment: String,
}
