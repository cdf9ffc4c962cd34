//! Opt-in live location sharing.

use campus_portal_shared::location::SharedLocation;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::broadcast;

/// Locations users currently share, broadcast to subscribers on change.
pub struct LocationHub {
    shared: DashMap<String, SharedLocation>,
    updates: broadcast::Sender<Vec<SharedLocation>>,
}

impl LocationHub {
    /// Creates a hub whose subscribers may lag `capacity` snapshots behind
    /// before missing some.
    pub fn new(capacity: usize) -> Self {
        let (updates, _) = broadcast::channel(capacity.max(1));
        Self {
            shared: DashMap::new(),
            updates,
        }
    }

    /// Records and broadcasts a user's location.
    pub fn update(&self, username: String, latitude: f64, longitude: f64) -> SharedLocation {
        let location = SharedLocation {
            username: username.clone(),
            latitude,
            longitude,
            updated_at: Utc::now(),
        };
        self.shared.insert(username, location.clone());
        self.publish();
        location
    }

    /// Stops sharing a user's location. Returns whether it was shared.
    pub fn stop(&self, username: &str) -> bool {
        let removed = self.shared.remove(username).is_some();
        if removed {
            tracing::debug!("{username} stopped sharing location");
            self.publish();
        }
        removed
    }

    /// Shared locations, by username.
    pub fn snapshot(&self) -> Vec<SharedLocation> {
        let mut locations: Vec<_> = self.shared.iter().map(|l| l.value().clone()).collect();
        locations.sort_by(|a, b| a.username.cmp(&b.username));
        locations
    }

    #[inline]
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<SharedLocation>> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        // no subscribers is fine
        let _ = self.updates.send(self.snapshot());
    }
}
