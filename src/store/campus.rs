use campus_portal_shared::{
    campus::{Building, CampusEvent, CampusEventQuery, NewCampusEvent, Tool},
    CategoryQuery,
};
use chrono::{DateTime, Utc};

use super::Store;

impl Store {
    pub fn create_event(&self, new: NewCampusEvent, now: DateTime<Utc>) -> CampusEvent {
        self.events.create(|id| CampusEvent {
            id,
            title: new.title,
            description: new.description,
            location: new.location,
            category: new.category,
            starts_at: new.starts_at,
            ends_at: new.ends_at,
            created_at: now,
            is_active: true,
        })
    }

    /// Active campus events matching `query`, soonest first.
    pub fn campus_events(&self, query: &CampusEventQuery, now: DateTime<Utc>) -> Vec<CampusEvent> {
        let mut events = self.events.filter(|e| {
            e.is_active
                && query
                    .category
                    .as_deref()
                    .map_or(true, |c| e.category.eq_ignore_ascii_case(c))
                && (query.upcoming != Some(true) || e.starts_at > now)
        });
        events.sort_by_key(|e| e.starts_at);
        events
    }

    #[inline]
    pub fn buildings(&self) -> Vec<Building> {
        self.buildings.list()
    }

    pub fn tools(&self, query: &CategoryQuery) -> Vec<Tool> {
        self.tools.filter(|t| query.matches(&t.category))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn upcoming_events() {
        let store = Store::new();
        let now = Utc::now();
        let event = |starts_at| NewCampusEvent {
            title: "Open day".to_owned(),
            description: String::new(),
            location: "Main hall".to_owned(),
            category: "academic".to_owned(),
            starts_at,
            ends_at: None,
        };

        store.create_event(event(now + Duration::days(2)), now);
        store.create_event(event(now - Duration::days(1)), now);
        store.create_event(event(now + Duration::days(1)), now);

        let all = store.campus_events(&CampusEventQuery::default(), now);
        assert_eq!(all.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        let upcoming = store.campus_events(
            &CampusEventQuery {
                upcoming: Some(true),
                ..Default::default()
            },
            now,
        );
        assert_eq!(upcoming.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 1]);
    }
}
