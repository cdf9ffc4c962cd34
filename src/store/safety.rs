use campus_portal_shared::{
    safety::{AlertQuery, NewSafetyAlert, NewSafetyResource, SafetyAlert, SafetyResource},
    CategoryQuery,
};
use chrono::{DateTime, Utc};

use super::Store;

impl Store {
    pub fn create_resource(&self, new: NewSafetyResource, now: DateTime<Utc>) -> SafetyResource {
        self.safety_resources.create(|id| SafetyResource {
            id,
            name: new.name,
            category: new.category,
            description: new.description,
            phone: new.phone,
            location: new.location,
            website: new.website,
            available_24x7: new.available_24x7,
            is_active: true,
            created_at: now,
        })
    }

    /// Active resources in the queried category.
    pub fn resources(&self, query: &CategoryQuery) -> Vec<SafetyResource> {
        self.safety_resources
            .filter(|r| r.is_active && query.matches(&r.category))
    }

    pub fn create_alert(&self, new: NewSafetyAlert, now: DateTime<Utc>) -> SafetyAlert {
        let alert = self.safety_alerts.create(|id| SafetyAlert {
            id,
            title: new.title,
            message: new.message,
            severity: new.severity,
            category: new.category,
            location: new.location,
            active_from: new.active_from.unwrap_or(now),
            active_until: new.active_until,
            is_active: true,
            created_at: now,
        });
        tracing::info!("{:?} safety alert {} raised", alert.severity, alert.id);
        alert
    }

    /// Alerts matching `query`, most severe first, then newest first.
    pub fn alerts(&self, query: &AlertQuery, now: DateTime<Utc>) -> Vec<SafetyAlert> {
        let mut alerts = self.safety_alerts.filter(|a| {
            query
                .category
                .as_deref()
                .map_or(true, |c| a.category.eq_ignore_ascii_case(c))
                && query.severity.map_or(true, |s| a.severity == s)
                && (query.active != Some(true) || a.is_active_at(now))
        });
        alerts.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        alerts
    }
}

#[cfg(test)]
mod tests {
    use campus_portal_shared::safety::Severity;
    use chrono::Duration;

    use super::*;

    fn alert(severity: Severity, active_until: Option<DateTime<Utc>>) -> NewSafetyAlert {
        NewSafetyAlert {
            title: "Ice on the main stairs".to_owned(),
            message: "Use the east entrance.".to_owned(),
            severity,
            category: "weather".to_owned(),
            location: None,
            active_from: None,
            active_until,
        }
    }

    #[test]
    fn alert_filters() {
        let store = Store::new();
        let now = Utc::now();

        store.create_alert(alert(Severity::Low, None), now);
        store.create_alert(alert(Severity::Critical, None), now);
        store.create_alert(
            alert(Severity::High, Some(now + Duration::minutes(5))),
            now - Duration::hours(1),
        );

        let all = store.alerts(&AlertQuery::default(), now);
        assert_eq!(
            all.iter().map(|a| a.severity).collect::<Vec<_>>(),
            vec![Severity::Critical, Severity::High, Severity::Low]
        );

        let active = store.alerts(
            &AlertQuery {
                active: Some(true),
                ..Default::default()
            },
            now + Duration::minutes(10),
        );
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|a| a.severity != Severity::High));

        let critical = store.alerts(
            &AlertQuery {
                severity: Some(Severity::Critical),
                ..Default::default()
            },
            now,
        );
        assert_eq!(critical.len(), 1);
    }

    #[test]
    fn resources_by_category() {
        let store = Store::new();
        let resource = |category: &str| NewSafetyResource {
            name: "Campus Police".to_owned(),
            category: category.to_owned(),
            description: "Round the clock patrols.".to_owned(),
            phone: Some("555-0100".to_owned()),
            location: None,
            website: None,
            available_24x7: true,
        };
        store.create_resource(resource("emergency"), Utc::now());
        store.create_resource(resource("health"), Utc::now());

        let query = CategoryQuery {
            category: Some("Emergency".to_owned()),
        };
        let found = store.resources(&query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].category, "emergency");
        assert_eq!(store.resources(&CategoryQuery::default()).len(), 2);
    }
}
