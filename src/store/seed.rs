//! Sample content the portal starts with.

use campus_portal_shared::{
    campus::{Building, Tool},
    safety::NewSafetyResource,
    social::{RoommateProfile, SleepSchedule},
};
use chrono::{DateTime, Utc};

use super::Store;

pub(super) fn populate(store: &mut Store, now: DateTime<Utc>) {
    for resource in resources() {
        store.create_resource(resource, now);
    }
    for (name, code, description, latitude, longitude, facilities) in BUILDINGS {
        store.buildings.create(|id| Building {
            id,
            name: name.to_owned(),
            code: code.to_owned(),
            description: description.to_owned(),
            latitude,
            longitude,
            facilities: facilities.iter().map(|f| f.to_string()).collect(),
        });
    }
    for (name, description, url, category) in TOOLS {
        store.tools.create(|id| Tool {
            id,
            name: name.to_owned(),
            description: description.to_owned(),
            url: url.to_owned(),
            category: category.to_owned(),
        });
    }
    store.roommates = roommates();
    tracing::debug!(
        "seeded {} resources, {} buildings, {} tools, {} roommate profiles",
        store.safety_resources.len(),
        store.buildings.len(),
        store.tools.len(),
        store.roommates.len()
    );
}

fn resources() -> Vec<NewSafetyResource> {
    let resource = |name: &str, category: &str, description: &str, phone: &str, always: bool| {
        NewSafetyResource {
            name: name.to_owned(),
            category: category.to_owned(),
            description: description.to_owned(),
            phone: Some(phone.to_owned()),
            location: None,
            website: None,
            available_24x7: always,
        }
    };

    vec![
        resource(
            "Campus Security",
            "emergency",
            "Patrols, escorts and emergency response on campus.",
            "555-0100",
            true,
        ),
        resource(
            "Student Health Center",
            "health",
            "Walk-in clinic for students and staff.",
            "555-0110",
            false,
        ),
        resource(
            "Counseling Services",
            "mental-health",
            "Confidential counseling and a crisis line.",
            "555-0120",
            true,
        ),
        NewSafetyResource {
            location: Some("Student Union, room 104".to_owned()),
            website: Some("https://campus.edu/safewalk".to_owned()),
            ..resource(
                "SafeWalk",
                "escort",
                "Volunteers walk you home after dark.",
                "555-0130",
                false,
            )
        },
    ]
}

type BuildingRow = (&'static str, &'static str, &'static str, f64, f64, &'static [&'static str]);

const BUILDINGS: [BuildingRow; 4] = [
    (
        "Main Library",
        "LIB",
        "Books, study rooms and the late night reading hall.",
        40.7291,
        -73.9965,
        &["study rooms", "printing", "cafe"],
    ),
    (
        "Science Center",
        "SCI",
        "Labs and lecture halls for the natural sciences.",
        40.7302,
        -73.9951,
        &["labs", "lecture halls"],
    ),
    (
        "Student Union",
        "SU",
        "Dining, clubs and student services.",
        40.7287,
        -73.9972,
        &["dining", "club rooms", "bookstore"],
    ),
    (
        "Recreation Center",
        "REC",
        "Gym, pool and climbing wall.",
        40.7279,
        -73.9940,
        &["gym", "pool", "lockers"],
    ),
];

const TOOLS: [(&str, &str, &str, &str); 4] = [
    (
        "Course Catalog",
        "Browse courses and prerequisites.",
        "https://campus.edu/catalog",
        "academic",
    ),
    (
        "Learning Portal",
        "Assignments, grades and course material.",
        "https://learn.campus.edu",
        "academic",
    ),
    (
        "Campus Map",
        "Interactive map of buildings and parking.",
        "https://campus.edu/map",
        "navigation",
    ),
    (
        "Dining Menus",
        "This week's menus in every dining hall.",
        "https://campus.edu/dining",
        "dining",
    ),
];

fn roommates() -> Vec<RoommateProfile> {
    let profile = |username: &str,
                   name: &str,
                   program: &str,
                   year: u8,
                   dorm: &str,
                   sleep_schedule: SleepSchedule,
                   cleanliness: u8,
                   interests: &[&str]| RoommateProfile {
        username: username.to_owned(),
        name: name.to_owned(),
        program: program.to_owned(),
        year,
        dorm_preference: dorm.to_owned(),
        sleep_schedule,
        cleanliness,
        interests: interests.iter().map(|i| i.to_string()).collect(),
    };

    vec![
        profile(
            "mchen",
            "Mei Chen",
            "Computer Science",
            2,
            "North Hall",
            SleepSchedule::Late,
            4,
            &["gaming", "music"],
        ),
        profile(
            "jokafor",
            "Jide Okafor",
            "Biology",
            1,
            "East Hall",
            SleepSchedule::Early,
            5,
            &["running", "cooking"],
        ),
        profile(
            "sgarcia",
            "Sofia Garcia",
            "Computer Science",
            3,
            "North Hall",
            SleepSchedule::Regular,
            3,
            &["photography", "hiking"],
        ),
        profile(
            "tnguyen",
            "Tam Nguyen",
            "Economics",
            2,
            "West Hall",
            SleepSchedule::Late,
            2,
            &["film", "chess"],
        ),
    ]
}
