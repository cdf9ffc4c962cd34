//! In-memory collections backing the portal's content endpoints.
//!
//! Nothing is persisted; a [`Store`] lives as long as the server that owns it.

mod campus;
mod discussion;
mod safety;
mod seed;
mod social;

use std::{
    collections::{btree_map, BTreeMap},
    fmt::Display,
    sync::atomic::{AtomicU64, Ordering},
};

use campus_portal_shared::{
    campus::{Building, CampusEvent, Tool},
    discussion::{Comment, Discussion},
    safety::{SafetyAlert, SafetyResource},
    social::{Connection, Message, RoommateProfile, SocialEvent, StudyGroup},
    user::User,
    verification::Registration,
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::Error;

/// An item stored in a [`Collection`].
pub trait Record: Clone + Send + Sync + 'static {
    type Key: Ord + Clone + Display + Send + Sync + 'static;

    /// Name used in errors.
    const KIND: &'static str;

    fn key(&self) -> Self::Key;
}

/// Records ordered by key, with a counter handing out integer ids.
pub struct Collection<T: Record> {
    items: RwLock<BTreeMap<T::Key, T>>,
    last_id: AtomicU64,
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(BTreeMap::new()),
            last_id: AtomicU64::new(0),
        }
    }

    /// Builds a record around the next integer id and stores it.
    pub fn create(&self, build: impl FnOnce(u64) -> T) -> T {
        let item = build(self.last_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.items.write().insert(item.key(), item.clone());
        item
    }

    /// Stores a record under its own key.
    ///
    /// # Errors
    ///
    /// - Errors if the key is taken.
    pub fn insert(&self, item: T) -> Result<T, Error> {
        match self.items.write().entry(item.key()) {
            btree_map::Entry::Occupied(entry) => Err(Error::Conflict {
                kind: T::KIND,
                id: entry.key().to_string(),
            }),
            btree_map::Entry::Vacant(entry) => Ok(entry.insert(item).clone()),
        }
    }

    pub fn get(&self, key: &T::Key) -> Option<T> {
        self.items.read().get(key).cloned()
    }

    /// Like [`Self::get`], failing with [`Error::NotFound`].
    pub fn require(&self, key: &T::Key) -> Result<T, Error> {
        self.get(key).ok_or_else(|| Error::not_found(T::KIND, key))
    }

    pub fn list(&self) -> Vec<T> {
        self.items.read().values().cloned().collect()
    }

    pub fn filter(&self, f: impl Fn(&T) -> bool) -> Vec<T> {
        self.items
            .read()
            .values()
            .filter(|item| f(item))
            .cloned()
            .collect()
    }

    /// Mutates a record in place and returns what `f` returns.
    pub fn update<R>(
        &self,
        key: &T::Key,
        f: impl FnOnce(&mut T) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let mut items = self.items.write();
        let item = items
            .get_mut(key)
            .ok_or_else(|| Error::not_found(T::KIND, key))?;
        f(item)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl<T: Record> Default for Collection<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Implements [`Record`] for types keyed by their integer `id`.
macro_rules! impl_record {
    ($($t:ty => $kind:literal),* $(,)?) => {
        $(
            impl Record for $t {
                type Key = u64;
                const KIND: &'static str = $kind;

                #[inline]
                fn key(&self) -> u64 {
                    self.id
                }
            }
        )*
    };
}

impl_record! {
    User => "user",
    CampusEvent => "event",
    Building => "building",
    Tool => "tool",
    Discussion => "discussion",
    Comment => "comment",
    SafetyResource => "safety resource",
    SafetyAlert => "safety alert",
    StudyGroup => "study group",
    SocialEvent => "social event",
    Message => "message",
}

impl Record for Connection {
    type Key = String;
    const KIND: &'static str = "connection";

    #[inline]
    fn key(&self) -> String {
        self.id.clone()
    }
}

/// Every collection of the portal.
#[derive(Default)]
pub struct Store {
    pub users: Collection<User>,
    pub events: Collection<CampusEvent>,
    pub buildings: Collection<Building>,
    pub tools: Collection<Tool>,
    pub discussions: Collection<Discussion>,
    pub comments: Collection<Comment>,
    pub safety_resources: Collection<SafetyResource>,
    pub safety_alerts: Collection<SafetyAlert>,
    pub study_groups: Collection<StudyGroup>,
    pub social_events: Collection<SocialEvent>,
    pub connections: Collection<Connection>,
    pub messages: Collection<Message>,
    /// Fixed sample backing roommate search.
    pub roommates: Vec<RoommateProfile>,
}

impl Store {
    /// An empty store.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store filled with the portal's sample content.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        seed::populate(&mut store, Utc::now());
        store
    }

    /// Adds the user behind an approved registration.
    pub fn register_user(&self, registration: &Registration, now: DateTime<Utc>) -> User {
        let user = self.users.create(|id| User {
            id,
            username: registration.username.clone(),
            name: registration.name.clone(),
            email: registration.email.clone(),
            kind: registration.kind,
            dorm: registration.dorm.clone(),
            room: registration.room.clone(),
            program: registration.program.clone(),
            created_at: now,
            is_active: true,
        });
        tracing::info!("user {} ({}) added", user.id, user.username);
        user
    }
}
