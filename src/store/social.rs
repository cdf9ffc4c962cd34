use campus_portal_shared::{
    social::{
        Connection, ConnectionQuery, ConnectionStatus, Message, MessageQuery, NewConnection,
        NewMessage, NewSocialEvent, NewStudyGroup, RoommateProfile, RoommateQuery, SocialEvent,
        StudyGroup, StudyGroupQuery,
    },
    CategoryQuery,
};
use chrono::{DateTime, Utc};

use super::{Record, Store};
use crate::Error;

impl Store {
    /// Creates a study group with its organizer as the first member.
    pub fn create_study_group(&self, new: NewStudyGroup, now: DateTime<Utc>) -> StudyGroup {
        self.study_groups.create(|id| StudyGroup {
            id,
            name: new.name,
            subject: new.subject,
            course: new.course,
            description: new.description,
            members: vec![new.organizer.clone()],
            organizer: new.organizer,
            max_members: new.max_members,
            meeting_time: new.meeting_time,
            location: new.location,
            created_at: now,
            is_active: true,
        })
    }

    pub fn study_groups(&self, query: &StudyGroupQuery) -> Vec<StudyGroup> {
        self.study_groups.filter(|g| {
            g.is_active
                && query
                    .subject
                    .as_deref()
                    .map_or(true, |s| g.subject.eq_ignore_ascii_case(s))
        })
    }

    /// Adds `username` to a study group. Joining twice is a no-op.
    ///
    /// # Errors
    ///
    /// - Errors if the group doesn't exist.
    /// - Errors if the group is at capacity.
    pub fn join_study_group(&self, id: u64, username: String) -> Result<StudyGroup, Error> {
        self.study_groups.update(&id, |group| {
            if !group.members.contains(&username) {
                if group.members.len() >= group.max_members as usize {
                    return Err(Error::Full {
                        kind: StudyGroup::KIND,
                        id: id.to_string(),
                    });
                }
                group.members.push(username);
            }
            Ok(group.clone())
        })
    }

    pub fn create_social_event(&self, new: NewSocialEvent, now: DateTime<Utc>) -> SocialEvent {
        self.social_events.create(|id| SocialEvent {
            id,
            title: new.title,
            description: new.description,
            category: new.category,
            location: new.location,
            starts_at: new.starts_at,
            attendees: vec![new.organizer.clone()],
            organizer: new.organizer,
            created_at: now,
            is_active: true,
        })
    }

    /// Active social events in the queried category, soonest first.
    pub fn social_events(&self, query: &CategoryQuery) -> Vec<SocialEvent> {
        let mut events = self
            .social_events
            .filter(|e| e.is_active && query.matches(&e.category));
        events.sort_by_key(|e| e.starts_at);
        events
    }

    /// Adds `username` to an event's attendees. Answering twice is a no-op.
    pub fn rsvp(&self, id: u64, username: String) -> Result<SocialEvent, Error> {
        self.social_events.update(&id, |event| {
            if !event.attendees.contains(&username) {
                event.attendees.push(username);
            }
            Ok(event.clone())
        })
    }

    /// Requests a connection from one user to another.
    ///
    /// # Errors
    ///
    /// - Errors if the two users already have a connection in either
    ///   direction.
    pub fn request_connection(
        &self,
        new: NewConnection,
        now: DateTime<Utc>,
    ) -> Result<Connection, Error> {
        let reverse = Connection::key(&new.to, &new.from);
        if self.connections.get(&reverse).is_some() {
            return Err(Error::Conflict {
                kind: Connection::KIND,
                id: reverse,
            });
        }

        let connection = self.connections.insert(Connection {
            id: Connection::key(&new.from, &new.to),
            from: new.from,
            to: new.to,
            status: ConnectionStatus::Pending,
            created_at: now,
        })?;
        tracing::debug!("connection {} requested", connection.id);
        Ok(connection)
    }

    pub fn connections(&self, query: &ConnectionQuery) -> Vec<Connection> {
        self.connections
            .filter(|c| query.user.as_deref().map_or(true, |u| c.involves(u)))
    }

    /// # Errors
    ///
    /// - Errors if the connection doesn't exist.
    /// - Errors if the connection was already accepted.
    pub fn accept_connection(&self, id: &str) -> Result<Connection, Error> {
        self.connections.update(&id.to_owned(), |conn| {
            if conn.status == ConnectionStatus::Accepted {
                return Err(Error::AlreadyProcessed {
                    kind: Connection::KIND,
                    id: conn.id.clone(),
                });
            }
            conn.status = ConnectionStatus::Accepted;
            Ok(conn.clone())
        })
    }

    pub fn send_message(&self, new: NewMessage, now: DateTime<Utc>) -> Message {
        self.messages.create(|id| Message {
            id,
            from: new.from,
            to: new.to,
            content: new.content,
            sent_at: now,
            read: false,
        })
    }

    /// Messages involving `query.user`, narrowed to the conversation with
    /// `query.with` if given, oldest first.
    pub fn messages(&self, query: &MessageQuery) -> Vec<Message> {
        let involves = |m: &Message, user: &str| m.from == user || m.to == user;
        let mut messages = self.messages.filter(|m| {
            query.user.as_deref().map_or(true, |u| involves(m, u))
                && query.with.as_deref().map_or(true, |w| involves(m, w))
        });
        messages.sort_by_key(|m| (m.sent_at, m.id));
        messages
    }

    pub fn mark_read(&self, id: u64) -> Result<Message, Error> {
        self.messages.update(&id, |message| {
            message.read = true;
            Ok(message.clone())
        })
    }

    pub fn roommates(&self, query: &RoommateQuery) -> Vec<RoommateProfile> {
        self.roommates
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect()
    }
}
