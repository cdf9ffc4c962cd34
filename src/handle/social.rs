use axum::{extract::State, Json};
use campus_portal_shared::{
    social::{
        Connection, ConnectionQuery, MemberDescriptor, Message, MessageQuery, NewConnection,
        NewMessage, NewSocialEvent, NewStudyGroup, RoommateProfile, RoommateQuery, SocialEvent,
        StudyGroup, StudyGroupQuery,
    },
    CategoryQuery,
};
use chrono::Utc;

use super::{Filter, Id, Valid};
use crate::{Error, Global};

pub async fn study_groups(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<StudyGroupQuery>,
) -> Json<Vec<StudyGroup>> {
    Json(store.study_groups(&query))
}

pub async fn create_study_group(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewStudyGroup>,
) -> Json<StudyGroup> {
    Json(store.create_study_group(new, Utc::now()))
}

pub async fn join_study_group(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
    Valid(MemberDescriptor { username }): Valid<MemberDescriptor>,
) -> Result<Json<StudyGroup>, Error> {
    store.join_study_group(id, username).map(Json)
}

pub async fn events(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<CategoryQuery>,
) -> Json<Vec<SocialEvent>> {
    Json(store.social_events(&query))
}

pub async fn create_event(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewSocialEvent>,
) -> Json<SocialEvent> {
    Json(store.create_social_event(new, Utc::now()))
}

pub async fn rsvp(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
    Valid(MemberDescriptor { username }): Valid<MemberDescriptor>,
) -> Result<Json<SocialEvent>, Error> {
    store.rsvp(id, username).map(Json)
}

pub async fn connections(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<ConnectionQuery>,
) -> Json<Vec<Connection>> {
    Json(store.connections(&query))
}

pub async fn request_connection(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewConnection>,
) -> Result<Json<Connection>, Error> {
    store.request_connection(new, Utc::now()).map(Json)
}

pub async fn accept_connection(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<String>,
) -> Result<Json<Connection>, Error> {
    store.accept_connection(&id).map(Json)
}

pub async fn messages(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<MessageQuery>,
) -> Json<Vec<Message>> {
    Json(store.messages(&query))
}

pub async fn send_message(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewMessage>,
) -> Json<Message> {
    Json(store.send_message(new, Utc::now()))
}

pub async fn mark_read(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<Message>, Error> {
    store.mark_read(id).map(Json)
}

pub async fn roommates(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<RoommateQuery>,
) -> Json<Vec<RoommateProfile>> {
    Json(store.roommates(&query))
}
