use axum::{extract::State, Json};
use campus_portal_shared::{
    discussion::{Comment, CommentQuery, CommentThread, Discussion, NewComment, NewDiscussion},
    CategoryQuery,
};
use chrono::Utc;

use super::{Filter, Id, Valid};
use crate::{Error, Global};

pub async fn list(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<CategoryQuery>,
) -> Json<Vec<Discussion>> {
    Json(store.discussions(&query))
}

pub async fn get(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<Discussion>, Error> {
    store.discussions.require(&id).map(Json)
}

pub async fn create(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewDiscussion>,
) -> Json<Discussion> {
    Json(store.create_discussion(new, Utc::now()))
}

pub async fn comments(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
    Filter(query): Filter<CommentQuery>,
) -> Result<Json<Vec<Comment>>, Error> {
    store.comments(id, &query).map(Json)
}

pub async fn comment(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
    Valid(new): Valid<NewComment>,
) -> Result<Json<Comment>, Error> {
    store.create_comment(id, new, Utc::now()).map(Json)
}

pub async fn thread(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<Vec<CommentThread>>, Error> {
    store.thread(id).map(Json)
}
