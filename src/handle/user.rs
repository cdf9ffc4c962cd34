use axum::{extract::State, Json};
use campus_portal_shared::user::User;

use super::Id;
use crate::{Error, Global};

pub async fn list(State(Global { store, .. }): State<Global>) -> Json<Vec<User>> {
    Json(store.users.filter(|u| u.is_active))
}

pub async fn get(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<User>, Error> {
    store.users.require(&id).map(Json)
}
