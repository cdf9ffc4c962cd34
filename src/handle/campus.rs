use axum::{extract::State, Json};
use campus_portal_shared::{
    campus::{Building, CampusEvent, CampusEventQuery, NewCampusEvent, Tool},
    CategoryQuery,
};
use chrono::Utc;

use super::{Filter, Id, Valid};
use crate::{Error, Global};

pub async fn events(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<CampusEventQuery>,
) -> Json<Vec<CampusEvent>> {
    Json(store.campus_events(&query, Utc::now()))
}

pub async fn event(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<CampusEvent>, Error> {
    store.events.require(&id).map(Json)
}

pub async fn create_event(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewCampusEvent>,
) -> Json<CampusEvent> {
    Json(store.create_event(new, Utc::now()))
}

pub async fn buildings(State(Global { store, .. }): State<Global>) -> Json<Vec<Building>> {
    Json(store.buildings())
}

pub async fn building(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<Building>, Error> {
    store.buildings.require(&id).map(Json)
}

pub async fn tools(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<CategoryQuery>,
) -> Json<Vec<Tool>> {
    Json(store.tools(&query))
}
