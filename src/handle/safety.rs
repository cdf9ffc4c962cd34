use axum::{extract::State, Json};
use campus_portal_shared::{
    safety::{AlertQuery, NewSafetyAlert, NewSafetyResource, SafetyAlert, SafetyResource},
    CategoryQuery,
};
use chrono::Utc;

use super::{Filter, Id, Valid};
use crate::{Error, Global};

pub async fn resources(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<CategoryQuery>,
) -> Json<Vec<SafetyResource>> {
    Json(store.resources(&query))
}

pub async fn resource(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<SafetyResource>, Error> {
    store.safety_resources.require(&id).map(Json)
}

pub async fn create_resource(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewSafetyResource>,
) -> Json<SafetyResource> {
    Json(store.create_resource(new, Utc::now()))
}

pub async fn alerts(
    State(Global { store, .. }): State<Global>,
    Filter(query): Filter<AlertQuery>,
) -> Json<Vec<SafetyAlert>> {
    Json(store.alerts(&query, Utc::now()))
}

pub async fn alert(
    State(Global { store, .. }): State<Global>,
    Id(id): Id<u64>,
) -> Result<Json<SafetyAlert>, Error> {
    store.safety_alerts.require(&id).map(Json)
}

pub async fn create_alert(
    State(Global { store, .. }): State<Global>,
    Valid(new): Valid<NewSafetyAlert>,
) -> Json<SafetyAlert> {
    Json(store.create_alert(new, Utc::now()))
}
