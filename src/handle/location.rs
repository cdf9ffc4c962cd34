use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use campus_portal_shared::location::{LocationUpdate, LocationsRes, SharedLocation, StopSharing};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

use super::Valid;
use crate::Global;

pub async fn update(
    State(Global { locations, .. }): State<Global>,
    Valid(LocationUpdate {
        username,
        latitude,
        longitude,
    }): Valid<LocationUpdate>,
) -> Json<SharedLocation> {
    Json(locations.update(username, latitude, longitude))
}

/// Stops sharing. Stopping twice is not an error.
pub async fn stop(
    State(Global { locations, .. }): State<Global>,
    Valid(StopSharing { username }): Valid<StopSharing>,
) -> Json<LocationsRes> {
    locations.stop(&username);
    Json(LocationsRes {
        locations: locations.snapshot(),
    })
}

pub async fn shared(State(Global { locations, .. }): State<Global>) -> Json<LocationsRes> {
    Json(LocationsRes {
        locations: locations.snapshot(),
    })
}

/// Server-sent events carrying the shared set, starting with the current one.
pub async fn stream(
    State(Global { locations, .. }): State<Global>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // subscribe before the snapshot so no change falls in between
    let updates = BroadcastStream::new(locations.subscribe());
    let initial = tokio_stream::once(Ok::<_, BroadcastStreamRecvError>(locations.snapshot()));

    let events = initial.chain(updates).filter_map(|snapshot| match snapshot {
        Ok(snapshot) => Event::default()
            .event("locations")
            .json_data(LocationsRes {
                locations: snapshot,
            })
            .ok()
            .map(Ok),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::debug!("location stream skipped {skipped} snapshots");
            None
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
