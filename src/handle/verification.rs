use axum::{extract::State, Json};
use campus_portal_shared::verification::{
    handle::{PendingRes, RegisterRes, VerifyDescriptor, VerifyRes},
    Registration, Status, VerificationRequest,
};
use chrono::Utc;

use super::{Id, Valid};
use crate::{verify::Reviewable, Error, Global};

pub async fn register(
    State(Global { verification, .. }): State<Global>,
    Valid(registration): Valid<Registration>,
) -> Result<Json<RegisterRes>, Error> {
    let request_id = verification.submit_registration(registration).await?;
    Ok(Json(RegisterRes {
        success: true,
        request_id,
    }))
}

/// Approves or rejects a registration. Approval creates the user.
pub async fn verify(
    State(Global {
        verification,
        store,
        ..
    }): State<Global>,
    Valid(VerifyDescriptor {
        request_id,
        action,
        verified_by,
    }): Valid<VerifyDescriptor>,
) -> Result<Json<VerifyRes>, Error> {
    let request = verification
        .verify_registration(&request_id, action, verified_by)
        .await?;
    if request.status == Status::Approved {
        store.register_user(&request.user, request.verified_at.unwrap_or_else(Utc::now));
    }

    Ok(Json(VerifyRes {
        success: true,
        request,
    }))
}

pub async fn status(
    State(Global { verification, .. }): State<Global>,
    Id(request_id): Id<String>,
) -> Result<Json<VerificationRequest>, Error> {
    verification
        .registration_status(&request_id)
        .map(Json)
        .ok_or_else(|| Error::not_found(VerificationRequest::KIND, request_id))
}

pub async fn pending(State(Global { verification, .. }): State<Global>) -> Json<PendingRes> {
    Json(PendingRes {
        requests: verification.pending_registrations(),
    })
}
