use axum::{extract::State, Json};
use campus_portal_shared::post::{
    handle::{PostsRes, SubmitRes, VerifyPostDescriptor, VerifyPostRes},
    PostDraft, PostSubmission,
};

use super::{Id, Valid};
use crate::{verify::Reviewable, Error, Global};

pub async fn submit(
    State(Global { verification, .. }): State<Global>,
    Valid(draft): Valid<PostDraft>,
) -> Result<Json<SubmitRes>, Error> {
    let post_id = verification.submit_post(draft).await?;
    Ok(Json(SubmitRes {
        success: true,
        post_id,
    }))
}

pub async fn verify(
    State(Global { verification, .. }): State<Global>,
    Valid(VerifyPostDescriptor {
        post_id,
        action,
        reviewed_by,
        rejection_reason,
    }): Valid<VerifyPostDescriptor>,
) -> Result<Json<VerifyPostRes>, Error> {
    let post = verification
        .verify_post(&post_id, action, reviewed_by, rejection_reason)
        .await?;
    Ok(Json(VerifyPostRes {
        success: true,
        post,
    }))
}

pub async fn status(
    State(Global { verification, .. }): State<Global>,
    Id(post_id): Id<String>,
) -> Result<Json<PostSubmission>, Error> {
    verification
        .post_status(&post_id)
        .map(Json)
        .ok_or_else(|| Error::not_found(PostSubmission::KIND, post_id))
}

pub async fn pending(State(Global { verification, .. }): State<Global>) -> Json<PostsRes> {
    Json(PostsRes {
        posts: verification.pending_posts(),
    })
}

pub async fn approved(State(Global { verification, .. }): State<Global>) -> Json<PostsRes> {
    Json(PostsRes {
        posts: verification.approved_posts(),
    })
}
