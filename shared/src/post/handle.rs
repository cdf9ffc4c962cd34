use serde::{Deserialize, Serialize};
use validator::Validate;

use super::PostSubmission;
use crate::verification::Action;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRes {
    pub success: bool,
    pub post_id: String,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPostDescriptor {
    #[validate(length(min = 1))]
    pub post_id: String,
    pub action: Action,
    #[validate(length(min = 1, max = 100))]
    pub reviewed_by: String,
    /// Ignored unless rejecting.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub rejection_reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyPostRes {
    pub success: bool,
    pub post: PostSubmission,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PostsRes {
    pub posts: Vec<PostSubmission>,
}
