use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{Action, VerificationRequest};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRes {
    pub success: bool,
    pub request_id: String,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VerifyDescriptor {
    #[validate(length(min = 1))]
    pub request_id: String,
    pub action: Action,
    #[validate(length(min = 1, max = 100))]
    pub verified_by: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyRes {
    pub success: bool,
    pub request: VerificationRequest,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PendingRes {
    pub requests: Vec<VerificationRequest>,
}
