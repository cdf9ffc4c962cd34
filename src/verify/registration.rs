use campus_portal_shared::verification::{Action, Registration, Status, VerificationRequest};
use lettre::Address;
use chrono::{DateTime, Utc};

use super::{Decision, Reviewable, Verification};
use crate::Error;

impl Reviewable for VerificationRequest {
    const KIND: &'static str = "registration";

    #[inline]
    fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    fn status(&self) -> Status {
        self.status
    }

    #[inline]
    fn submitted_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn apply(&mut self, decision: Decision) {
        self.status = decision.action.outcome();
        self.verified_at = Some(decision.at);
        self.verified_by = Some(decision.reviewer);
    }
}

impl Verification {
    /// Stores a registration as pending and asks the reviewer to act on it.
    ///
    /// # Errors
    ///
    /// - Errors if a pending or approved registration uses the same email
    ///   or username.
    /// - Errors if the review request couldn't be sent. The registration
    ///   stays stored as pending in that case.
    pub async fn submit_registration(&self, user: Registration) -> Result<String, Error> {
        let email = user.email.to_string();
        let username = user.username.clone();

        let request = self
            .registrations
            .insert_unless(
                |r| {
                    r.status != Status::Rejected
                        && (same_email(&r.user.email, &email)
                            || r.user.username.eq_ignore_ascii_case(&username))
                },
                |id| VerificationRequest {
                    id,
                    user,
                    status: Status::Pending,
                    created_at: Utc::now(),
                    verified_at: None,
                    verified_by: None,
                },
            )
            .ok_or_else(|| Error::Conflict {
                kind: VerificationRequest::KIND,
                id: username,
            })?;
        tracing::info!(
            "registration {} submitted for {}",
            request.id,
            request.user.username
        );

        self.notifier.review_registration(&request).await?;
        Ok(request.id)
    }

    /// Approves or rejects a pending registration and tells the applicant.
    ///
    /// # Errors
    ///
    /// - Errors if the registration doesn't exist.
    /// - Errors if the registration was already approved or rejected.
    pub async fn verify_registration(
        &self,
        id: &str,
        action: Action,
        verified_by: String,
    ) -> Result<VerificationRequest, Error> {
        let request = self
            .registrations
            .review(id, Decision::now(action, verified_by, None))?;
        tracing::info!(
            "registration {id} {} by {}",
            request.status,
            request.verified_by.as_deref().unwrap_or_default()
        );

        self.notifier.registration_outcome(&request).await;
        Ok(request)
    }

    #[inline]
    pub fn registration_status(&self, id: &str) -> Option<VerificationRequest> {
        self.registrations.get(id)
    }

    #[inline]
    pub fn pending_registrations(&self) -> Vec<VerificationRequest> {
        self.registrations.with_status(Status::Pending)
    }
}

fn same_email(address: &Address, other: &str) -> bool {
    let address: &str = address.as_ref();
    address.eq_ignore_ascii_case(other)
}
