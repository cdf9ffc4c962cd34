use campus_portal_shared::{
    post::{PostDraft, PostSubmission},
    verification::{Action, Status},
};
use chrono::{DateTime, Utc};

use super::{Decision, Reviewable, Verification};
use crate::Error;

impl Reviewable for PostSubmission {
    const KIND: &'static str = "post";

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
        self.submitted_at
    }

    fn apply(&mut self, decision: Decision) {
        self.status = decision.action.outcome();
        self.reviewed_at = Some(decision.at);
        self.reviewed_by = Some(decision.reviewer);
        self.rejection_reason = match decision.action {
            Action::Reject => decision.reason,
            Action::Approve => None,
        };
    }
}

impl Verification {
    /// Stores a post as pending and asks the reviewer to act on it.
    ///
    /// # Errors
    ///
    /// - Errors if the review request couldn't be sent. The post stays
    ///   stored as pending in that case.
    pub async fn submit_post(&self, draft: PostDraft) -> Result<String, Error> {
        let post = self.posts.insert_new(|id| PostSubmission {
            id,
            draft,
            status: Status::Pending,
            submitted_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
            rejection_reason: None,
        });
        tracing::info!(
            "{:?} post {} submitted by {}",
            post.draft.kind,
            post.id,
            post.draft.author.username
        );

        self.notifier.review_post(&post).await?;
        Ok(post.id)
    }

    /// Approves or rejects a pending post, tells the author, and on approval
    /// tells the audience.
    ///
    /// # Errors
    ///
    /// - Errors if the post doesn't exist.
    /// - Errors if the post was already approved or rejected.
    pub async fn verify_post(
        &self,
        id: &str,
        action: Action,
        reviewed_by: String,
        reason: Option<String>,
    ) -> Result<PostSubmission, Error> {
        let post = self
            .posts
            .review(id, Decision::now(action, reviewed_by, reason))?;
        tracing::info!(
            "post {id} {} by {}",
            post.status,
            post.reviewed_by.as_deref().unwrap_or_default()
        );

        self.notifier.post_outcome(&post).await;
        if post.status == Status::Approved {
            let delivered = self.notifier.fan_out(&post).await;
            tracing::debug!("post {id} announced to {delivered} users");
        }
        Ok(post)
    }

    #[inline]
    pub fn post_status(&self, id: &str) -> Option<PostSubmission> {
        self.posts.get(id)
    }

    #[inline]
    pub fn pending_posts(&self) -> Vec<PostSubmission> {
        self.posts.with_status(Status::Pending)
    }

    #[inline]
    pub fn approved_posts(&self) -> Vec<PostSubmission> {
        self.posts.with_status(Status::Approved)
    }
}
