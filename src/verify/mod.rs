//! Email-mediated review of registrations and posts.
//!
//! Both workflows share the same state machine: a record is stored as
//! pending, a reviewer approves or rejects it once, and it stays in the
//! ledger for the life of the process.

pub mod post;
pub mod registration;

use std::sync::Arc;

use campus_portal_shared::{
    post::PostSubmission,
    verification::{Action, Status, VerificationRequest},
};
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use parking_lot::Mutex;
use rand::{distributions::Alphanumeric, Rng};

use crate::{config::Config, mail::Mailer, notify::Notifier, Error};

/// A reviewer's decision on a pending record.
#[derive(Debug, Clone)]
pub struct Decision {
    pub action: Action,
    pub reviewer: String,
    /// Only kept on rejections.
    pub reason: Option<String>,
    pub at: DateTime<Utc>,
}

impl Decision {
    pub fn now(action: Action, reviewer: String, reason: Option<String>) -> Self {
        Self {
            action,
            reviewer,
            reason,
            at: Utc::now(),
        }
    }
}

/// A record that goes through review.
pub trait Reviewable: Clone + Send + Sync + 'static {
    /// Name used in errors and logs.
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn status(&self) -> Status;
    fn submitted_at(&self) -> DateTime<Utc>;

    /// Moves a pending record to the decision's outcome.
    fn apply(&mut self, decision: Decision);
}

/// Records under review, by id.
pub struct Ledger<R> {
    records: DashMap<String, R>,
    /// Held by every insertion.
    admission: Mutex<()>,
}

impl<R: Reviewable> Ledger<R> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            admission: Mutex::new(()),
        }
    }

    /// Stores the record `build` makes around a fresh id.
    pub fn insert_new(&self, build: impl FnOnce(String) -> R) -> R {
        let _admission = self.admission.lock();
        self.insert_vacant(build)
    }

    /// Like [`Ledger::insert_new`], unless a stored record `conflicts`.
    /// No other insertion runs between the check and the insert.
    pub fn insert_unless(
        &self,
        conflicts: impl Fn(&R) -> bool,
        build: impl FnOnce(String) -> R,
    ) -> Option<R> {
        let _admission = self.admission.lock();
        if self.records.iter().any(|r| conflicts(r.value())) {
            return None;
        }
        Some(self.insert_vacant(build))
    }

    fn insert_vacant(&self, build: impl FnOnce(String) -> R) -> R {
        loop {
            if let Entry::Vacant(entry) = self.records.entry(new_id()) {
                let record = build(entry.key().clone());
                entry.insert(record.clone());
                return record;
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<R> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// Applies `decision` to a pending record and returns the result.
    ///
    /// # Errors
    ///
    /// - Errors if the record doesn't exist.
    /// - Errors if the record is not pending anymore.
    pub fn review(&self, id: &str, decision: Decision) -> Result<R, Error> {
        let mut record = self
            .records
            .get_mut(id)
            .ok_or_else(|| Error::not_found(R::KIND, id))?;

        if !record.status().is_pending() {
            return Err(Error::AlreadyProcessed {
                kind: R::KIND,
                id: id.to_owned(),
            });
        }

        record.apply(decision);
        Ok(record.clone())
    }

    /// Records in `status`, oldest first.
    pub fn with_status(&self, status: Status) -> Vec<R> {
        let mut records: Vec<R> = self
            .records
            .iter()
            .filter(|r| r.status() == status)
            .map(|r| r.value().clone())
            .collect();
        records.sort_by(|a, b| {
            a.submitted_at()
                .cmp(&b.submitted_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        records
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<R: Reviewable> Default for Ledger<R> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// An opaque id: the submission time in hex followed by a random suffix.
fn new_id() -> String {
    const SUFFIX_LEN: usize = 9;

    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|c| char::from(c).to_ascii_lowercase())
        .collect();
    format!("{:x}{suffix}", Utc::now().timestamp_millis())
}

/// The verification service: both ledgers and the mail they cause.
pub struct Verification {
    registrations: Ledger<VerificationRequest>,
    posts: Ledger<PostSubmission>,
    notifier: Notifier,
}

impl Verification {
    pub fn new(mailer: Arc<dyn Mailer>, config: &Config) -> Self {
        Self {
            registrations: Ledger::new(),
            posts: Ledger::new(),
            notifier: Notifier::new(mailer, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use campus_portal_shared::{
        post::{Author, PostDraft, PostKind},
        verification::{Registration, UserType},
    };

    use super::*;
    use crate::mail::LogMailer;

    #[derive(Clone)]
    struct Ticket {
        id: String,
        status: Status,
        at: DateTime<Utc>,
        reviewer: Option<String>,
    }

    impl Reviewable for Ticket {
        const KIND: &'static str = "ticket";

        fn id(&self) -> &str {
            &self.id
        }

        fn status(&self) -> Status {
            self.status
        }

        fn submitted_at(&self) -> DateTime<Utc> {
            self.at
        }

        fn apply(&mut self, decision: Decision) {
            self.status = decision.action.outcome();
            self.reviewer = Some(decision.reviewer);
        }
    }

    fn ticket(id: String) -> Ticket {
        Ticket {
            id,
            status: Status::Pending,
            at: Utc::now(),
            reviewer: None,
        }
    }

    #[test]
    fn ids_are_unique() {
        let ledger = Ledger::new();
        for _ in 0..200 {
            ledger.insert_new(ticket);
        }
        assert_eq!(ledger.len(), 200);
    }

    #[test]
    fn review_once() {
        let ledger = Ledger::new();
        let id = ledger.insert_new(ticket).id;

        let reviewed = ledger
            .review(&id, Decision::now(Action::Reject, "dean".to_owned(), None))
            .unwrap();
        assert_eq!(reviewed.status, Status::Rejected);
        assert_eq!(reviewed.reviewer.as_deref(), Some("dean"));

        assert!(matches!(
            ledger.review(&id, Decision::now(Action::Approve, "dean".to_owned(), None)),
            Err(Error::AlreadyProcessed { .. })
        ));
        assert_eq!(ledger.get(&id).unwrap().status, Status::Rejected);
    }

    #[test]
    fn review_missing() {
        let ledger: Ledger<Ticket> = Ledger::new();
        assert!(matches!(
            ledger.review("nope", Decision::now(Action::Approve, "dean".to_owned(), None)),
            Err(Error::NotFound { kind: "ticket", .. })
        ));
    }

    #[test]
    fn listing_by_status() {
        let ledger = Ledger::new();
        let first = ledger.insert_new(ticket).id;
        let second = ledger.insert_new(ticket).id;
        ledger
            .review(&first, Decision::now(Action::Approve, "dean".to_owned(), None))
            .unwrap();

        let pending: Vec<_> = ledger
            .with_status(Status::Pending)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(pending, vec![second]);
        assert_eq!(ledger.with_status(Status::Approved).len(), 1);
    }

    #[test]
    fn insert_unless_conflicting() {
        let ledger = Ledger::new();
        let first = ledger.insert_new(ticket).id;

        assert!(ledger.insert_unless(|t| t.id == first, ticket).is_none());
        assert_eq!(ledger.len(), 1);
        assert!(ledger.insert_unless(|t| t.reviewer.is_some(), ticket).is_some());
        assert_eq!(ledger.len(), 2);
    }

    fn service() -> Arc<Verification> {
        Arc::new(Verification::new(Arc::new(LogMailer), &Config::default()))
    }

    fn registration(username: &str) -> Registration {
        Registration {
            name: "Jiening Yu".to_owned(),
            student_id: "2522320".to_owned(),
            email: format!("{username}@campus.edu").parse().unwrap(),
            kind: UserType::Student,
            dorm: None,
            room: None,
            program: None,
            username: username.to_owned(),
        }
    }

    /// Of two decisions on one registration made at once, exactly one wins.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_registration_decisions() {
        let verification = service();

        for round in 0..32 {
            let id = verification
                .submit_registration(registration(&format!("user{round}")))
                .await
                .unwrap();
            let barrier = Arc::new(tokio::sync::Barrier::new(2));

            let tasks: Vec<_> = [Action::Approve, Action::Reject]
                .into_iter()
                .map(|action| {
                    let verification = verification.clone();
                    let barrier = barrier.clone();
                    let id = id.clone();
                    tokio::spawn(async move {
                        barrier.wait().await;
                        verification
                            .verify_registration(&id, action, "dean".to_owned())
                            .await
                    })
                })
                .collect();

            let mut results = Vec::new();
            for task in tasks {
                results.push(task.await.unwrap());
            }
            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert!(results
                .iter()
                .any(|r| matches!(r, Err(Error::AlreadyProcessed { .. }))));

            let winner = results.into_iter().find_map(Result::ok).unwrap();
            assert_eq!(
                verification.registration_status(&id).unwrap().status,
                winner.status
            );
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_post_decisions() {
        let verification = service();
        let draft = PostDraft {
            kind: PostKind::Text,
            content: "Library closes early today".to_owned(),
            author: Author {
                name: "Ada Park".to_owned(),
                username: "adapark".to_owned(),
                email: "ada@campus.edu".parse().unwrap(),
            },
            category: "announcements".to_owned(),
            hashtags: vec![],
            poll_options: None,
            event: None,
            media: None,
        };

        for _ in 0..32 {
            let id = verification.submit_post(draft.clone()).await.unwrap();
            let barrier = Arc::new(tokio::sync::Barrier::new(2));

            let tasks: Vec<_> = (0..2)
                .map(|_| {
                    let verification = verification.clone();
                    let barrier = barrier.clone();
                    let id = id.clone();
                    tokio::spawn(async move {
                        barrier.wait().await;
                        verification
                            .verify_post(&id, Action::Approve, "moderator".to_owned(), None)
                            .await
                    })
                })
                .collect();

            let mut results = Vec::new();
            for task in tasks {
                results.push(task.await.unwrap());
            }
            assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
            assert!(results
                .iter()
                .any(|r| matches!(r, Err(Error::AlreadyProcessed { .. }))));
        }
        assert_eq!(verification.approved_posts().len(), 32);
    }

    /// Concurrent registrations of one username: only one is admitted.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_duplicate_registrations() {
        let verification = service();
        let barrier = Arc::new(tokio::sync::Barrier::new(8));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let verification = verification.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    verification.submit_registration(registration("jyu")).await
                })
            })
            .collect();

        let mut admitted = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => admitted += 1,
                Err(err) => assert!(matches!(err, Error::Conflict { .. })),
            }
        }
        assert_eq!(admitted, 1);
        assert_eq!(verification.pending_registrations().len(), 1);
    }
}
