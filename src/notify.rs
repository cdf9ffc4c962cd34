//! Composition of every email the verification workflows send.

use std::{fmt::Write, sync::Arc};

use campus_portal_shared::{
    post::PostSubmission,
    verification::{Action, Status, VerificationRequest},
};

use crate::{
    config::Config,
    mail::{Mail, Mailer},
    Error,
};

/// Frontend page handling registration review links.
const REGISTRATION_PAGE: &str = "verify";
/// Frontend page handling post review links.
const POST_PAGE: &str = "verify-post";

pub struct Notifier {
    mailer: Arc<dyn Mailer>,
    reviewer: lettre::Address,
    frontend_url: String,
    audience: Vec<lettre::Address>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>, config: &Config) -> Self {
        Self {
            mailer,
            reviewer: config.mail.reviewer.clone(),
            frontend_url: config.mail.frontend_url.trim_end_matches('/').to_owned(),
            audience: config.notify.audience.clone(),
        }
    }

    /// Link a reviewer follows to take `action` on record `id`.
    pub fn action_link(&self, page: &str, action: Action, id: &str) -> String {
        format!(
            "{}/{page}?action={action}&id={}",
            self.frontend_url,
            urlencoding::encode(id)
        )
    }

    fn review_links(&self, page: &str, id: &str) -> String {
        let mut links = String::new();
        for action in Action::ALL {
            let _ = writeln!(
                links,
                "To {action}: {}",
                self.action_link(page, action, id)
            );
        }
        links
    }

    /// Asks the reviewer to act on a registration.
    pub async fn review_registration(&self, request: &VerificationRequest) -> Result<(), Error> {
        let user = &request.user;
        let body = format!(
            "A new account registration is waiting for review.\n\n\
             Name: {}\nStudent ID: {}\nEmail: {}\nType: {:?}\nUsername: {}\n\
             Dorm: {}\nRoom: {}\nProgram: {}\nSubmitted: {}\n\n{}",
            user.name,
            user.student_id,
            user.email,
            user.kind,
            user.username,
            user.dorm.as_deref().unwrap_or("-"),
            user.room.as_deref().unwrap_or("-"),
            user.program.as_deref().unwrap_or("-"),
            request.created_at.to_rfc3339(),
            self.review_links(REGISTRATION_PAGE, &request.id),
        );

        self.mailer
            .send(Mail {
                to: self.reviewer.clone(),
                subject: format!("Registration review: {}", user.username),
                body,
            })
            .await
    }

    /// Tells the applicant how their registration went. Failures are only logged.
    pub async fn registration_outcome(&self, request: &VerificationRequest) {
        let body = match request.status {
            Status::Approved => format!(
                "Hi {},\n\nyour campus portal account \"{}\" has been approved. You can sign in now.",
                request.user.name, request.user.username
            ),
            Status::Rejected => format!(
                "Hi {},\n\nyour campus portal registration \"{}\" was not approved. \
                 Contact student services if you think this is a mistake.",
                request.user.name, request.user.username
            ),
            Status::Pending => return,
        };

        self.deliver_best_effort(Mail {
            to: request.user.email.clone(),
            subject: format!("Your registration was {}", request.status),
            body,
        })
        .await;
    }

    /// Asks the reviewer to act on a post.
    pub async fn review_post(&self, post: &PostSubmission) -> Result<(), Error> {
        let draft = &post.draft;
        let mut body = format!(
            "A new {:?} post is waiting for review.\n\n\
             Author: {} ({})\nCategory: {}\nHashtags: {}\nSubmitted: {}\n\n{}\n",
            draft.kind,
            draft.author.name,
            draft.author.username,
            draft.category,
            draft.hashtags.join(" "),
            post.submitted_at.to_rfc3339(),
            draft.content,
        );
        if let Some(options) = &draft.poll_options {
            let _ = writeln!(body, "\nPoll options: {}", options.join(" / "));
        }
        if let Some(event) = &draft.event {
            let _ = writeln!(
                body,
                "\nEvent at {} starting {}",
                event.location,
                event.starts_at.to_rfc3339()
            );
        }
        if let Some(media) = &draft.media {
            let _ = writeln!(body, "\nMedia: {}", media.url);
        }
        body.push('\n');
        body.push_str(&self.review_links(POST_PAGE, &post.id));

        self.mailer
            .send(Mail {
                to: self.reviewer.clone(),
                subject: format!("Post review: {}", draft.category),
                body,
            })
            .await
    }

    /// Tells the author how their post went. Failures are only logged.
    pub async fn post_outcome(&self, post: &PostSubmission) {
        let author = &post.draft.author;
        let body = match post.status {
            Status::Approved => format!(
                "Hi {},\n\nyour post in {} is now live.",
                author.name, post.draft.category
            ),
            Status::Rejected => format!(
                "Hi {},\n\nyour post in {} was not approved.\nReason: {}",
                author.name,
                post.draft.category,
                post.rejection_reason.as_deref().unwrap_or("none given")
            ),
            Status::Pending => return,
        };

        self.deliver_best_effort(Mail {
            to: author.email.clone(),
            subject: format!("Your post was {}", post.status),
            body,
        })
        .await;
    }

    /// Tells the audience, except the author, about a newly approved post.
    ///
    /// Returns how many messages were delivered.
    pub async fn fan_out(&self, post: &PostSubmission) -> usize {
        let author = &post.draft.author;
        let mut delivered = 0;
        for to in self.audience.iter().filter(|to| **to != author.email) {
            let sent = self
                .deliver_best_effort(Mail {
                    to: to.clone(),
                    subject: format!("New in {}", post.draft.category),
                    body: format!(
                        "{} just posted in {}:\n\n{}",
                        author.name, post.draft.category, post.draft.content
                    ),
                })
                .await;
            if sent {
                delivered += 1;
            }
        }
        delivered
    }

    async fn deliver_best_effort(&self, mail: Mail) -> bool {
        let to = mail.to.clone();
        match self.mailer.send(mail).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!("notification to {to} not delivered: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::LogMailer;

    #[test]
    fn links_are_encoded() {
        let mut config = Config::default();
        config.mail.frontend_url = "https://portal.campus.edu/".to_owned();
        let notifier = Notifier::new(Arc::new(LogMailer), &config);

        assert_eq!(
            notifier.action_link(REGISTRATION_PAGE, Action::Approve, "a b&c"),
            "https://portal.campus.edu/verify?action=approve&id=a%20b%26c"
        );
        assert_eq!(
            notifier.action_link(POST_PAGE, Action::Reject, "18c2f"),
            "https://portal.campus.edu/verify-post?action=reject&id=18c2f"
        );
    }
}
