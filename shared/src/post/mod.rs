pub mod handle;

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::verification::Status;

/// Kinds of social posts.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Text,
    Image,
    Video,
    Poll,
    Event,
    Alert,
}

/// Snapshot of the user submitting a post.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct Author {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 32))]
    pub username: String,
    pub email: lettre::Address,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_event_window"))]
pub struct EventDetails {
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub ends_at: Option<DateTime<Utc>>,
}

fn check_event_window(event: &EventDetails) -> Result<(), ValidationError> {
    match event.ends_at {
        Some(end) if end < event.starts_at => {
            let mut err = ValidationError::new("ends_at");
            err.message = Some(Cow::Borrowed("event ends before it starts"));
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Media attached to an image or video post.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// A post as submitted for review.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_shape"))]
pub struct PostDraft {
    #[serde(rename = "type")]
    pub kind: PostKind,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
    #[validate]
    pub author: Author,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub hashtags: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub poll_options: Option<Vec<String>>,
    #[serde(default)]
    #[validate]
    pub event: Option<EventDetails>,
    #[serde(default)]
    #[validate]
    pub media: Option<Media>,
}

/// Checks that the post carries what its kind requires.
fn check_shape(draft: &PostDraft) -> Result<(), ValidationError> {
    fn fail(code: &'static str, msg: &'static str) -> Result<(), ValidationError> {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(msg));
        Err(err)
    }

    if draft.content.trim().is_empty() {
        return fail("content", "content must not be blank");
    }

    match draft.kind {
        PostKind::Poll
            if draft.poll_options.as_ref().map_or(0, |options| {
                options.iter().filter(|o| !o.trim().is_empty()).count()
            }) < 2 =>
        {
            fail("poll_options", "a poll needs at least two options")
        }
        PostKind::Event if draft.event.is_none() => fail("event", "an event post needs details"),
        PostKind::Image | PostKind::Video if draft.media.is_none() => {
            fail("media", "image and video posts need media")
        }
        _ => Ok(()),
    }
}

/// A post under review, or reviewed.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostSubmission {
    pub id: String,
    #[serde(flatten)]
    pub draft: PostDraft,
    pub status: Status,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    /// Only set when the post was rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: PostKind) -> PostDraft {
        PostDraft {
            kind,
            content: "Library closes early today".to_owned(),
            author: Author {
                name: "Ada Park".to_owned(),
                username: "adapark".to_owned(),
                email: lettre::Address::new("ada", "campus.edu").unwrap(),
            },
            category: "announcements".to_owned(),
            hashtags: vec!["library".to_owned()],
            poll_options: None,
            event: None,
            media: None,
        }
    }

    #[test]
    fn text_post_is_valid() {
        assert!(draft(PostKind::Text).validate().is_ok());
    }

    #[test]
    fn poll_needs_two_options() {
        let mut poll = draft(PostKind::Poll);
        assert!(poll.validate().is_err());

        poll.poll_options = Some(vec!["Yes".to_owned(), " ".to_owned()]);
        assert!(poll.validate().is_err());

        poll.poll_options = Some(vec!["Yes".to_owned(), "No".to_owned()]);
        assert!(poll.validate().is_ok());
    }

    #[test]
    fn media_required_for_image() {
        let mut image = draft(PostKind::Image);
        assert!(image.validate().is_err());

        image.media = Some(Media {
            url: "https://cdn.campus.edu/a.png".to_owned(),
            content_type: Some("image/png".to_owned()),
        });
        assert!(image.validate().is_ok());
    }

    #[test]
    fn event_window_ordered() {
        let now = Utc::now();
        let mut event = draft(PostKind::Event);
        event.event = Some(EventDetails {
            location: "Quad".to_owned(),
            starts_at: now,
            ends_at: Some(now - chrono::Duration::hours(1)),
        });
        assert!(event.validate().is_err());
    }

    #[test]
    fn wire_names() {
        let value = serde_json::to_value(draft(PostKind::Alert)).unwrap();
        assert_eq!(value["type"], "alert");
        assert!(value.get("pollOptions").is_some());
    }
}
