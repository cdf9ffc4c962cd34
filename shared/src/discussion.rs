use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
pub struct NewDiscussion {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    #[validate(length(min = 1, max = 32))]
    pub author: String,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub tags: Vec<String>,
}

/// A comment on a discussion. Replies point at their parent comment.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub discussion_id: u64,
    pub parent_id: Option<u64>,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Validate, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[validate(length(min = 1, max = 32))]
    pub author: String,
    #[validate(length(min = 1, max = 5000))]
    pub content: String,
}

/// A comment with its replies, nested.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CommentThread {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentThread>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CommentQuery {
    /// Only direct replies to this comment.
    #[serde(default)]
    pub parent_id: Option<u64>,
}
