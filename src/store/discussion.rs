use std::collections::HashMap;

use campus_portal_shared::{
    discussion::{Comment, CommentQuery, CommentThread, Discussion, NewComment, NewDiscussion},
    CategoryQuery,
};
use chrono::{DateTime, Utc};

use super::{Record, Store};
use crate::Error;

/// How many replies deep a comment may sit below a top level comment.
pub const MAX_REPLY_DEPTH: usize = 32;

impl Store {
    pub fn create_discussion(&self, new: NewDiscussion, now: DateTime<Utc>) -> Discussion {
        self.discussions.create(|id| Discussion {
            id,
            title: new.title,
            content: new.content,
            author: new.author,
            category: new.category,
            tags: new.tags,
            created_at: now,
            is_active: true,
        })
    }

    /// Active discussions in the queried category, newest first.
    pub fn discussions(&self, query: &CategoryQuery) -> Vec<Discussion> {
        let mut discussions = self
            .discussions
            .filter(|d| d.is_active && query.matches(&d.category));
        discussions.reverse();
        discussions
    }

    /// Comments on a discussion, or replies to a comment of it.
    ///
    /// # Errors
    ///
    /// - Errors if the discussion doesn't exist.
    /// - Errors if the parent comment doesn't exist on this discussion.
    /// - Errors if the reply would sit deeper than [`MAX_REPLY_DEPTH`].
    pub fn create_comment(
        &self,
        discussion_id: u64,
        new: NewComment,
        now: DateTime<Utc>,
    ) -> Result<Comment, Error> {
        self.discussions.require(&discussion_id)?;
        if let Some(parent) = new.parent_id {
            let mut depth = 0;
            let mut ancestor = Some(parent);
            while let Some(id) = ancestor {
                let comment = self
                    .comments
                    .get(&id)
                    .filter(|c| c.discussion_id == discussion_id)
                    .ok_or_else(|| Error::not_found(Comment::KIND, parent))?;
                depth += 1;
                if depth > MAX_REPLY_DEPTH {
                    return Err(Error::TooDeep {
                        kind: Comment::KIND,
                        id: parent.to_string(),
                    });
                }
                ancestor = comment.parent_id;
            }
        }

        Ok(self.comments.create(|id| Comment {
            id,
            discussion_id,
            parent_id: new.parent_id,
            author: new.author,
            content: new.content,
            created_at: now,
        }))
    }

    /// Comments of a discussion, oldest first. Without a parent in the
    /// query, every comment is listed.
    pub fn comments(&self, discussion_id: u64, query: &CommentQuery) -> Result<Vec<Comment>, Error> {
        self.discussions.require(&discussion_id)?;
        Ok(self.comments.filter(|c| {
            c.discussion_id == discussion_id
                && query.parent_id.map_or(true, |p| c.parent_id == Some(p))
        }))
    }

    /// Top level comments of a discussion with their replies nested.
    pub fn thread(&self, discussion_id: u64) -> Result<Vec<CommentThread>, Error> {
        let comments = self.comments(discussion_id, &CommentQuery::default())?;

        let mut children: HashMap<Option<u64>, Vec<Comment>> = HashMap::new();
        for comment in comments {
            children.entry(comment.parent_id).or_default().push(comment);
        }
        Ok(nest(None, &mut children))
    }
}

fn nest(parent: Option<u64>, children: &mut HashMap<Option<u64>, Vec<Comment>>) -> Vec<CommentThread> {
    children
        .remove(&parent)
        .unwrap_or_default()
        .into_iter()
        .map(|comment| {
            let replies = nest(Some(comment.id), children);
            CommentThread { comment, replies }
        })
        .collect()
}
