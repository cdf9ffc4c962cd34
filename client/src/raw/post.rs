use std::borrow::Cow;

use campus_portal_shared::{
    post::{
        handle::{PostsRes, SubmitRes, VerifyPostDescriptor, VerifyPostRes},
        PostDraft, PostSubmission,
    },
    verification::Action,
};
use reqwest::{Method, RequestBuilder, Response};

/// Submits a post for review. Outputs the post id.
pub struct Submit(pub PostDraft);

#[async_trait::async_trait]
impl super::Request for Submit {
    type Output = String;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/posts/submit")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json::<SubmitRes>().await?.post_id)
    }
}

pub struct Verify {
    pub post_id: String,
    pub action: Action,
    pub reviewed_by: String,
    pub rejection_reason: Option<String>,
}

#[async_trait::async_trait]
impl super::Request for Verify {
    type Output = PostSubmission;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/posts/verify")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&VerifyPostDescriptor {
            post_id: self.post_id.clone(),
            action: self.action,
            reviewed_by: self.reviewed_by.clone(),
            rejection_reason: self.rejection_reason.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json::<VerifyPostRes>().await?.post)
    }
}

pub struct Status {
    pub post_id: String,
}

#[async_trait::async_trait]
impl super::Request for Status {
    type Output = PostSubmission;
    const METHOD: Method = Method::GET;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Owned(format!(
            "/api/posts/status/{}",
            super::segment(&self.post_id)
        ))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json().await?)
    }
}

/// Lists pending or approved posts.
pub enum List {
    Pending,
    Approved,
}

#[async_trait::async_trait]
impl super::Request for List {
    type Output = Vec<PostSubmission>;
    const METHOD: Method = Method::GET;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed(match self {
            List::Pending => "/api/posts/pending",
            List::Approved => "/api/posts/approved",
        })
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json::<PostsRes>().await?.posts)
    }
}
