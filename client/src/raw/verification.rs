use std::borrow::Cow;

use campus_portal_shared::verification::{
    handle::{PendingRes, RegisterRes, VerifyDescriptor, VerifyRes},
    Action, Registration, VerificationRequest,
};
use reqwest::{Method, RequestBuilder, Response};

/// Submits a registration for review. Outputs the request id.
pub struct Register(pub Registration);

#[async_trait::async_trait]
impl super::Request for Register {
    type Output = String;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/verification/register")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json::<RegisterRes>().await?.request_id)
    }
}

pub struct Verify {
    pub request_id: String,
    pub action: Action,
    pub verified_by: String,
}

#[async_trait::async_trait]
impl super::Request for Verify {
    type Output = VerificationRequest;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/verification/verify")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.json(&VerifyDescriptor {
            request_id: self.request_id.clone(),
            action: self.action,
            verified_by: self.verified_by.clone(),
        }))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json::<VerifyRes>().await?.request)
    }
}

pub struct Status {
    pub request_id: String,
}

#[async_trait::async_trait]
impl super::Request for Status {
    type Output = VerificationRequest;
    const METHOD: Method = Method::GET;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Owned(format!(
            "/api/verification/status/{}",
            super::segment(&self.request_id)
        ))
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json().await?)
    }
}

pub struct Pending;

#[async_trait::async_trait]
impl super::Request for Pending {
    type Output = Vec<VerificationRequest>;
    const METHOD: Method = Method::GET;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/verification/pending")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json::<PendingRes>().await?.requests)
    }
}
