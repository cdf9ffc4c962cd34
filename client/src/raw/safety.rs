use std::borrow::Cow;

use campus_portal_shared::{
    safety::{AlertQuery, SafetyAlert, SafetyResource},
    CategoryQuery,
};
use reqwest::{Method, RequestBuilder, Response};

pub struct Resources(pub CategoryQuery);

#[async_trait::async_trait]
impl super::Request for Resources {
    type Output = Vec<SafetyResource>;
    const METHOD: Method = Method::GET;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/safety/resources")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.query(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json().await?)
    }
}

pub struct Alerts(pub AlertQuery);

#[async_trait::async_trait]
impl super::Request for Alerts {
    type Output = Vec<SafetyAlert>;
    const METHOD: Method = Method::GET;

    fn url_suffix(&self) -> Cow<'static, str> {
        Cow::Borrowed("/api/safety/alerts")
    }

    fn make_req(&self, req: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        Ok(req.query(&self.0))
    }

    async fn parse_res(&mut self, response: Response) -> anyhow::Result<Self::Output> {
        Ok(response.json().await?)
    }
}
