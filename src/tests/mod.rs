mod discussion;
mod location;
mod safety;
mod social;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use axum::{
    body::Body,
    http::{self, Request, StatusCode},
    Router,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use crate::{
    config::{Config, Environment, Gate},
    mail::{Mail, Mailer},
    router, Error, Global,
};

/// Keeps every mail instead of sending it, or fails on demand.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Mail>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    fn sent(&self) -> Vec<Mail> {
        self.sent.lock().clone()
    }

    fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }

    fn clear(&self) {
        self.sent.lock().clear();
    }
}

#[axum::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: Mail) -> Result<(), Error> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "smtp relay unreachable",
            )));
        }
        self.sent.lock().push(mail);
        Ok(())
    }
}

fn address(s: &str) -> lettre::Address {
    s.parse().unwrap()
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.server.environment = Environment::Test;
    config.mail.frontend_url = "https://portal.campus.edu".to_owned();
    config.mail.reviewer = address("dean@campus.edu");
    config.notify.audience = vec![
        address("ada@campus.edu"),
        address("lin@campus.edu"),
        address("kai@campus.edu"),
    ];
    let loose = Gate {
        window_secs: 60,
        max: 1000,
    };
    config.rate_limit.api = loose;
    config.rate_limit.verification = loose;
    config
}

struct TestApp {
    router: Router,
    mailer: Arc<RecordingMailer>,
}

fn app_with(config: Config) -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    TestApp {
        router: router(Global::new(config, mailer.clone())),
        mailer,
    }
}

fn app() -> TestApp {
    app_with(test_config())
}

impl TestApp {
    async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post<T: Serialize>(&self, uri: &str, body: &T) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header(http::header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(serde_json::to_vec(body).unwrap().into())
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }
}

fn registration(username: &str) -> Value {
    json!({
        "name": "Jiening Yu",
        "studentId": "2522320",
        "email": format!("{username}@campus.edu"),
        "type": "student",
        "dorm": "North Hall",
        "room": "214",
        "program": "Computer Science",
        "username": username,
    })
}

fn text_post(content: &str) -> Value {
    json!({
        "type": "text",
        "content": content,
        "author": {
            "name": "Ada Chen",
            "username": "ada",
            "email": "ada@campus.edu",
        },
        "category": "general",
        "hashtags": ["#hello"],
    })
}
