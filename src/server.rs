//! Shared state and routing.

use std::{sync::Arc, time::Instant};

use axum::{
    extract::State,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use campus_portal_shared::HealthRes;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handle::{campus, discussion, location, post, safety, social, user, verification},
    location::LocationHub,
    mail::Mailer,
    rate_limit::{self, RateLimiter},
    store::Store,
    verify::Verification,
};

/// The two rate limit gates.
#[derive(Clone)]
pub struct Limits {
    pub api: Arc<RateLimiter>,
    pub verification: Arc<RateLimiter>,
}

/// State shared by every handler.
#[derive(Clone)]
pub struct Global {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub verification: Arc<Verification>,
    pub locations: Arc<LocationHub>,
    pub limits: Limits,
    pub started_at: Instant,
}

impl Global {
    /// Builds the state with a seeded store.
    pub fn new(config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store: Arc::new(Store::seeded()),
            verification: Arc::new(Verification::new(mailer, &config)),
            locations: Arc::new(LocationHub::new(config.location.channel_capacity)),
            limits: Limits {
                api: Arc::new(RateLimiter::from_gate(config.rate_limit.api)),
                verification: Arc::new(RateLimiter::from_gate(config.rate_limit.verification)),
            },
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }
}

/// Builds the application router.
pub fn router(global: Global) -> Router {
    let gated = Router::new()
        .route("/api/verification/register", post(verification::register))
        .route("/api/verification/verify", post(verification::verify))
        .route(
            "/api/verification/status/:request_id",
            get(verification::status),
        )
        .route("/api/verification/pending", get(verification::pending))
        .route("/api/posts/submit", post(post::submit))
        .route("/api/posts/verify", post(post::verify))
        .route_layer(middleware::from_fn_with_state(
            global.limits.verification.clone(),
            rate_limit::gate,
        ));

    let api = Router::new()
        .route("/api/posts/status/:post_id", get(post::status))
        .route("/api/posts/pending", get(post::pending))
        .route("/api/posts/approved", get(post::approved))
        // safety
        .route(
            "/api/safety/resources",
            get(safety::resources).post(safety::create_resource),
        )
        .route("/api/safety/resources/:id", get(safety::resource))
        .route(
            "/api/safety/alerts",
            get(safety::alerts).post(safety::create_alert),
        )
        .route("/api/safety/alerts/:id", get(safety::alert))
        // social
        .route(
            "/api/social/study-groups",
            get(social::study_groups).post(social::create_study_group),
        )
        .route(
            "/api/social/study-groups/:id/join",
            post(social::join_study_group),
        )
        .route(
            "/api/social/events",
            get(social::events).post(social::create_event),
        )
        .route("/api/social/events/:id/rsvp", post(social::rsvp))
        .route(
            "/api/social/connections",
            get(social::connections).post(social::request_connection),
        )
        .route(
            "/api/social/connections/:id/accept",
            post(social::accept_connection),
        )
        .route(
            "/api/social/messages",
            get(social::messages).post(social::send_message),
        )
        .route("/api/social/messages/:id/read", post(social::mark_read))
        .route("/api/social/roommates", get(social::roommates))
        // discussions
        .route(
            "/api/discussions",
            get(discussion::list).post(discussion::create),
        )
        .route("/api/discussions/:id", get(discussion::get))
        .route(
            "/api/discussions/:id/comments",
            get(discussion::comments).post(discussion::comment),
        )
        .route("/api/discussions/:id/thread", get(discussion::thread))
        // campus
        .route(
            "/api/campus/events",
            get(campus::events).post(campus::create_event),
        )
        .route("/api/campus/events/:id", get(campus::event))
        .route("/api/campus/buildings", get(campus::buildings))
        .route("/api/campus/buildings/:id", get(campus::building))
        .route("/api/campus/tools", get(campus::tools))
        // users
        .route("/api/users", get(user::list))
        .route("/api/users/:id", get(user::get))
        // location
        .route("/api/location/update", post(location::update))
        .route("/api/location/stop", post(location::stop))
        .route("/api/location/shared", get(location::shared))
        .route("/api/location/stream", get(location::stream))
        .merge(gated)
        .route_layer(middleware::from_fn_with_state(
            global.limits.api.clone(),
            rate_limit::gate,
        ));

    let cors = cors(&global.config.server.cors_origin);

    Router::new()
        .merge(api)
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            global.clone(),
            hide_internal_errors,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(global)
}

fn cors(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::from(Any)
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(err) => {
                tracing::warn!("invalid cors origin {origin:?}: {err}, cross-origin requests disabled");
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Replaces the message of server errors outside development.
async fn hide_internal_errors<B>(
    State(Global { config, .. }): State<Global>,
    req: Request<B>,
    next: Next<B>,
) -> Response {
    let res = next.run(req).await;
    if res.status().is_server_error() && !config.server.environment.is_development() {
        #[derive(serde::Serialize)]
        struct ErrorInfo {
            error: &'static str,
        }

        return (
            res.status(),
            Json(ErrorInfo {
                error: "internal server error",
            }),
        )
            .into_response();
    }
    res
}

async fn health(
    State(Global {
        config, started_at, ..
    }): State<Global>,
) -> (StatusCode, Json<HealthRes>) {
    (
        StatusCode::OK,
        Json(HealthRes {
            status: "ok".to_owned(),
            uptime: started_at.elapsed().as_secs_f64(),
            environment: config.server.environment.to_string(),
        }),
    )
}
