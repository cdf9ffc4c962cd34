//! Per-IP request counting over fixed windows.

use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use crate::{config::Gate, Error};

#[derive(Debug, Clone, Copy)]
struct Counter {
    count: u32,
    window_start: Instant,
}

/// A gate letting at most `max` requests per client through each window.
///
/// Counters of clients that went quiet are only reset when the same client
/// shows up again.
#[derive(Debug)]
pub struct RateLimiter {
    window: Duration,
    max: u32,
    counters: DashMap<String, Counter>,
}

impl RateLimiter {
    pub fn new(window: Duration, max: u32) -> Self {
        Self {
            window,
            max,
            counters: DashMap::new(),
        }
    }

    #[inline]
    pub fn from_gate(gate: Gate) -> Self {
        Self::new(gate.window(), gate.max)
    }

    /// Counts a request from `client`.
    ///
    /// # Errors
    ///
    /// - Errors if `client` went over the limit in the current window.
    #[inline]
    pub fn hit(&self, client: &str) -> Result<(), Error> {
        self.hit_at(client, Instant::now())
    }

    /// Counts a request from `client` made at `now`.
    pub fn hit_at(&self, client: &str, now: Instant) -> Result<(), Error> {
        let mut counter = self
            .counters
            .entry(client.to_owned())
            .or_insert(Counter {
                count: 0,
                window_start: now,
            });

        let elapsed = now.saturating_duration_since(counter.window_start);
        if elapsed >= self.window {
            counter.count = 0;
            counter.window_start = now;
        }
        counter.count += 1;

        if counter.count > self.max {
            let remaining = self.window.saturating_sub(elapsed.min(self.window));
            Err(Error::ReqTooFrequent(remaining.as_secs().max(1)))
        } else {
            Ok(())
        }
    }}

/// The address a request came from: the peer address, else the first
/// `X-Forwarded-For` entry.
pub fn client_ip<B>(req: &Request<B>) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    req.headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_owned())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Middleware applying a [`RateLimiter`].
pub async fn gate<B>(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request<B>,
    next: Next<B>,
) -> Result<Response, Error> {
    let client = client_ip(&req);
    if let Err(err) = limiter.hit(&client) {
        tracing::warn!("rate limited {client} on {}", req.uri().path());
        return Err(err);
    }
    Ok(next.run(req).await)
}
