use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
};
use lettre::transport::smtp;
use serde::Serialize;

pub mod config;

pub mod location;
pub mod mail;
pub mod notify;
pub mod rate_limit;
pub mod store;
pub mod verify;

pub mod handle;
pub mod server;

/// The module for unit testing, will only be availabled in dev env.
#[cfg(test)]
mod tests;

pub use server::{router, Global};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid request body: {0}")]
    Body(JsonRejection),
    #[error("invalid query: {0}")]
    Query(QueryRejection),
    #[error("invalid path: {0}")]
    Path(PathRejection),
    #[error("validation failed: {0}")]
    Validation(validator::ValidationErrors),

    #[error("{kind} \"{id}\" not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{kind} \"{id}\" already processed")]
    AlreadyProcessed { kind: &'static str, id: String },
    #[error("{kind} \"{id}\" already exists")]
    Conflict { kind: &'static str, id: String },
    #[error("{kind} \"{id}\" is full")]
    Full { kind: &'static str, id: String },
    #[error("{kind} \"{id}\" is nested too deeply")]
    TooDeep { kind: &'static str, id: String },

    #[error("too many requests, try after {0} seconds")]
    ReqTooFrequent(u64),

    #[error("address error: {0}")]
    EmailAddress(lettre::address::AddressError),
    #[error("email message error: {0}")]
    Lettre(lettre::error::Error),
    #[error("failed to send email: {0}")]
    Smtp(smtp::Error),

    #[error("i/o error: {0}")]
    Io(std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(toml::de::Error),
    #[error("invalid config: {0}")]
    Config(String),
}

impl Error {
    pub fn to_status_code(&self) -> StatusCode {
        match self {
            Error::Body(_)
            | Error::Query(_)
            | Error::Path(_)
            | Error::Validation(_)
            | Error::TooDeep { .. }
            | Error::EmailAddress(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::AlreadyProcessed { .. } | Error::Conflict { .. } | Error::Full { .. } => {
                StatusCode::CONFLICT
            }
            Error::ReqTooFrequent(_) => StatusCode::TOO_MANY_REQUESTS,
            Error::Lettre(_)
            | Error::Smtp(_)
            | Error::Io(_)
            | Error::Toml(_)
            | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[inline]
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        #[derive(Serialize)]
        struct ErrorInfo {
            error: String,
        }

        let status = self.to_status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }

        let mut response = (
            status,
            axum::Json(ErrorInfo {
                error: self.to_string(),
            }),
        )
            .into_response();

        if let Error::ReqTooFrequent(secs) = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Implements `From<T>` for [`Error`].
macro_rules! impl_from {
    ($($t:ty => $v:ident),* $(,)?) => {
        $(
            impl From<$t> for $crate::Error {
                #[inline]
                fn from(err: $t) -> Self {
                    Self::$v(err)
                }
            }
        )*
    };
}

impl_from! {
    JsonRejection => Body,
    QueryRejection => Query,
    PathRejection => Path,
    validator::ValidationErrors => Validation,
    lettre::address::AddressError => EmailAddress,
    lettre::error::Error => Lettre,
    smtp::Error => Smtp,
    std::io::Error => Io,
    toml::de::Error => Toml,
}
