use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr},
    path::Path,
    str::FromStr,
    time::Duration,
};

use serde::Deserialize;

use crate::Error;

/// Where the config file is read from unless `PORTAL_CONFIG` says otherwise.
pub const DEFAULT_PATH: &str = "./data/config.toml";

/// Describing the server configuration.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: Server,
    pub mail: Mail,
    pub rate_limit: RateLimits,
    pub notify: Notify,
    pub location: Location,
}

impl Config {
    /// Reads the config file, then applies environment overrides.
    pub fn load() -> Result<Self, Error> {
        let path = env::var("PORTAL_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_owned());
        let mut config = Self::from_path(&path)?;
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a toml config file, or the defaults if the file is absent.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Ok(toml::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// Overrides fields with environment variables looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        if let Some(port) = var("PORT") {
            self.server.port = parse("PORT", &port)?;
        }
        if let Some(origin) = var("CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Some(environment) = var("APP_ENV").or_else(|| var("NODE_ENV")) {
            self.server.environment = parse("APP_ENV", &environment)?;
        }
        if let Some(user) = var("EMAIL_USER") {
            // mail accounts are usually addressed by their login
            if let Ok(address) = user.parse() {
                self.mail.address = address;
            }
            self.mail.username = user;
        }
        if let Some(pass) = var("EMAIL_PASS") {
            self.mail.password = pass;
        }
        if let Some(url) = var("FRONTEND_URL") {
            self.mail.frontend_url = url;
        }
        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, Error>
where
    T::Err: Display,
{
    value.parse().map_err(|err| {
        tracing::warn!("invalid {key} value: {err}");
        Error::Config(format!("{key}: {err}"))
    })
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Server {
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origin, `*` for any.
    pub cors_origin: String,
    pub environment: Environment,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            cors_origin: "http://localhost:3000".to_owned(),
            environment: Environment::Development,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// Reads `APP_ENV`, or `NODE_ENV`, without touching the rest of the config.
    pub fn detect() -> Self {
        env::var("APP_ENV")
            .or_else(|_| env::var("NODE_ENV"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Environment::Development)
    }

    #[inline]
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(format!("unknown environment \"{other}\"")),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        })
    }
}

/// Describing mailing configuration.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Mail {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Sender address.
    pub address: lettre::Address,
    /// Who receives review requests.
    pub reviewer: lettre::Address,
    /// Root of the action links embedded in review requests.
    pub frontend_url: String,
    /// SMTP connection timeout, as seconds.
    pub timeout_secs: u64,
}

impl Mail {
    /// Whether credentials were configured for real delivery.
    #[inline]
    pub fn enabled(&self) -> bool {
        !self.server.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Mail {
    fn default() -> Self {
        Self {
            server: "smtp.gmail.com".to_owned(),
            port: 465,
            username: String::default(),
            password: String::default(),
            address: lettre::Address::new("noreply", "campus.local")
                .expect("static address is valid"),
            reviewer: lettre::Address::new("reviewer", "campus.local")
                .expect("static address is valid"),
            frontend_url: "http://localhost:3000".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// One rate limit gate.
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Gate {
    pub window_secs: u64,
    pub max: u32,
}

impl Gate {
    #[inline]
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct RateLimits {
    /// Applied to every `/api` route.
    pub api: Gate,
    /// Applied on top of `api` to submission and verification routes.
    pub verification: Gate,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            api: Gate {
                window_secs: 15 * 60,
                max: 100,
            },
            verification: Gate {
                window_secs: 15 * 60,
                max: 10,
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Notify {
    /// Users told about newly approved posts.
    pub audience: Vec<lettre::Address>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(default)]
pub struct Location {
    /// Snapshots buffered per subscriber before it starts skipping.
    pub channel_capacity: usize,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            channel_capacity: 16,
        }
    }
}
