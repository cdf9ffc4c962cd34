use std::net::SocketAddr;

use campus_portal::{
    config::{Config, Environment},
    mail, router, Error, Global,
};
use tracing::Level;

#[tokio::main]
async fn main() {
    let level = if Environment::detect().is_development() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // use an external function here so this won't be in a proc macro for better coding experience
    if let Err(err) = run().await {
        tracing::error!("server stopped: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Error> {
    let config = Config::load()?;
    let mailer = mail::from_config(&config.mail)?;
    let addr = SocketAddr::new(config.server.host, config.server.port);
    let environment = config.server.environment;

    let app = router(Global::new(config, mailer));

    let server = axum::Server::try_bind(&addr).map_err(io_error)?;
    tracing::info!("listening on {addr} ({environment})");
    server
        .serve(app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown())
        .await
        .map_err(io_error)?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn io_error(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::Other, err))
}
