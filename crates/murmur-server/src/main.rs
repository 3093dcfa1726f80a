use murmur_error::ext::{ErrorResultExt, ResultExt};
use murmur_error::Result;
use murmur_server::{build_axum_router, telemetry, App};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[derive(Debug, Error)]
#[error("Could not start Murmur HTTP server")]
struct StartError;

#[tracing::instrument(skip_all, name = "server.run")]
async fn start_murmur_server(config: murmur_config::Server) -> Result<(), StartError> {
    if !murmur_utils::RELEASE {
        info!(?config, "Starting Murmur HTTP server...");
    }

    let app = App::new(config).change_context(StartError)?;

    debug!("applying pending migrations");
    app.primary_db
        .run_migrations()
        .await
        .change_context(StartError)?;

    debug!("binding server");
    let listener = TcpListener::bind((app.config.ip, app.config.port))
        .await
        .change_context(StartError)
        .attach_printable("could not bind server with address and port")?;

    let addr = listener
        .local_addr()
        .change_context(StartError)
        .attach_printable("could not get socket address of the server")?;

    let make_service =
        build_axum_router(app.clone()).into_make_service_with_connect_info::<SocketAddr>();

    info!("Murmur HTTP server is listening at http://{addr}");

    axum::serve(listener, make_service)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Received graceful shutdown signal. Shutting down server...");
        })
        .await
        .change_context(StartError)
        .attach_printable("could not serve Murmur HTTP service")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(..) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

fn main() -> Result<(), StartError> {
    let _ = murmur_utils::env::load_dotenv().change_context(StartError)?;

    let config = murmur_config::Server::from_env().change_context(StartError)?;
    telemetry::init(&config.logging).change_context(StartError)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(config.workers)
        .build()
        .change_context(StartError)?;

    runtime.block_on(start_murmur_server(config))
}
